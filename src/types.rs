/// Raw taxonomy group label as stored on disk.
/// Examples: `0`, `0_1`, `12_3_0_4_2`
pub type LabelString = String;
/// Wikipedia entity title.
/// Examples: `Analytical chemistry`, `John Wiley & Sons`
pub type EntityName = String;
/// Human-readable group name assigned by the naming step.
/// Example: `Analytical chemistry`
pub type GroupNameText = String;
