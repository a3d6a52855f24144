use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::constants::taxonomy::LABEL_SEPARATOR;
use crate::types::LabelString;

/// Reason a label string was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LabelParseError {
    /// The label was the empty string.
    Empty,
    /// A component between separators was empty (`0__1`, `_0`, `0_`).
    EmptyComponent {
        /// Zero-based component index.
        position: usize,
    },
    /// A component contained something other than ASCII digits.
    NonNumeric {
        /// Zero-based component index.
        position: usize,
        /// The offending component text.
        component: String,
    },
}

impl fmt::Display for LabelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "label is empty"),
            Self::EmptyComponent { position } => {
                write!(f, "label component {position} is empty")
            }
            Self::NonNumeric {
                position,
                component,
            } => write!(f, "label component {position} ('{component}') is not an integer"),
        }
    }
}

impl std::error::Error for LabelParseError {}

/// A validated taxonomy group label such as `0_1_3`.
///
/// Each `_`-separated component is a group index within its parent; the number
/// of components is the label's depth. Cascaded rows reuse a shallower label at
/// deeper levels, so a label's depth can be smaller than the level it sits at.
///
/// Labels order by their integer components, so `2` sorts before `10` and a
/// parent sorts directly before its children.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupLabel {
    raw: LabelString,
}

impl GroupLabel {
    /// Parse and validate a label string.
    pub fn parse(raw: &str) -> Result<Self, LabelParseError> {
        if raw.is_empty() {
            return Err(LabelParseError::Empty);
        }
        for (position, component) in raw.split(LABEL_SEPARATOR).enumerate() {
            if component.is_empty() {
                return Err(LabelParseError::EmptyComponent { position });
            }
            if !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(LabelParseError::NonNumeric {
                    position,
                    component: component.to_string(),
                });
            }
        }
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    /// Raw label text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of components.
    pub fn depth(&self) -> usize {
        self.raw.split(LABEL_SEPARATOR).count()
    }

    /// Components as strings, outermost first.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.raw.split(LABEL_SEPARATOR)
    }

    /// Label of the enclosing group, or `None` for a top-level label.
    pub fn parent(&self) -> Option<GroupLabel> {
        self.raw
            .rsplit_once(LABEL_SEPARATOR)
            .map(|(parent, _)| GroupLabel {
                raw: parent.to_string(),
            })
    }

    /// Child label formed by appending `_<index>`.
    pub fn child(&self, index: u32) -> GroupLabel {
        GroupLabel {
            raw: format!("{}{}{}", self.raw, LABEL_SEPARATOR, index),
        }
    }

    /// True if `other` equals this label or is nested beneath it.
    pub fn is_ancestor_of(&self, other: &GroupLabel) -> bool {
        match other.raw.strip_prefix(self.raw.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with(LABEL_SEPARATOR),
            None => false,
        }
    }
}

impl Ord for GroupLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_labels(&self.raw, &other.raw)
    }
}

impl PartialOrd for GroupLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Order two label strings component by component as integers.
///
/// A prefix sorts before the labels nested under it. Components that do not
/// parse as integers fall back to text order, and ties are broken on the raw
/// text so the order stays total.
pub fn compare_labels(left: &str, right: &str) -> Ordering {
    let mut left_parts = left.split(LABEL_SEPARATOR);
    let mut right_parts = right.split(LABEL_SEPARATOR);
    loop {
        match (left_parts.next(), right_parts.next()) {
            (None, None) => return left.cmp(right),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => {
                let order = match (a.parse::<u64>(), b.parse::<u64>()) {
                    (Ok(a_num), Ok(b_num)) => a_num.cmp(&b_num),
                    _ => a.cmp(b),
                };
                if order != Ordering::Equal {
                    return order;
                }
            }
        }
    }
}

impl FromStr for GroupLabel {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for GroupLabel {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_labels_and_reports_depth() {
        let label = GroupLabel::parse("0_12_3").unwrap();
        assert_eq!(label.depth(), 3);
        assert_eq!(label.components().collect::<Vec<_>>(), vec!["0", "12", "3"]);
        assert_eq!(label.to_string(), "0_12_3");
        assert_eq!(GroupLabel::parse("7").unwrap().depth(), 1);
    }

    #[test]
    fn rejects_malformed_labels() {
        assert_eq!(GroupLabel::parse(""), Err(LabelParseError::Empty));
        assert_eq!(
            GroupLabel::parse("0__1"),
            Err(LabelParseError::EmptyComponent { position: 1 })
        );
        assert_eq!(
            GroupLabel::parse("0_"),
            Err(LabelParseError::EmptyComponent { position: 1 })
        );
        assert_eq!(
            GroupLabel::parse("0_a"),
            Err(LabelParseError::NonNumeric {
                position: 1,
                component: "a".to_string()
            })
        );
        assert!("-1".parse::<GroupLabel>().is_err());
    }

    #[test]
    fn parent_and_child_follow_separator_nesting() {
        let label = GroupLabel::parse("0_1_3").unwrap();
        let parent = label.parent().unwrap();
        assert_eq!(parent.as_str(), "0_1");
        assert_eq!(parent.parent().unwrap().as_str(), "0");
        assert!(parent.parent().unwrap().parent().is_none());
        assert_eq!(parent.child(3), label);
    }

    #[test]
    fn labels_order_by_integer_components() {
        let mut raw = vec!["10", "2", "1_0", "1", "0_10", "0_9", "02"];
        raw.sort_by(|a, b| compare_labels(a, b));
        assert_eq!(raw, vec!["0_9", "0_10", "1", "1_0", "02", "2", "10"]);

        let mut labels: Vec<GroupLabel> = ["10", "1_0", "2"]
            .iter()
            .map(|raw| GroupLabel::parse(raw).unwrap())
            .collect();
        labels.sort();
        let sorted: Vec<&str> = labels.iter().map(GroupLabel::as_str).collect();
        assert_eq!(sorted, vec!["1_0", "2", "10"]);
    }

    #[test]
    fn ancestry_respects_component_boundaries() {
        let root = GroupLabel::parse("1").unwrap();
        let nested = GroupLabel::parse("1_4_2").unwrap();
        let sibling = GroupLabel::parse("11_4").unwrap();
        assert!(root.is_ancestor_of(&nested));
        assert!(root.is_ancestor_of(&root));
        assert!(!root.is_ancestor_of(&sibling));
        assert!(!nested.is_ancestor_of(&root));
    }
}
