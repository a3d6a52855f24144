/// Filesystem access to the data root.
pub mod fs;
