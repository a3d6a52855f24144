#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line runner shared by the demos.
pub mod apps;
/// Argument types and data root resolution.
pub mod config;
/// Centralized constants for the data layout, tables, and group names.
pub mod constants;
/// Taxonomy group labels.
pub mod label;
/// Group metadata files (language-model names and top entities).
pub mod metadata;
/// Data-root-bound accessors.
pub mod store;
/// Taxonomy tables.
pub mod taxonomy;
/// Filesystem access to the data root.
pub mod transport;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::{Algorithm, NameLevel, NameType};
pub use errors::TaxonomyError;
pub use label::{GroupLabel, LabelParseError};
pub use metadata::{GroupMetadata, GroupName};
pub use store::TaxonomyStore;
pub use taxonomy::{TaxonomyRow, TaxonomyTable};
pub use transport::fs::ArtifactInventory;
pub use types::{EntityName, GroupNameText, LabelString};

/// Load a full taxonomy table from the data root.
///
/// `alg` is one of `cooccurrence` (the most useful taxonomy), `centroids`, or
/// `imbalanced`. The data root is `INNOVATION_TAXONOMY_DATA_DIR` when set, else
/// `data` relative to the working directory.
pub fn get_taxonomy(alg: &str) -> Result<TaxonomyTable, TaxonomyError> {
    TaxonomyStore::from_env().get_taxonomy(alg)
}

/// Load the group names for one level of the co-occurrence taxonomy.
///
/// `level` is 1 (disciplines), 2 (domains), or 3 (areas). `name_type` is
/// `chatgpt` for model-assigned names or `entities` for the five most frequent
/// entities in each group. The data root is resolved as in [`get_taxonomy`].
pub fn get_group_metadata(level: i64, name_type: &str) -> Result<GroupMetadata, TaxonomyError> {
    TaxonomyStore::from_env().get_group_metadata(level, name_type)
}
