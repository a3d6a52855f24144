use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{
    Algorithm, NameLevel, NameType, group_metadata_path, resolve_data_root, taxonomy_path,
};
use crate::errors::TaxonomyError;
use crate::metadata::{GroupMetadata, read_group_metadata};
use crate::taxonomy::{TaxonomyTable, read_taxonomy_table};
use crate::transport::fs::{ArtifactInventory, scan_artifacts};

/// Read-only accessor for the taxonomy artifacts under one data root.
///
/// Holds nothing but the root path; every call re-reads its file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaxonomyStore {
    root: PathBuf,
}

impl TaxonomyStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store rooted at the environment override, or `data`.
    pub fn from_env() -> Self {
        Self::new(resolve_data_root(None))
    }

    /// Data root this store reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the table for `alg`.
    pub fn taxonomy_path(&self, alg: Algorithm) -> PathBuf {
        taxonomy_path(&self.root, alg)
    }

    /// Path of the group metadata file for `level` and `name_type`.
    pub fn group_metadata_path(&self, level: NameLevel, name_type: NameType) -> PathBuf {
        group_metadata_path(&self.root, level, name_type)
    }

    /// Load the taxonomy built by `alg` (`cooccurrence`, `centroids`, or `imbalanced`).
    pub fn get_taxonomy(&self, alg: &str) -> Result<TaxonomyTable, TaxonomyError> {
        let alg: Algorithm = alg.parse()?;
        self.load_taxonomy(alg)
    }

    /// Load the taxonomy built by an already-validated algorithm.
    pub fn load_taxonomy(&self, alg: Algorithm) -> Result<TaxonomyTable, TaxonomyError> {
        let path = self.taxonomy_path(alg);
        debug!("[taxonomy] alg={} selects {}", alg, path.display());
        read_taxonomy_table(&path, alg)
    }

    /// Load group names for `level` (1 to 3) and `name_type` (`chatgpt` or `entities`).
    ///
    /// `level` is checked before `name_type`; both are checked before any read.
    pub fn get_group_metadata(
        &self,
        level: i64,
        name_type: &str,
    ) -> Result<GroupMetadata, TaxonomyError> {
        let level = NameLevel::try_from(level)?;
        let name_type: NameType = name_type.parse()?;
        self.load_group_metadata(level, name_type)
    }

    /// Load group names for an already-validated level and naming method.
    pub fn load_group_metadata(
        &self,
        level: NameLevel,
        name_type: NameType,
    ) -> Result<GroupMetadata, TaxonomyError> {
        let path = self.group_metadata_path(level, name_type);
        debug!(
            "[taxonomy] level={} name_type={} selects {}",
            level,
            name_type,
            path.display()
        );
        read_group_metadata(&path, level, name_type)
    }

    /// Report which expected artifacts exist under the root.
    pub fn inventory(&self) -> ArtifactInventory {
        scan_artifacts(&self.root)
    }
}

impl Default for TaxonomyStore {
    fn default() -> Self {
        Self::from_env()
    }
}
