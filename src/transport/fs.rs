use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;
use walkdir::WalkDir;

use crate::config::{Algorithm, NameLevel, NameType, group_metadata_path, taxonomy_path};
use crate::constants::layout::{
    GROUP_NAMES_DIR, GROUP_NAMES_EXTENSION, TAXONOMIES_DIR, TAXONOMY_EXTENSION,
};

/// Which artifacts a data root holds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactInventory {
    /// Expected artifacts found on disk.
    pub present: Vec<PathBuf>,
    /// Expected artifacts not found on disk.
    pub missing: Vec<PathBuf>,
    /// Table or metadata files that no accessor reads.
    pub unexpected: Vec<PathBuf>,
}

impl ArtifactInventory {
    /// True when every expected artifact is present.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Every artifact path the accessors can read under `root`.
pub fn expected_artifacts(root: &Path) -> Vec<PathBuf> {
    let tables = Algorithm::ALL.into_iter().map(|alg| taxonomy_path(root, alg));
    let names = NameType::ALL.into_iter().flat_map(|name_type| {
        NameLevel::ALL
            .into_iter()
            .map(move |level| group_metadata_path(root, level, name_type))
    });
    tables.chain(names).collect()
}

/// Scan `root` and sort expected artifacts into present and missing.
pub fn scan_artifacts(root: &Path) -> ArtifactInventory {
    let mut inventory = ArtifactInventory::default();
    let expected = expected_artifacts(root);
    for path in &expected {
        if path.is_file() {
            inventory.present.push(path.clone());
        } else {
            inventory.missing.push(path.clone());
        }
    }

    let scans = [
        (root.join(TAXONOMIES_DIR), TAXONOMY_EXTENSION),
        (root.join(GROUP_NAMES_DIR), GROUP_NAMES_EXTENSION),
    ];
    for (dir, extension) in scans {
        for entry in WalkDir::new(&dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
        {
            let path = entry.path();
            if has_extension(path, extension) && !expected.iter().any(|known| known == path) {
                warn!(
                    "[taxonomy:inventory] unexpected artifact in data root: {}",
                    path.display()
                );
                inventory.unexpected.push(path.to_path_buf());
            }
        }
    }
    inventory
}

/// True if the path has `extension` (case-insensitive).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
