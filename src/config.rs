use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::constants::group_names::{LEVEL_EXPECTED, MAX_NAMED_LEVEL, NAME_TYPE_EXPECTED};
use crate::constants::layout::{
    DATA_DIR_ENV, DEFAULT_DATA_DIR, GROUP_NAMES_DIR, GROUP_NAMES_EXTENSION, TAXONOMIES_DIR,
};
use crate::constants::taxonomy::{ALG_EXPECTED, CENTROIDS_FILE, COOCCURRENCE_FILE, IMBALANCED_FILE};
use crate::errors::TaxonomyError;

/// Algorithm used to build a taxonomy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Community detection over the entity co-occurrence network.
    #[default]
    Cooccurrence,
    /// Semantic clustering around embedding centroids.
    Centroids,
    /// Semantic clustering allowing imbalanced cluster sizes.
    Imbalanced,
}

impl Algorithm {
    /// All algorithms, in the order they are documented.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Cooccurrence,
        Algorithm::Centroids,
        Algorithm::Imbalanced,
    ];

    /// Argument spelling (`cooccurrence`, `centroids`, `imbalanced`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Cooccurrence => "cooccurrence",
            Algorithm::Centroids => "centroids",
            Algorithm::Imbalanced => "imbalanced",
        }
    }

    /// Table file name under the taxonomies directory.
    pub const fn file_name(&self) -> &'static str {
        match self {
            Algorithm::Cooccurrence => COOCCURRENCE_FILE,
            Algorithm::Centroids => CENTROIDS_FILE,
            Algorithm::Imbalanced => IMBALANCED_FILE,
        }
    }
}

impl FromStr for Algorithm {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| TaxonomyError::invalid_argument("alg", s, ALG_EXPECTED))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method used to name taxonomy groups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum NameType {
    /// Names, confidence and discarded entities produced by a language model.
    #[default]
    #[serde(rename = "chatgpt")]
    ChatGpt,
    /// The five most frequent entities of each group.
    #[serde(rename = "entities")]
    Entities,
}

impl NameType {
    /// All naming methods.
    pub const ALL: [NameType; 2] = [NameType::ChatGpt, NameType::Entities];

    /// Argument spelling, also the directory name under `group_names`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NameType::ChatGpt => "chatgpt",
            NameType::Entities => "entities",
        }
    }
}

impl FromStr for NameType {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NameType::ALL
            .into_iter()
            .find(|name_type| name_type.as_str() == s)
            .ok_or_else(|| TaxonomyError::invalid_argument("name_type", s, NAME_TYPE_EXPECTED))
    }
}

impl fmt::Display for NameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Taxonomy level that carries group names (1 through 3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NameLevel(u8);

impl NameLevel {
    /// All named levels, outermost first.
    pub const ALL: [NameLevel; 3] = [NameLevel(1), NameLevel(2), NameLevel(3)];

    /// Numeric level.
    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl Default for NameLevel {
    fn default() -> Self {
        NameLevel(1)
    }
}

impl TryFrom<i64> for NameLevel {
    type Error = TaxonomyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(level) if (1..=MAX_NAMED_LEVEL).contains(&level) => Ok(NameLevel(level)),
            _ => Err(TaxonomyError::invalid_argument(
                "level",
                value,
                LEVEL_EXPECTED,
            )),
        }
    }
}

impl fmt::Display for NameLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolve the data root: explicit path, then the environment, then `data`.
pub fn resolve_data_root(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(root) = explicit {
        return root;
    }
    match env::var(DATA_DIR_ENV) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

/// Path of the taxonomy table built by `alg` under `root`.
pub fn taxonomy_path(root: &Path, alg: Algorithm) -> PathBuf {
    root.join(TAXONOMIES_DIR).join(alg.file_name())
}

/// Path of the group metadata file for `level` and `name_type` under `root`.
pub fn group_metadata_path(root: &Path, level: NameLevel, name_type: NameType) -> PathBuf {
    root.join(GROUP_NAMES_DIR)
        .join(name_type.as_str())
        .join(format!("level_{}.{}", level.get(), GROUP_NAMES_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithms_parse_exactly_and_map_to_files() {
        assert_eq!(
            "cooccurrence".parse::<Algorithm>().unwrap().file_name(),
            "community_detection.parquet"
        );
        assert_eq!(
            "centroids".parse::<Algorithm>().unwrap().file_name(),
            "semantic_centroids.parquet"
        );
        assert_eq!(
            "imbalanced".parse::<Algorithm>().unwrap().file_name(),
            "semantic_imbalanced.parquet"
        );
        for bad in ["", "Cooccurrence", "louvain", " centroids"] {
            let err = bad.parse::<Algorithm>().unwrap_err();
            assert!(err.is_invalid_argument(), "{bad:?} should be rejected");
        }
        assert_eq!(Algorithm::default(), Algorithm::Cooccurrence);
    }

    #[test]
    fn name_levels_accept_only_one_through_three() {
        for level in 1..=3 {
            assert_eq!(NameLevel::try_from(level).unwrap().get() as i64, level);
        }
        for level in [0, 4, -1, 256, i64::MAX] {
            assert!(NameLevel::try_from(level).unwrap_err().is_invalid_argument());
        }
        assert_eq!(NameLevel::default().get(), 1);
    }

    #[test]
    fn name_types_parse_exactly() {
        assert_eq!("chatgpt".parse::<NameType>().unwrap(), NameType::ChatGpt);
        assert_eq!("entities".parse::<NameType>().unwrap(), NameType::Entities);
        assert!("gpt".parse::<NameType>().unwrap_err().is_invalid_argument());
        assert_eq!(NameType::default(), NameType::ChatGpt);
    }

    #[test]
    fn paths_follow_data_layout() {
        let root = Path::new("data");
        assert_eq!(
            taxonomy_path(root, Algorithm::Centroids),
            PathBuf::from("data/taxonomies/semantic_centroids.parquet")
        );
        assert_eq!(
            group_metadata_path(root, NameLevel::ALL[2], NameType::Entities),
            PathBuf::from("data/group_names/entities/level_3.json")
        );
    }

    #[test]
    fn explicit_root_wins_resolution() {
        let explicit = PathBuf::from("/srv/taxonomy");
        assert_eq!(resolve_data_root(Some(explicit.clone())), explicit);
    }
}
