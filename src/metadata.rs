use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::info;

use crate::config::{NameLevel, NameType};
use crate::constants::group_names::{MAX_CONFIDENCE, TOP_ENTITY_LIMIT};
use crate::errors::TaxonomyError;
use crate::label::{GroupLabel, compare_labels};
use crate::types::{EntityName, GroupNameText, LabelString};

/// Language-model name for one taxonomy group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupName {
    /// Group name, e.g. `Analytical chemistry`.
    pub name: GroupNameText,
    /// Confidence the model reported for the name, 0 to 100, as written on disk.
    pub confidence: Number,
    /// Entities that made the group ambiguous and were left out when naming.
    pub discard: Vec<EntityName>,
    /// Any further fields of the record, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Contents of one group metadata file, keyed by group label in file order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupMetadata {
    /// `chatgpt` files: a name record per group.
    Named(IndexMap<LabelString, GroupName>),
    /// `entities` files: the most frequent entities per group.
    TopEntities(IndexMap<LabelString, Vec<EntityName>>),
}

impl GroupMetadata {
    /// Naming method this mapping came from.
    pub fn name_type(&self) -> NameType {
        match self {
            GroupMetadata::Named(_) => NameType::ChatGpt,
            GroupMetadata::TopEntities(_) => NameType::Entities,
        }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        match self {
            GroupMetadata::Named(map) => map.len(),
            GroupMetadata::TopEntities(map) => map.len(),
        }
    }

    /// True when no groups are present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Group labels in taxonomy order (`2` before `10`, `1` before `1_0`).
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = match self {
            GroupMetadata::Named(map) => map.keys().map(String::as_str).collect(),
            GroupMetadata::TopEntities(map) => map.keys().map(String::as_str).collect(),
        };
        labels.sort_by(|left, right| compare_labels(left, right));
        labels
    }

    /// Readable name for a group: the model name, or the top entities joined.
    pub fn display_name(&self, label: &str) -> Option<String> {
        match self {
            GroupMetadata::Named(map) => map.get(label).map(|group| group.name.clone()),
            GroupMetadata::TopEntities(map) => map.get(label).map(|entities| entities.join(", ")),
        }
    }

    /// Name records, when this came from a `chatgpt` file.
    pub fn as_named(&self) -> Option<&IndexMap<LabelString, GroupName>> {
        match self {
            GroupMetadata::Named(map) => Some(map),
            GroupMetadata::TopEntities(_) => None,
        }
    }

    /// Entity lists, when this came from an `entities` file.
    pub fn as_top_entities(&self) -> Option<&IndexMap<LabelString, Vec<EntityName>>> {
        match self {
            GroupMetadata::Named(_) => None,
            GroupMetadata::TopEntities(map) => Some(map),
        }
    }
}

/// Read and check a group metadata file for `level` and `name_type`.
pub fn read_group_metadata(
    path: &Path,
    level: NameLevel,
    name_type: NameType,
) -> Result<GroupMetadata, TaxonomyError> {
    let metadata = match name_type {
        NameType::ChatGpt => {
            let map: IndexMap<LabelString, GroupName> = read_json(path)?;
            for (label, group) in &map {
                check_label(path, level, label)?;
                let in_range = group
                    .confidence
                    .as_f64()
                    .is_some_and(|confidence| (0.0..=MAX_CONFIDENCE).contains(&confidence));
                if !in_range {
                    return Err(TaxonomyError::Schema {
                        path: path.to_path_buf(),
                        details: format!(
                            "group {label} has confidence {} outside 0..={MAX_CONFIDENCE}",
                            group.confidence
                        ),
                    });
                }
            }
            GroupMetadata::Named(map)
        }
        NameType::Entities => {
            let map: IndexMap<LabelString, Vec<EntityName>> = read_json(path)?;
            for (label, entities) in &map {
                check_label(path, level, label)?;
                if entities.len() > TOP_ENTITY_LIMIT {
                    return Err(TaxonomyError::Schema {
                        path: path.to_path_buf(),
                        details: format!(
                            "group {label} lists {} entities, at most {TOP_ENTITY_LIMIT} expected",
                            entities.len()
                        ),
                    });
                }
            }
            GroupMetadata::TopEntities(map)
        }
    };
    info!(
        "[taxonomy:names] loaded {} (level={}, name_type={}, groups={})",
        path.display(),
        level,
        name_type,
        metadata.len()
    );
    Ok(metadata)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TaxonomyError> {
    let bytes = fs::read(path).map_err(|source| TaxonomyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| TaxonomyError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Keys must be labels no deeper than the file's level; cascaded groups are shallower.
fn check_label(path: &Path, level: NameLevel, label: &str) -> Result<(), TaxonomyError> {
    let parsed = GroupLabel::parse(label).map_err(|err| TaxonomyError::Schema {
        path: path.to_path_buf(),
        details: format!("key '{label}' is not a group label: {err}"),
    })?;
    if parsed.depth() > usize::from(level.get()) {
        return Err(TaxonomyError::Schema {
            path: path.to_path_buf(),
            details: format!("key '{label}' is deeper than level {level}"),
        });
    }
    Ok(())
}
