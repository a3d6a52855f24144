use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::{Field, Row};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Algorithm;
use crate::constants::taxonomy::{COLUMNS, ENTITY_COLUMN, LEVEL_COUNT};
use crate::errors::TaxonomyError;
use crate::label::{GroupLabel, compare_labels};
use crate::types::{EntityName, LabelString};

/// One taxonomy row: an entity and its label at each of the five levels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaxonomyRow {
    /// Labels for `Level_1` through `Level_5`, outermost first.
    pub levels: [LabelString; LEVEL_COUNT],
    /// The Wikipedia entity being categorised.
    pub entity: EntityName,
}

impl TaxonomyRow {
    /// Label at a 1-based `level`, or `None` outside 1..=5.
    pub fn label(&self, level: usize) -> Option<&str> {
        level
            .checked_sub(1)
            .and_then(|idx| self.levels.get(idx))
            .map(String::as_str)
    }
}

/// A full taxonomy table, rows kept in file order.
#[derive(Clone, Debug)]
pub struct TaxonomyTable {
    algorithm: Algorithm,
    rows: Vec<TaxonomyRow>,
}

impl TaxonomyTable {
    /// Build a table from already-decoded rows.
    pub fn new(algorithm: Algorithm, rows: Vec<TaxonomyRow>) -> Self {
        Self { algorithm, rows }
    }

    /// Algorithm that produced this table.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Column names, `Level_1` through `Level_5` then `Entity`.
    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in file order.
    pub fn rows(&self) -> &[TaxonomyRow] {
        &self.rows
    }

    /// Consume the table, returning its rows.
    pub fn into_rows(self) -> Vec<TaxonomyRow> {
        self.rows
    }

    /// Entities whose label at the label's own depth equals `label`.
    ///
    /// Rows whose branch stopped above that depth carry a cascaded shallower
    /// label there and do not match.
    pub fn entities_in(&self, label: &GroupLabel) -> Vec<&str> {
        let level = label.depth();
        self.rows
            .iter()
            .filter(|row| row.label(level) == Some(label.as_str()))
            .map(|row| row.entity.as_str())
            .collect()
    }

    /// Distinct labels present at a 1-based `level`, in label order.
    pub fn groups_at(&self, level: usize) -> Vec<&str> {
        let mut groups: Vec<&str> = self
            .rows
            .iter()
            .filter_map(|row| row.label(level))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        groups.sort_by(|left, right| compare_labels(left, right));
        groups
    }

    /// First row for `entity`, if any.
    pub fn find_entity(&self, entity: &str) -> Option<&TaxonomyRow> {
        self.rows.iter().find(|row| row.entity == entity)
    }
}

/// Read a taxonomy table from a parquet file.
///
/// The file must hold exactly the six string columns (any order).
pub fn read_taxonomy_table(
    path: &Path,
    algorithm: Algorithm,
) -> Result<TaxonomyTable, TaxonomyError> {
    let file = File::open(path).map_err(|source| TaxonomyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = SerializedFileReader::new(file).map_err(|err| TaxonomyError::Parquet {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;

    let slots = column_slots(path, &reader)?;
    debug!(
        "[taxonomy:table] reading {} (row_groups={})",
        path.display(),
        reader.num_row_groups()
    );

    let iter = reader.get_row_iter(None).map_err(|err| TaxonomyError::Parquet {
        path: path.to_path_buf(),
        reason: format!("failed iterating rows: {err}"),
    })?;
    let mut rows = Vec::new();
    for (index, row_result) in iter.enumerate() {
        let row = row_result.map_err(|err| TaxonomyError::Parquet {
            path: path.to_path_buf(),
            reason: format!("failed reading row {index}: {err}"),
        })?;
        rows.push(decode_row(path, index, &slots, &row)?);
    }

    info!(
        "[taxonomy:table] loaded {} (alg={}, rows={})",
        path.display(),
        algorithm,
        rows.len()
    );
    Ok(TaxonomyTable::new(algorithm, rows))
}

/// Map each schema position to its canonical column index.
fn column_slots(
    path: &Path,
    reader: &SerializedFileReader<File>,
) -> Result<Vec<usize>, TaxonomyError> {
    let schema = reader.metadata().file_metadata().schema();
    let fields = schema.get_fields();
    let names: Vec<&str> = fields.iter().map(|field| field.name()).collect();

    let mut slots = Vec::with_capacity(fields.len());
    let mut seen = [false; COLUMNS.len()];
    for field in fields {
        let Some(slot) = COLUMNS.iter().position(|column| *column == field.name()) else {
            return Err(schema_error(path, &names));
        };
        if seen[slot] || !field.is_primitive() {
            return Err(schema_error(path, &names));
        }
        seen[slot] = true;
        slots.push(slot);
    }
    if !seen.iter().all(|present| *present) {
        return Err(schema_error(path, &names));
    }
    Ok(slots)
}

fn schema_error(path: &Path, names: &[&str]) -> TaxonomyError {
    TaxonomyError::Schema {
        path: path.to_path_buf(),
        details: format!(
            "expected columns [{}], found [{}]",
            COLUMNS.join(", "),
            names.join(", ")
        ),
    }
}

fn decode_row(
    path: &Path,
    index: usize,
    slots: &[usize],
    row: &Row,
) -> Result<TaxonomyRow, TaxonomyError> {
    let mut values: [String; COLUMNS.len()] = Default::default();
    for ((name, field), slot) in row.get_column_iter().zip(slots) {
        values[*slot] = field_text(field).ok_or_else(|| TaxonomyError::Schema {
            path: path.to_path_buf(),
            details: format!("row {index} column {name} is not a string (found {field})"),
        })?;
    }
    let [level_1, level_2, level_3, level_4, level_5, entity] = values;
    if entity.is_empty() {
        return Err(TaxonomyError::Schema {
            path: path.to_path_buf(),
            details: format!("row {index} has an empty {ENTITY_COLUMN}"),
        });
    }
    Ok(TaxonomyRow {
        levels: [level_1, level_2, level_3, level_4, level_5],
        entity,
    })
}

fn field_text(field: &Field) -> Option<String> {
    match field {
        Field::Str(value) => Some(value.clone()),
        Field::Bytes(bytes) => std::str::from_utf8(bytes.data()).ok().map(str::to_string),
        _ => None,
    }
}
