#![allow(dead_code)]

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use parquet::data_type::{ByteArray, ByteArrayType};
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::parser::parse_message_type;
use serde_json::json;

pub const TAXONOMY_FILES: [&str; 3] = [
    "community_detection.parquet",
    "semantic_centroids.parquet",
    "semantic_imbalanced.parquet",
];

pub fn taxonomy_rows() -> Vec<[&'static str; 6]> {
    vec![
        ["0", "0_0", "0_0_0", "0_0_0_1", "0_0_0_1_2", "Analytical chemistry"],
        ["0", "0_0", "0_0_0", "0_0_0", "0_0_0", "Mass spectrometry"],
        ["0", "0_1", "0_1", "0_1", "0_1", "Chromatography"],
        ["1", "1_0", "1_0_2", "1_0_2_0", "1_0_2_0_0", "Machine learning"],
        ["1", "1_0", "1_0_2", "1_0_2_0", "1_0_2_0_1", "Deep learning"],
    ]
}

pub fn write_taxonomy_parquet(path: &Path, rows: &[[&str; 6]]) {
    let schema = Arc::new(
        parse_message_type(
            "message taxonomy {
                REQUIRED BINARY Level_1 (UTF8);
                REQUIRED BINARY Level_2 (UTF8);
                REQUIRED BINARY Level_3 (UTF8);
                REQUIRED BINARY Level_4 (UTF8);
                REQUIRED BINARY Level_5 (UTF8);
                REQUIRED BINARY Entity (UTF8);
            }",
        )
        .unwrap(),
    );
    let props = Arc::new(WriterProperties::builder().build());
    let file = File::create(path).unwrap();
    let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();
    let mut row_group = writer.next_row_group().unwrap();
    for column in 0..6 {
        let mut col_writer = row_group.next_column().unwrap().unwrap();
        let values = rows
            .iter()
            .map(|row| ByteArray::from(row[column]))
            .collect::<Vec<_>>();
        col_writer
            .typed::<ByteArrayType>()
            .write_batch(&values, None, None)
            .unwrap();
        col_writer.close().unwrap();
    }
    assert!(row_group.next_column().unwrap().is_none());
    row_group.close().unwrap();
    writer.close().unwrap();
}

/// Populate `root` with every artifact the accessors read.
pub fn write_data_root(root: &Path) {
    let tables = root.join("taxonomies");
    fs::create_dir_all(&tables).unwrap();
    for file_name in TAXONOMY_FILES {
        write_taxonomy_parquet(&tables.join(file_name), &taxonomy_rows());
    }

    let chatgpt = [
        json!({
            "0": {"name": "Chemistry", "confidence": 95, "discard": []},
            "1": {"name": "Computer science", "confidence": 88, "discard": ["John Wiley & Sons"]}
        }),
        json!({
            "0_0": {"name": "Analytical chemistry", "confidence": 80, "discard": []},
            "0_1": {"name": "Separation science", "confidence": 55.5, "discard": ["Elsevier"]},
            "1_0": {"name": "Artificial intelligence", "confidence": 90, "discard": []}
        }),
        json!({
            "0_0_0": {"name": "Mass analysis", "confidence": 70, "discard": []},
            "0_1": {"name": "Separation science", "confidence": 55.5, "discard": []},
            "1_0_2": {"name": "Neural networks", "confidence": 82, "discard": []}
        }),
    ];
    let entities = [
        json!({
            "0": ["Analytical chemistry", "Mass spectrometry", "Chromatography"],
            "1": ["Machine learning", "Deep learning"]
        }),
        json!({
            "0_0": ["Analytical chemistry", "Mass spectrometry"],
            "0_1": ["Chromatography"],
            "1_0": ["Machine learning", "Deep learning"]
        }),
        json!({
            "0_0_0": ["Analytical chemistry", "Mass spectrometry"],
            "0_1": ["Chromatography"],
            "1_0_2": ["Machine learning", "Deep learning"]
        }),
    ];
    for (name_type, payloads) in [("chatgpt", chatgpt), ("entities", entities)] {
        let dir = root.join("group_names").join(name_type);
        fs::create_dir_all(&dir).unwrap();
        for (idx, payload) in payloads.iter().enumerate() {
            let path = dir.join(format!("level_{}.json", idx + 1));
            fs::write(path, serde_json::to_vec_pretty(payload).unwrap()).unwrap();
        }
    }
}
