/// Constants describing the on-disk layout of the data root.
pub mod layout {
    /// Default data root, relative to the working directory.
    pub const DEFAULT_DATA_DIR: &str = "data";
    /// Environment variable consulted when no explicit data root is given.
    pub const DATA_DIR_ENV: &str = "INNOVATION_TAXONOMY_DATA_DIR";
    /// Subdirectory holding the taxonomy tables.
    pub const TAXONOMIES_DIR: &str = "taxonomies";
    /// Subdirectory holding the per-naming-method group name files.
    pub const GROUP_NAMES_DIR: &str = "group_names";
    /// Extension of taxonomy table files.
    pub const TAXONOMY_EXTENSION: &str = "parquet";
    /// Extension of group metadata files.
    pub const GROUP_NAMES_EXTENSION: &str = "json";
}

/// Constants describing taxonomy tables and their labels.
pub mod taxonomy {
    /// Number of nesting levels in a taxonomy row.
    pub const LEVEL_COUNT: usize = 5;
    /// Separator between label components (`0_1_3`).
    pub const LABEL_SEPARATOR: char = '_';
    /// Column names in canonical order.
    pub const COLUMNS: [&str; LEVEL_COUNT + 1] = [
        "Level_1", "Level_2", "Level_3", "Level_4", "Level_5", "Entity",
    ];
    /// Column holding the Wikipedia entity.
    pub const ENTITY_COLUMN: &str = "Entity";
    /// Human-readable names for each level, outermost first.
    pub const LEVEL_NAMES: [&str; LEVEL_COUNT] =
        ["disciplines", "domains", "areas", "topics", "subtopics"];
    /// File name for the co-occurrence (community detection) taxonomy.
    pub const COOCCURRENCE_FILE: &str = "community_detection.parquet";
    /// File name for the semantic centroids taxonomy.
    pub const CENTROIDS_FILE: &str = "semantic_centroids.parquet";
    /// File name for the semantic imbalanced taxonomy.
    pub const IMBALANCED_FILE: &str = "semantic_imbalanced.parquet";
    /// Accepted values for the `alg` argument, for error messages.
    pub const ALG_EXPECTED: &str = "one of 'cooccurrence', 'centroids', or 'imbalanced'";
}

/// Constants describing group metadata files.
pub mod group_names {
    /// Highest taxonomy level that carries group names.
    pub const MAX_NAMED_LEVEL: u8 = 3;
    /// Upper bound on the entity list stored per group.
    pub const TOP_ENTITY_LIMIT: usize = 5;
    /// Upper bound on a name confidence score.
    pub const MAX_CONFIDENCE: f64 = 100.0;
    /// Accepted values for the `level` argument, for error messages.
    pub const LEVEL_EXPECTED: &str = "1, 2, or 3";
    /// Accepted values for the `name_type` argument, for error messages.
    pub const NAME_TYPE_EXPECTED: &str = "one of 'chatgpt', 'entities'";
}
