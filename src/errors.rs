use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for argument validation, file access, and decoding failures.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// A caller-supplied argument is outside its accepted values; raised before any read.
    #[error("invalid {argument} argument: {value}. Expected {expected}.")]
    InvalidArgument {
        /// Argument name (`alg`, `level`, `name_type`).
        argument: &'static str,
        /// Rejected value as given.
        value: String,
        /// Accepted values.
        expected: &'static str,
    },
    /// Opening or reading an artifact failed, including when it does not exist.
    #[error("failed reading {}: {source}", .path.display())]
    Io {
        /// Artifact path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// A taxonomy table could not be decoded as parquet.
    #[error("failed decoding parquet file {}: {reason}", .path.display())]
    Parquet {
        /// Artifact path.
        path: PathBuf,
        /// Reader message.
        reason: String,
    },
    /// A group metadata file could not be decoded as JSON of the expected shape.
    #[error("failed decoding json file {}: {source}", .path.display())]
    Json {
        /// Artifact path.
        path: PathBuf,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// Decoded data breaks the table or metadata layout.
    #[error("{} does not match the expected layout: {details}", .path.display())]
    Schema {
        /// Artifact path.
        path: PathBuf,
        /// What did not match.
        details: String,
    },
}

impl TaxonomyError {
    pub(crate) fn invalid_argument(
        argument: &'static str,
        value: impl ToString,
        expected: &'static str,
    ) -> Self {
        Self::InvalidArgument {
            argument,
            value: value.to_string(),
            expected,
        }
    }

    /// True when the error came from rejecting a caller-supplied argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// True when the requested artifact does not exist on disk.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
