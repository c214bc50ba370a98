//! Error types for loading and validating input documents

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document could not be read from disk
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Valid JSON that does not have the expected shape
    #[error("malformed document: {message}")]
    Malformed { message: String },

    /// The `type` discriminator names no known layout
    #[error("unknown data structure '{0}'")]
    UnknownDataType(String),
}

impl DocumentError {
    /// Create a malformed document error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Create a read error for `path`
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
