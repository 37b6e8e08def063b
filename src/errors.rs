use std::path::PathBuf;

use thiserror::Error;

use crate::raw::LenMode;

pub type Result<T> = std::result::Result<T, ScionError>;

#[derive(Error, Debug)]
pub enum ScionError {
    /// Raw data was handed something that is not a byte container.
    #[error("Error parsing raw {desc}: Expected bytes, got {got}")]
    Type { desc: String, got: &'static str },
    /// Raw data failed its length constraint at construction.
    #[error("Error parsing raw {desc}: Expected len {mode}{expected}, got {actual}")]
    Parse {
        desc: String,
        mode: LenMode,
        expected: usize,
        actual: usize,
    },
    /// A bounds-checked read went past the end of the raw data.
    #[error(
        "{desc}: Attempted to access beyond end of raw data \
         (len={len}, offset={offset}, request={request})"
    )]
    Index {
        desc: String,
        len: usize,
        offset: usize,
        request: usize,
    },
    #[error("Unable to access '{}': {source}", .path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error parsing '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScionError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by malformed or truncated input data, as
    /// opposed to programming errors or environment failures.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Index { .. } | Self::Json { .. })
    }
}
