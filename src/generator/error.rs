//! Generator Error Types

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Target path {} is a file instead of a directory", path.display())]
    TargetNotADirectory { path: PathBuf },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode state for \"{class_name}\": {source}")]
    StateEncodeFailed {
        class_name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for generation operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;
