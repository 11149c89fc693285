use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to read a role-map override file.
    #[error("failed to read role map {path}: {source}")]
    RoleMapRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Role-map override file is not valid JSON for a `RoleMap`.
    #[error("invalid role map {path}: {source}")]
    RoleMapParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
