//! Core error types

use thiserror::Error;

/// Scene host errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// No image is registered under this asset path
    #[error("Asset not found: {0}")]
    AssetNotFound(String),
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
