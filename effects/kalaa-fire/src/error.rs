use std::io;
use thiserror::Error;

/// Error types for the fire engine and its surfaces
#[derive(Error, Debug)]
pub enum FireError {
    /// The drawing surface could not be resolved by the host
    #[error("Drawing surface not found")]
    SurfaceNotFound,

    /// Configuration values that would break the engine invariants
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file with an extension we cannot parse
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// I/O error while reading configuration or writing frames
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Error while encoding a rendered frame
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type using FireError
pub type Result<T> = std::result::Result<T, FireError>;
