//! Error types for menu loading

use std::io;
use thiserror::Error;

use crate::validate::ValidationIssue;

/// Errors that can occur while loading a menu
#[derive(Error, Debug)]
pub enum MenuError {
    /// I/O error reading a menu file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON menu
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML menu
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// File extension is neither JSON nor YAML
    #[error("Unsupported menu format: {0}")]
    UnsupportedFormat(String),

    /// Strict loading found validation issues
    #[error("Menu has {} validation issue(s), first: {}", .0.len(), first_issue(.0))]
    Invalid(Vec<ValidationIssue>),
}

fn first_issue(issues: &[ValidationIssue]) -> String {
    issues
        .first()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}

/// Result type for menu operations
pub type Result<T> = std::result::Result<T, MenuError>;
