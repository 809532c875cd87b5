//! Error types for Tenantry

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A validation failure attached to a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    // Lookup Errors
    #[error("Not found: {0}")]
    NotFound(String),

    // Access Errors
    #[error("Access denied: {0}")]
    Forbidden(String),

    // Validation Errors
    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File is too large ({size} bytes, limit {max} bytes)")]
    SizeExceeded { size: u64, max: u64 },

    // Preview Errors
    #[error("Failed to decode file: {0}")]
    Decode(String),

    // Remote Errors
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Store request failed: {0}")]
    Store(String),

    // Configuration Errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NotFound",
            Error::Forbidden(_) => "Forbidden",
            Error::Validation(_) => "ValidationFailed",
            Error::InvalidArgument(_) => "InvalidArgument",
            Error::SizeExceeded { .. } => "SizeExceeded",
            Error::Decode(_) => "DecodeFailure",
            Error::Upload(_) => "UploadFailure",
            Error::Store(_) => "SaveFailure",
            Error::Config(_) => "ConfigError",
            Error::Io(_) => "IoError",
            Error::Json(_) => "ParseError",
            Error::Other(_) => "InternalError",
        }
    }

    /// Field errors carried by a validation failure, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Error::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
