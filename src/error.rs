//! Error types for dapmath.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

use crate::source::VariableKind;

/// Result type alias for dapmath operations.
pub type Result<T> = std::result::Result<T, DapError>;

/// Errors that can occur while adapting or materializing a dataset.
#[derive(Debug, Error)]
pub enum DapError {
    /// The variable tree or its attribute table is corrupt or inconsistent.
    #[error("Malformed metadata: {reason}")]
    MalformedMetadata { reason: String },

    /// Dispatch reached a structural combination that is not implemented.
    #[error("Unsupported variable kind {kind} ({context})")]
    UnsupportedVariableKind { kind: VariableKind, context: String },

    /// A source instance does not match the adapter built for it.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Range or sub-range access beyond bounds.
    #[error("Index {index} out of range for length {length}")]
    IndexOutOfRange { index: usize, length: usize },

    /// Failed to open a descriptor file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset descriptor could not be decoded.
    #[error("Invalid dataset descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),
}

impl DapError {
    /// Create a MalformedMetadata error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMetadata {
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedVariableKind error.
    pub fn unsupported(kind: VariableKind, context: impl Into<String>) -> Self {
        Self::UnsupportedVariableKind {
            kind,
            context: context.into(),
        }
    }

    /// Create a TypeMismatch error.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }
}
