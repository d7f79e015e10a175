//! Error types for the content-hub application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur while managing groups and content items.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the content-hub application.
#[derive(Error, Debug)]
pub enum HubError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Imported or persisted data does not have the expected shape.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Item was not found when performing an operation.
    #[error("Item not found: {id}")]
    ItemNotFound { id: String },

    /// Group was not found when performing an operation.
    #[error("Group not found: {id}")]
    GroupNotFound { id: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}
