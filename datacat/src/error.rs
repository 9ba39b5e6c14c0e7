// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for catalog operations

use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised by the catalog store, the loader and configuration
///
/// Every variant is recoverable at the caller's boundary.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A record with this name is already registered
    #[error("Dataset '{0}' already registered")]
    DuplicateName(String),

    /// No record with this name is registered
    #[error("Dataset '{0}' not found")]
    NotFound(String),

    /// A field value violates a record or query invariant
    #[error("Validation error: {0}")]
    Validation(String),

    /// A raw row could not be parsed during load
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Configuration file could not be read or decoded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        CatalogError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Short machine-friendly name of the error kind, used in load reports
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::DuplicateName(_) => "duplicate_name",
            CatalogError::NotFound(_) => "not_found",
            CatalogError::Validation(_) => "validation",
            CatalogError::Parse { .. } => "parse",
            CatalogError::Config(_) => "config",
            CatalogError::Serialization(_) => "serialization",
            CatalogError::Io(_) => "io",
        }
    }
}
