// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types shared across the clustering and badge engines.
//!
//! The engines themselves never fail; errors only arise at the edges
//! (input validation, reference data loading, background workers).

/// Core error type.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Failed to read file: {0}")]
    Io(String),

    #[error("Failed to parse {0}")]
    Parse(String),

    #[error("Invalid alias table: {0}")]
    AliasTable(String),

    #[error("Background worker failed: {0}")]
    Worker(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl CoreError {
    /// Whether the error comes from bad input data rather than the runtime.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidCoordinate(_) | CoreError::Parse(_) | CoreError::AliasTable(_)
        )
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
