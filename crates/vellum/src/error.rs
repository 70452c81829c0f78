//! Error types for Vellum operations.
//!
//! This module provides the main error type [`VellumError`] which wraps the
//! error conditions that can escape the engine: I/O, serialization, export,
//! and persistence failures. Invalid entity references inside the editor
//! (moving an unknown node, connecting to a deleted target) are deliberately
//! not errors; those degrade to silent no-ops at the canvas boundary.

use std::io;

use thiserror::Error;

/// The main error type for Vellum operations.
#[derive(Debug, Error)]
pub enum VellumError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for VellumError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
