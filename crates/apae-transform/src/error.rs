//! Error types for field and row conversion.

use apae_model::{Column, ModelError};
use thiserror::Error;

/// A cell whose shape cannot be turned into any SQL value.
///
/// Unlike a field warning this aborts the row it occurs in.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("numeric cell is not a finite number ({0})")]
    NonFiniteNumber(f64),
    #[error("text contains a NUL character")]
    NulCharacter,
}

/// Reason a single row was dropped.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("column {column}: {source}")]
    Field {
        column: Column,
        #[source]
        source: FieldError,
    },
    #[error(transparent)]
    Layout(#[from] ModelError),
}

/// Failures that stop the whole conversion.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("no records to convert")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, TransformError>;
