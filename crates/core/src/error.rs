//! Error types for PoreMet

use thiserror::Error;

/// Main error type for PoreMet operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in grid of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for PoreMet operations
pub type Result<T> = std::result::Result<T, Error>;
