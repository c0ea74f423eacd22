//! Error types for Adversario

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Invalid input for `{loss}` loss: {reason}")]
    InvalidLossInput { loss: &'static str, reason: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No files found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

pub type Result<T> = std::result::Result<T, Error>;
