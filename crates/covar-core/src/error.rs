use thiserror::Error;

use crate::observation::Variable;

/// User-correctable problems with the raw X/Y text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter data for both X and Y variables.")]
    Empty,

    #[error(
        "Inputs must contain only numbers separated by spaces or commas \
         (invalid value {token:?} in {variable})."
    )]
    NonNumeric { variable: Variable, token: String },

    #[error("Data length mismatch: X has {x} points, Y has {y} points.")]
    LengthMismatch { x: usize, y: usize },
}

/// Failures of the remote analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("no API key configured (set GEMINI_API_KEY or gemini.api_key)")]
    MissingCredential,

    #[error("failed to reach the analysis service: {0}")]
    Network(String),

    #[error("analysis service returned HTTP {status}: {message}")]
    Service { status: u16, message: String },

    #[error("unexpected response from the analysis service: {0}")]
    Malformed(String),
}

pub type InputResult<T> = Result<T, InputError>;
pub type AnalysisResult<T> = Result<T, AnalysisError>;
