//! Error kinds for the spectrum/parity pipeline.

use thiserror::Error;

/// Every failure the pipeline can produce.
///
/// All variants are terminal: nothing downstream of a failed stage is
/// computed.
#[derive(Debug, Error)]
pub enum JcError {
    /// Non-positive truncation or malformed physical parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A matrix handed to the spectral solver is not Hermitian to within the
    /// solver's tolerance.
    #[error("non-Hermitian input: max |H - H^dag| = {deviation:.3e}")]
    NonHermitianInput { deviation: f64 },

    /// An operator or state vector does not live in the expected space.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("linear algebra error: {0}")]
    Linalg(#[from] ndarray_linalg::error::LinalgError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("npz write error: {0}")]
    Npz(#[from] ndarray_npy::WriteNpzError),
}

pub type JcResult<T> = std::result::Result<T, JcError>;
