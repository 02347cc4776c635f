use thiserror::Error;

/// Errors surfaced while configuring or recording an encounter run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The runner was constructed against an arena or script that cannot
    /// be driven (missing unit, unregistered spell, zero tick, ...).
    #[error("runner configuration error: {0}")]
    Config(String),

    /// I/O failure while writing transcript or report files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SimResult<T> = Result<T, SimError>;
