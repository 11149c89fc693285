use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
