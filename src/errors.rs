use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Json error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Helper for mapping any shape violation into a decode error
pub fn decode_error<E: ToString>(err: E) -> DashboardError {
    DashboardError::DecodeError(err.to_string())
}
