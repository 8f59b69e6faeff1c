use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to parse timeline definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid timeline definition: {0}")]
    Validation(String),
}
