use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("an import is already in progress")]
    Busy,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
