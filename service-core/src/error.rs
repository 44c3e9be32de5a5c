use crate::lambda::ApiGatewayResponse;
use thiserror::Error;

/// Message returned to callers for every internal failure. Details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

impl AppError {
    /// Status code reported to the invoking platform.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::InternalError(_)
            | AppError::DatabaseError(_)
            | AppError::SerializationError(_)
            | AppError::ConfigError(_) => 500,
        }
    }
}

impl From<AppError> for ApiGatewayResponse {
    fn from(err: AppError) -> Self {
        ApiGatewayResponse::error(err.status_code(), INTERNAL_ERROR_MESSAGE)
    }
}
