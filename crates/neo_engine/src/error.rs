use neo_core::{AppError, Symbol, UiError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Anything that was not anticipated, with a developer-facing description.
    #[error("unexpected api error: {0}")]
    Unexpected(String),
    #[error("request was unauthorized")]
    Unauthorized,
    #[error("device is offline")]
    Offline,
}

impl AppError for ApiError {
    fn ui_error(&self) -> UiError {
        match self {
            ApiError::Unexpected(_) | ApiError::Unauthorized => UiError::generic(),
            ApiError::Offline => UiError::new(
                Symbol::WifiSlash,
                "Try again when your device is online.",
            )
            .with_title("Offline"),
        }
    }
}
