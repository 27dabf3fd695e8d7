use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Shown when the identity provider fails without a message of its own.
pub const PROVIDER_FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Identity provider error: {}", .0.as_deref().unwrap_or(PROVIDER_FALLBACK_MESSAGE))]
    Provider(Option<String>),

    #[error("Geocoding request failed: {0}")]
    Network(String),

    #[error("Failed to parse: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A blocking, dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl AppError {
    /// Build a provider error, dropping blank messages so the fallback is used.
    pub fn provider(message: Option<&str>) -> Self {
        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        AppError::Provider(message)
    }

    /// Errors the user must acknowledge. Geocoding failures never interrupt
    /// typing, so they have no notice.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            AppError::Validation(message) => Some(Notice {
                title: "Invalid input".to_string(),
                message: message.clone(),
            }),
            AppError::Provider(message) => Some(Notice {
                title: "Sign-in error".to_string(),
                message: message
                    .clone()
                    .unwrap_or_else(|| PROVIDER_FALLBACK_MESSAGE.to_string()),
            }),
            _ => None,
        }
    }
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let notice = self.notice();
        let (status, error_message) = match self {
            AppError::Validation(ref e) => (StatusCode::UNPROCESSABLE_ENTITY, e.clone()),
            AppError::Provider(_) => {
                tracing::warn!("{}", self);
                (
                    StatusCode::UNAUTHORIZED,
                    notice
                        .as_ref()
                        .map(|n| n.message.clone())
                        .unwrap_or_else(|| PROVIDER_FALLBACK_MESSAGE.to_string()),
                )
            }
            AppError::Network(ref e) => {
                tracing::warn!("Geocoding request failed: {}", e);
                (StatusCode::BAD_GATEWAY, "Geocoding service error".to_string())
            }
            AppError::Parse(ref e) => {
                tracing::warn!("Parse error: {}", e);
                (StatusCode::BAD_REQUEST, e.clone())
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.clone()),
            AppError::NotFound(ref e) => (StatusCode::NOT_FOUND, e.clone()),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        });
        if let Some(notice) = notice {
            body["title"] = json!(notice.title);
        }

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
