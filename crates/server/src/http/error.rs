use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{CommentError, ModerationResult, ValidationResult};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Contenu modéré")]
    Moderated(ModerationResult),
    #[error("Contenu invalide")]
    Invalid(ValidationResult),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<CommentError> for ApiError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::ParentNotFound(_) => Self::NotFound(err.to_string()),
            CommentError::EmptyContent | CommentError::ParentInOtherGbairai { .. } => {
                Self::BadRequest(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    // 字段类型不对（比如 content 是数字）和缺字段一样处理
    pub fn required_or(rejection: JsonRejection, message: &str) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) => Self::BadRequest(message.to_string()),
            other => other.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, Json(json!({ "error": msg }))),
            Self::Moderated(result) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Contenu modéré",
                    "message": result.reason,
                    "suggestion": result.suggestion,
                    "foundWords": result.found_words,
                })),
            ),
            Self::Invalid(result) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Contenu invalide",
                    "issues": result.issues,
                    "suggestions": result.suggested_changes,
                })),
            ),
            Self::Internal(e) => {
                error!("Request failed: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Erreur interne du serveur" })),
                )
            }
        }
        .into_response()
    }
}
