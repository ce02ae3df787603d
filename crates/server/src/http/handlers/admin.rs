use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use tracing::info;

use crate::http::error::ApiError;
use crate::state::AppState;

pub async fn delete_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comment_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Forbidden("Missing Authorization header".into()))?;
    let expected_token = format!("Bearer {}", state.admin_token);
    if auth_header != expected_token {
        return Err(ApiError::Forbidden("Invalid Admin Token".into()));
    }

    if !state.db.delete_comment(comment_id).await? {
        return Err(ApiError::NotFound(format!("Comment {} not found", comment_id)));
    }

    info!("Admin deleted comment {}", comment_id);
    Ok(Json(serde_json::json!({ "message": "Commentaire supprimé" })))
}
