use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::{Gbairai, NewGbairai};
use serde::Deserialize;
use tracing::info;

use super::analysis::required;
use crate::http::error::ApiError;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGbairaiRequest {
    pub content: Option<String>,
    pub emotion: Option<String>,
    pub author_id: Option<i64>,
    pub is_anonymous: Option<bool>,
}

#[derive(Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub emotion: Option<String>,
}

pub async fn list_gbairais(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<Gbairai>>, ApiError> {
    let limit = query
        .limit
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);
    let emotion = query.emotion.as_deref().filter(|e| !e.is_empty());

    let gbairais = state.db.list_gbairais(emotion, limit, offset).await?;
    Ok(Json(gbairais))
}

pub async fn get_gbairai(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Gbairai>, ApiError> {
    state
        .db
        .get_gbairai(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Gbairai non trouvé".to_string()))
}

pub async fn create_gbairai(
    State(state): State<AppState>,
    payload: Result<Json<CreateGbairaiRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Gbairai>), ApiError> {
    let Json(payload) = payload.map_err(|r| ApiError::required_or(r, "Contenu requis"))?;
    let content = required(payload.content, "Contenu requis")?;

    // 1. 先审核（黑名单 + 模型），再做格式校验
    let verdict = state.moderator.moderate(&content).await;
    if !verdict.approved {
        return Err(ApiError::Moderated(verdict));
    }

    // 2. 长度、垃圾信息、重复
    let validation = state.validator.validate(&content);
    if !validation.is_valid {
        return Err(ApiError::Invalid(validation));
    }

    // 没选情绪就自动分析
    let emotion = match payload.emotion.filter(|e| !e.trim().is_empty()) {
        Some(emotion) => emotion,
        None => {
            state
                .analyzer
                .analyze(&content, adapter::DEFAULT_LANGUAGE)
                .await
                .emotion
        }
    };

    let saved = state
        .db
        .insert_gbairai(&NewGbairai {
            author_id: payload.author_id,
            content,
            emotion,
            is_anonymous: payload.is_anonymous.unwrap_or(true),
        })
        .await?;

    info!("Gbairai {} published (emotion={})", saved.id, saved.emotion);

    Ok((StatusCode::CREATED, Json(saved)))
}
