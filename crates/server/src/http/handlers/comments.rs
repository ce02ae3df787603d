use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use domain::{organize_replies, place_reply, Comment, CommentError, NewComment, ThreadedReply};
use serde::Deserialize;
use tracing::info;

use crate::http::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub author_id: i64,
    pub author_name: String,
    pub content: String,
    pub parent_comment_id: Option<i64>,
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(gbairai_id): Path<i64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = state.db.list_comments(gbairai_id).await?;
    Ok(Json(comments))
}

pub async fn list_replies(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
) -> Result<Json<Vec<ThreadedReply>>, ApiError> {
    let parent = state
        .db
        .get_comment(comment_id)
        .await?
        .ok_or(CommentError::ParentNotFound(comment_id))?;

    let replies = state.db.list_replies(parent.id).await?;
    Ok(Json(organize_replies(&parent.author_name, replies)))
}

pub async fn post_comment(
    State(state): State<AppState>,
    Path(gbairai_id): Path<i64>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let Json(payload) = payload?;

    if payload.content.trim().is_empty() {
        return Err(CommentError::EmptyContent.into());
    }
    if payload.author_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Nom d'auteur requis".to_string()));
    }

    if state.db.get_gbairai(gbairai_id).await?.is_none() {
        return Err(ApiError::NotFound("Gbairai non trouvé".to_string()));
    }

    let verdict = state.moderator.moderate(&payload.content).await;
    if !verdict.approved {
        return Err(ApiError::Moderated(verdict));
    }

    let (parent_comment_id, reply_to_id) = match payload.parent_comment_id {
        Some(parent_id) => {
            let parent = state
                .db
                .get_comment(parent_id)
                .await?
                .ok_or(CommentError::ParentNotFound(parent_id))?;
            let placement = place_reply(gbairai_id, &parent)?;
            (Some(placement.parent_comment_id), placement.reply_to_id)
        }
        None => (None, None),
    };

    let saved = state
        .db
        .insert_comment(&NewComment {
            gbairai_id,
            author_id: payload.author_id,
            author_name: payload.author_name,
            content: payload.content,
            parent_comment_id,
            reply_to_id,
        })
        .await?;

    info!(
        "Comment {} saved on gbairai {} (parent={:?})",
        saved.id, gbairai_id, saved.parent_comment_id
    );

    Ok((StatusCode::CREATED, Json(saved)))
}
