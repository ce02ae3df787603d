use axum::{extract::rejection::JsonRejection, extract::State, Json};
use domain::{EmotionDefinition, EmotionSuggestion, ModerationResult, ValidationResult};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ContentRequest {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct AnalyzeEmotionRequest {
    pub text: Option<String>,
    pub language: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeEmotionResponse {
    pub success: bool,
    pub emotion: String,
    pub confidence: f64,
    pub suggestions: Vec<EmotionSuggestion>,
    pub local_terms: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionCatalog {
    pub emotions: &'static [EmotionDefinition],
    pub nouchi_terms: Vec<&'static str>,
}

pub(crate) fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(message.to_string()))
}

pub async fn moderate_content(
    State(state): State<AppState>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<Json<ModerationResult>, ApiError> {
    let Json(payload) = payload.map_err(|r| ApiError::required_or(r, "Contenu requis"))?;
    let content = required(payload.content, "Contenu requis")?;

    Ok(Json(state.moderator.moderate(&content).await))
}

pub async fn validate_content(
    State(state): State<AppState>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, ApiError> {
    let Json(payload) = payload.map_err(|r| ApiError::required_or(r, "Contenu requis"))?;
    let content = required(payload.content, "Contenu requis")?;

    Ok(Json(state.validator.validate(&content)))
}

pub async fn analyze_emotion(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeEmotionRequest>, JsonRejection>,
) -> Result<Json<AnalyzeEmotionResponse>, ApiError> {
    let Json(payload) = payload.map_err(|r| ApiError::required_or(r, "Texte requis"))?;
    let text = required(payload.text, "Texte requis")?;
    let language = payload
        .language
        .unwrap_or_else(|| adapter::DEFAULT_LANGUAGE.to_string());

    let result = state.analyzer.analyze(&text, &language).await;

    Ok(Json(AnalyzeEmotionResponse {
        success: true,
        emotion: result.emotion,
        confidence: result.confidence,
        suggestions: result.suggestions,
        local_terms: result.local_terms,
    }))
}

pub async fn list_emotions(State(state): State<AppState>) -> Json<EmotionCatalog> {
    let dictionary = state.analyzer.dictionary();
    Json(EmotionCatalog {
        emotions: dictionary.emotions(),
        nouchi_terms: dictionary.nouchi_terms(),
    })
}
