use adapter::{ContentModerator, EmotionAnalysisService};
use axum::extract::FromRef;
use domain::ContentValidator;
use std::sync::Arc;
use storage::Db;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub moderator: Arc<ContentModerator>,
    pub analyzer: Arc<EmotionAnalysisService>,
    pub validator: ContentValidator,
    pub admin_token: String,
}

impl FromRef<AppState> for Db {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
