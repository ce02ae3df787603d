use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationResult {
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_words: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ModerationResult {
    pub fn approved() -> Self {
        Self {
            approved: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionSuggestion {
    pub emotion: String,
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionAnalysisResult {
    pub emotion: String,
    pub confidence: f64,
    pub local_terms: Vec<String>,
    pub suggestions: Vec<EmotionSuggestion>,
}

// 顶层评论的 parent_comment_id 为空；回复总是指向顶层评论
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub gbairai_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub content: String,
    pub parent_comment_id: Option<i64>,
    // 被回复的那条回复
    pub reply_to_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_comment_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub gbairai_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub content: String,
    pub parent_comment_id: Option<i64>,
    pub reply_to_id: Option<i64>,
}

pub const GBAIRAI_ACTIVE: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gbairai {
    pub id: i64,
    pub author_id: Option<i64>,
    pub content: String,
    pub emotion: String,
    pub is_anonymous: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGbairai {
    pub author_id: Option<i64>,
    pub content: String,
    pub emotion: String,
    pub is_anonymous: bool,
}
