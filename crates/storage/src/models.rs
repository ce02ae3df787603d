use chrono::NaiveDateTime;
use domain::{Comment, Gbairai};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlComment {
    pub id: i64,
    pub gbairai_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub content: String,
    pub parent_comment_id: Option<i64>,
    pub reply_to_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

impl From<SqlComment> for Comment {
    fn from(sql: SqlComment) -> Self {
        Comment {
            id: sql.id,
            gbairai_id: sql.gbairai_id,
            author_id: sql.author_id,
            author_name: sql.author_name,
            content: sql.content,
            parent_comment_id: sql.parent_comment_id,
            reply_to_id: sql.reply_to_id,
            created_at: sql.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct SqlGbairai {
    pub id: i64,
    pub author_id: Option<i64>,
    pub content: String,
    pub emotion: String,
    pub is_anonymous: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl From<SqlGbairai> for Gbairai {
    fn from(sql: SqlGbairai) -> Self {
        Gbairai {
            id: sql.id,
            author_id: sql.author_id,
            content: sql.content,
            emotion: sql.emotion,
            is_anonymous: sql.is_anonymous,
            status: sql.status,
            created_at: sql.created_at,
        }
    }
}
