use crate::{models::SqlGbairai, Db};
use chrono::Utc;
use domain::{Gbairai, NewGbairai, GBAIRAI_ACTIVE};

const GBAIRAI_COLUMNS: &str = "id, author_id, content, emotion, is_anonymous, status, created_at";

impl Db {
    pub async fn insert_gbairai(&self, new: &NewGbairai) -> anyhow::Result<Gbairai> {
        let created_at = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO gbairais (author_id, content, emotion, is_anonymous, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.author_id)
        .bind(&new.content)
        .bind(&new.emotion)
        .bind(new.is_anonymous)
        .bind(GBAIRAI_ACTIVE)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Gbairai {
            id: result.last_insert_rowid(),
            author_id: new.author_id,
            content: new.content.clone(),
            emotion: new.emotion.clone(),
            is_anonymous: new.is_anonymous,
            status: GBAIRAI_ACTIVE.to_string(),
            created_at,
        })
    }

    pub async fn get_gbairai(&self, id: i64) -> anyhow::Result<Option<Gbairai>> {
        let row = sqlx::query_as::<_, SqlGbairai>(&format!(
            "SELECT {} FROM gbairais WHERE id = ?",
            GBAIRAI_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    // 只列出 active 状态，最新的在前；emotion 为空时不过滤
    pub async fn list_gbairais(
        &self,
        emotion: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Gbairai>> {
        let rows = sqlx::query_as::<_, SqlGbairai>(&format!(
            r#"
            SELECT {}
            FROM gbairais
            WHERE status = ? AND (? IS NULL OR emotion = ?)
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
            GBAIRAI_COLUMNS
        ))
        .bind(GBAIRAI_ACTIVE)
        .bind(emotion)
        .bind(emotion)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
