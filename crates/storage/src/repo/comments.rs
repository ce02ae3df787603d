use crate::{models::SqlComment, Db};
use chrono::Utc;
use domain::{Comment, NewComment};

const COMMENT_COLUMNS: &str = r#"
    id, gbairai_id, author_id, author_name, content,
    parent_comment_id, reply_to_id, created_at
"#;

impl Db {
    pub async fn insert_comment(&self, new: &NewComment) -> anyhow::Result<Comment> {
        let created_at = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO comments (
                gbairai_id, author_id, author_name, content,
                parent_comment_id, reply_to_id, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.gbairai_id)
        .bind(new.author_id)
        .bind(&new.author_name)
        .bind(&new.content)
        .bind(new.parent_comment_id)
        .bind(new.reply_to_id)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            gbairai_id: new.gbairai_id,
            author_id: new.author_id,
            author_name: new.author_name.clone(),
            content: new.content.clone(),
            parent_comment_id: new.parent_comment_id,
            reply_to_id: new.reply_to_id,
            created_at,
        })
    }

    pub async fn get_comment(&self, id: i64) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query_as::<_, SqlComment>(&format!(
            "SELECT {} FROM comments WHERE id = ?",
            COMMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    // 只取顶层评论，按时间正序
    pub async fn list_comments(&self, gbairai_id: i64) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, SqlComment>(&format!(
            r#"
            SELECT {}
            FROM comments
            WHERE gbairai_id = ? AND parent_comment_id IS NULL
            ORDER BY created_at ASC, id ASC
            "#,
            COMMENT_COLUMNS
        ))
        .bind(gbairai_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_replies(&self, parent_comment_id: i64) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, SqlComment>(&format!(
            r#"
            SELECT {}
            FROM comments
            WHERE parent_comment_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
            COMMENT_COLUMNS
        ))
        .bind(parent_comment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    // 连同回复一起删除；没有匹配时返回 false
    pub async fn delete_comment(&self, id: i64) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE comments SET reply_to_id = NULL WHERE reply_to_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM comments WHERE parent_comment_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_comment(gbairai_id: i64, author: &str, content: &str, parent: Option<i64>) -> NewComment {
        NewComment {
            gbairai_id,
            author_id: 1,
            author_name: author.to_string(),
            content: content.to_string(),
            parent_comment_id: parent,
            reply_to_id: None,
        }
    }

    async fn db() -> Db {
        Db::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn insert_then_fetch() {
        let db = db().await;
        let saved = db
            .insert_comment(&new_comment(1, "Alice", "Premier gbairai", None))
            .await
            .unwrap();

        let fetched = db.get_comment(saved.id).await.unwrap().unwrap();
        assert_eq!(fetched.author_name, "Alice");
        assert_eq!(fetched.content, "Premier gbairai");
        assert!(!fetched.is_reply());
        assert!(db.get_comment(saved.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn top_level_and_replies_are_listed_separately() {
        let db = db().await;
        let top = db
            .insert_comment(&new_comment(1, "Alice", "Salut", None))
            .await
            .unwrap();
        db.insert_comment(&new_comment(1, "Bob", "@Alice yo", Some(top.id)))
            .await
            .unwrap();
        db.insert_comment(&new_comment(2, "Carol", "ailleurs", None))
            .await
            .unwrap();

        let comments = db.list_comments(1).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, top.id);

        let replies = db.list_replies(top.id).await.unwrap();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].author_name, "Bob");
        assert_eq!(replies[0].parent_comment_id, Some(top.id));
    }

    #[tokio::test]
    async fn deleting_a_comment_removes_its_replies() {
        let db = db().await;
        let top = db
            .insert_comment(&new_comment(1, "Alice", "Salut", None))
            .await
            .unwrap();
        let reply = db
            .insert_comment(&new_comment(1, "Bob", "@Alice yo", Some(top.id)))
            .await
            .unwrap();

        assert!(db.delete_comment(top.id).await.unwrap());
        assert!(db.get_comment(reply.id).await.unwrap().is_none());
        assert!(!db.delete_comment(top.id).await.unwrap());
    }
}
