// src/store/postgres.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{ForumError, ForumResult, ensure_valid},
    models::{
        comment::{NewComment, StoredComment},
        pagination::Pagination,
        reply::{NewReply, StoredReply},
        thread::{NewThread, StoredThread},
        user::NewUser,
    },
    store::ContentStore,
};

/// Postgres-backed content store.
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Adds a user record so content can be attributed to it. Returns the new id.
    pub async fn create_user(&self, new: NewUser) -> ForumResult<String> {
        ensure_valid("NewUser", &new)?;
        let id = new_id("user");

        sqlx::query("INSERT INTO users (id, username, full_name) VALUES ($1, $2, $3)")
            .bind(&id)
            .bind(&new.username)
            .bind(&new.full_name)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    pub async fn create_thread(&self, new: NewThread) -> ForumResult<String> {
        ensure_valid("NewThread", &new)?;
        let id = new_id("thread");

        sqlx::query("INSERT INTO threads (id, owner_id, title, body) VALUES ($1, $2, $3, $4)")
            .bind(&id)
            .bind(&new.owner_id)
            .bind(&new.title)
            .bind(&new.body)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    /// Adds a comment to a live thread.
    pub async fn create_comment(&self, new: NewComment) -> ForumResult<String> {
        ensure_valid("NewComment", &new)?;
        if !self.thread_exists(&new.thread_id).await? {
            return Err(ForumError::NotFound("Thread not found".to_string()));
        }
        let id = new_id("comment");

        sqlx::query(
            "INSERT INTO comments (id, thread_id, commenter_id, content) VALUES ($1, $2, $3, $4)",
        )
        .bind(&id)
        .bind(&new.thread_id)
        .bind(&new.owner_id)
        .bind(&new.content)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Adds a reply to a live comment of a live thread.
    pub async fn create_reply(&self, new: NewReply) -> ForumResult<String> {
        ensure_valid("NewReply", &new)?;
        if !self.thread_exists(&new.thread_id).await? {
            return Err(ForumError::NotFound("Thread not found".to_string()));
        }
        self.comment_owner(&new.thread_id, &new.comment_id).await?;
        let id = new_id("reply");

        sqlx::query(
            "INSERT INTO replies (id, comment_id, replier_id, content) VALUES ($1, $2, $3, $4)",
        )
        .bind(&id)
        .bind(&new.comment_id)
        .bind(&new.owner_id)
        .bind(&new.content)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Owner of a live comment under a live thread.
    async fn comment_owner(&self, thread_id: &str, comment_id: &str) -> ForumResult<String> {
        sqlx::query_scalar(
            r#"
            SELECT c.commenter_id
            FROM comments c
            JOIN threads t ON t.id = c.thread_id
            WHERE c.id = $1 AND c.thread_id = $2
              AND c.deleted_at IS NULL AND t.deleted_at IS NULL
            "#,
        )
        .bind(comment_id)
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ForumError::NotFound("Comment not found".to_string()))
    }

    /// Soft delete: the row stays and keeps its place in listings.
    /// Only the comment's author may delete it.
    pub async fn soft_delete_comment(
        &self,
        thread_id: &str,
        comment_id: &str,
        user_id: &str,
    ) -> ForumResult<()> {
        if !self.thread_exists(thread_id).await? {
            return Err(ForumError::NotFound("Thread not found".to_string()));
        }
        let owner = self.comment_owner(thread_id, comment_id).await?;
        if owner != user_id {
            return Err(ForumError::Forbidden(
                "You are not authorized to delete this comment".to_string(),
            ));
        }

        let result = sqlx::query(
            "UPDATE comments SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(comment_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ForumError::NotFound("Comment not found".to_string()));
        }
        Ok(())
    }

    /// Only the reply's author may delete it.
    pub async fn soft_delete_reply(
        &self,
        thread_id: &str,
        comment_id: &str,
        reply_id: &str,
        user_id: &str,
    ) -> ForumResult<()> {
        if !self.thread_exists(thread_id).await? {
            return Err(ForumError::NotFound("Thread not found".to_string()));
        }
        self.comment_owner(thread_id, comment_id).await?;

        let owner: String = sqlx::query_scalar(
            "SELECT replier_id FROM replies WHERE id = $1 AND comment_id = $2 AND deleted_at IS NULL",
        )
        .bind(reply_id)
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ForumError::NotFound("Reply not found".to_string()))?;
        if owner != user_id {
            return Err(ForumError::Forbidden(
                "You are not authorized to delete this reply".to_string(),
            ));
        }

        let result = sqlx::query(
            "UPDATE replies SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(reply_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ForumError::NotFound("Reply not found".to_string()));
        }
        Ok(())
    }

    /// Likes the comment, or takes the like back if `user_id` already liked it.
    /// Returns whether the comment is liked afterwards.
    pub async fn toggle_comment_like(
        &self,
        thread_id: &str,
        comment_id: &str,
        user_id: &str,
    ) -> ForumResult<bool> {
        if !self.thread_exists(thread_id).await? {
            return Err(ForumError::NotFound("Thread not found".to_string()));
        }
        self.comment_owner(thread_id, comment_id).await?;

        let mut tx = self.pool.begin().await?;

        let liked: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM comment_likes WHERE user_id = $1 AND comment_id = $2)",
        )
        .bind(user_id)
        .bind(comment_id)
        .fetch_one(&mut *tx)
        .await?;

        if liked {
            sqlx::query("DELETE FROM comment_likes WHERE user_id = $1 AND comment_id = $2")
                .bind(user_id)
                .bind(comment_id)
                .execute(&mut *tx)
                .await?;
        } else {
            // A concurrent like from the same user has already landed; keep it.
            sqlx::query(
                "INSERT INTO comment_likes (user_id, comment_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(user_id)
            .bind(comment_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(comment_id, user_id, liked = !liked, "comment like toggled");

        Ok(!liked)
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn thread_exists(&self, thread_id: &str) -> ForumResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM threads WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(thread_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn get_thread_author_view(&self, thread_id: &str) -> ForumResult<StoredThread> {
        sqlx::query_as::<_, StoredThread>(
            r#"
            SELECT t.id, t.title, t.body, t.created_at, u.username AS author_username
            FROM threads t
            JOIN users u ON u.id = t.owner_id
            WHERE t.id = $1 AND t.deleted_at IS NULL
            "#,
        )
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ForumError::NotFound("Thread not found".to_string()))
    }

    async fn get_comments_for_thread(
        &self,
        thread_id: &str,
        page: Pagination,
    ) -> ForumResult<Vec<StoredComment>> {
        // No deleted_at filter: tombstoned comments keep their slot in the window.
        let comments = sqlx::query_as::<_, StoredComment>(
            r#"
            SELECT
                c.id, c.content, c.created_at, c.deleted_at,
                u.username AS author_username,
                (SELECT COUNT(*) FROM comment_likes cl WHERE cl.comment_id = c.id) AS like_count
            FROM comments c
            JOIN users u ON u.id = c.commenter_id
            WHERE c.thread_id = $1
            ORDER BY c.created_at ASC, c.seq ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(thread_id)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn get_replies_for_comments(
        &self,
        comment_ids: &[String],
        page: Pagination,
    ) -> ForumResult<HashMap<String, Vec<StoredReply>>> {
        if comment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        // Row numbers are assigned per comment so the window applies to each one separately.
        let rows = sqlx::query_as::<_, StoredReply>(
            r#"
            SELECT id, comment_id, content, created_at, deleted_at, author_username
            FROM (
                SELECT
                    r.id, r.comment_id, r.content, r.created_at, r.deleted_at,
                    u.username AS author_username,
                    ROW_NUMBER() OVER (
                        PARTITION BY r.comment_id
                        ORDER BY r.created_at ASC, r.seq ASC
                    ) AS position
                FROM replies r
                JOIN users u ON u.id = r.replier_id
                WHERE r.comment_id = ANY($1)
            ) ranked
            WHERE ranked.position > $2 AND ranked.position <= $2 + $3
            ORDER BY ranked.comment_id, ranked.position
            "#,
        )
        .bind(comment_ids)
        .bind(page.sql_offset())
        .bind(page.sql_limit())
        .fetch_all(&self.pool)
        .await?;

        let mut by_comment: HashMap<String, Vec<StoredReply>> = HashMap::new();
        for reply in rows {
            by_comment
                .entry(reply.comment_id.clone())
                .or_default()
                .push(reply);
        }

        Ok(by_comment)
    }
}
