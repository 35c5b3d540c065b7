use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::comment::CommentWithReplies;

/// Most comments a thread detail view may carry.
pub const MAX_COMMENTS_COUNT: u32 = 10;

/// Most replies shown under each comment of a thread detail view.
pub const MAX_REPLIES_PER_COMMENT_COUNT: u32 = 3;

/// A live thread joined with its author's username.
#[derive(Debug, Clone, FromRow)]
pub struct StoredThread {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub author_username: String,
}

/// DTO for creating a new thread.
#[derive(Debug, Deserialize, Validate)]
pub struct NewThread {
    #[validate(length(min = 1, max = 50))]
    pub owner_id: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Title length must be between 1 and 100 chars"
    ))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Body length must be between 1 and 255 chars"
    ))]
    pub body: String,
}

/// A thread with its first page of comments, each carrying its first page of replies.
/// Built only for the detail view and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DetailedThread {
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(length(min = 1))]
    pub title: String,

    #[validate(length(min = 1))]
    pub body: String,

    pub date: DateTime<Utc>,

    #[validate(length(min = 1))]
    pub username: String,

    #[validate(nested)]
    pub comments: Vec<CommentWithReplies>,
}
