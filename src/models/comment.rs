use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::pagination::Chronological;
use crate::models::reply::ReplyDisplay;

/// A comment row joined with its author's username and like count.
/// Soft-deleted rows are included; `deleted_at` marks them.
#[derive(Debug, Clone, FromRow)]
pub struct StoredComment {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub author_username: String,
    pub like_count: i64,
}

impl Chronological for StoredComment {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// DTO for creating a new comment.
#[derive(Debug, Deserialize, Validate)]
pub struct NewComment {
    #[validate(length(min = 1, max = 50))]
    pub thread_id: String,

    #[validate(length(min = 1, max = 50))]
    pub owner_id: String,

    #[validate(length(
        min = 1,
        max = 150,
        message = "Comment must be between 1 and 150 characters"
    ))]
    pub content: String,
}

/// Read-facing shape of a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentDisplay {
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(length(min = 1))]
    pub content: String,

    pub date: DateTime<Utc>,

    #[validate(length(min = 1))]
    pub username: String,

    #[validate(range(min = 0))]
    pub like_count: i64,
}

/// A projected comment together with its own page of replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CommentWithReplies {
    #[serde(flatten)]
    #[validate(nested)]
    pub comment: CommentDisplay,

    #[validate(nested)]
    pub replies: Vec<ReplyDisplay>,
}
