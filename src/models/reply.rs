use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::pagination::Chronological;

/// A reply row joined with its author's username.
#[derive(Debug, Clone, FromRow)]
pub struct StoredReply {
    pub id: String,
    /// The comment this reply belongs to.
    pub comment_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub author_username: String,
}

impl Chronological for StoredReply {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// DTO for creating a new reply.
#[derive(Debug, Deserialize, Validate)]
pub struct NewReply {
    #[validate(length(min = 1, max = 50))]
    pub thread_id: String,

    #[validate(length(min = 1, max = 50))]
    pub comment_id: String,

    #[validate(length(min = 1, max = 50))]
    pub owner_id: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Reply must be between 1 and 255 characters"
    ))]
    pub content: String,
}

/// Read-facing shape of a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ReplyDisplay {
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(length(min = 1))]
    pub content: String,

    pub date: DateTime<Utc>,

    #[validate(length(min = 1))]
    pub username: String,
}
