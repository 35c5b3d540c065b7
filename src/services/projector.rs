// src/services/projector.rs

use crate::{
    config::{DELETED_COMMENT_CONTENT, DELETED_REPLY_CONTENT, DetailConfig},
    error::{ForumResult, ensure_valid},
    models::{
        comment::{CommentDisplay, StoredComment},
        reply::{ReplyDisplay, StoredReply},
    },
};

/// Turns stored replies into their display payload.
#[derive(Debug, Clone)]
pub struct ReplyProjector {
    placeholder: String,
}

impl ReplyProjector {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    /// A soft-deleted reply keeps its id, author and creation date but shows the placeholder.
    pub fn project(&self, reply: StoredReply) -> ForumResult<ReplyDisplay> {
        let content = if reply.deleted_at.is_some() {
            self.placeholder.clone()
        } else {
            reply.content
        };

        let display = ReplyDisplay {
            id: reply.id,
            content,
            date: reply.created_at,
            username: reply.author_username,
        };
        ensure_valid("ReplyDisplay", &display)?;
        Ok(display)
    }
}

impl Default for ReplyProjector {
    fn default() -> Self {
        Self::new(DELETED_REPLY_CONTENT)
    }
}

/// Turns stored comments into their display payload.
#[derive(Debug, Clone)]
pub struct CommentProjector {
    placeholder: String,
}

impl CommentProjector {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    pub fn project(&self, comment: StoredComment) -> ForumResult<CommentDisplay> {
        let content = if comment.deleted_at.is_some() {
            self.placeholder.clone()
        } else {
            comment.content
        };

        let display = CommentDisplay {
            id: comment.id,
            content,
            date: comment.created_at,
            username: comment.author_username,
            like_count: comment.like_count,
        };
        ensure_valid("CommentDisplay", &display)?;
        Ok(display)
    }
}

impl Default for CommentProjector {
    fn default() -> Self {
        Self::new(DELETED_COMMENT_CONTENT)
    }
}

/// Both projectors, configured from one `DetailConfig`.
#[derive(Debug, Clone, Default)]
pub struct Projectors {
    pub comments: CommentProjector,
    pub replies: ReplyProjector,
}

impl Projectors {
    pub fn from_config(config: &DetailConfig) -> Self {
        Self {
            comments: CommentProjector::new(config.deleted_comment_content.clone()),
            replies: ReplyProjector::new(config.deleted_reply_content.clone()),
        }
    }
}
