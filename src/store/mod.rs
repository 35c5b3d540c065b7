// src/store/mod.rs

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    error::ForumResult,
    models::{
        comment::StoredComment, pagination::Pagination, reply::StoredReply, thread::StoredThread,
    },
};

pub mod postgres;

pub use postgres::PgContentStore;

/// Read access to threads, comments and replies.
///
/// Listings include soft-deleted comments and replies and are ordered by
/// creation time, ties broken by insertion order.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Whether a live thread with this id exists.
    async fn thread_exists(&self, thread_id: &str) -> ForumResult<bool>;

    /// Loads the thread with its author's username.
    /// Fails with `ForumError::NotFound` if absent.
    async fn get_thread_author_view(&self, thread_id: &str) -> ForumResult<StoredThread>;

    /// One page of the thread's comments.
    async fn get_comments_for_thread(
        &self,
        thread_id: &str,
        page: Pagination,
    ) -> ForumResult<Vec<StoredComment>>;

    /// Replies for each of `comment_ids`, with `page` applied to every comment
    /// independently. Comments without replies may be absent from the map.
    async fn get_replies_for_comments(
        &self,
        comment_ids: &[String],
        page: Pagination,
    ) -> ForumResult<HashMap<String, Vec<StoredReply>>>;
}
