// src/services/thread_detail.rs

use std::time::Duration;

use crate::{
    error::{ForumError, ForumResult},
    models::{
        pagination::{PageRequest, Pagination},
        thread::DetailedThread,
    },
    services::aggregator::ThreadAggregator,
    store::ContentStore,
};

/// Entry point for reading one thread with its nested comments and replies.
pub struct ThreadDetailUseCase<S> {
    aggregator: ThreadAggregator<S>,
    deadline: Option<Duration>,
}

impl<S: ContentStore> ThreadDetailUseCase<S> {
    pub fn new(aggregator: ThreadAggregator<S>) -> Self {
        Self {
            aggregator,
            deadline: None,
        }
    }

    /// Abandons requests that take longer than `deadline`.
    /// Nothing is written on this path, so there is nothing to roll back.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Default windows: `{limit: max_comments}` and `{limit: max_replies_per_comment}`.
    pub fn default_windows(&self) -> (Pagination, Pagination) {
        let config = self.aggregator.config();
        (
            PageRequest::limit(config.max_comments).resolve(),
            PageRequest::limit(config.max_replies_per_comment).resolve(),
        )
    }

    pub async fn execute(&self, thread_id: &str) -> ForumResult<DetailedThread> {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.run(thread_id))
                .await
                .map_err(|_| {
                    tracing::warn!(thread_id, ?deadline, "thread detail deadline elapsed");
                    ForumError::Timeout
                })?,
            None => self.run(thread_id).await,
        }
    }

    async fn run(&self, thread_id: &str) -> ForumResult<DetailedThread> {
        if !self.aggregator.store().thread_exists(thread_id).await? {
            return Err(ForumError::NotFound("Thread not found".to_string()));
        }

        let (comments_page, replies_page) = self.default_windows();
        self.aggregator
            .aggregate(thread_id, comments_page, replies_page)
            .await
    }
}
