// src/services/aggregator.rs

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::{
    config::{DetailConfig, ReplyFetchStrategy},
    error::{ForumError, ForumResult, ensure_valid},
    models::{
        comment::{CommentWithReplies, StoredComment},
        pagination::{Pagination, sort_chronologically},
        reply::StoredReply,
        thread::DetailedThread,
    },
    services::projector::Projectors,
    store::ContentStore,
};

/// Assembles a thread with its comments and each comment's replies.
///
/// Comments and replies are paginated independently: `comments_page` bounds the
/// thread's comments, `replies_page` bounds the replies of every retained comment.
/// Soft-deleted records stay in the result (and in the windows) with their content
/// replaced by the configured placeholder. The read path never writes.
pub struct ThreadAggregator<S> {
    store: Arc<S>,
    config: DetailConfig,
    projectors: Projectors,
}

impl<S: ContentStore> ThreadAggregator<S> {
    pub fn new(store: Arc<S>, config: DetailConfig) -> Self {
        let projectors = Projectors::from_config(&config);
        Self {
            store,
            config,
            projectors,
        }
    }

    pub fn config(&self) -> &DetailConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub async fn aggregate(
        &self,
        thread_id: &str,
        comments_page: Pagination,
        replies_page: Pagination,
    ) -> ForumResult<DetailedThread> {
        let (thread, mut comments) = tokio::try_join!(
            self.store.get_thread_author_view(thread_id),
            self.store.get_comments_for_thread(thread_id, comments_page),
        )?;

        if comments.len() > comments_page.limit as usize {
            return Err(ForumError::validation(
                "DetailedThread",
                format!(
                    "store returned {} comments for a window of {}",
                    comments.len(),
                    comments_page.limit
                ),
            ));
        }
        sort_chronologically(&mut comments);

        let comment_ids: Vec<String> = comments.iter().map(|c| c.id.clone()).collect();
        let mut replies = self.fetch_replies(&comment_ids, replies_page).await?;

        let comments = comments
            .into_iter()
            .map(|comment| {
                let own = replies.remove(&comment.id).unwrap_or_default();
                self.attach_replies(comment, own, replies_page)
            })
            .collect::<ForumResult<Vec<_>>>()?;

        let detail = DetailedThread {
            id: thread.id,
            title: thread.title,
            body: thread.body,
            date: thread.created_at,
            username: thread.author_username,
            comments,
        };
        self.check_limits(&detail)?;

        tracing::debug!(
            thread_id,
            comments = detail.comments.len(),
            replies = detail.comments.iter().map(|c| c.replies.len()).sum::<usize>(),
            "assembled thread detail"
        );

        Ok(detail)
    }

    async fn fetch_replies(
        &self,
        comment_ids: &[String],
        page: Pagination,
    ) -> ForumResult<HashMap<String, Vec<StoredReply>>> {
        if comment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        match self.config.reply_fetch {
            ReplyFetchStrategy::Batched => {
                self.store.get_replies_for_comments(comment_ids, page).await
            }
            ReplyFetchStrategy::PerComment => {
                // Any failed sub-fetch fails the whole aggregation.
                let pages = try_join_all(comment_ids.iter().map(|id| async move {
                    let mut fetched = self
                        .store
                        .get_replies_for_comments(std::slice::from_ref(id), page)
                        .await?;
                    Ok::<_, ForumError>((id.clone(), fetched.remove(id).unwrap_or_default()))
                }))
                .await?;

                Ok(pages.into_iter().collect())
            }
        }
    }

    fn attach_replies(
        &self,
        comment: StoredComment,
        mut replies: Vec<StoredReply>,
        page: Pagination,
    ) -> ForumResult<CommentWithReplies> {
        if let Some(stray) = replies.iter().find(|r| r.comment_id != comment.id) {
            return Err(ForumError::validation(
                "CommentWithReplies",
                format!(
                    "reply {} belongs to comment {}, not {}",
                    stray.id, stray.comment_id, comment.id
                ),
            ));
        }
        if replies.len() > page.limit as usize {
            return Err(ForumError::validation(
                "CommentWithReplies",
                format!(
                    "store returned {} replies for comment {} with a window of {}",
                    replies.len(),
                    comment.id,
                    page.limit
                ),
            ));
        }
        sort_chronologically(&mut replies);

        let replies = replies
            .into_iter()
            .map(|reply| self.projectors.replies.project(reply))
            .collect::<ForumResult<Vec<_>>>()?;
        let comment = self.projectors.comments.project(comment)?;

        Ok(CommentWithReplies { comment, replies })
    }

    /// Shape rules come from the `validator` derives; count rules from `DetailConfig`.
    fn check_limits(&self, detail: &DetailedThread) -> ForumResult<()> {
        ensure_valid("DetailedThread", detail)?;

        if detail.comments.len() > self.config.max_comments as usize {
            return Err(ForumError::validation(
                "DetailedThread",
                format!(
                    "{} comments exceed the maximum of {}",
                    detail.comments.len(),
                    self.config.max_comments
                ),
            ));
        }

        let max_replies = self.config.max_replies_per_comment as usize;
        if let Some(over) = detail.comments.iter().find(|c| c.replies.len() > max_replies) {
            return Err(ForumError::validation(
                "DetailedThread",
                format!(
                    "comment {} has {} replies, above the maximum of {}",
                    over.comment.id,
                    over.replies.len(),
                    max_replies
                ),
            ));
        }

        Ok(())
    }
}
