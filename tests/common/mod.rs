// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use forum_backend::{
    config::DetailConfig,
    error::{ForumError, ForumResult},
    models::{
        comment::StoredComment,
        pagination::{Pagination, sort_chronologically},
        reply::StoredReply,
        thread::StoredThread,
    },
    services::{ThreadAggregator, ThreadDetailUseCase},
    store::ContentStore,
};

/// Parses "YYYY-MM-DD" or a full RFC 3339 timestamp.
pub fn at(when: &str) -> DateTime<Utc> {
    if when.len() == 10 {
        format!("{}T00:00:00Z", when).parse().unwrap()
    } else {
        when.parse().unwrap()
    }
}

/// The part of an already ordered slice that falls inside `page`.
/// An offset past the end yields nothing.
pub fn window<T: Clone>(page: Pagination, items: &[T]) -> Vec<T> {
    let start = (page.offset as usize).min(items.len());
    let end = start.saturating_add(page.limit as usize).min(items.len());
    items[start..end].to_vec()
}

#[derive(Default)]
struct State {
    threads: Vec<StoredThread>,
    // (thread_id, comment), in insertion order
    comments: Vec<(String, StoredComment)>,
    replies: Vec<StoredReply>,
}

/// In-memory content store with the same ordering and window rules as the Postgres adapter.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
    fail_reply_fetch: AtomicBool,
    reply_fetches: AtomicUsize,
    reply_delay: RwLock<Option<Duration>>,
    // When set, every reply window is ignored and all replies are returned.
    ignore_reply_window: AtomicBool,
    misfiled: RwLock<Vec<(String, StoredReply)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_thread(&self, id: &str, title: &str, body: &str, created: &str, username: &str) {
        self.state.write().unwrap().threads.push(StoredThread {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            created_at: at(created),
            author_username: username.to_string(),
        });
    }

    pub fn add_comment(&self, thread_id: &str, id: &str, content: &str, created: &str, username: &str) {
        self.state.write().unwrap().comments.push((
            thread_id.to_string(),
            StoredComment {
                id: id.to_string(),
                content: content.to_string(),
                created_at: at(created),
                deleted_at: None,
                author_username: username.to_string(),
                like_count: 0,
            },
        ));
    }

    pub fn add_reply(&self, comment_id: &str, id: &str, content: &str, created: &str, username: &str) {
        self.state.write().unwrap().replies.push(StoredReply {
            id: id.to_string(),
            comment_id: comment_id.to_string(),
            content: content.to_string(),
            created_at: at(created),
            deleted_at: None,
            author_username: username.to_string(),
        });
    }

    pub fn delete_comment(&self, id: &str) {
        let mut state = self.state.write().unwrap();
        let (_, comment) = state.comments.iter_mut().find(|(_, c)| c.id == id).unwrap();
        comment.deleted_at = Some(Utc::now());
    }

    pub fn delete_reply(&self, id: &str) {
        let mut state = self.state.write().unwrap();
        let reply = state.replies.iter_mut().find(|r| r.id == id).unwrap();
        reply.deleted_at = Some(Utc::now());
    }

    pub fn set_likes(&self, comment_id: &str, likes: i64) {
        let mut state = self.state.write().unwrap();
        let (_, comment) = state.comments.iter_mut().find(|(_, c)| c.id == comment_id).unwrap();
        comment.like_count = likes;
    }

    /// Makes the store hand back `reply` (which belongs elsewhere) in the bucket of `under`.
    pub fn misfile_reply(&self, under: &str, reply: StoredReply) {
        self.misfiled.write().unwrap().push((under.to_string(), reply));
    }

    pub fn fail_reply_fetch(&self) {
        self.fail_reply_fetch.store(true, Ordering::SeqCst);
    }

    pub fn ignore_reply_window(&self) {
        self.ignore_reply_window.store(true, Ordering::SeqCst);
    }

    pub fn delay_replies(&self, delay: Duration) {
        *self.reply_delay.write().unwrap() = Some(delay);
    }

    pub fn reply_fetches(&self) -> usize {
        self.reply_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn thread_exists(&self, thread_id: &str) -> ForumResult<bool> {
        Ok(self.state.read().unwrap().threads.iter().any(|t| t.id == thread_id))
    }

    async fn get_thread_author_view(&self, thread_id: &str) -> ForumResult<StoredThread> {
        self.state
            .read()
            .unwrap()
            .threads
            .iter()
            .find(|t| t.id == thread_id)
            .cloned()
            .ok_or_else(|| ForumError::NotFound("Thread not found".to_string()))
    }

    async fn get_comments_for_thread(
        &self,
        thread_id: &str,
        page: Pagination,
    ) -> ForumResult<Vec<StoredComment>> {
        let state = self.state.read().unwrap();
        let mut comments: Vec<StoredComment> = state
            .comments
            .iter()
            .filter(|(t, _)| t == thread_id)
            .map(|(_, c)| c.clone())
            .collect();
        sort_chronologically(&mut comments);
        Ok(window(page, &comments))
    }

    async fn get_replies_for_comments(
        &self,
        comment_ids: &[String],
        page: Pagination,
    ) -> ForumResult<HashMap<String, Vec<StoredReply>>> {
        self.reply_fetches.fetch_add(1, Ordering::SeqCst);
        let delay = *self.reply_delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_reply_fetch.load(Ordering::SeqCst) {
            return Err(ForumError::Store(sqlx::Error::PoolTimedOut));
        }

        let ignore_window = self.ignore_reply_window.load(Ordering::SeqCst);
        let state = self.state.read().unwrap();
        let mut by_comment = HashMap::new();
        for id in comment_ids {
            let mut own: Vec<StoredReply> = state
                .replies
                .iter()
                .filter(|r| r.comment_id == *id)
                .cloned()
                .collect();
            sort_chronologically(&mut own);
            own.extend(
                self.misfiled
                    .read()
                    .unwrap()
                    .iter()
                    .filter(|(under, _)| under == id)
                    .map(|(_, r)| r.clone()),
            );
            let own = if ignore_window { own } else { window(page, &own) };
            if !own.is_empty() {
                by_comment.insert(id.clone(), own);
            }
        }
        Ok(by_comment)
    }
}

pub fn aggregator(store: &Arc<MemoryStore>, config: DetailConfig) -> ThreadAggregator<MemoryStore> {
    ThreadAggregator::new(Arc::clone(store), config)
}

pub fn use_case(store: &Arc<MemoryStore>) -> ThreadDetailUseCase<MemoryStore> {
    ThreadDetailUseCase::new(aggregator(store, DetailConfig::default()))
}

/// thread-123 with three comments out of chronological order; comment-xyz is soft-deleted.
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.add_thread("thread-123", "a thread", "a body", "2022-03-01", "dicoding");
    store.add_comment("thread-123", "comment-abc", "third comment", "2022-03-06", "johndoe");
    store.add_comment("thread-123", "comment-def", "second comment", "2022-03-05", "janedoe");
    store.add_comment("thread-123", "comment-xyz", "first comment", "2022-03-03", "dicoding");
    store.delete_comment("comment-xyz");
    store.set_likes("comment-abc", 2);
    store.add_reply("comment-def", "reply-1", "a reply", "2022-03-07", "dicoding");
    store.add_reply("comment-def", "reply-2", "a deleted reply", "2022-03-08", "johndoe");
    store.delete_reply("reply-2");
    store
}
