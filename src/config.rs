// src/config.rs

use std::env;
use std::time::Duration;
use dotenvy::dotenv;

use crate::models::thread::{MAX_COMMENTS_COUNT, MAX_REPLIES_PER_COMMENT_COUNT};

/// Placeholder shown instead of the content of a soft-deleted comment.
pub const DELETED_COMMENT_CONTENT: &str = "**komentar telah dihapus**";

/// Placeholder shown instead of the content of a soft-deleted reply.
pub const DELETED_REPLY_CONTENT: &str = "**balasan telah dihapus**";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: String,
    pub detail: DetailConfig,
    /// Deadline for a single thread detail request, if any.
    pub detail_timeout: Option<Duration>,
}

/// How replies are loaded for the retained comments of a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyFetchStrategy {
    /// One store call keyed by every retained comment id.
    #[default]
    Batched,
    /// One store call per comment, issued concurrently.
    PerComment,
}

impl ReplyFetchStrategy {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "batched" => Some(Self::Batched),
            "per-comment" | "per_comment" => Some(Self::PerComment),
            _ => None,
        }
    }
}

/// Explicit settings for assembling a thread detail view.
#[derive(Debug, Clone)]
pub struct DetailConfig {
    pub max_comments: u32,
    pub max_replies_per_comment: u32,
    pub deleted_comment_content: String,
    pub deleted_reply_content: String,
    pub reply_fetch: ReplyFetchStrategy,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            max_comments: MAX_COMMENTS_COUNT,
            max_replies_per_comment: MAX_REPLIES_PER_COMMENT_COUNT,
            deleted_comment_content: DELETED_COMMENT_CONTENT.to_string(),
            deleted_reply_content: DELETED_REPLY_CONTENT.to_string(),
            reply_fetch: ReplyFetchStrategy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let mut detail = DetailConfig::default();
        if let Some(max) = parse_var::<u32>("MAX_COMMENTS_COUNT") {
            detail.max_comments = max;
        }
        if let Some(max) = parse_var::<u32>("MAX_REPLIES_PER_COMMENT_COUNT") {
            detail.max_replies_per_comment = max;
        }
        if let Ok(raw) = env::var("REPLY_FETCH_STRATEGY") {
            detail.reply_fetch = ReplyFetchStrategy::parse(&raw)
                .expect("REPLY_FETCH_STRATEGY must be 'batched' or 'per-comment'");
        }

        let detail_timeout = parse_var::<u64>("THREAD_DETAIL_TIMEOUT_MS")
            .map(Duration::from_millis);

        Self {
            database_url,
            rust_log,
            bind_addr,
            detail,
            detail_timeout,
        }
    }
}

/// Reads an optional numeric variable; a present but malformed value is a startup error.
fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => panic!("{} must be a non-negative integer, got '{}'", name, raw),
    }
}
