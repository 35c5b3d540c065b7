// src/services/mod.rs

pub mod aggregator;
pub mod projector;
pub mod thread_detail;

pub use aggregator::ThreadAggregator;
pub use projector::{CommentProjector, Projectors, ReplyProjector};
pub use thread_detail::ThreadDetailUseCase;
