// src/models/mod.rs

pub mod comment;
pub mod pagination;
pub mod reply;
pub mod thread;
pub mod user;
