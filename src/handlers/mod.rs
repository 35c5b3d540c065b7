// src/handlers/mod.rs

pub mod thread;
