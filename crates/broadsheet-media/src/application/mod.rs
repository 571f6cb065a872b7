//! Application layer for media uploads.

pub mod coordinator;
