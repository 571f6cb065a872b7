//! Domain layer for media uploads.

pub mod errors;
pub mod file;
pub mod paths;
pub mod task;
