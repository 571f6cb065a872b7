//! Application layer for the composer.

pub mod binding;
pub mod session;
