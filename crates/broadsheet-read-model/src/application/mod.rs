//! Application layer for the read model.

pub mod joiner;
pub mod pages;
