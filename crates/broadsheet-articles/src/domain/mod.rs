//! Domain layer for the Articles context.

pub mod commands;
pub mod document;
