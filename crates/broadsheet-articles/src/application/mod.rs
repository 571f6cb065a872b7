//! Application layer for the Articles context.

pub mod command_handlers;
pub mod query_handlers;
