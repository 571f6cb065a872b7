//! Application layer for the Author Profiles context.

pub mod command_handlers;
pub mod query_handlers;
