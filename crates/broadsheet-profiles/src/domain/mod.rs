//! Domain layer for the Author Profiles context.

pub mod commands;
pub mod profile;
