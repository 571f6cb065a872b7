//! Broadsheet — Articles bounded context.
//!
//! Responsible for publishing and editing articles, appending reader
//! comments, and loading articles for the read model.

pub mod application;
pub mod domain;
