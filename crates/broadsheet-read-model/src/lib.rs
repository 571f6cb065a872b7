//! Broadsheet — Read Model.
//!
//! Joins article documents with separately stored author profiles at read
//! time and computes the derived display fields used by the feed, article
//! detail and author pages.

pub mod application;
pub mod domain;
