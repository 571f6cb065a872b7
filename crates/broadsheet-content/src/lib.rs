//! Broadsheet — rich content.
//!
//! Responsible for the ordered unit model of document bodies, the Markdown
//! codec used to persist them, media embed insertion, and the text metrics
//! shown in list and detail views.

pub mod domain;
