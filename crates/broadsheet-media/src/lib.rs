//! Broadsheet — Media Uploads bounded context.
//!
//! Responsible for uploading batches of media files to the blob store
//! concurrently, with an all-or-nothing settlement policy, and for single
//! profile picture uploads.

pub mod application;
pub mod domain;
