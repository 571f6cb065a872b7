//! Broadsheet — document composer.
//!
//! Responsible for the editing context of the write and edit pages: the
//! editor's content and cursor, single media selection driven by pointer and
//! key events, and the flow that uploads a batch of images and embeds them at
//! the cursor.

pub mod application;
pub mod domain;
