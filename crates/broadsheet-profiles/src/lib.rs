//! Broadsheet — Author Profiles bounded context.
//!
//! Responsible for author profile records: registration on first sign-in,
//! bio and social links, profile pictures, and profile lookup for the read
//! model.

pub mod application;
pub mod domain;
