//! Route modules organized by bounded context.

pub mod articles;
pub mod health;
pub mod media;
pub mod profiles;
