//! Domain layer for rich content.

pub mod embed;
pub mod markup;
pub mod metrics;
pub mod rich_content;
