//! Domain layer for the composer.

pub mod editor;
pub mod errors;
pub mod selection;
pub mod surface;
