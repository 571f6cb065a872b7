//! Domain layer for the read model.

pub mod age;
pub mod views;
