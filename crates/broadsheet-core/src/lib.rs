//! Broadsheet Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that all bounded
//! contexts depend on: the clock, the error type, commands, and the seams to
//! the external document store, blob store and identity provider. It contains
//! no infrastructure code.

pub mod blob;
pub mod clock;
pub mod command;
pub mod error;
pub mod identity;
pub mod repository;
pub mod subscription;
