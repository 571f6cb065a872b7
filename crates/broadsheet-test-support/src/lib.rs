//! Shared test doubles and utilities for the Broadsheet publishing engine.

mod blob;
mod clock;
mod identity;
mod repository;

pub use blob::ScriptedBlobStore;
pub use clock::FixedClock;
pub use identity::{FakeIdentityProvider, user};
pub use repository::{DelayedDocumentRepository, FailingDocumentRepository};
