//! Broadsheet Memory Store — process-local implementations of the document
//! store and blob store seams.
//!
//! Both stores keep everything in memory and lose it on restart.

mod blob_store;
mod document_store;

pub use blob_store::InMemoryBlobStore;
pub use document_store::InMemoryDocumentRepository;
