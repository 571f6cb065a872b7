//! Shared application state.

use std::sync::Arc;

use broadsheet_core::blob::BlobStore;
use broadsheet_core::clock::Clock;
use broadsheet_core::repository::DocumentRepository;
use broadsheet_media::application::coordinator::UploadCoordinator;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for timestamps and relative ages.
    pub clock: Arc<dyn Clock>,
    /// Document store holding articles and profiles.
    pub documents: Arc<dyn DocumentRepository>,
    /// Blob store holding uploaded media, read back by the media file route.
    pub blobs: Arc<dyn BlobStore>,
    /// Upload coordinator writing to the blob store.
    pub uploads: UploadCoordinator,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        documents: Arc<dyn DocumentRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            clock,
            documents,
            uploads: UploadCoordinator::new(Arc::clone(&blobs)),
            blobs,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("uploads", &self.uploads)
            .finish_non_exhaustive()
    }
}
