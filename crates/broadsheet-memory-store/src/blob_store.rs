//! In-memory implementation of the `BlobStore` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use broadsheet_core::blob::{BlobStore, ProgressObserver, TransferProgress};
use broadsheet_core::error::DomainError;

/// Blob store held in process memory.
///
/// Writes are copied in chunks of `chunk_size` bytes, reporting progress and
/// yielding to the runtime after each chunk so concurrent writes interleave.
#[derive(Debug)]
pub struct InMemoryBlobStore {
    base_url: String,
    chunk_size: usize,
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    /// Creates a store serving blobs under `base_url`.
    ///
    /// A `chunk_size` of zero is treated as one.
    #[must_use]
    pub fn new(base_url: &str, chunk_size: usize) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            chunk_size: chunk_size.max(1),
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Public URL of `path`. Each path segment is percent-encoded.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}", self.base_url, encoded.join("/"))
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        progress: &dyn ProgressObserver,
    ) -> Result<String, DomainError> {
        if path.is_empty() {
            return Err(DomainError::Validation("blob path must not be empty".into()));
        }

        let total = bytes.len() as u64;
        let mut copied = Vec::with_capacity(bytes.len());
        progress.on_progress(TransferProgress::new(0, total));
        for chunk in bytes.chunks(self.chunk_size) {
            copied.extend_from_slice(chunk);
            progress.on_progress(TransferProgress::new(copied.len() as u64, total));
            tokio::task::yield_now().await;
        }

        self.blobs.write().await.insert(path.to_owned(), copied);
        debug!(path, bytes = total, "blob stored");
        Ok(self.url_for(path))
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, DomainError> {
        Ok(self.blobs.read().await.get(path).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use broadsheet_core::blob::IgnoreProgress;

    use super::*;

    #[derive(Default)]
    struct RecordingProgress(Mutex<Vec<u8>>);

    impl ProgressObserver for RecordingProgress {
        fn on_progress(&self, progress: TransferProgress) {
            self.0.lock().unwrap().push(progress.percent());
        }
    }

    #[tokio::test]
    async fn test_put_stores_bytes_and_returns_encoded_url() {
        // Arrange
        let store = InMemoryBlobStore::new("http://localhost:3000/media/", 4);

        // Act
        let url = store
            .put("images/my photo.png", b"abc", &IgnoreProgress)
            .await
            .unwrap();

        // Assert
        assert_eq!(url, "http://localhost:3000/media/images/my%20photo.png");
        assert_eq!(
            store.get("images/my photo.png").await.unwrap(),
            Some(b"abc".to_vec())
        );
    }

    #[tokio::test]
    async fn test_put_reports_progress_per_chunk() {
        let store = InMemoryBlobStore::new("http://media", 2);
        let progress = RecordingProgress::default();

        store.put("images/a.png", b"abcd", &progress).await.unwrap();

        assert_eq!(*progress.0.lock().unwrap(), vec![0, 50, 100]);
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_path() {
        let store = InMemoryBlobStore::new("http://media", 16);

        store.put("images/a.png", b"one", &IgnoreProgress).await.unwrap();
        store.put("images/a.png", b"two", &IgnoreProgress).await.unwrap();

        assert_eq!(store.get("images/a.png").await.unwrap(), Some(b"two".to_vec()));
    }

    #[tokio::test]
    async fn test_get_of_unwritten_path_is_none() {
        let store = InMemoryBlobStore::new("http://media", 16);

        assert_eq!(store.get("images/missing.png").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_rejects_empty_path() {
        let store = InMemoryBlobStore::new("http://media", 16);

        let result = store.put("", b"x", &IgnoreProgress).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
