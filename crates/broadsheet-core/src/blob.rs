//! Blob store abstraction.

use async_trait::async_trait;

use crate::error::DomainError;

/// Bytes transferred so far for one blob write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferProgress {
    /// Bytes acknowledged by the store.
    pub bytes_transferred: u64,
    /// Total bytes to transfer.
    pub total_bytes: u64,
}

impl TransferProgress {
    /// Creates a progress snapshot.
    #[must_use]
    pub fn new(bytes_transferred: u64, total_bytes: u64) -> Self {
        Self {
            bytes_transferred,
            total_bytes,
        }
    }

    /// Completion as a whole percentage in `0..=100`.
    ///
    /// An empty transfer counts as complete.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total_bytes == 0 {
            return 100;
        }
        let percent = self.bytes_transferred.min(self.total_bytes) * 100 / self.total_bytes;
        u8::try_from(percent).unwrap_or(100)
    }
}

/// Receives advisory progress reports during a blob write.
///
/// Reports are telemetry only; callers must not synchronize on them.
pub trait ProgressObserver: Send + Sync {
    /// Called each time the store acknowledges more bytes.
    fn on_progress(&self, progress: TransferProgress);
}

/// Observer that discards every report.
#[derive(Debug, Clone, Copy)]
pub struct IgnoreProgress;

impl ProgressObserver for IgnoreProgress {
    fn on_progress(&self, _progress: TransferProgress) {}
}

/// External blob store that holds uploaded media.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes `bytes` under `path`, reporting progress to `progress`, and
    /// returns the public URL once the write has completed.
    ///
    /// An existing blob at `path` is overwritten.
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        progress: &dyn ProgressObserver,
    ) -> Result<String, DomainError>;

    /// Reads the blob stored at `path`, or `None` if nothing was written there.
    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_down() {
        assert_eq!(TransferProgress::new(1, 3).percent(), 33);
    }

    #[test]
    fn test_percent_of_empty_transfer_is_complete() {
        assert_eq!(TransferProgress::new(0, 0).percent(), 100);
    }

    #[test]
    fn test_percent_is_capped_at_100() {
        assert_eq!(TransferProgress::new(12, 10).percent(), 100);
    }
}
