//! Upload error types.

use broadsheet_core::error::DomainError;
use thiserror::Error;

/// Largest number of files accepted in one upload batch.
pub const MAX_BATCH_SIZE: usize = 4;

/// Failure of an upload batch. Either way, no URL from the batch is usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// More files than [`MAX_BATCH_SIZE`] were submitted; nothing was uploaded.
    #[error("batch of {count} files exceeds the limit of {max}")]
    BatchTooLarge {
        /// Number of files submitted.
        count: usize,
        /// The batch limit.
        max: usize,
    },

    /// The upload of the file at `index` failed, failing the whole batch.
    #[error("upload of file {index} failed: {cause}")]
    UploadFailure {
        /// Position of the failed file in the submitted batch.
        index: usize,
        /// Error reported by the blob store.
        #[source]
        cause: DomainError,
    },
}
