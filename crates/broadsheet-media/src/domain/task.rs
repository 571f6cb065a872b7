//! Per-file upload state.

/// Lifecycle of a single upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    /// Created, not yet handed to the blob store.
    Pending,
    /// Bytes are being written.
    Uploading,
    /// The store confirmed the write and returned a URL.
    Done,
    /// The store reported an error.
    Failed,
}

/// Snapshot of one file's upload within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    index: usize,
    file_name: String,
    progress: u8,
    status: UploadStatus,
    result_url: Option<String>,
}

impl UploadTask {
    /// Creates a pending task for the file at `index` of its batch.
    #[must_use]
    pub fn new(index: usize, file_name: &str) -> Self {
        Self {
            index,
            file_name: file_name.to_owned(),
            progress: 0,
            status: UploadStatus::Pending,
            result_url: None,
        }
    }

    /// Position of the file in its batch.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Advisory progress in `0..=100`.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> UploadStatus {
        self.status
    }

    /// Public URL, present only once the store confirmed completion.
    #[must_use]
    pub fn result_url(&self) -> Option<&str> {
        self.result_url.as_deref()
    }

    /// Returns `true` once the task is done or failed.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self.status, UploadStatus::Done | UploadStatus::Failed)
    }

    pub(crate) fn begin(&mut self) {
        if self.status == UploadStatus::Pending {
            self.status = UploadStatus::Uploading;
        }
    }

    pub(crate) fn record_progress(&mut self, percent: u8) {
        if self.status == UploadStatus::Uploading {
            self.progress = self.progress.max(percent.min(100));
        }
    }

    /// Records the completion URL. Only the first completion of an uploading
    /// task is accepted.
    pub(crate) fn complete(&mut self, url: String) -> bool {
        if self.status != UploadStatus::Uploading || self.result_url.is_some() {
            return false;
        }
        self.result_url = Some(url);
        self.progress = 100;
        self.status = UploadStatus::Done;
        true
    }

    pub(crate) fn fail(&mut self) {
        if !self.is_settled() {
            self.status = UploadStatus::Failed;
        }
    }
}
