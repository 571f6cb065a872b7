//! Upload coordinator.
//!
//! A batch of up to [`MAX_BATCH_SIZE`] files is uploaded concurrently on the
//! calling task: every upload is issued together and the batch resolves only
//! once all of them have settled. Settlement is all-or-nothing: one failed
//! upload fails the batch and none of its URLs are handed out. There is no
//! retry; callers resubmit.

use std::collections::HashSet;
use std::sync::Arc;

use broadsheet_core::blob::{BlobStore, ProgressObserver, TransferProgress};
use broadsheet_core::error::DomainError;
use futures::future::join_all;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::errors::{MAX_BATCH_SIZE, UploadError};
use crate::domain::file::MediaFile;
use crate::domain::paths::{image_path, profile_picture_path};
use crate::domain::task::UploadTask;

/// Uploads media files to the blob store.
#[derive(Clone)]
pub struct UploadCoordinator {
    store: Arc<dyn BlobStore>,
}

impl UploadCoordinator {
    /// Creates a coordinator writing to `store`.
    #[must_use]
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Uploads `files` concurrently and returns their URLs in input order.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::BatchTooLarge` (with no upload attempted) if more
    /// than [`MAX_BATCH_SIZE`] files are given, and
    /// `UploadError::UploadFailure` for the lowest-indexed failed file if any
    /// upload fails.
    pub async fn submit(&self, files: Vec<MediaFile>) -> Result<Vec<String>, UploadError> {
        self.start(files)?.settle().await
    }

    /// Validates `files` and prepares a batch without uploading anything yet.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::BatchTooLarge` if more than [`MAX_BATCH_SIZE`]
    /// files are given.
    pub fn start(&self, files: Vec<MediaFile>) -> Result<UploadBatch<'_>, UploadError> {
        if files.len() > MAX_BATCH_SIZE {
            warn!(
                count = files.len(),
                max = MAX_BATCH_SIZE,
                "rejecting oversized upload batch"
            );
            return Err(UploadError::BatchTooLarge {
                count: files.len(),
                max: MAX_BATCH_SIZE,
            });
        }
        warn_on_shared_names(&files);

        let trackers = files
            .iter()
            .enumerate()
            .map(|(index, file)| watch::Sender::new(UploadTask::new(index, &file.name)))
            .collect();

        Ok(UploadBatch {
            store: self.store.as_ref(),
            files,
            trackers,
        })
    }

    /// Uploads a profile picture, replacing the previous one, and returns its
    /// URL.
    ///
    /// # Errors
    ///
    /// Returns the blob store's `DomainError` if the upload fails.
    pub async fn upload_profile_picture(
        &self,
        profile_key: &str,
        file: &MediaFile,
    ) -> Result<String, DomainError> {
        let path = profile_picture_path(profile_key);
        let observer = LoggedProgress { path: &path };
        let url = self.store.put(&path, &file.bytes, &observer).await?;
        info!(path = %path, "profile picture uploaded");
        Ok(url)
    }
}

impl std::fmt::Debug for UploadCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadCoordinator").finish_non_exhaustive()
    }
}

/// A validated batch whose uploads have not been issued yet.
///
/// Progress of each file can be watched before and while [`UploadBatch::settle`]
/// runs.
pub struct UploadBatch<'a> {
    store: &'a dyn BlobStore,
    files: Vec<MediaFile>,
    trackers: Vec<watch::Sender<UploadTask>>,
}

impl UploadBatch<'_> {
    /// Number of files in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` for an empty batch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Progress receivers, one per file, in input order.
    #[must_use]
    pub fn watch_all(&self) -> Vec<watch::Receiver<UploadTask>> {
        self.trackers.iter().map(watch::Sender::subscribe).collect()
    }

    /// Current task snapshots in input order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<UploadTask> {
        self.trackers
            .iter()
            .map(|tracker| tracker.borrow().clone())
            .collect()
    }

    /// Issues every upload at once and waits for all of them to settle.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::UploadFailure` for the lowest-indexed failed
    /// file. The remaining uploads still run to completion first.
    pub async fn settle(self) -> Result<Vec<String>, UploadError> {
        debug!(files = self.files.len(), "issuing upload batch");
        let uploads = self
            .files
            .iter()
            .zip(&self.trackers)
            .enumerate()
            .map(|(index, (file, tracker))| upload_one(self.store, index, file, tracker));
        let outcomes = join_all(uploads).await;

        let mut urls = Vec::with_capacity(outcomes.len());
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(url) => urls.push(url),
                Err(cause) => {
                    warn!(index, error = %cause, "upload batch failed");
                    return Err(UploadError::UploadFailure { index, cause });
                }
            }
        }

        info!(files = urls.len(), "upload batch completed");
        Ok(urls)
    }
}

async fn upload_one(
    store: &dyn BlobStore,
    index: usize,
    file: &MediaFile,
    tracker: &watch::Sender<UploadTask>,
) -> Result<String, DomainError> {
    let path = image_path(&file.name);
    tracker.send_modify(UploadTask::begin);
    debug!(index, path = %path, bytes = file.len(), "upload started");

    let observer = TaskProgress { index, tracker };
    match store.put(&path, &file.bytes, &observer).await {
        Ok(url) => {
            tracker.send_modify(|task| {
                task.complete(url.clone());
            });
            debug!(index, url = %url, "upload completed");
            Ok(url)
        }
        Err(err) => {
            tracker.send_modify(UploadTask::fail);
            Err(err)
        }
    }
}

fn warn_on_shared_names(files: &[MediaFile]) {
    let mut seen = HashSet::new();
    for file in files {
        if !seen.insert(file.name.as_str()) {
            warn!(
                file_name = %file.name,
                "files in one batch share a name and will overwrite each other"
            );
        }
    }
}

struct TaskProgress<'a> {
    index: usize,
    tracker: &'a watch::Sender<UploadTask>,
}

impl ProgressObserver for TaskProgress<'_> {
    fn on_progress(&self, progress: TransferProgress) {
        let percent = progress.percent();
        self.tracker
            .send_modify(|task| task.record_progress(percent));
        debug!(index = self.index, percent, "upload progress");
    }
}

struct LoggedProgress<'a> {
    path: &'a str,
}

impl ProgressObserver for LoggedProgress<'_> {
    fn on_progress(&self, progress: TransferProgress) {
        debug!(path = %self.path, percent = progress.percent(), "upload progress");
    }
}
