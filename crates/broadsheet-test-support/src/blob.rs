//! Scripted blob store for upload tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use broadsheet_core::blob::{BlobStore, ProgressObserver, TransferProgress};
use broadsheet_core::error::DomainError;

/// A blob store whose per-path latency and failures are scripted up front.
///
/// Records every attempted path and the highest number of writes that were
/// in flight at the same time. Successful writes return `{base_url}/{path}`
/// and keep their bytes for later reads.
#[derive(Debug)]
pub struct ScriptedBlobStore {
    base_url: String,
    delays: HashMap<String, Duration>,
    failures: HashMap<String, String>,
    attempted: Mutex<Vec<String>>,
    stored: Mutex<HashMap<String, Vec<u8>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedBlobStore {
    /// Creates a store that accepts every write immediately.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            delays: HashMap::new(),
            failures: HashMap::new(),
            attempted: Mutex::new(Vec::new()),
            stored: Mutex::new(HashMap::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Delays the write to `path` by `delay`.
    #[must_use]
    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_owned(), delay);
        self
    }

    /// Fails the write to `path` with an infrastructure error.
    #[must_use]
    pub fn fail(mut self, path: &str, message: &str) -> Self {
        self.failures.insert(path.to_owned(), message.to_owned());
        self
    }

    /// Paths of every attempted write, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn attempted_paths(&self) -> Vec<String> {
        self.attempted.lock().unwrap().clone()
    }

    /// Highest number of writes observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for ScriptedBlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        progress: &dyn ProgressObserver,
    ) -> Result<String, DomainError> {
        self.attempted.lock().unwrap().push(path.to_owned());
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        let total = bytes.len() as u64;
        progress.on_progress(TransferProgress::new(0, total));
        match self.delays.get(path) {
            Some(delay) => tokio::time::sleep(*delay).await,
            None => tokio::task::yield_now().await,
        }
        progress.on_progress(TransferProgress::new(total / 2, total));

        let outcome = match self.failures.get(path) {
            Some(message) => Err(DomainError::Infrastructure(message.clone())),
            None => {
                progress.on_progress(TransferProgress::new(total, total));
                self.stored
                    .lock()
                    .unwrap()
                    .insert(path.to_owned(), bytes.to_vec());
                Ok(format!("{}/{path}", self.base_url))
            }
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, DomainError> {
        Ok(self.stored.lock().unwrap().get(path).cloned())
    }
}
