//! Test repositories — `DocumentRepository` doubles for tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use broadsheet_core::error::DomainError;
use broadsheet_core::repository::{DocumentRepository, Fields, Query, StoredDocument};
use serde_json::Value;

/// A document repository that always returns an infrastructure error. Useful
/// for testing error-handling paths.
#[derive(Debug)]
pub struct FailingDocumentRepository;

fn connection_refused() -> DomainError {
    DomainError::Infrastructure("connection refused".into())
}

#[async_trait]
impl DocumentRepository for FailingDocumentRepository {
    async fn create(&self, _collection: &str, _fields: Fields) -> Result<String, DomainError> {
        Err(connection_refused())
    }

    async fn put(&self, _collection: &str, _id: &str, _fields: Fields) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn get(
        &self,
        _collection: &str,
        _id: &str,
    ) -> Result<Option<StoredDocument>, DomainError> {
        Err(connection_refused())
    }

    async fn update(
        &self,
        _collection: &str,
        _id: &str,
        _fields: Fields,
    ) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn append_to_list(
        &self,
        _collection: &str,
        _id: &str,
        _field: &str,
        _value: Value,
    ) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn query(
        &self,
        _collection: &str,
        _query: &Query,
    ) -> Result<Vec<StoredDocument>, DomainError> {
        Err(connection_refused())
    }
}

/// Wraps another repository and scripts per-document latency and failures on
/// `get`. Every other call is passed through unchanged.
///
/// Used to make concurrent lookups finish out of order.
pub struct DelayedDocumentRepository {
    inner: Arc<dyn DocumentRepository>,
    delays: HashMap<String, Duration>,
    failures: HashMap<String, String>,
}

impl DelayedDocumentRepository {
    /// Wraps `inner` with no scripted behaviour.
    #[must_use]
    pub fn new(inner: Arc<dyn DocumentRepository>) -> Self {
        Self {
            inner,
            delays: HashMap::new(),
            failures: HashMap::new(),
        }
    }

    /// Delays every `get` of document `id` by `delay`.
    #[must_use]
    pub fn delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_owned(), delay);
        self
    }

    /// Fails every `get` of document `id` with an infrastructure error.
    #[must_use]
    pub fn fail(mut self, id: &str, message: &str) -> Self {
        self.failures.insert(id.to_owned(), message.to_owned());
        self
    }
}

impl std::fmt::Debug for DelayedDocumentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelayedDocumentRepository")
            .field("delays", &self.delays)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DocumentRepository for DelayedDocumentRepository {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, DomainError> {
        self.inner.create(collection, fields).await
    }

    async fn put(&self, collection: &str, id: &str, fields: Fields) -> Result<(), DomainError> {
        self.inner.put(collection, id, fields).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, DomainError> {
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(message) = self.failures.get(id) {
            return Err(DomainError::Infrastructure(message.clone()));
        }
        self.inner.get(collection, id).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), DomainError> {
        self.inner.update(collection, id, fields).await
    }

    async fn append_to_list(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), DomainError> {
        self.inner.append_to_list(collection, id, field, value).await
    }

    async fn query(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<StoredDocument>, DomainError> {
        self.inner.query(collection, query).await
    }
}
