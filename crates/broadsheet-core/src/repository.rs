//! Document repository abstraction.
//!
//! The document store is schemaless: every document is a map of top-level
//! fields addressed by collection and id. Bounded contexts own the typed
//! shape of their documents and convert to and from [`Fields`].

use async_trait::async_trait;
use serde_json::Value;

use crate::error::DomainError;

/// Top-level fields of a stored document.
pub type Fields = serde_json::Map<String, Value>;

/// Stored representation of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Document identifier, unique within its collection.
    pub id: String,
    /// Top-level document fields.
    pub fields: Fields,
}

/// Sort direction for ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

/// Ordering clause of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Top-level field to order by.
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Equality filter on a single top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    /// Top-level field to compare.
    pub field: String,
    /// Value the field must equal.
    pub equals: Value,
}

/// A collection query with an optional filter and ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Optional equality filter.
    pub filter: Option<FieldFilter>,
    /// Optional ordering.
    pub order_by: Option<OrderBy>,
}

impl Query {
    /// An unfiltered, unordered query.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the query to documents whose `field` equals `value`.
    #[must_use]
    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filter = Some(FieldFilter {
            field: field.to_owned(),
            equals: value.into(),
        });
        self
    }

    /// Orders the results by `field`.
    #[must_use]
    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order_by = Some(OrderBy {
            field: field.to_owned(),
            direction,
        });
        self
    }

    /// Returns whether `document` passes this query's filter.
    #[must_use]
    pub fn matches(&self, document: &StoredDocument) -> bool {
        match &self.filter {
            None => true,
            Some(filter) => document.fields.get(&filter.field) == Some(&filter.equals),
        }
    }
}

/// Repository trait for the external document store.
///
/// Every mutating call is a single atomic write: implementations must never
/// leave a document partially updated.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Creates a document with a store-generated id and returns the id.
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, DomainError>;

    /// Creates or replaces the document stored under `id`.
    async fn put(&self, collection: &str, id: &str, fields: Fields) -> Result<(), DomainError>;

    /// Loads a document, returning `Ok(None)` when it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, DomainError>;

    /// Merges `fields` into an existing document.
    ///
    /// Fails with `DomainError::NotFound` if the document does not exist.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), DomainError>;

    /// Appends `value` to the list stored in `field`, creating the list if
    /// absent. A value equal to an existing element is not appended twice.
    ///
    /// Fails with `DomainError::NotFound` if the document does not exist.
    async fn append_to_list(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), DomainError>;

    /// Runs `query` against `collection` and returns the matching documents in
    /// query order.
    async fn query(&self, collection: &str, query: &Query)
    -> Result<Vec<StoredDocument>, DomainError>;
}
