//! Query handlers for the Articles context.

use broadsheet_core::error::DomainError;
use broadsheet_core::repository::{DocumentRepository, Query, SortDirection, StoredDocument};

use crate::domain::document::{ARTICLES_COLLECTION, ContentDocument};

const CREATED_AT_FIELD: &str = "createdAt";
const AUTHOR_FIELD: &str = "author";

fn decode_all(stored: Vec<StoredDocument>) -> Result<Vec<ContentDocument>, DomainError> {
    stored.into_iter().map(ContentDocument::from_stored).collect()
}

/// Loads one article.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no article has the id, or
/// `DomainError::Infrastructure` if loading or decoding fails.
pub async fn get_article_by_id(
    article_id: &str,
    repo: &dyn DocumentRepository,
) -> Result<ContentDocument, DomainError> {
    let stored = repo
        .get(ARTICLES_COLLECTION, article_id)
        .await?
        .ok_or_else(|| DomainError::not_found(ARTICLES_COLLECTION, article_id))?;
    ContentDocument::from_stored(stored)
}

/// Lists every article, newest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if loading or decoding fails.
pub async fn list_recent(repo: &dyn DocumentRepository) -> Result<Vec<ContentDocument>, DomainError> {
    let query = Query::all().order_by(CREATED_AT_FIELD, SortDirection::Descending);
    decode_all(repo.query(ARTICLES_COLLECTION, &query).await?)
}

/// Lists the articles written by `author`, newest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if loading or decoding fails.
pub async fn list_by_author(
    author: &str,
    repo: &dyn DocumentRepository,
) -> Result<Vec<ContentDocument>, DomainError> {
    let query = Query::all()
        .where_eq(AUTHOR_FIELD, author)
        .order_by(CREATED_AT_FIELD, SortDirection::Descending);
    decode_all(repo.query(ARTICLES_COLLECTION, &query).await?)
}
