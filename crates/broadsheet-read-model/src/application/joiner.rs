//! Read-time join of articles with author profiles.
//!
//! Profile lookups are best-effort: a missing, unusable or failed lookup only
//! degrades its own entry to the fallback author and never fails the batch.

use broadsheet_articles::domain::document::ContentDocument;
use broadsheet_core::clock::Clock;
use broadsheet_core::repository::DocumentRepository;
use broadsheet_profiles::application::query_handlers::fetch_profile;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::views::{AuthorSnapshot, EnrichedDocumentView};

/// Enriches article documents with their authors' profiles.
#[derive(Clone, Copy)]
pub struct ReadModelJoiner<'a> {
    clock: &'a dyn Clock,
    repo: &'a dyn DocumentRepository,
}

impl<'a> ReadModelJoiner<'a> {
    /// Creates a joiner reading profiles from `repo`.
    #[must_use]
    pub fn new(clock: &'a dyn Clock, repo: &'a dyn DocumentRepository) -> Self {
        Self { clock, repo }
    }

    /// Resolves every document's author concurrently and returns the views in
    /// input order.
    pub async fn enrich(&self, documents: Vec<ContentDocument>) -> Vec<EnrichedDocumentView> {
        debug!(documents = documents.len(), "enriching documents");
        let lookups = documents
            .iter()
            .map(|document| fetch_profile(&document.author, self.repo));
        let profiles = join_all(lookups).await;

        let now = self.clock.now();
        documents
            .into_iter()
            .zip(profiles)
            .map(|(document, lookup)| {
                let author = match lookup {
                    Ok(Some(profile)) => AuthorSnapshot::from_profile(&profile),
                    Ok(None) => {
                        warn!(
                            article_id = %document.id,
                            author = %document.author,
                            "author profile missing, using fallback"
                        );
                        AuthorSnapshot::fallback(&document.author)
                    }
                    Err(error) => {
                        warn!(
                            article_id = %document.id,
                            author = %document.author,
                            %error,
                            "author profile lookup failed, using fallback"
                        );
                        AuthorSnapshot::fallback(&document.author)
                    }
                };
                EnrichedDocumentView::new(document, author, now)
            })
            .collect()
    }
}

impl std::fmt::Debug for ReadModelJoiner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadModelJoiner").finish_non_exhaustive()
    }
}
