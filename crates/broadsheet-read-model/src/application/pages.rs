//! The three pages built on the read model: the feed, the article page and
//! the author page.

use broadsheet_articles::application::query_handlers::{
    get_article_by_id, list_by_author, list_recent,
};
use broadsheet_core::clock::Clock;
use broadsheet_core::error::DomainError;
use broadsheet_core::repository::DocumentRepository;
use broadsheet_profiles::application::query_handlers::fetch_profile;
use tracing::warn;

use super::joiner::ReadModelJoiner;
use crate::domain::views::{ArticleDetailView, AuthorPageView, CommentView, EnrichedDocumentView};

/// Every article, newest first, enriched.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the articles cannot be loaded.
pub async fn feed(
    clock: &dyn Clock,
    repo: &dyn DocumentRepository,
) -> Result<Vec<EnrichedDocumentView>, DomainError> {
    let documents = list_recent(repo).await?;
    Ok(ReadModelJoiner::new(clock, repo).enrich(documents).await)
}

/// The article page: the article with its comments, plus every other
/// article as a recommendation.
///
/// The article and the recommendations are loaded concurrently, then enriched
/// together in one join.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the article does not exist, or
/// `DomainError::Infrastructure` if loading fails.
pub async fn article_detail(
    article_id: &str,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository,
) -> Result<ArticleDetailView, DomainError> {
    let (article, others) =
        futures::join!(get_article_by_id(article_id, repo), list_recent(repo));
    let article = article?;
    let now = clock.now();
    let comments = article
        .comments
        .iter()
        .map(|comment| CommentView::new(comment, now))
        .collect();

    let mut documents = vec![article];
    documents.extend(others?.into_iter().filter(|other| other.id != article_id));
    let mut views = ReadModelJoiner::new(clock, repo).enrich(documents).await;
    let recommendations = views.split_off(1);
    let article = views
        .pop()
        .ok_or_else(|| DomainError::Infrastructure("enrichment dropped the article".into()))?;

    Ok(ArticleDetailView {
        article,
        comments,
        recommendations,
    })
}

/// The author page: the author's profile, if resolvable, and their articles.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the articles cannot be loaded. A
/// profile that cannot be resolved is reported as `None`.
pub async fn author_page(
    profile_key: &str,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository,
) -> Result<AuthorPageView, DomainError> {
    let (profile, articles) = futures::join!(
        fetch_profile(profile_key, repo),
        list_by_author(profile_key, repo)
    );
    let profile = profile.unwrap_or_else(|error| {
        warn!(profile_key, %error, "author profile lookup failed");
        None
    });
    let articles = ReadModelJoiner::new(clock, repo).enrich(articles?).await;

    Ok(AuthorPageView { profile, articles })
}
