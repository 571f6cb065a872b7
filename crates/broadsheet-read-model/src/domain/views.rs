//! Read-only views served to list and detail pages.

use broadsheet_articles::domain::document::{Comment, ContentDocument};
use broadsheet_content::domain::markup::parse_markup;
use broadsheet_content::domain::metrics::TextMetrics;
use broadsheet_profiles::domain::profile::AuthorProfile;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::age::relative_age;

/// Name shown for authors whose profile cannot be resolved.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Author fields shown next to a document.
///
/// Either every field comes from the author's profile, or the snapshot is the
/// complete fallback. The two are never mixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSnapshot {
    /// Profile key the document refers to.
    pub key: String,
    /// Display name, or [`UNKNOWN_AUTHOR`].
    pub name: String,
    /// Profile picture, always `None` in the fallback.
    pub profile_image: Option<String>,
    /// Whether the fields came from a profile record.
    pub resolved: bool,
}

impl AuthorSnapshot {
    /// Snapshot taken from a resolved profile.
    #[must_use]
    pub fn from_profile(profile: &AuthorProfile) -> Self {
        Self {
            key: profile.key.clone(),
            name: profile.display_name.clone(),
            profile_image: profile.profile_image.clone(),
            resolved: true,
        }
    }

    /// Placeholder for an author key whose profile is missing or unusable.
    #[must_use]
    pub fn fallback(key: &str) -> Self {
        Self {
            key: key.to_owned(),
            name: UNKNOWN_AUTHOR.to_owned(),
            profile_image: None,
            resolved: false,
        }
    }
}

/// An article joined with its author and derived display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedDocumentView {
    /// The article as stored.
    #[serde(flatten)]
    pub document: ContentDocument,
    /// Author fields.
    pub author_profile: AuthorSnapshot,
    /// Estimated minutes to read.
    pub read_time_minutes: u32,
    /// Plain-text preview.
    pub preview_text: String,
    /// URL of the first embedded image.
    pub first_image_url: Option<String>,
    /// Humanized age of the article.
    pub relative_age: String,
}

impl EnrichedDocumentView {
    /// Builds the view of `document` as seen at `now`.
    #[must_use]
    pub fn new(document: ContentDocument, author: AuthorSnapshot, now: DateTime<Utc>) -> Self {
        let metrics = TextMetrics::of(&parse_markup(&document.content));
        let relative_age = relative_age(document.created_at, now);
        Self {
            document,
            author_profile: author,
            read_time_minutes: metrics.read_time_minutes,
            preview_text: metrics.preview_text,
            first_image_url: metrics.first_image_url,
            relative_age,
        }
    }
}

/// A comment with its humanized age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Commenter's name at the time of commenting.
    pub name: String,
    /// Commenter's photo at the time of commenting.
    pub profile_image: Option<String>,
    /// Comment text.
    pub content: String,
    /// When the comment was written.
    pub timestamp: DateTime<Utc>,
    /// Humanized age of the comment.
    pub relative_age: String,
}

impl CommentView {
    /// Builds the view of `comment` as seen at `now`.
    #[must_use]
    pub fn new(comment: &Comment, now: DateTime<Utc>) -> Self {
        Self {
            name: comment.name.clone(),
            profile_image: comment.profile_image.clone(),
            content: comment.content.clone(),
            timestamp: comment.timestamp,
            relative_age: relative_age(comment.timestamp, now),
        }
    }
}

/// Everything the article page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetailView {
    /// The article itself.
    pub article: EnrichedDocumentView,
    /// Its comments, oldest first.
    pub comments: Vec<CommentView>,
    /// Other articles, newest first.
    pub recommendations: Vec<EnrichedDocumentView>,
}

/// Everything the author page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPageView {
    /// The author's profile, if it could be resolved.
    pub profile: Option<AuthorProfile>,
    /// The author's articles, newest first.
    pub articles: Vec<EnrichedDocumentView>,
}
