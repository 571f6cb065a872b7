//! Article documents and their comments.

use broadsheet_core::error::DomainError;
use broadsheet_core::repository::{Fields, StoredDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collection holding article documents.
pub const ARTICLES_COLLECTION: &str = "articles";

/// Field holding the comment list.
pub const COMMENTS_FIELD: &str = "comments";

/// Display name recorded for commenters without one.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// A reader comment. Immutable once appended to its article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Profile key of the commenter.
    pub author_key: String,
    /// Commenter's display name at the time of commenting.
    pub name: String,
    /// Commenter's photo at the time of commenting.
    pub profile_image: Option<String>,
    /// When the comment was written.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Comment text.
    pub content: String,
}

impl Comment {
    /// Persisted form of the comment.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "authorKey": self.author_key,
            "name": self.name,
            "profileImage": self.profile_image,
            "timestamp": self.timestamp.timestamp_millis(),
            "content": self.content,
        })
    }
}

/// A published article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    /// Document id within [`ARTICLES_COLLECTION`].
    pub id: String,
    /// Article title.
    pub title: String,
    /// Article body as Markdown.
    pub content: String,
    /// Profile key of the author.
    pub author: String,
    /// Publication time.
    pub created_at: DateTime<Utc>,
    /// Time of the last edit, if any.
    pub updated_at: Option<DateTime<Utc>>,
    /// Comments in the order they were appended.
    pub comments: Vec<Comment>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticleRecord {
    title: String,
    content: String,
    author: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl ContentDocument {
    /// Decodes a stored article.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the stored fields do not have
    /// the article shape.
    pub fn from_stored(document: StoredDocument) -> Result<Self, DomainError> {
        let record: ArticleRecord = serde_json::from_value(Value::Object(document.fields))
            .map_err(|e| {
                DomainError::Infrastructure(format!(
                    "article {} could not be decoded: {e}",
                    document.id
                ))
            })?;
        Ok(Self {
            id: document.id,
            title: record.title,
            content: record.content,
            author: record.author,
            created_at: record.created_at,
            updated_at: record.updated_at,
            comments: record.comments,
        })
    }
}

/// Fields written when an article is first published.
#[must_use]
pub fn new_article_fields(
    title: &str,
    content: &str,
    author: &str,
    created_at: DateTime<Utc>,
) -> Fields {
    let mut fields = Fields::new();
    fields.insert("title".to_owned(), Value::from(title));
    fields.insert("content".to_owned(), Value::from(content));
    fields.insert("author".to_owned(), Value::from(author));
    fields.insert(
        "createdAt".to_owned(),
        Value::from(created_at.timestamp_millis()),
    );
    fields.insert(COMMENTS_FIELD.to_owned(), Value::Array(Vec::new()));
    fields
}

/// Fields written when an article is edited.
#[must_use]
pub fn edit_fields(title: &str, content: &str, updated_at: DateTime<Utc>) -> Fields {
    let mut fields = Fields::new();
    fields.insert("title".to_owned(), Value::from(title));
    fields.insert("content".to_owned(), Value::from(content));
    fields.insert(
        "updatedAt".to_owned(),
        Value::from(updated_at.timestamp_millis()),
    );
    fields
}
