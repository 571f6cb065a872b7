//! Commands for the Articles context.

use broadsheet_core::command::Command;
use uuid::Uuid;

/// Command to publish a new article.
#[derive(Debug, Clone)]
pub struct PublishArticle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Article title.
    pub title: String,
    /// Article body as Markdown.
    pub content: String,
    /// Profile key of the author.
    pub author: String,
}

impl Command for PublishArticle {
    fn command_type(&self) -> &'static str {
        "articles.publish_article"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace the title and body of an existing article.
#[derive(Debug, Clone)]
pub struct EditArticle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The article to edit.
    pub article_id: String,
    /// New title.
    pub title: String,
    /// New body as Markdown.
    pub content: String,
}

impl Command for EditArticle {
    fn command_type(&self) -> &'static str {
        "articles.edit_article"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to append a comment to an article.
#[derive(Debug, Clone)]
pub struct AddComment {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The article being commented on.
    pub article_id: String,
    /// Comment text.
    pub text: String,
}

impl Command for AddComment {
    fn command_type(&self) -> &'static str {
        "articles.add_comment"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
