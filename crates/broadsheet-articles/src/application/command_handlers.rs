//! Command handlers for the Articles context.
//!
//! Every handler validates its command and then performs exactly one write
//! against the document store, so an article is never left half-updated.

use broadsheet_core::clock::Clock;
use broadsheet_core::command::Command;
use broadsheet_core::error::DomainError;
use broadsheet_core::identity::CurrentUser;
use broadsheet_core::repository::DocumentRepository;
use tracing::info;

use crate::domain::commands::{AddComment, EditArticle, PublishArticle};
use crate::domain::document::{
    ANONYMOUS_NAME, ARTICLES_COLLECTION, COMMENTS_FIELD, Comment, edit_fields,
    new_article_fields,
};

fn require_text(value: &str, what: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Handles the `PublishArticle` command and returns the new article id.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the title or content is blank, or the
/// repository's error if the write fails.
pub async fn handle_publish_article(
    command: &PublishArticle,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository,
) -> Result<String, DomainError> {
    require_text(&command.title, "title")?;
    require_text(&command.content, "content")?;

    let fields = new_article_fields(
        &command.title,
        &command.content,
        &command.author,
        clock.now(),
    );
    let article_id = repo.create(ARTICLES_COLLECTION, fields).await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        article_id = %article_id,
        "article published"
    );
    Ok(article_id)
}

/// Handles the `EditArticle` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the title or content is blank,
/// `DomainError::NotFound` if the article does not exist, or the repository's
/// error if the write fails.
pub async fn handle_edit_article(
    command: &EditArticle,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository,
) -> Result<(), DomainError> {
    require_text(&command.title, "title")?;
    require_text(&command.content, "content")?;

    let fields = edit_fields(&command.title, &command.content, clock.now());
    repo.update(ARTICLES_COLLECTION, &command.article_id, fields)
        .await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        article_id = %command.article_id,
        "article edited"
    );
    Ok(())
}

/// Handles the `AddComment` command on behalf of `user`.
///
/// The comment records a snapshot of the commenter's name and photo.
///
/// # Errors
///
/// Returns `DomainError::Unauthenticated` if nobody is signed in,
/// `DomainError::Validation` if the text is blank, `DomainError::NotFound` if
/// the article does not exist, or the repository's error if the write fails.
pub async fn handle_add_comment(
    command: &AddComment,
    user: Option<&CurrentUser>,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository,
) -> Result<Comment, DomainError> {
    let user = user.ok_or(DomainError::Unauthenticated)?;
    require_text(&command.text, "comment")?;

    let comment = Comment {
        author_key: user.key.clone(),
        name: user
            .display_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_NAME.to_owned()),
        profile_image: user.photo_url.clone(),
        timestamp: clock.now(),
        content: command.text.clone(),
    };
    repo.append_to_list(
        ARTICLES_COLLECTION,
        &command.article_id,
        COMMENTS_FIELD,
        comment.to_value(),
    )
    .await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        article_id = %command.article_id,
        "comment added"
    );
    Ok(comment)
}
