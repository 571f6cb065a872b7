//! Routes for the Articles bounded context and its read model pages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use broadsheet_articles::application::{command_handlers, query_handlers};
use broadsheet_articles::domain::commands::{AddComment, EditArticle, PublishArticle};
use broadsheet_articles::domain::document::Comment;
use broadsheet_core::error::DomainError;
use broadsheet_read_model::application::pages;
use broadsheet_read_model::domain::views::{ArticleDetailView, EnrichedDocumentView};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::identity::{MaybeUser, SignedInUser};
use crate::state::AppState;

/// Request body for POST / and PUT /{id}.
#[derive(Debug, Deserialize)]
pub struct ArticleRequest {
    /// Article title.
    pub title: String,
    /// Article body as Markdown.
    pub content: String,
}

/// Request body for POST /{id}/comments.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    /// Comment text.
    pub text: String,
}

/// Response body returned after an article is published.
#[derive(Debug, Serialize)]
pub struct PublishedResponse {
    /// Id of the new article.
    pub id: String,
}

/// GET /
#[instrument(skip(state))]
async fn feed(State(state): State<AppState>) -> Result<Json<Vec<EnrichedDocumentView>>, ApiError> {
    let views = pages::feed(state.clock.as_ref(), state.documents.as_ref()).await?;
    Ok(Json(views))
}

/// POST /
#[instrument(skip_all, fields(author = %user.key))]
async fn publish(
    State(state): State<AppState>,
    SignedInUser(user): SignedInUser,
    Json(request): Json<ArticleRequest>,
) -> Result<(StatusCode, Json<PublishedResponse>), ApiError> {
    let command = PublishArticle {
        correlation_id: Uuid::new_v4(),
        title: request.title,
        content: request.content,
        author: user.key,
    };

    let id = command_handlers::handle_publish_article(
        &command,
        state.clock.as_ref(),
        state.documents.as_ref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(PublishedResponse { id })))
}

/// GET /{id}
#[instrument(skip_all, fields(article_id = %id))]
async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArticleDetailView>, ApiError> {
    let view = pages::article_detail(&id, state.clock.as_ref(), state.documents.as_ref()).await?;
    Ok(Json(view))
}

/// PUT /{id}
///
/// Only the article's author may edit it.
#[instrument(skip_all, fields(editor = %user.key, article_id = %id))]
async fn edit(
    State(state): State<AppState>,
    SignedInUser(user): SignedInUser,
    Path(id): Path<String>,
    Json(request): Json<ArticleRequest>,
) -> Result<StatusCode, ApiError> {
    let article = query_handlers::get_article_by_id(&id, state.documents.as_ref()).await?;
    if article.author != user.key {
        warn!(author = %article.author, "edit rejected for non-author");
        return Err(DomainError::Unauthenticated.into());
    }

    let command = EditArticle {
        correlation_id: Uuid::new_v4(),
        article_id: id,
        title: request.title,
        content: request.content,
    };
    command_handlers::handle_edit_article(&command, state.clock.as_ref(), state.documents.as_ref())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /{id}/comments
#[instrument(skip_all, fields(article_id = %id))]
async fn add_comment(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let command = AddComment {
        correlation_id: Uuid::new_v4(),
        article_id: id,
        text: request.text,
    };

    let comment = command_handlers::handle_add_comment(
        &command,
        user.as_ref(),
        state.clock.as_ref(),
        state.documents.as_ref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Returns the router for the articles context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(feed).post(publish))
        .route("/{id}", get(detail).put(edit))
        .route("/{id}/comments", post(add_comment))
}
