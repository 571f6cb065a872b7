//! Routes for the Author Profiles bounded context.

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post, routing::put};
use broadsheet_core::error::DomainError;
use broadsheet_profiles::application::{command_handlers, query_handlers};
use broadsheet_profiles::domain::commands::{ChangeProfileImage, RegisterProfile, UpdateProfile};
use broadsheet_profiles::domain::profile::{ProfileSummary, SocialLinks};
use broadsheet_read_model::application::pages;
use broadsheet_read_model::domain::views::AuthorPageView;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::identity::SignedInUser;
use crate::routes::media::{MAX_UPLOAD_BODY_BYTES, read_files};
use crate::state::AppState;

/// Request body for PUT /me.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// Free-text biography.
    #[serde(default)]
    pub bio: String,
    /// Links to the author's other accounts.
    #[serde(default)]
    pub social_links: SocialLinks,
}

/// Response body for POST /me/register.
#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    /// Whether a new profile record was created.
    pub created: bool,
}

/// Response body for POST /me/image.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    /// URL of the new profile picture.
    pub url: String,
}

/// GET /
#[instrument(skip(state))]
async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProfileSummary>>, ApiError> {
    let profiles = query_handlers::list_profiles(state.documents.as_ref()).await?;
    Ok(Json(profiles))
}

/// GET /{key}
#[instrument(skip_all, fields(profile_key = %key))]
async fn author_page(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<AuthorPageView>, ApiError> {
    let view = pages::author_page(&key, state.clock.as_ref(), state.documents.as_ref()).await?;
    Ok(Json(view))
}

/// POST /me/register
#[instrument(skip_all, fields(profile_key = %user.key))]
async fn register(
    State(state): State<AppState>,
    SignedInUser(user): SignedInUser,
) -> Result<(StatusCode, Json<RegisteredResponse>), ApiError> {
    let command = RegisterProfile {
        correlation_id: Uuid::new_v4(),
    };
    let created =
        command_handlers::handle_register_profile(&command, &user, state.documents.as_ref())
            .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(RegisteredResponse { created })))
}

/// PUT /me
#[instrument(skip_all, fields(profile_key = %user.key))]
async fn update(
    State(state): State<AppState>,
    SignedInUser(user): SignedInUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<StatusCode, ApiError> {
    let command = UpdateProfile {
        correlation_id: Uuid::new_v4(),
        profile_key: user.key,
        bio: request.bio,
        social_links: request.social_links,
    };
    command_handlers::handle_update_profile(&command, state.documents.as_ref()).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /me/image
///
/// Expects exactly one file part.
#[instrument(skip_all, fields(profile_key = %user.key))]
async fn change_image(
    State(state): State<AppState>,
    SignedInUser(user): SignedInUser,
    multipart: Multipart,
) -> Result<Json<ImageResponse>, ApiError> {
    let mut files = read_files(multipart).await?;
    let file = match (files.pop(), files.is_empty()) {
        (Some(file), true) => file,
        _ => {
            return Err(DomainError::Validation(
                "exactly one profile picture must be uploaded".into(),
            )
            .into());
        }
    };

    let command = ChangeProfileImage {
        correlation_id: Uuid::new_v4(),
        profile_key: user.key,
        file,
    };
    let url = command_handlers::handle_change_profile_image(
        &command,
        &state.uploads,
        state.documents.as_ref(),
    )
    .await?;

    Ok(Json(ImageResponse { url }))
}

/// Returns the router for the profiles context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/{key}", get(author_page))
        .route("/me", put(update))
        .route("/me/register", post(register))
        .route(
            "/me/image",
            post(change_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES)),
        )
}
