//! Routes for the Media Uploads bounded context.

use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use broadsheet_core::error::DomainError;
use broadsheet_media::domain::file::MediaFile;
use broadsheet_media::domain::paths::check_file_name;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::ApiError;
use crate::identity::SignedInUser;
use crate::state::AppState;

/// Largest accepted upload request body.
pub const MAX_UPLOAD_BODY_BYTES: usize = 40 * 1024 * 1024;

/// Response body returned after an image batch is uploaded.
#[derive(Debug, Serialize)]
pub struct UploadedResponse {
    /// URLs of the uploaded files, in the order they were sent.
    pub urls: Vec<String>,
}

/// Reads every file part of a multipart form, in order. Parts without a file
/// name are ignored; a name carrying path segments rejects the whole form.
pub(crate) async fn read_files(mut multipart: Multipart) -> Result<Vec<MediaFile>, ApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let Some(name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        check_file_name(&name)?;
        let bytes = field.bytes().await.map_err(invalid_form)?;
        files.push(MediaFile::new(name, bytes.to_vec()));
    }
    Ok(files)
}

fn invalid_form(err: MultipartError) -> ApiError {
    DomainError::Validation(format!("invalid multipart form: {}", err.body_text())).into()
}

/// POST /images
///
/// Uploads up to four images as one all-or-nothing batch.
#[instrument(skip_all, fields(uploader = %user.key))]
async fn upload_images(
    State(state): State<AppState>,
    SignedInUser(user): SignedInUser,
    multipart: Multipart,
) -> Result<Json<UploadedResponse>, ApiError> {
    let files = read_files(multipart).await?;
    let count = files.len();
    let urls = state.uploads.submit(files).await?;

    info!(count, "image batch uploaded");
    Ok(Json(UploadedResponse { urls }))
}

/// GET /{*path}
///
/// Serves a stored blob. Public URLs returned by uploads resolve here when
/// the media base URL points at this server.
#[instrument(skip_all, fields(path = %path))]
async fn serve_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state
        .blobs
        .get(&path)
        .await?
        .ok_or_else(|| DomainError::not_found("media", &path))?;

    debug!(bytes = bytes.len(), "serving media file");
    Ok(([(CONTENT_TYPE, content_type_of(&path))], bytes))
}

/// Content type implied by the extension of `path`.
fn content_type_of(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Returns the router serving stored media files.
pub fn files_router() -> Router<AppState> {
    Router::new().route("/{*path}", get(serve_file))
}

/// Returns the router for the media context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/images", post(upload_images))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES))
}
