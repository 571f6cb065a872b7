//! Command handlers for the Author Profiles context.

use broadsheet_core::command::Command;
use broadsheet_core::error::DomainError;
use broadsheet_core::identity::CurrentUser;
use broadsheet_core::repository::DocumentRepository;
use broadsheet_media::application::coordinator::UploadCoordinator;
use tracing::info;

use crate::domain::commands::{ChangeProfileImage, RegisterProfile, UpdateProfile};
use crate::domain::profile::{
    PROFILES_COLLECTION, details_fields, image_fields, new_profile_fields,
};

/// Handles the `RegisterProfile` command for `user`.
///
/// Creates the profile record from the identity provider's data on first
/// sign-in. Returns `true` if a record was created and `false` if one
/// already existed. The user's display name is used as the profile name,
/// falling back to the profile key.
///
/// # Errors
///
/// Returns the repository's error if loading or writing fails.
pub async fn handle_register_profile(
    command: &RegisterProfile,
    user: &CurrentUser,
    repo: &dyn DocumentRepository,
) -> Result<bool, DomainError> {
    if repo.get(PROFILES_COLLECTION, &user.key).await?.is_some() {
        return Ok(false);
    }

    let name = user
        .display_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(&user.key);
    repo.put(
        PROFILES_COLLECTION,
        &user.key,
        new_profile_fields(name, user.photo_url.as_deref()),
    )
    .await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        profile_key = %user.key,
        "profile registered"
    );
    Ok(true)
}

/// Handles the `UpdateProfile` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the profile does not exist, or the
/// repository's error if the write fails.
pub async fn handle_update_profile(
    command: &UpdateProfile,
    repo: &dyn DocumentRepository,
) -> Result<(), DomainError> {
    repo.update(
        PROFILES_COLLECTION,
        &command.profile_key,
        details_fields(&command.bio, &command.social_links),
    )
    .await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        profile_key = %command.profile_key,
        "profile updated"
    );
    Ok(())
}

/// Handles the `ChangeProfileImage` command and returns the new picture URL.
///
/// The picture is uploaded first; the profile is only updated once the
/// upload has completed.
///
/// # Errors
///
/// Returns the blob store's error if the upload fails,
/// `DomainError::NotFound` if the profile does not exist, or the repository's
/// error if the write fails.
pub async fn handle_change_profile_image(
    command: &ChangeProfileImage,
    uploads: &UploadCoordinator,
    repo: &dyn DocumentRepository,
) -> Result<String, DomainError> {
    let url = uploads
        .upload_profile_picture(&command.profile_key, &command.file)
        .await?;
    repo.update(PROFILES_COLLECTION, &command.profile_key, image_fields(&url))
        .await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        profile_key = %command.profile_key,
        "profile image changed"
    );
    Ok(url)
}
