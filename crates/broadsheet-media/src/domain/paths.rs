//! Blob paths for uploaded media.
//!
//! Paths come straight from the original file name and are not unique: two
//! uploads sharing a name write to the same blob and the later one wins.
//! Names are checked with [`check_file_name`] before they reach a path.

use broadsheet_core::error::DomainError;

/// Rejects file names that would escape the directory they are stored in.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an empty name, `.` or `..`, or a
/// name containing a `/` or `\` separator.
pub fn check_file_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(DomainError::Validation(format!(
            "file name {name:?} is not a plain file name"
        )));
    }
    Ok(())
}

/// Blob path of an embedded image.
#[must_use]
pub fn image_path(file_name: &str) -> String {
    format!("images/{file_name}")
}

/// Blob path of a profile picture. One picture per profile.
#[must_use]
pub fn profile_picture_path(profile_key: &str) -> String {
    format!("profilePictures/{profile_key}")
}
