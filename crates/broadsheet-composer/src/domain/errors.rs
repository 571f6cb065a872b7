//! Composer error types.

use broadsheet_core::error::DomainError;
use broadsheet_media::domain::errors::UploadError;
use thiserror::Error;

/// Errors surfaced by the composer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// The image batch was rejected or failed; the document is unchanged.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// A domain or persistence error.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
