//! Query handlers for the Author Profiles context.

use broadsheet_core::error::DomainError;
use broadsheet_core::repository::{DocumentRepository, Query};
use tracing::warn;

use crate::domain::profile::{AuthorProfile, PROFILES_COLLECTION, ProfileSummary};

/// Looks up a profile by key, returning `Ok(None)` when no record exists.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if loading fails or the record is
/// unusable (wrong shape or no name).
pub async fn fetch_profile(
    profile_key: &str,
    repo: &dyn DocumentRepository,
) -> Result<Option<AuthorProfile>, DomainError> {
    repo.get(PROFILES_COLLECTION, profile_key)
        .await?
        .map(AuthorProfile::from_stored)
        .transpose()
}

/// Loads a profile by key.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no record exists, or
/// `DomainError::Infrastructure` if loading or decoding fails.
pub async fn get_profile(
    profile_key: &str,
    repo: &dyn DocumentRepository,
) -> Result<AuthorProfile, DomainError> {
    fetch_profile(profile_key, repo)
        .await?
        .ok_or_else(|| DomainError::not_found(PROFILES_COLLECTION, profile_key))
}

/// Lists every usable profile as a summary. Unusable records are skipped.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if loading fails.
pub async fn list_profiles(
    repo: &dyn DocumentRepository,
) -> Result<Vec<ProfileSummary>, DomainError> {
    let stored = repo.query(PROFILES_COLLECTION, &Query::all()).await?;
    Ok(stored
        .into_iter()
        .filter_map(|document| match AuthorProfile::from_stored(document) {
            Ok(profile) => Some(profile.summary()),
            Err(error) => {
                warn!(%error, "skipping unusable profile record");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use broadsheet_core::repository::Fields;
    use broadsheet_memory_store::InMemoryDocumentRepository;
    use broadsheet_test_support::FailingDocumentRepository;
    use serde_json::json;

    use super::*;
    use crate::domain::profile::new_profile_fields;

    #[tokio::test]
    async fn test_fetch_profile_missing_returns_none() {
        let repo = InMemoryDocumentRepository::new();

        let result = fetch_profile("ghost@example.com", &repo).await.unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_fetch_profile_nameless_record_is_an_error() {
        // Arrange
        let repo = InMemoryDocumentRepository::new();
        let mut fields = Fields::new();
        fields.insert("profileImage".to_owned(), json!("https://cdn.example/x.png"));
        repo.put(PROFILES_COLLECTION, "x@example.com", fields)
            .await
            .unwrap();

        // Act
        let result = fetch_profile("x@example.com", &repo).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_get_profile_missing_returns_not_found() {
        let repo = InMemoryDocumentRepository::new();

        let result = get_profile("ghost@example.com", &repo).await;

        match result.unwrap_err() {
            DomainError::NotFound { collection, id } => {
                assert_eq!(collection, PROFILES_COLLECTION);
                assert_eq!(id, "ghost@example.com");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_profiles_skips_unusable_records() {
        // Arrange
        let repo = InMemoryDocumentRepository::new();
        repo.put(
            PROFILES_COLLECTION,
            "ada@example.com",
            new_profile_fields("Ada", Some("https://cdn.example/ada.png")),
        )
        .await
        .unwrap();
        repo.put(PROFILES_COLLECTION, "broken@example.com", Fields::new())
            .await
            .unwrap();

        // Act
        let summaries = list_profiles(&repo).await.unwrap();

        // Assert
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].key, "ada@example.com");
        assert_eq!(summaries[0].name, "Ada");
        assert_eq!(
            summaries[0].profile_image.as_deref(),
            Some("https://cdn.example/ada.png")
        );
    }

    #[tokio::test]
    async fn test_list_profiles_surfaces_repository_failure() {
        let result = list_profiles(&FailingDocumentRepository).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
