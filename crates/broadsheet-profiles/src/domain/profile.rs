//! Author profile records.

use broadsheet_core::error::DomainError;
use broadsheet_core::repository::{Fields, StoredDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collection holding profile records, keyed by profile key.
pub const PROFILES_COLLECTION: &str = "users";

/// Links to the author's accounts elsewhere. Empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    /// Instagram handle or URL.
    #[serde(default)]
    pub instagram: String,
    /// Threads handle or URL.
    #[serde(default)]
    pub threads: String,
    /// X handle or URL.
    #[serde(default, rename = "X")]
    pub x: String,
    /// YouTube channel URL.
    #[serde(default)]
    pub youtube: String,
}

/// An author's public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    /// Stable identity, shared with the identity provider.
    pub key: String,
    /// Name shown next to the author's articles.
    pub display_name: String,
    /// Profile picture URL.
    pub profile_image: Option<String>,
    /// Free-text biography.
    pub bio: String,
    /// Social links.
    pub social_links: SocialLinks,
}

/// Key, name and picture of an author, as listed in author suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    /// Profile key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Profile picture URL.
    pub profile_image: Option<String>,
}

#[derive(Default, Deserialize)]
struct NameRecord {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRecord {
    #[serde(default)]
    profile: NameRecord,
    #[serde(default)]
    profile_image: Option<String>,
    #[serde(default)]
    bio: String,
    #[serde(default)]
    social_links: SocialLinks,
}

impl AuthorProfile {
    /// Decodes a stored profile record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the record does not have the
    /// profile shape or carries no usable name.
    pub fn from_stored(document: StoredDocument) -> Result<Self, DomainError> {
        let record: ProfileRecord = serde_json::from_value(Value::Object(document.fields))
            .map_err(|e| {
                DomainError::Infrastructure(format!(
                    "profile {} could not be decoded: {e}",
                    document.id
                ))
            })?;
        let display_name = record
            .profile
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                DomainError::Infrastructure(format!("profile {} has no name", document.id))
            })?;

        Ok(Self {
            key: document.id,
            display_name,
            profile_image: record.profile_image.filter(|url| !url.is_empty()),
            bio: record.bio,
            social_links: record.social_links,
        })
    }

    /// Summary used in author listings.
    #[must_use]
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            key: self.key.clone(),
            name: self.display_name.clone(),
            profile_image: self.profile_image.clone(),
        }
    }
}

/// Fields of a newly registered profile.
#[must_use]
pub fn new_profile_fields(name: &str, profile_image: Option<&str>) -> Fields {
    let mut fields = Fields::new();
    fields.insert("profile".to_owned(), serde_json::json!({ "name": name }));
    fields.insert(
        "profileImage".to_owned(),
        profile_image.map_or(Value::Null, Value::from),
    );
    fields.insert("bio".to_owned(), Value::from(""));
    fields.insert(
        "socialLinks".to_owned(),
        social_links_value(&SocialLinks::default()),
    );
    fields
}

/// Fields written when bio and social links change.
#[must_use]
pub fn details_fields(bio: &str, social_links: &SocialLinks) -> Fields {
    let mut fields = Fields::new();
    fields.insert("bio".to_owned(), Value::from(bio));
    fields.insert("socialLinks".to_owned(), social_links_value(social_links));
    fields
}

fn social_links_value(social_links: &SocialLinks) -> Value {
    serde_json::json!({
        "instagram": social_links.instagram,
        "threads": social_links.threads,
        "X": social_links.x,
        "youtube": social_links.youtube,
    })
}

/// Fields written when the profile picture changes.
#[must_use]
pub fn image_fields(url: &str) -> Fields {
    let mut fields = Fields::new();
    fields.insert("profileImage".to_owned(), Value::from(url));
    fields
}
