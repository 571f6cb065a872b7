//! Commands for the Author Profiles context.

use broadsheet_core::command::Command;
use broadsheet_media::domain::file::MediaFile;
use uuid::Uuid;

use super::profile::SocialLinks;

/// Command to create the signed-in user's profile record if it is missing.
#[derive(Debug, Clone)]
pub struct RegisterProfile {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for RegisterProfile {
    fn command_type(&self) -> &'static str {
        "profiles.register_profile"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace a profile's bio and social links.
#[derive(Debug, Clone)]
pub struct UpdateProfile {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The profile to update.
    pub profile_key: String,
    /// New biography.
    pub bio: String,
    /// New social links.
    pub social_links: SocialLinks,
}

impl Command for UpdateProfile {
    fn command_type(&self) -> &'static str {
        "profiles.update_profile"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to upload and set a new profile picture.
#[derive(Debug, Clone)]
pub struct ChangeProfileImage {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The profile whose picture changes.
    pub profile_key: String,
    /// The new picture.
    pub file: MediaFile,
}

impl Command for ChangeProfileImage {
    fn command_type(&self) -> &'static str {
        "profiles.change_profile_image"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
