//! Identity provider abstraction.

use serde::{Deserialize, Serialize};

use crate::subscription::Subscription;

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Stable identity; doubles as the author profile key.
    pub key: String,
    /// Display name, if the provider has one.
    pub display_name: Option<String>,
    /// Photo URL, if the provider has one.
    pub photo_url: Option<String>,
}

/// Source of the signed-in user.
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in user, or `None` when signed out.
    fn current_user(&self) -> Option<CurrentUser>;

    /// Registers `listener` to be called with the new user (or `None`) on
    /// every sign-in, sign-out or account switch.
    fn subscribe(
        &self,
        listener: Box<dyn Fn(Option<&CurrentUser>) + Send + Sync>,
    ) -> Subscription;
}
