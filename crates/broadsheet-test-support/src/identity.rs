//! In-process identity provider for tests.

use std::sync::{Mutex, PoisonError};

use broadsheet_core::identity::{CurrentUser, IdentityProvider};
use broadsheet_core::subscription::{ListenerSet, Subscription};

/// An identity provider whose signed-in user is set by the test.
#[derive(Debug, Default)]
pub struct FakeIdentityProvider {
    user: Mutex<Option<CurrentUser>>,
    listeners: ListenerSet<Option<CurrentUser>>,
}

impl FakeIdentityProvider {
    /// A provider with nobody signed in.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// A provider with `key` signed in under `display_name`.
    #[must_use]
    pub fn signed_in(key: &str, display_name: Option<&str>) -> Self {
        let provider = Self::default();
        *provider.lock() = Some(user(key, display_name));
        provider
    }

    /// Replaces the signed-in user and notifies every listener.
    pub fn set_user(&self, user: Option<CurrentUser>) {
        *self.lock() = user.clone();
        self.listeners.emit(&user);
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CurrentUser>> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IdentityProvider for FakeIdentityProvider {
    fn current_user(&self) -> Option<CurrentUser> {
        self.lock().clone()
    }

    fn subscribe(
        &self,
        listener: Box<dyn Fn(Option<&CurrentUser>) + Send + Sync>,
    ) -> Subscription {
        self.listeners
            .subscribe(move |user: &Option<CurrentUser>| listener(user.as_ref()))
    }
}

/// Builds a user without a photo.
#[must_use]
pub fn user(key: &str, display_name: Option<&str>) -> CurrentUser {
    CurrentUser {
        key: key.to_owned(),
        display_name: display_name.map(str::to_owned),
        photo_url: None,
    }
}
