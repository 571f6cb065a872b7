//! The caller's identity, as forwarded by the authenticating gateway.
//!
//! The gateway sets `x-user-key` for signed-in callers, plus optional
//! `x-user-name` and `x-user-photo`. A request without a usable key is
//! signed out.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use broadsheet_core::error::DomainError;
use broadsheet_core::identity::CurrentUser;

use crate::error::ApiError;

/// Header carrying the stable user key.
pub const USER_KEY_HEADER: &str = "x-user-key";
/// Header carrying the display name.
pub const USER_NAME_HEADER: &str = "x-user-name";
/// Header carrying the photo URL.
pub const USER_PHOTO_HEADER: &str = "x-user-photo";

/// The caller, or `None` when signed out.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

/// A caller that must be signed in; rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct SignedInUser(pub CurrentUser);

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(user_from_headers(&parts.headers)))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for SignedInUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_from_headers(&parts.headers)
            .map(Self)
            .ok_or(ApiError::Domain(DomainError::Unauthenticated))
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn user_from_headers(headers: &HeaderMap) -> Option<CurrentUser> {
    Some(CurrentUser {
        key: header(headers, USER_KEY_HEADER)?,
        display_name: header(headers, USER_NAME_HEADER),
        photo_url: header(headers, USER_PHOTO_HEADER),
    })
}
