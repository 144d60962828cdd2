//! Common extractors for API handlers.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{handle_rejection, ApiError};

/// Header carrying the acting user for row-level auditing.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Acting user taken from the `X-User-Id` header, if present and non-blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Actor(pub Option<String>);

impl Actor {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let user = match parts.headers.get(USER_ID_HEADER) {
            None => None,
            Some(value) => {
                let value = value.to_str().map_err(|_| {
                    ApiError::validation_field(USER_ID_HEADER, "Header must be visible ASCII")
                })?;
                Some(value.trim().to_string()).filter(|v| !v.is_empty())
            }
        };

        Ok(Actor(user))
    }
}

/// JSON body that has been deserialized and passed `validator` checks.
///
/// Rejections are reported as structured [`ApiError`]s instead of axum's
/// plain-text bodies.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(handle_rejection)?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
