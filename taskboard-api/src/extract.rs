/// Request extractors
///
/// - [`ApiJson`], [`ApiPath`], [`ApiQuery`]: axum's extractors, with
///   rejections reported in the API error shape
/// - [`HeaderIdentity`]: caller identity from the `Authorization` header

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header, request::Parts},
};
use taskboard_shared::auth::identity::identity_from_header;

/// JSON body extractor that rejects with [`ApiError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor that rejects with [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query string extractor that rejects with [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Identity named in `Authorization: <scheme> <identity>`
///
/// Handlers use the value as a plain filter. It is not authenticated; see
/// [`taskboard_shared::auth::identity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderIdentity(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for HeaderIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let identity = identity_from_header(value)?;
        Ok(Self(identity.to_string()))
    }
}
