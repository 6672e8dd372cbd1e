//! Extractors that report malformed input through [`ApiError`].

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::header,
    Form, Json,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Request body sent as JSON or as an urlencoded form.
///
/// An empty body, or one of any other content type, reads as the default
/// (all fields missing) so validation answers it.
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            return Ok(Payload(value));
        }

        let bytes = Bytes::from_request(req, state).await?;
        if !content_type.starts_with("application/json")
            || bytes.iter().all(u8::is_ascii_whitespace)
        {
            return Ok(Payload(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Payload(value))
    }
}

/// Query string parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Params<T>(pub T);
