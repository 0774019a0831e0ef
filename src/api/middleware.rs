//! Request validation shared by every tier.
//!
//! Three independent checks, identical on private, sergeant and commander:
//!
//! 1. A request that carries a body must declare it as JSON (406
//!    otherwise). This is checked before the body is read. Body-less
//!    requests such as `DELETE /pvt/{id}` have nothing to declare.
//! 2. The method must be one the route accepts (405 otherwise).
//! 3. The body must decode as JSON of the expected shape (400 otherwise).
//!
//! Checks 1 and 3 live in the [`JsonBody`] extractor. Check 2 is done by the
//! router; [`envelope_rejections`] rewrites its bare 405 into the common
//! failure envelope.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::error::TroopError;

/// JSON request body, validated per the rules above.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = TroopError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(TroopError::ContentTypeMismatch);
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| TroopError::Decode)?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            tracing::debug!("undecodable body: {}", e);
            TroopError::Decode
        })
    }
}

/// Whether the request declares `application/json` (parameters such as
/// `charset` are ignored).
pub fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// Give the router's own 405 responses the common failure body, keeping
/// the `Allow` header.
pub async fn envelope_rejections(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut enveloped = TroopError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        enveloped.headers_mut().insert(header::ALLOW, allow);
    }
    enveloped
}

/// Fallback for paths no route matches.
pub async fn no_route() -> TroopError {
    TroopError::NoRoute
}
