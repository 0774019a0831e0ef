//! Caller-visible failures and their HTTP mapping.
//!
//! Every failure leaves a node as `{"result": "failed", "msg": ...}` with a
//! JSON content type, whatever the tier.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::{Failure, Outcome};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TroopError {
    /// The child id is not currently registered with this node.
    #[error("the pvt is not my soldier")]
    UnknownChild { id: String },

    #[error("application/json required")]
    ContentTypeMismatch,

    #[error("method not allowed")]
    MethodNotAllowed,

    /// The body is not JSON, or not JSON of the expected shape.
    #[error("param couldn't decode to json")]
    Decode,

    #[error("id is required")]
    MissingId,

    #[error("not found")]
    NoRoute,
}

impl TroopError {
    pub fn unknown_child(id: impl Into<String>) -> Self {
        TroopError::UnknownChild { id: id.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            TroopError::UnknownChild { .. } | TroopError::NoRoute => StatusCode::NOT_FOUND,
            TroopError::ContentTypeMismatch => StatusCode::NOT_ACCEPTABLE,
            TroopError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            TroopError::Decode | TroopError::MissingId => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for TroopError {
    fn into_response(self) -> Response {
        match &self {
            TroopError::UnknownChild { id } => {
                tracing::warn!(child_id = %id, "request for an unregistered child");
            }
            other => tracing::debug!("rejected request: {}", other),
        }

        let body = Failure {
            result: Outcome::Failed,
            msg: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
