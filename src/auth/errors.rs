//! Registration error taxonomy.
//!
//! Every fault from the store, the hasher or the signer is reclassified into
//! one of these variants before it crosses the component boundary; the raw
//! cause is logged where it happens and never reaches a response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::auth::dto::ErrorBody;

#[derive(Debug, Error)]
pub enum RegisterError {
    /// An account with this email already exists (pre-check hit or
    /// unique-constraint violation on insert).
    #[error("Account already exists")]
    Duplicate,

    /// Store, hashing or signing fault. Display stays generic; the
    /// underlying cause is carried for logging only.
    #[error("Server error")]
    Internal(anyhow::Error),
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        let status = match self {
            RegisterError::Duplicate => StatusCode::CONFLICT,
            RegisterError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody::single(self.to_string()))).into_response()
    }
}
