use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{ErrorBody, ErrorEntry, RegisterRequest, TokenResponse},
        jwt::JwtKeys,
        service::register_account,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/register", post(register))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Field-level checks, all reported together. The credential issuer itself
/// never re-checks these.
fn validate(payload: &RegisterRequest) -> Vec<ErrorEntry> {
    let mut errors = Vec::new();
    if payload.name.trim().is_empty() {
        errors.push(ErrorEntry {
            msg: "Name is required".into(),
        });
    }
    if !is_valid_email(&payload.email) {
        errors.push(ErrorEntry {
            msg: "Please include a valid email".into(),
        });
    }
    if payload.password.len() < 6 {
        errors.push(ErrorEntry {
            msg: "Please enter a password with 6 or more characters".into(),
        });
    }
    errors
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, Response> {
    payload.email = payload.email.trim().to_lowercase();

    let problems = validate(&payload);
    if !problems.is_empty() {
        warn!(count = problems.len(), "registration payload rejected");
        return Err(
            (StatusCode::BAD_REQUEST, Json(ErrorBody { errors: problems })).into_response(),
        );
    }

    let keys = JwtKeys::from_ref(&state);
    let token = register_account(state.accounts.as_ref(), &keys, payload)
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(validate(&payload("Ada", "ada@example.com", "secret1")).is_empty());
    }

    #[test]
    fn five_char_password_is_rejected_here() {
        let errors = validate(&payload("Ada", "ada@example.com", "12345"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].msg.contains("6 or more"));
    }

    #[test]
    fn all_field_errors_are_collected() {
        let errors = validate(&payload("", "not-an-email", ""));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn email_regex_accepts_and_rejects() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co.uk"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example@example.com"));
        assert!(!is_valid_email("@example.com"));
    }
}
