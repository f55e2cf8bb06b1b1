use serde::{Deserialize, Serialize};

/// Request body for account registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response returned after a successful registration.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// One rejection reason, in the shape clients already parse.
#[derive(Debug, Serialize)]
pub struct ErrorEntry {
    pub msg: String,
}

/// Error response body: a list of rejection reasons.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub errors: Vec<ErrorEntry>,
}

impl ErrorBody {
    pub fn single(msg: impl Into<String>) -> Self {
        Self {
            errors: vec![ErrorEntry { msg: msg.into() }],
        }
    }
}
