//! Credential issuance.
//!
//! Orchestrates the one real operation of this service: establish an account
//! exactly once per email, store only a salted hash of the password, and hand
//! back a signed token for the new identity. Field-level validation has
//! already happened in the handler layer; this function treats whatever it is
//! given as pre-validated and only enforces the business rules.

use tracing::{error, info, warn};

use crate::auth::{
    avatar,
    dto::RegisterRequest,
    errors::RegisterError,
    jwt::JwtKeys,
    password::hash_password,
    store::{AccountStore, NewAccount, StoreError},
};

/// Register a new account and issue its first access token.
///
/// Exactly one insert happens on the success path. On any failure path the
/// store ends up unchanged: a duplicate is rejected before (or atomically at)
/// the insert, and a signing failure after the insert is compensated by
/// deleting the just-created account before reporting the error.
pub async fn register_account(
    store: &dyn AccountStore,
    keys: &JwtKeys,
    input: RegisterRequest,
) -> Result<String, RegisterError> {
    // Fast path only; the unique index on accounts.email is authoritative.
    match store.find_by_email(&input.email).await {
        Ok(Some(_)) => {
            warn!(email = %input.email, "email already registered");
            return Err(RegisterError::Duplicate);
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "account lookup failed");
            return Err(RegisterError::Internal(e.into()));
        }
    }

    let avatar_url = avatar::gravatar_url(&input.email);

    let password_hash = hash_password(&input.password).map_err(|e| {
        error!(error = %e, "password hashing failed");
        RegisterError::Internal(e)
    })?;

    let account = match store
        .insert(NewAccount {
            name: input.name,
            email: input.email,
            avatar_url,
            password_hash,
        })
        .await
    {
        Ok(account) => account,
        Err(StoreError::Duplicate) => {
            // Lost the race between the pre-check and the insert.
            warn!("duplicate email detected at insert");
            return Err(RegisterError::Duplicate);
        }
        Err(e) => {
            error!(error = %e, "account insert failed");
            return Err(RegisterError::Internal(e.into()));
        }
    };

    match keys.sign(account.id) {
        Ok(token) => {
            info!(account_id = %account.id, email = %account.email, "account registered");
            Ok(token)
        }
        Err(e) => {
            error!(error = %e, account_id = %account.id, "token signing failed, removing account");
            if let Err(del) = store.delete(account.id).await {
                error!(error = %del, account_id = %account.id, "compensating delete failed");
            }
            Err(RegisterError::Internal(e))
        }
    }
}
