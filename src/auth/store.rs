//! Account persistence port.
//!
//! The uniqueness guarantee on email lives here, not in the caller: the
//! Postgres table carries a UNIQUE index and a violating insert surfaces as
//! `StoreError::Duplicate`. Callers may pre-check with `find_by_email` as a
//! fast path, but the insert is the source of truth.

use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Persisted account record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Insert payload; the store assigns the id and timestamp.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub password_hash: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    Duplicate,
    #[error("account store unavailable: {0}")]
    Unavailable(anyhow::Error),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Exact-match lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Insert a new account. Fails with `Duplicate` when the email is taken,
    /// enforced atomically by the store.
    async fn insert(&self, new: NewAccount) -> Result<Account, StoreError>;

    /// Remove an account by id. Only used to compensate a failed
    /// registration; removing a missing id is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, email, avatar_url, password_hash, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.into()))?;
        Ok(account)
    }

    async fn insert(&self, new: NewAccount) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (name, email, avatar_url, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, avatar_url, password_hash, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.avatar_url)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return StoreError::Duplicate;
                }
            }
            StoreError::Unavailable(e.into())
        })?;
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query(r#"DELETE FROM accounts WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.into()))?;
        Ok(())
    }
}

#[cfg(test)]
pub mod memory {
    //! In-memory store for unit tests. Insert checks uniqueness under the
    //! same lock that writes, so concurrent registrations race safely.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryAccountStore {
        accounts: Mutex<HashMap<Uuid, Account>>,
    }

    impl MemoryAccountStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn len(&self) -> usize {
            self.accounts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AccountStore for MemoryAccountStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.values().find(|a| a.email == email).cloned())
        }

        async fn insert(&self, new: NewAccount) -> Result<Account, StoreError> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.values().any(|a| a.email == new.email) {
                return Err(StoreError::Duplicate);
            }
            let account = Account {
                id: Uuid::new_v4(),
                name: new.name,
                email: new.email,
                avatar_url: new.avatar_url,
                password_hash: new.password_hash,
                created_at: OffsetDateTime::now_utc(),
            };
            accounts.insert(account.id, account.clone());
            Ok(account)
        }

        async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
            self.accounts.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn memory_store_enforces_unique_email() {
        let store = MemoryAccountStore::new();
        let new = |email: &str| NewAccount {
            name: "Ada".into(),
            email: email.into(),
            avatar_url: "https://example.com/a".into(),
            password_hash: "$argon2id$stub".into(),
        };
        store.insert(new("ada@example.com")).await.expect("first insert");
        let err = store.insert(new("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_an_error() {
        let store = MemoryAccountStore::new();
        store.delete(Uuid::new_v4()).await.expect("delete of missing id");
    }
}
