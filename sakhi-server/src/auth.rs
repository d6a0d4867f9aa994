//! Session authentication seam.
//!
//! Session management itself is an external collaborator; the server only
//! needs "which user does this bearer token belong to". `PgSessionStore`
//! resolves tokens against the sessions table. `StaticSessionStore` backs
//! tests and single-user local setups.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("Session lookup failed: {0}")]
    Store(#[from] sqlx::Error),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolve a bearer token to a user id. A missing or unknown token is
    /// rejected before any other work happens.
    async fn authenticate(&self, bearer: Option<&str>) -> Result<Uuid, AuthError>;
}

pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn authenticate(&self, bearer: Option<&str>) -> Result<Uuid, AuthError> {
        let token = bearer.ok_or(AuthError::Unauthenticated)?;

        let row: Option<(Uuid,)> = sqlx::query_as(
            "SELECT user_id FROM sessions WHERE token = $1 AND expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(id,)| id).ok_or(AuthError::Unauthenticated)
    }
}

/// Fixed token-to-user mapping.
pub struct StaticSessionStore {
    token: String,
    user_id: Uuid,
}

impl StaticSessionStore {
    pub fn new(token: impl Into<String>, user_id: Uuid) -> Self {
        Self {
            token: token.into(),
            user_id,
        }
    }
}

#[async_trait]
impl SessionStore for StaticSessionStore {
    async fn authenticate(&self, bearer: Option<&str>) -> Result<Uuid, AuthError> {
        match bearer {
            Some(token) if token == self.token => Ok(self.user_id),
            _ => Err(AuthError::Unauthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_store_accepts_exact_token_only() {
        let user = Uuid::new_v4();
        let store = StaticSessionStore::new("secret", user);

        assert_eq!(store.authenticate(Some("secret")).await.unwrap(), user);
        assert!(matches!(
            store.authenticate(Some("wrong")).await,
            Err(AuthError::Unauthenticated)
        ));
        assert!(matches!(
            store.authenticate(None).await,
            Err(AuthError::Unauthenticated)
        ));
    }
}
