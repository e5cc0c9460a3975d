//! API key repository.
//!
//! Stores the SHA-256 hash and display prefix of each issued key, never the
//! raw secret. Rows are insert-only.

use chrono::{DateTime, Utc};
use devrewoh_core::hash_secret;
use sqlx::PgPool;

use super::RepositoryError;

/// A key ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApiKey {
    pub key_hash: String,
    pub key_prefix: String,
    pub user_email: String,
    pub tier_label: String,
    pub credits: i32,
}

/// A persisted key.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKeyRecord {
    pub id: i64,
    pub key_hash: String,
    pub key_prefix: String,
    pub user_email: String,
    #[sqlx(rename = "name")]
    pub tier_label: String,
    #[sqlx(rename = "monthly_limit")]
    pub credits: i32,
    pub created_at: DateTime<Utc>,
}

/// Repository for API key database operations.
pub struct ApiKeyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ApiKeyRepository<'a> {
    /// Create a new API key repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a newly issued key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the hash already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, key: &NewApiKey) -> Result<ApiKeyRecord, RepositoryError> {
        sqlx::query_as::<_, ApiKeyRecord>(
            r"
            INSERT INTO api_keys (key_hash, key_prefix, user_email, name, monthly_limit)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, key_hash, key_prefix, user_email, name, monthly_limit, created_at
            ",
        )
        .bind(&key.key_hash)
        .bind(&key.key_prefix)
        .bind(&key.user_email)
        .bind(&key.tier_label)
        .bind(key.credits)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("key hash already exists".to_owned());
            }
            RepositoryError::Database(e)
        })
    }

    /// Get a key by its stored hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_hash(&self, key_hash: &str) -> Result<Option<ApiKeyRecord>, RepositoryError> {
        let record = sqlx::query_as::<_, ApiKeyRecord>(
            r"
            SELECT id, key_hash, key_prefix, user_email, name, monthly_limit, created_at
            FROM api_keys
            WHERE key_hash = $1
            ",
        )
        .bind(key_hash)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// Get a key by its raw secret.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_secret(&self, raw_key: &str) -> Result<Option<ApiKeyRecord>, RepositoryError> {
        self.find_by_hash(&hash_secret(raw_key)).await
    }
}
