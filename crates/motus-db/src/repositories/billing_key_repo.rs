//! Billing key repository implementation
//!
//! PostgreSQL-backed storage for per-user gateway billing keys. The
//! `user_id` column is unique; `save` replaces any existing key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use motus_core::{models::BillingKey, traits::BillingKeyRepository, AppError, AppResult};
use sqlx::PgPool;
use tracing::{debug, error, instrument};

/// PostgreSQL implementation of BillingKeyRepository
pub struct PgBillingKeyRepository {
    pool: PgPool,
}

impl PgBillingKeyRepository {
    /// Create a new billing key repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BillingKeyRepository for PgBillingKeyRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<BillingKey>> {
        debug!("Finding billing key for user: {}", user_id);

        let result = sqlx::query_as::<sqlx::Postgres, BillingKeyRow>(
            r#"
            SELECT id, user_id, bid, card_name, created_at
            FROM billing_keys
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding billing key for {}: {}", user_id, e);
            AppError::Database(format!("Failed to find billing key: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self, key))]
    async fn save(&self, key: &BillingKey) -> AppResult<BillingKey> {
        debug!("Saving billing key for user: {}", key.user_id);

        let row = sqlx::query_as::<sqlx::Postgres, BillingKeyRow>(
            r#"
            INSERT INTO billing_keys (user_id, bid, card_name, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id)
            DO UPDATE SET bid = EXCLUDED.bid,
                          card_name = EXCLUDED.card_name,
                          created_at = EXCLUDED.created_at
            RETURNING id, user_id, bid, card_name, created_at
            "#,
        )
        .bind(&key.user_id)
        .bind(&key.bid)
        .bind(&key.card_name)
        .bind(key.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error saving billing key: {}", e);
            AppError::Database(format!("Failed to save billing key: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn delete_by_user(&self, user_id: &str) -> AppResult<bool> {
        debug!("Deleting billing key for user: {}", user_id);

        let result = sqlx::query("DELETE FROM billing_keys WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting billing key for {}: {}", user_id, e);
                AppError::Database(format!("Failed to delete billing key: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn exists(&self, user_id: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM billing_keys WHERE user_id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    error!("Database error checking billing key for {}: {}", user_id, e);
                    AppError::Database(format!("Failed to check billing key: {}", e))
                })?;

        Ok(result.0)
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct BillingKeyRow {
    id: i64,
    user_id: String,
    bid: String,
    card_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<BillingKeyRow> for BillingKey {
    fn from(row: BillingKeyRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            bid: row.bid,
            card_name: row.card_name,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let row = BillingKeyRow {
            id: 5,
            user_id: "a1b2c3".to_string(),
            bid: "BIKY00000001".to_string(),
            card_name: Some("Example Card".to_string()),
            created_at: Utc::now(),
        };

        let key: BillingKey = row.into();
        assert_eq!(key.id, 5);
        assert_eq!(key.user_id, "a1b2c3");
        assert_eq!(key.bid, "BIKY00000001");
    }
}
