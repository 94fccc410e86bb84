//! Companion tracking repository implementation
//!
//! PostgreSQL-backed storage for tracking entries. Append-only: entries are
//! inserted and listed, never updated.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use motus_core::{models::Accompany, traits::AccompanyRepository, AppError, AppResult};
use sqlx::PgPool;
use tracing::{debug, error, instrument};

/// PostgreSQL implementation of AccompanyRepository
pub struct PgAccompanyRepository {
    pool: PgPool,
}

impl PgAccompanyRepository {
    /// Create a new accompany repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccompanyRepository for PgAccompanyRepository {
    #[instrument(skip(self))]
    async fn list_by_reservation(&self, reservation_id: i64) -> AppResult<Vec<Accompany>> {
        debug!("Listing tracking entries for reservation: {}", reservation_id);

        let rows = sqlx::query_as::<sqlx::Postgres, AccompanyRow>(
            r#"
            SELECT id, reservation_id, status, latitude, longitude, time, detail
            FROM accompanies
            WHERE reservation_id = $1
            ORDER BY time ASC, id ASC
            "#,
        )
        .bind(reservation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Database error listing tracking entries for reservation {}: {}",
                reservation_id, e
            );
            AppError::Database(format!("Failed to list tracking entries: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, accompany))]
    async fn create(&self, accompany: &Accompany) -> AppResult<Accompany> {
        debug!(
            "Creating tracking entry for reservation: {}",
            accompany.reservation_id
        );

        let row = sqlx::query_as::<sqlx::Postgres, AccompanyRow>(
            r#"
            INSERT INTO accompanies (reservation_id, status, latitude, longitude, time, detail)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, reservation_id, status, latitude, longitude, time, detail
            "#,
        )
        .bind(accompany.reservation_id)
        .bind(&accompany.status)
        .bind(accompany.latitude)
        .bind(accompany.longitude)
        .bind(accompany.time)
        .bind(&accompany.detail)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating tracking entry: {}", e);
            AppError::Database(format!("Failed to create tracking entry: {}", e))
        })?;

        Ok(row.into())
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct AccompanyRow {
    id: i64,
    reservation_id: i64,
    status: String,
    latitude: f64,
    longitude: f64,
    time: NaiveDateTime,
    detail: Option<String>,
}

impl From<AccompanyRow> for Accompany {
    fn from(row: AccompanyRow) -> Self {
        Self {
            id: row.id,
            reservation_id: row.reservation_id,
            status: row.status,
            latitude: row.latitude,
            longitude: row.longitude,
            time: row.time,
            detail: row.detail,
        }
    }
}
