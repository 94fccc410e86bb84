//! Accompany (tracking) service
//!
//! Records and lists companion tracking entries tied to a reservation.
//! Thin storage orchestration; the only business rule is the shared
//! date-time wire format.

use motus_core::{
    models::{parse_datetime, Accompany},
    traits::AccompanyRepository,
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Input for recording a tracking entry
#[derive(Debug, Clone)]
pub struct NewAccompany {
    pub status: String,
    pub latitude: f64,
    pub longitude: f64,
    /// "yyyy-MM-dd HH:mm:ss"
    pub time: String,
    pub detail: Option<String>,
}

/// Accompany service
pub struct AccompanyService<A: AccompanyRepository> {
    repo: Arc<A>,
}

impl<A: AccompanyRepository> AccompanyService<A> {
    /// Create a new accompany service
    pub fn new(repo: Arc<A>) -> Self {
        Self { repo }
    }

    /// List all tracking entries for a reservation
    ///
    /// Returns an empty list when there are none.
    #[instrument(skip(self))]
    pub async fn list(&self, reservation_id: i64) -> AppResult<Vec<Accompany>> {
        self.repo.list_by_reservation(reservation_id).await
    }

    /// Record a new tracking entry for a reservation
    #[instrument(skip(self, input))]
    pub async fn track(&self, reservation_id: i64, input: NewAccompany) -> AppResult<Accompany> {
        let time = parse_datetime(&input.time).map_err(|e| {
            warn!(
                "Rejecting tracking entry with malformed time {:?}: {}",
                input.time, e
            );
            AppError::InvalidInput(format!("Invalid tracking time: {}", input.time))
        })?;

        debug!(
            "Recording tracking entry for reservation {}: {}",
            reservation_id, input.status
        );

        let accompany = Accompany::new(
            reservation_id,
            input.status,
            input.latitude,
            input.longitude,
            time,
            input.detail,
        );

        self.repo.create(&accompany).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory tracking store
    #[derive(Default)]
    struct InMemoryAccompanies {
        rows: Mutex<Vec<Accompany>>,
    }

    #[async_trait::async_trait]
    impl AccompanyRepository for InMemoryAccompanies {
        async fn list_by_reservation(&self, reservation_id: i64) -> AppResult<Vec<Accompany>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.reservation_id == reservation_id)
                .cloned()
                .collect())
        }

        async fn create(&self, accompany: &Accompany) -> AppResult<Accompany> {
            let mut rows = self.rows.lock().unwrap();

            let mut stored = accompany.clone();
            stored.id = rows.len() as i64 + 1;
            rows.push(stored.clone());
            Ok(stored)
        }
    }

    fn service() -> AccompanyService<InMemoryAccompanies> {
        AccompanyService::new(Arc::new(InMemoryAccompanies::default()))
    }

    fn entry() -> NewAccompany {
        NewAccompany {
            status: "PICKUP".to_string(),
            latitude: 37.5665,
            longitude: 126.9780,
            time: "2024-05-01 10:05:00".to_string(),
            detail: Some("front entrance".to_string()),
        }
    }

    #[tokio::test]
    async fn test_list_empty_is_ok() {
        let svc = service();

        let entries = svc.list(42).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_track_then_list() {
        let svc = service();

        let created = svc.track(42, entry()).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.reservation_id, 42);

        let entries = svc.list(42).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, "PICKUP");

        // Entries for other reservations stay invisible
        assert!(svc.list(43).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_track_rejects_malformed_time() {
        let svc = service();

        let mut input = entry();
        input.time = "10:05".to_string();

        let result = svc.track(42, input).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
