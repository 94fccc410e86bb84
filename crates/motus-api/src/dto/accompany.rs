//! Companion tracking DTOs

use motus_core::models::{format_datetime, Accompany};
use motus_services::NewAccompany;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Tracking creation request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccompanyRequest {
    #[validate(length(min = 1))]
    pub status: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    /// "yyyy-MM-dd HH:mm:ss"
    #[validate(length(min = 1))]
    pub time: String,

    pub detail: Option<String>,
}

impl From<AccompanyRequest> for NewAccompany {
    fn from(req: AccompanyRequest) -> Self {
        Self {
            status: req.status,
            latitude: req.latitude,
            longitude: req.longitude,
            time: req.time,
            detail: req.detail,
        }
    }
}

/// Tracking record projection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccompanyResponse {
    pub id: i64,
    pub reservation_id: i64,
    pub status: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time: String,
    pub detail: Option<String>,
}

impl From<Accompany> for AccompanyResponse {
    fn from(accompany: Accompany) -> Self {
        Self {
            id: accompany.id,
            reservation_id: accompany.reservation_id,
            status: accompany.status,
            latitude: accompany.latitude,
            longitude: accompany.longitude,
            time: format_datetime(&accompany.time),
            detail: accompany.detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motus_core::models::parse_datetime;

    #[test]
    fn test_request_wire_names() {
        let body = r#"{
            "status": "PICKUP",
            "latitude": 37.5665,
            "longitude": 126.978,
            "time": "2024-05-01 10:05:00",
            "detail": "front entrance"
        }"#;

        let req: AccompanyRequest = serde_json::from_str(body).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.status, "PICKUP");
    }

    #[test]
    fn test_request_validation_rejects_bad_latitude() {
        let req = AccompanyRequest {
            status: "PICKUP".to_string(),
            latitude: 123.0,
            longitude: 126.978,
            time: "2024-05-01 10:05:00".to_string(),
            detail: None,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_response_projection() {
        let mut accompany = Accompany::new(
            7,
            "ARRIVED".to_string(),
            37.5665,
            126.9780,
            parse_datetime("2024-05-01 10:40:00").unwrap(),
            None,
        );
        accompany.id = 3;

        let resp = AccompanyResponse::from(accompany);
        assert_eq!(resp.id, 3);
        assert_eq!(resp.time, "2024-05-01 10:40:00");

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["reservationId"], 7);
        assert_eq!(json["status"], "ARRIVED");
    }
}
