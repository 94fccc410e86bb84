//! Business logic services for the Motus backend
//!
//! Services sit between the HTTP handlers and the stores/gateway:
//! handlers parse requests and delegate here; services apply the business
//! rules and persist through repository traits.
//!
//! # Architecture
//!
//! - Each service is generic over the repository/gateway traits it uses,
//!   so tests run against in-memory fakes
//! - Services hold no per-request state; they are wrapped in `Arc` and
//!   shared across workers
//! - All operations are instrumented with tracing
//! - Errors are `AppError` end to end

pub mod accompany;
pub mod payment;
pub mod reservation;

pub use accompany::{AccompanyService, NewAccompany};
pub use payment::{ChargeOrder, ExpireBillingKey, PaymentOutcome, PaymentService, RegisterCard};
pub use reservation::{CancelReservation, CreateReservation, ReservationService};
