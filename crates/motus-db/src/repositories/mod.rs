//! Repository implementations

pub mod accompany_repo;
pub mod billing_key_repo;
pub mod reservation_repo;

pub use accompany_repo::PgAccompanyRepository;
pub use billing_key_repo::PgBillingKeyRepository;
pub use reservation_repo::PgReservationRepository;
