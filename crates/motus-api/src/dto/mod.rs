//! Data Transfer Objects (DTOs) for API requests and responses

pub mod accompany;
pub mod common;
pub mod payment;
pub mod reservation;

pub use accompany::*;
pub use common::*;
pub use payment::*;
pub use reservation::*;
