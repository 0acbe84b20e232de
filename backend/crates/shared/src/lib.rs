//! Shared Kernel - vocabulary shared by every gateway crate
//!
//! Only things with the same meaning on both sides of the gateway live here:
//! - [`error::kind::ErrorKind`] - error classification mapped to HTTP status
//! - [`error::app_error::AppError`] - the unified error value and its result alias
//! - problem+json rendering for axum (feature `axum`)

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}

pub use error::app_error::{AppError, AppResult};
pub use error::kind::ErrorKind;
