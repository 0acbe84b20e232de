//! Domain Layer

pub mod envelope;
pub mod headers;
pub mod transport;
pub mod upstream;
