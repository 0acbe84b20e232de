//! Domain Layer
//!
//! Pure rules of the gate. Nothing here touches I/O.

pub mod credentials;
pub mod decision;
pub mod route;
