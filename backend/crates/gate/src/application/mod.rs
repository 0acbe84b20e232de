//! Application Layer

pub mod config;
pub mod evaluate;

pub use config::{FrontendProfile, GateConfig};
pub use evaluate::{EvaluateGateUseCase, GateOutcome};
