//! Application Layer

pub mod config;
pub mod forward;

pub use config::ProxyConfig;
pub use forward::ForwardRequestUseCase;
