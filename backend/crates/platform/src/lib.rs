//! Platform Crate - Technical Infrastructure
//!
//! Header-level helpers shared by the gate and the proxy:
//! - Cookie header parsing
//! - Client address and `X-Forwarded-*` handling

pub mod client;
pub mod cookie;
