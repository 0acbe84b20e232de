//! Transport Trait
//!
//! Interface to the upstream API. Implementation is in infrastructure layer.

use crate::domain::envelope::{ForwardedRequest, ForwardedResponse};
use crate::error::ProxyResult;

/// Upstream transport trait
#[trait_variant::make(UpstreamTransport: Send)]
pub trait LocalUpstreamTransport {
    /// Send `request` to the absolute `url` and return the raw answer
    ///
    /// Any status the upstream returns is `Ok`; `Err` means no usable
    /// answer arrived.
    async fn send(&self, url: &str, request: ForwardedRequest) -> ProxyResult<ForwardedResponse>;
}
