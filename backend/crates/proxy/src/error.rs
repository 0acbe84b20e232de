//! Proxy Error Types
//!
//! Proxy-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Upstream responses with a non-2xx status are not errors and never pass
//! through here; they are relayed as-is.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use std::error::Error as StdError;
use thiserror::Error;

/// Proxy-specific result type alias
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Proxy-specific error variants
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Upstream base URL rejected at startup
    #[error("Invalid upstream base URL: {0}")]
    InvalidUpstream(String),

    /// Connection refused, DNS failure, TLS failure, reset mid-request
    #[error("Upstream API unreachable: {0}")]
    UpstreamUnreachable(String),

    /// Only possible when a timeout is configured
    #[error("Upstream API timed out")]
    UpstreamTimeout,

    /// Upstream answered but the body could not be read
    #[error("Failed to read upstream response body: {0}")]
    UpstreamBody(String),

    /// The browser's request body could not be read
    #[error("Failed to read request body: {0}")]
    RequestBody(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::UpstreamUnreachable(_) | ProxyError::UpstreamBody(_) => {
                StatusCode::BAD_GATEWAY
            }
            ProxyError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::RequestBody(_) => StatusCode::BAD_REQUEST,
            ProxyError::InvalidUpstream(_) | ProxyError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProxyError::UpstreamUnreachable(_) | ProxyError::UpstreamBody(_) => {
                ErrorKind::BadGateway
            }
            ProxyError::UpstreamTimeout => ErrorKind::GatewayTimeout,
            ProxyError::RequestBody(_) => ErrorKind::BadRequest,
            ProxyError::InvalidUpstream(_) | ProxyError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        if self.kind().is_server_error() {
            tracing::error!(error = %self, "Proxy request failed");
        } else {
            tracing::warn!(error = %self, "Proxy request rejected");
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<ProxyError> for AppError {
    fn from(err: ProxyError) -> Self {
        let message = err.to_string();
        let app_err = match err.kind() {
            ErrorKind::BadGateway => AppError::bad_gateway(message),
            ErrorKind::GatewayTimeout => AppError::gateway_timeout(message),
            ErrorKind::BadRequest => AppError::bad_request(message),
            _ => AppError::internal(message),
        };
        let app_err = if err.kind().is_upstream_error() {
            app_err.with_action("Retry the request later")
        } else {
            app_err
        };
        app_err.with_source(err)
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::UpstreamTimeout
        } else if err.is_body() || err.is_decode() {
            ProxyError::UpstreamBody(error_chain(&err))
        } else {
            ProxyError::UpstreamUnreachable(error_chain(&err))
        }
    }
}

impl From<url::ParseError> for ProxyError {
    fn from(err: url::ParseError) -> Self {
        ProxyError::InvalidUpstream(err.to_string())
    }
}

/// `err: cause: cause ...`; reqwest hides the interesting part in the chain
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
