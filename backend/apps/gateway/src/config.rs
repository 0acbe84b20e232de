//! Gateway configuration
//!
//! Read once at startup and injected into the gate and proxy constructors.
//! Parsing goes through a lookup function so tests never touch the process
//! environment.

use axum::http::HeaderValue;
use gate::{FrontendProfile, GateConfig, SessionCookieSet, UnknownProfile};
use proxy::{ProxyConfig, ProxyError};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{key}={value:?} is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("FRONTEND_PROFILE: {0}")]
    Profile(#[from] UnknownProfile),

    #[error("{key}: {source}")]
    Upstream {
        key: &'static str,
        #[source]
        source: ProxyError,
    },
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub addr: SocketAddr,
    pub profile: FrontendProfile,
    pub gate: GateConfig,
    /// `/api` tunnel to the upstream API
    pub proxy: ProxyConfig,
    /// Page renderer behind the gate; pages 404 when unset
    pub pages: Option<ProxyConfig>,
    pub frontend_origins: Vec<HeaderValue>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank counts as unset
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let addr_raw = get("GATEWAY_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            key: "GATEWAY_ADDR",
            value: addr_raw.clone(),
            reason: format!("{}", e),
        })?;

        let profile = match get("FRONTEND_PROFILE") {
            Some(raw) => raw.parse::<FrontendProfile>()?,
            None => FrontendProfile::default(),
        };

        let mut gate = GateConfig::for_profile(profile);
        if let Some(raw) = get("SESSION_COOKIE_NAMES") {
            let cookies = SessionCookieSet::from_csv(&raw);
            if cookies.is_empty() {
                return Err(ConfigError::Invalid {
                    key: "SESSION_COOKIE_NAMES",
                    value: raw,
                    reason: "no cookie names listed".to_string(),
                });
            }
            gate = gate.with_session_cookies(cookies);
        }
        if let Some(param) = get("LOGIN_RETURN_PARAM") {
            gate = gate.with_return_to_param(param);
        }

        let connect_timeout = match get("UPSTREAM_CONNECT_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "UPSTREAM_CONNECT_TIMEOUT_SECS",
                        value: raw,
                        reason: "expected a positive number of seconds".to_string(),
                    });
                }
            },
            None => None,
        };

        let api_base = get("API_BASE_URL").ok_or(ConfigError::Missing("API_BASE_URL"))?;
        let mut proxy = ProxyConfig::from_upstream_url(&api_base)
            .map_err(|source| ConfigError::Upstream {
                key: "API_BASE_URL",
                source,
            })?
            .with_connect_timeout(connect_timeout);
        if let Some(prefix) = get("PROXY_MOUNT_PREFIX") {
            proxy = proxy.with_mount_prefix(&prefix);
        }
        if proxy.mount_prefix == "/" {
            return Err(ConfigError::Invalid {
                key: "PROXY_MOUNT_PREFIX",
                value: proxy.mount_prefix,
                reason: "the API mount cannot cover every page".to_string(),
            });
        }

        let pages = match get("PAGE_UPSTREAM_URL") {
            Some(raw) => Some(
                ProxyConfig::from_upstream_url(&raw)
                    .map_err(|source| ConfigError::Upstream {
                        key: "PAGE_UPSTREAM_URL",
                        source,
                    })?
                    .with_mount_prefix("/")
                    .with_connect_timeout(connect_timeout),
            ),
            None => None,
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            // A wildcard cannot be combined with credentialed CORS
            .filter(|origin| *origin != "*")
            .filter_map(|origin| origin.parse().ok())
            .collect();

        Ok(Self {
            addr,
            profile,
            gate,
            proxy,
            pages,
            frontend_origins,
        })
    }
}
