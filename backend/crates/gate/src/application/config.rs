//! Application Configuration
//!
//! Configuration for the Session Gate. One [`FrontendProfile`] per
//! frontend served by the gateway.

use std::str::FromStr;

use derive_more::Display;

use crate::domain::credentials::SessionCookieSet;
use crate::domain::route::{RouteClass, RoutePattern, canonical_path};

/// Which frontend the gateway is serving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum FrontendProfile {
    /// Admin back-office
    #[default]
    #[display("admin")]
    Admin,
    /// CRM / admin console
    #[display("crm")]
    Crm,
    /// Customer-facing storefront
    #[display("storefront")]
    Storefront,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown frontend profile: {0} (expected admin, crm or storefront)")]
pub struct UnknownProfile(pub String);

impl FromStr for FrontendProfile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(FrontendProfile::Admin),
            "crm" => Ok(FrontendProfile::Crm),
            "storefront" | "store" => Ok(FrontendProfile::Storefront),
            other => Err(UnknownProfile(other.to_string())),
        }
    }
}

/// Session Gate configuration
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Cookie names accepted as a session
    pub session_cookies: SessionCookieSet,
    /// Paths that require a session
    pub protected_routes: Vec<RoutePattern>,
    /// Login page; signed-in users are redirected away from it
    pub login_path: String,
    /// Where signed-in users land when they hit the login page
    pub landing_path: String,
    /// Query parameter carrying the original URL on redirect to login
    pub return_to_param: Option<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::for_profile(FrontendProfile::default())
    }
}

impl GateConfig {
    pub fn for_profile(profile: FrontendProfile) -> Self {
        match profile {
            FrontendProfile::Admin => Self::admin(),
            FrontendProfile::Crm => Self::crm(),
            FrontendProfile::Storefront => Self::storefront(),
        }
    }

    /// Admin back-office: the admin area and the dashboard
    pub fn admin() -> Self {
        Self {
            session_cookies: SessionCookieSet::default(),
            protected_routes: vec![
                RoutePattern::prefix("/admin"),
                RoutePattern::prefix("/dashboard"),
            ],
            login_path: "/login".to_string(),
            landing_path: "/dashboard".to_string(),
            return_to_param: None,
        }
    }

    /// CRM console
    pub fn crm() -> Self {
        Self {
            protected_routes: vec![
                RoutePattern::prefix("/crm"),
                RoutePattern::prefix("/dashboard"),
            ],
            ..Self::admin()
        }
    }

    /// Storefront: only the customer's own pages are gated
    pub fn storefront() -> Self {
        Self {
            protected_routes: vec![
                RoutePattern::prefix("/account"),
                RoutePattern::prefix("/checkout"),
                RoutePattern::prefix("/orders"),
            ],
            landing_path: "/account".to_string(),
            ..Self::admin()
        }
    }

    pub fn with_session_cookies(mut self, cookies: SessionCookieSet) -> Self {
        self.session_cookies = cookies;
        self
    }

    pub fn with_return_to_param(mut self, param: impl Into<String>) -> Self {
        self.return_to_param = Some(param.into());
        self
    }

    /// Classify a request path. The login path wins over protected patterns.
    ///
    /// Matching runs on the [`canonical_path`], so encoded or doubled
    /// slashes cannot slip a protected page past the gate.
    pub fn classify(&self, path: &str) -> RouteClass {
        let path = canonical_path(path);
        let path = path.as_str();
        if RoutePattern::exact(self.login_path.as_str()).matches(path) {
            RouteClass::Login
        } else if self.protected_routes.iter().any(|p| p.matches(path)) {
            RouteClass::Protected
        } else {
            RouteClass::Public
        }
    }
}
