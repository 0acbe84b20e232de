//! Evaluate Gate Use Case

use axum::http::HeaderMap;
use std::sync::Arc;

use crate::application::config::GateConfig;
use crate::domain::decision::GateDecision;
use crate::domain::route::RouteClass;

/// Result of running the gate over one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub class: RouteClass,
    pub decision: GateDecision,
    /// Redirect target; `Some` exactly when `decision` is a redirect
    pub location: Option<String>,
}

/// Evaluate Gate Use Case
///
/// Stateless: every call is a pure function of the configuration and the
/// request's path and cookies.
pub struct EvaluateGateUseCase {
    config: Arc<GateConfig>,
}

impl EvaluateGateUseCase {
    pub fn new(config: Arc<GateConfig>) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, path: &str, query: Option<&str>, headers: &HeaderMap) -> GateOutcome {
        let class = self.config.classify(path);

        // Public routes never look at cookies
        let session_present = match class {
            RouteClass::Public => false,
            _ => self.config.session_cookies.is_present(headers),
        };

        let decision = GateDecision::decide(class, session_present);

        let location = match decision {
            GateDecision::PassThrough => None,
            GateDecision::RedirectToLanding => Some(self.config.landing_path.clone()),
            GateDecision::RedirectToLogin => Some(self.login_location(path, query)),
        };

        GateOutcome {
            class,
            decision,
            location,
        }
    }

    fn login_location(&self, path: &str, query: Option<&str>) -> String {
        let Some(param) = self.config.return_to_param.as_deref() else {
            return self.config.login_path.clone();
        };

        let original = match query {
            Some(q) if !q.is_empty() => format!("{}?{}", path, q),
            _ => path.to_string(),
        };

        format!(
            "{}?{}={}",
            self.config.login_path,
            urlencoding::encode(param),
            urlencoding::encode(&original)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};

    fn session_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_id=tok"));
        headers
    }

    #[test]
    fn test_protected_without_session_redirects_to_login() {
        let use_case = EvaluateGateUseCase::new(Arc::new(GateConfig::admin()));
        let outcome = use_case.evaluate("/admin/users", None, &HeaderMap::new());

        assert_eq!(outcome.class, RouteClass::Protected);
        assert_eq!(outcome.decision, GateDecision::RedirectToLogin);
        assert_eq!(outcome.location.as_deref(), Some("/login"));
    }

    #[test]
    fn test_login_with_session_redirects_to_landing() {
        let use_case = EvaluateGateUseCase::new(Arc::new(GateConfig::storefront()));
        let outcome = use_case.evaluate("/login", None, &session_headers());

        assert_eq!(outcome.decision, GateDecision::RedirectToLanding);
        assert_eq!(outcome.location.as_deref(), Some("/account"));
    }

    #[test]
    fn test_pass_through_has_no_location() {
        let use_case = EvaluateGateUseCase::new(Arc::new(GateConfig::admin()));

        let outcome = use_case.evaluate("/dashboard", None, &session_headers());
        assert_eq!(outcome.decision, GateDecision::PassThrough);
        assert!(outcome.location.is_none());

        let outcome = use_case.evaluate("/login", None, &HeaderMap::new());
        assert_eq!(outcome.decision, GateDecision::PassThrough);
        assert!(outcome.location.is_none());
    }

    #[test]
    fn test_return_to_param_carries_path_and_query() {
        let config = GateConfig::admin().with_return_to_param("next");
        let use_case = EvaluateGateUseCase::new(Arc::new(config));

        let outcome = use_case.evaluate("/admin/orders", Some("page=2"), &HeaderMap::new());
        assert_eq!(
            outcome.location.as_deref(),
            Some("/login?next=%2Fadmin%2Forders%3Fpage%3D2")
        );

        let outcome = use_case.evaluate("/admin", Some(""), &HeaderMap::new());
        assert_eq!(outcome.location.as_deref(), Some("/login?next=%2Fadmin"));
    }
}
