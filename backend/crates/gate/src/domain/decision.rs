//! Gate decision table

use derive_more::Display;

use super::route::RouteClass;

/// What the gate does with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GateDecision {
    #[display("pass_through")]
    PassThrough,
    #[display("redirect_to_login")]
    RedirectToLogin,
    #[display("redirect_to_landing")]
    RedirectToLanding,
}

impl GateDecision {
    /// | Route class | Session | Decision          |
    /// |-------------|---------|-------------------|
    /// | login       | yes     | RedirectToLanding |
    /// | login       | no      | PassThrough       |
    /// | protected   | yes     | PassThrough       |
    /// | protected   | no      | RedirectToLogin   |
    /// | public      | any     | PassThrough       |
    pub const fn decide(class: RouteClass, session_present: bool) -> Self {
        match (class, session_present) {
            (RouteClass::Login, true) => GateDecision::RedirectToLanding,
            (RouteClass::Protected, false) => GateDecision::RedirectToLogin,
            _ => GateDecision::PassThrough,
        }
    }

    #[inline]
    pub const fn is_redirect(&self) -> bool {
        !matches!(self, GateDecision::PassThrough)
    }
}
