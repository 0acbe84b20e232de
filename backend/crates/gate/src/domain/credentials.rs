//! Accepted session credentials
//!
//! Past backends issued the session under different cookie names, and
//! browsers still carry all of them. Any one of the accepted names counts
//! as a session.

use axum::http::HeaderMap;

/// Ordered set of cookie names accepted as "has a session"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookieSet {
    names: Vec<String>,
}

impl SessionCookieSet {
    /// Build from names; blanks and duplicates are dropped, order is kept
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if !name.is_empty() && !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self { names: unique }
    }

    /// Parse a comma separated list, e.g. `crm_session,session_id`
    pub fn from_csv(csv: &str) -> Self {
        Self::new(csv.split(','))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the first accepted cookie found in the request, if any
    pub fn matched<'a>(&'a self, headers: &HeaderMap) -> Option<&'a str> {
        platform::cookie::first_present(headers, &self.names)
    }

    /// Logical OR over all accepted names
    pub fn is_present(&self, headers: &HeaderMap) -> bool {
        self.matched(headers).is_some()
    }
}

impl Default for SessionCookieSet {
    fn default() -> Self {
        Self::new(["crm_session", "session_id", "connect.sid"])
    }
}
