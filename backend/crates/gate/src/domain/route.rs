//! Route patterns and route classification

use derive_more::Display;

/// A path pattern the gate recognises
///
/// * `Prefix("/admin")` matches `/admin`, `/admin/` and anything below
///   `/admin/`, but not `/administrator`.
/// * `Exact("/login")` matches `/login` and `/login/` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    Prefix(String),
    Exact(String),
}

impl RoutePattern {
    pub fn prefix(path: impl Into<String>) -> Self {
        RoutePattern::Prefix(normalize(path.into()))
    }

    pub fn exact(path: impl Into<String>) -> Self {
        RoutePattern::Exact(normalize(path.into()))
    }

    pub fn matches(&self, path: &str) -> bool {
        let path = trim_trailing_slash(path);
        match self {
            RoutePattern::Exact(exact) => path == exact,
            RoutePattern::Prefix(prefix) => {
                if prefix == "/" {
                    return true;
                }
                match path.strip_prefix(prefix.as_str()) {
                    Some(rest) => rest.is_empty() || rest.starts_with('/'),
                    None => false,
                }
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RoutePattern::Prefix(p) | RoutePattern::Exact(p) => p,
        }
    }
}

/// How the gate treats a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RouteClass {
    /// The login page; signed-in users are sent away from it
    #[display("login")]
    Login,
    /// Requires a session cookie
    #[display("protected")]
    Protected,
    /// Not constrained by the gate
    #[display("public")]
    Public,
}

/// Canonical form of a request path for matching
///
/// Percent-decodes once, collapses repeated `/` and resolves `.` and `..`
/// segments, so `//admin`, `/%61dmin` and `/x/../admin` all read `/admin`.
/// Bytes that do not decode to UTF-8 become `U+FFFD`.
pub fn canonical_path(path: &str) -> String {
    let bytes = urlencoding::decode_binary(path.as_bytes());
    let decoded = String::from_utf8_lossy(&bytes);

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    format!("/{}", segments.join("/"))
}

/// Leading slash, no trailing slash (except for the root itself)
fn normalize(path: String) -> String {
    let path = if path.starts_with('/') {
        path
    } else {
        format!("/{}", path)
    };
    trim_trailing_slash(&path).to_string()
}

fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}
