//! Cookie Header Parsing
//!
//! Read-only helpers over the `Cookie` request header. The gateway never
//! issues cookies of its own; session cookies are set by the upstream API
//! and only relayed.

use axum::http::{HeaderMap, header};

/// Iterate over every `name=value` pair in all `Cookie` headers
///
/// HTTP/2 clients may split cookies across several header lines, so each
/// `Cookie` header is visited in order. Pairs without `=` are skipped.
///
/// Works on raw bytes: browsers pass UTF-8 values set by other apps on the
/// same domain, and one of those must not hide the rest of the header.
pub fn cookie_pairs(headers: &HeaderMap) -> impl Iterator<Item = (&[u8], &[u8])> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .flat_map(|value| value.as_bytes().split(|b| *b == b';'))
        .filter_map(|cookie| {
            let eq = cookie.iter().position(|b| *b == b'=')?;
            Some((cookie[..eq].trim_ascii(), cookie[eq + 1..].trim_ascii()))
        })
}

/// Return the first of `names` carried with a non-empty value
///
/// `name=` is what a logout usually leaves behind, so an empty value does
/// not count.
pub fn first_present<'a, S>(headers: &HeaderMap, names: &'a [S]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    names.iter().map(|name| AsRef::<str>::as_ref(name)).find(|name| {
        cookie_pairs(headers).any(|(key, value)| key == name.as_bytes() && !value.is_empty())
    })
}
