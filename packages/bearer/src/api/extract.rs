//! Locating the raw token in a request
//!
//! The verifier never sees a request type; callers hand over the
//! `Authorization` header value and the raw query string, either of which
//! may be absent.

use crate::config::TokenSource;
use std::borrow::Cow;

const BEARER_SCHEME: &str = "Bearer";

/// Token from an `Authorization: Bearer <token>` header value
///
/// The scheme is matched case-insensitively. Returns `None` for any other
/// scheme or an empty token.
#[must_use]
pub fn bearer_from_header(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Percent-decoded value of query parameter `name`
///
/// A leading `?` is ignored. The first occurrence wins; an empty value
/// counts as absent.
#[must_use]
pub fn token_from_query(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Token from the header, or from the query when `source` allows it
#[must_use]
pub fn extract_token<'a>(
    source: &TokenSource,
    authorization: Option<&'a str>,
    query: Option<&str>,
) -> Option<Cow<'a, str>> {
    if let Some(token) = authorization.and_then(bearer_from_header) {
        return Some(Cow::Borrowed(token));
    }
    match source {
        TokenSource::HeaderOnly => None,
        TokenSource::HeaderOrQuery { param } => query
            .and_then(|q| token_from_query(q, param))
            .map(Cow::Owned),
    }
}
