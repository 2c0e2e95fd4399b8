use http::{StatusCode, header};
use serde::Serialize;

use crate::cookie::Cookie;

/// Body of a canned response.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    /// JSON payload
    Json(serde_json::Value),
    /// Plain-text payload
    Text(String),
    /// No payload (serializes as null)
    Empty,
}

/// A canned response handed back to the interception layer.
///
/// Produced fresh per matched route invocation, never cached. The
/// interception layer turns it into whatever the calling code observes as
/// an HTTP response.
#[derive(Clone, Debug, PartialEq)]
pub struct MockResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body
    pub body: Body,
    /// Extra response headers as (name, value) pairs
    pub headers: Vec<(String, String)>,
}

impl MockResponse {
    /// A response with a JSON body.
    pub fn json(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            status,
            body: Body::Json(body),
            headers: Vec::new(),
        }
    }

    /// A response with a plain-text body.
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Body::Text(body.into()),
            headers: Vec::new(),
        }
    }

    /// The 401 response used for unauthenticated callers: no body.
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: Body::Empty,
            headers: Vec::new(),
        }
    }

    /// Appends a `Set-Cookie` header, e.g. to re-issue a refreshed session
    /// cookie alongside a successful response.
    pub fn with_set_cookie(mut self, cookie: &Cookie) -> Self {
        self.headers
            .push((header::SET_COOKIE.to_string(), cookie.to_set_cookie_header()));
        self
    }
}
