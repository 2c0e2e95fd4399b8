use std::collections::HashMap;

use super::CookieError;
use crate::Origin;

/// Abstraction over where "set" cookies live during a test run.
///
/// Two setups exist in this domain: an ambient, process-wide surface written
/// to implicitly (the `document.cookie` analogue) and an explicit jar
/// injected into both the test setup and the dispatcher. Both are served by
/// the same trait so that [`resolve`](CookieStore::resolve) semantics are
/// identical from the dispatcher's point of view.
///
/// Implementations hold process-wide mutable state; tests must clear it at
/// case boundaries, there is no automatic scoping.
#[async_trait::async_trait]
pub trait CookieStore: Send + Sync {
    /// Parses one or more Set-Cookie style strings (newline separated) and
    /// records them under the origin key.
    ///
    /// A cookie with the same name overwrites the previous one. An already
    /// expired cookie (past `Expires`, or `Max-Age=0`) removes the cookie of
    /// that name instead of being stored.
    async fn add(&self, origin: &Origin, set_cookie: &str) -> Result<(), CookieError>;

    /// Removes the cookie of that name for the origin.
    ///
    /// Returns Ok even if no such cookie exists (idempotent operation).
    async fn remove(&self, origin: &Origin, name: &str) -> Result<(), CookieError>;

    /// Removes all entries for all origins; used between test cases to
    /// prevent leakage.
    async fn clear(&self) -> Result<(), CookieError>;

    /// Returns the live (non-expired) name/value pairs visible to requests
    /// against that origin.
    async fn resolve(&self, origin: &Origin) -> Result<HashMap<String, String>, CookieError>;
}
