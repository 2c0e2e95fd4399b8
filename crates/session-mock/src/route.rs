use std::collections::HashMap;

use http::Method;
use url::Url;

use crate::{Origin, response::MockResponse};

/// Request metadata a handler is invoked with: the matched method and URL
/// plus the cookie mapping resolved for the request's origin.
#[derive(Clone, Debug)]
pub struct HandlerRequest {
    /// Request method
    pub method: Method,
    /// Full request URL
    pub url: Url,
    /// Resolved cookie name/value pairs
    pub cookies: HashMap<String, String>,
}

/// A route handler: produces a response description from request metadata.
pub type Handler = Box<dyn Fn(&HandlerRequest) -> MockResponse + Send + Sync>;

/// Decides whether a route entry applies to a request URL.
#[derive(Clone, Debug)]
pub enum UrlMatcher {
    /// Matches the exact origin and path of the given URL (query ignored).
    Exact(Url),
    /// Matches any URL on the origin whose path starts with the prefix.
    PathPrefix {
        /// Origin the prefix applies to
        origin: Origin,
        /// Path prefix, e.g. `/rest`
        prefix: String,
    },
}

impl UrlMatcher {
    /// Exact matcher for a URL string.
    pub fn exact(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::Exact(Url::parse(url)?))
    }

    /// Prefix matcher for paths under an origin.
    pub fn path_prefix(origin: Origin, prefix: impl Into<String>) -> Self {
        Self::PathPrefix {
            origin,
            prefix: prefix.into(),
        }
    }

    /// Returns true if the request URL is covered by this matcher.
    pub fn matches(&self, url: &Url) -> bool {
        match self {
            Self::Exact(target) => {
                url.scheme() == target.scheme()
                    && url.host_str() == target.host_str()
                    && url.port_or_known_default() == target.port_or_known_default()
                    && url.path() == target.path()
            }
            Self::PathPrefix { origin, prefix } => {
                Origin::from_url(url).is_ok_and(|request_origin| request_origin == *origin)
                    && url.path().starts_with(prefix.as_str())
            }
        }
    }
}

/// One (method, URL matcher, handler) triple in the route table.
pub struct RouteEntry {
    method: Method,
    matcher: UrlMatcher,
    handler: Handler,
}

impl RouteEntry {
    /// Returns true if both method and URL match.
    pub fn matches(&self, method: &Method, url: &Url) -> bool {
        self.method == *method && self.matcher.matches(url)
    }

    pub(crate) fn invoke(&self, request: &HandlerRequest) -> MockResponse {
        (self.handler)(request)
    }
}

/// Ordered list of route entries.
///
/// Matching is attempted in declaration order and the first entry whose
/// method and URL match wins, even if a later entry would also match and
/// produce a different response. Order is a user-visible contract: an
/// earlier over-broad entry silently shadows later, more specific ones.
#[derive(Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Creates an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry; earlier entries take precedence.
    pub fn route(
        mut self,
        method: Method,
        matcher: UrlMatcher,
        handler: impl Fn(&HandlerRequest) -> MockResponse + Send + Sync + 'static,
    ) -> Self {
        self.entries.push(RouteEntry {
            method,
            matcher,
            handler: Box::new(handler),
        });
        self
    }

    /// Appends a GET entry.
    pub fn get(
        self,
        matcher: UrlMatcher,
        handler: impl Fn(&HandlerRequest) -> MockResponse + Send + Sync + 'static,
    ) -> Self {
        self.route(Method::GET, matcher, handler)
    }

    /// Scans in declaration order and returns the first matching entry.
    pub fn first_match(&self, method: &Method, url: &Url) -> Option<&RouteEntry> {
        self.entries
            .iter()
            .find(|entry| entry.matches(method, url))
    }

    /// Number of declared entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    fn request(url: &str) -> (Method, Url) {
        (Method::GET, Url::parse(url).unwrap())
    }

    #[test]
    fn test_exact_matcher_ignores_query() {
        let matcher = UrlMatcher::exact("https://example.com:9090/rest/token").unwrap();
        assert!(matcher.matches(&Url::parse("https://example.com:9090/rest/token?x=1").unwrap()));
        assert!(!matcher.matches(&Url::parse("https://example.com:9090/rest").unwrap()));
        assert!(!matcher.matches(&Url::parse("https://other.com:9090/rest/token").unwrap()));
    }

    #[test]
    fn test_prefix_matcher_requires_same_origin() {
        let origin = Origin::parse("https://example.com:9090").unwrap();
        let matcher = UrlMatcher::path_prefix(origin, "/rest");
        assert!(matcher.matches(&Url::parse("https://example.com:9090/rest/token").unwrap()));
        assert!(matcher.matches(&Url::parse("https://example.com:9090/rest").unwrap()));
        assert!(!matcher.matches(&Url::parse("https://example.com:9090/ping").unwrap()));
        assert!(!matcher.matches(&Url::parse("https://example.com:8080/rest").unwrap()));
    }

    #[test]
    fn test_first_match_respects_declaration_order() {
        let origin = Origin::parse("https://example.com:9090").unwrap();
        let table = RouteTable::new()
            .get(UrlMatcher::path_prefix(origin, "/rest"), |_| {
                MockResponse::text(StatusCode::OK, "prefix")
            })
            .get(
                UrlMatcher::exact("https://example.com:9090/rest/token").unwrap(),
                |_| MockResponse::text(StatusCode::OK, "exact"),
            );

        // The later exact entry also matches, but the earlier prefix entry
        // was declared first and shadows it.
        let (method, url) = request("https://example.com:9090/rest/token");
        let entry = table.first_match(&method, &url).unwrap();
        let response = entry.invoke(&HandlerRequest {
            method: method.clone(),
            url,
            cookies: HashMap::new(),
        });
        assert_eq!(
            response,
            MockResponse::text(StatusCode::OK, "prefix")
        );
    }

    #[test]
    fn test_method_must_match() {
        let table = RouteTable::new().get(
            UrlMatcher::exact("https://example.com/ping").unwrap(),
            |_| MockResponse::text(StatusCode::OK, "pong"),
        );

        let url = Url::parse("https://example.com/ping").unwrap();
        assert!(table.first_match(&Method::POST, &url).is_none());
        assert!(table.first_match(&Method::GET, &url).is_some());
    }

    #[test]
    fn test_no_entry_matches() {
        let table = RouteTable::new();
        let (method, url) = request("https://example.com/anything");
        assert!(table.first_match(&method, &url).is_none());
        assert!(table.is_empty());
    }
}
