use std::{collections::HashMap, sync::Arc};

use http::Method;
use url::Url;

use crate::{
    Origin,
    cookie::CookieStore,
    response::MockResponse,
    route::{HandlerRequest, RouteTable},
};

/// An intercepted outgoing request, as supplied by the interception layer.
///
/// `cookies` holds pairs the caller attached to this specific request; they
/// are merged on top of whatever the store resolves for the URL's origin.
#[derive(Clone, Debug)]
pub struct InterceptedRequest {
    /// Request method
    pub method: Method,
    /// Full request URL
    pub url: Url,
    /// Cookies attached to this specific request by the caller
    pub cookies: HashMap<String, String>,
}

impl InterceptedRequest {
    /// A GET request for the given URL with no request-attached cookies.
    pub fn get(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            method: Method::GET,
            url: Url::parse(url)?,
            cookies: HashMap::new(),
        })
    }
}

/// Walks the route table for every intercepted request and invokes the
/// first matching handler with the cookies resolved for the request origin.
///
/// Each request is handled synchronously to completion: match, resolve,
/// invoke, respond. Handlers perform no I/O and never yield mid-match.
pub struct MockDispatcher {
    routes: RouteTable,
    store: Arc<dyn CookieStore>,
}

impl MockDispatcher {
    /// Creates a dispatcher over the given routes and cookie store.
    pub fn new(routes: RouteTable, store: Arc<dyn CookieStore>) -> Self {
        Self { routes, store }
    }

    /// Dispatches one intercepted request.
    ///
    /// Returns `None` when no entry matches: the request is simply not
    /// mocked, and passthrough policy belongs to the interception layer.
    pub async fn dispatch(&self, request: &InterceptedRequest) -> Option<MockResponse> {
        let entry = self.routes.first_match(&request.method, &request.url)?;

        let origin = match Origin::from_url(&request.url) {
            Ok(origin) => origin,
            Err(e) => {
                tracing::warn!(url = %request.url, "Matched request has no origin: {e}");
                return None;
            }
        };

        let mut cookies = match self.store.resolve(&origin).await {
            Ok(cookies) => cookies,
            Err(e) => {
                tracing::warn!("Failed to resolve cookies from store: {e}");
                HashMap::new()
            }
        };
        // Request-attached cookies win over stored ones on name collision.
        cookies.extend(request.cookies.clone());

        tracing::debug!(method = %request.method, url = %request.url, ?cookies, "Dispatching mocked request");

        Some(entry.invoke(&HandlerRequest {
            method: request.method.clone(),
            url: request.url.clone(),
            cookies,
        }))
    }
}
