use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    Origin,
    cookie::{Cookie, CookieError, CookieStore},
    dispatch::{InterceptedRequest, MockDispatcher},
    response::MockResponse,
    route::RouteTable,
};

/// Default attributes of a session cookie written by [`set_session_cookie`]:
/// twelve hours, site-wide.
pub const SESSION_COOKIE_MAX_AGE: i64 = 43_200;
const SESSION_COOKIE_PATH: &str = "/";

/// The mock backend: a route table, a cookie store and an activation flag.
///
/// `start`/`stop` bracket the period during which interception is active
/// and must be invoked once per test suite or per test, matching the
/// interception layer's activation contract. While stopped, every request
/// is treated as unmatched (passthrough), never as denied.
pub struct MockSessionServer {
    dispatcher: MockDispatcher,
    active: AtomicBool,
}

impl MockSessionServer {
    /// Creates a stopped server over the given routes and store.
    pub fn new(routes: RouteTable, store: Arc<dyn CookieStore>) -> Self {
        Self {
            dispatcher: MockDispatcher::new(routes, store),
            active: AtomicBool::new(false),
        }
    }

    /// Activates interception. Idempotent.
    pub fn start(&self) {
        self.active.store(true, Ordering::SeqCst);
        tracing::debug!("Mock session server started");
    }

    /// Deactivates interception. Idempotent.
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
        tracing::debug!("Mock session server stopped");
    }

    /// Returns true while interception is active.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Entry point for the interception layer: dispatches one intercepted
    /// request, or returns `None` when stopped or unmatched.
    pub async fn handle(&self, request: &InterceptedRequest) -> Option<MockResponse> {
        if !self.is_active() {
            return None;
        }
        self.dispatcher.dispatch(request).await
    }
}

/// Teardown action returned by [`set_session_cookie`].
///
/// Deletes the cookie it was created for by writing the same name with
/// `Expires` at the UNIX epoch, which the store treats as removal.
pub struct SessionCookieGuard {
    store: Arc<dyn CookieStore>,
    origin: Origin,
    name: String,
}

impl SessionCookieGuard {
    /// Deletes the cookie from the store.
    pub async fn teardown(self) -> Result<(), CookieError> {
        let deletion = Cookie::deletion(&self.name)?.with_path(SESSION_COOKIE_PATH);
        self.store
            .add(&self.origin, &deletion.to_set_cookie_header())
            .await
    }
}

/// Sets a named cookie to a value for the given origin, with the default
/// session attributes, and returns a teardown action that deletes it.
pub async fn set_session_cookie(
    store: &Arc<dyn CookieStore>,
    origin: &Origin,
    name: &str,
    value: &str,
) -> Result<SessionCookieGuard, CookieError> {
    let cookie = Cookie::new(name, value)?
        .with_max_age(SESSION_COOKIE_MAX_AGE)?
        .with_path(SESSION_COOKIE_PATH);
    store.add(origin, &cookie.to_set_cookie_header()).await?;

    Ok(SessionCookieGuard {
        store: Arc::clone(store),
        origin: origin.clone(),
        name: name.to_owned(),
    })
}

/// Clears all cookies for all origins; call at test boundaries to prevent
/// leakage between cases.
pub async fn clear_cookies(store: &Arc<dyn CookieStore>) -> Result<(), CookieError> {
    store.clear().await
}
