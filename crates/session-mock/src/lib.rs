#![doc = include_str!("../README.md")]

pub mod auth;
pub mod cookie;
pub mod dispatch;
mod origin;
pub mod response;
pub mod route;
pub mod server;

pub use auth::SessionAuthenticator;
pub use cookie::{Cookie, CookieError, CookieStore, MemoryCookieJar};
pub use dispatch::{InterceptedRequest, MockDispatcher};
pub use origin::{Origin, OriginError};
pub use response::{Body, MockResponse};
pub use route::{Handler, HandlerRequest, RouteEntry, RouteTable, UrlMatcher};
pub use server::{
    MockSessionServer, SESSION_COOKIE_MAX_AGE, SessionCookieGuard, clear_cookies,
    set_session_cookie,
};
