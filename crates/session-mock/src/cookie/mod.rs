//! Cookie model, wire codec and per-origin storage.

#[allow(clippy::module_inception)]
mod cookie;
mod error;
mod jar;
mod store;

pub use cookie::Cookie;
pub use error::CookieError;
pub use jar::MemoryCookieJar;
pub use store::CookieStore;
