/// Errors that can occur when constructing, serializing or parsing cookies.
///
/// The taxonomy is deliberately narrow: every variant indicates a
/// test-authoring mistake caught at construction or parse time, not a
/// runtime condition to recover from.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// Cookie names must be non-empty.
    #[error("Cookie name must not be empty")]
    EmptyName,

    /// Max-Age must be zero or positive.
    #[error("Cookie Max-Age must not be negative (got {0})")]
    NegativeMaxAge(i64),

    /// A Set-Cookie style string could not be parsed.
    #[error("Malformed Set-Cookie string: {0}")]
    MalformedHeader(String),
}
