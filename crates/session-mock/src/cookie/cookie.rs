use chrono::{DateTime, Utc};

use super::CookieError;

/// RFC 7231 IMF-fixdate, the wire format of the `Expires` attribute.
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// An HTTP cookie as stored in the mock jar.
///
/// Only the attributes needed to store, retrieve and delete a string value
/// are modeled (`Max-Age`, `Path`, `Expires`). A cookie with neither
/// `Max-Age` nor `Expires` is a session cookie: it never expires during the
/// test run. An `Expires` timestamp in the past is the deletion signal —
/// consuming stores remove the cookie instead of keeping that value.
#[derive(Clone, Debug, PartialEq)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Max-Age attribute in seconds
    pub max_age: Option<i64>,
    /// Path attribute
    pub path: Option<String>,
    /// Expires attribute
    pub expires: Option<DateTime<Utc>>,
}

impl Cookie {
    /// Creates a session cookie with no attributes.
    ///
    /// Fails fast on an empty name; that is a test-authoring mistake, not a
    /// condition to recover from at dispatch time.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, CookieError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CookieError::EmptyName);
        }
        Ok(Self {
            name,
            value: value.into(),
            max_age: None,
            path: None,
            expires: None,
        })
    }

    /// Creates the deletion marker for `name`: empty value, `Expires` at the
    /// UNIX epoch. Adding it to a store removes any cookie of that name.
    pub fn deletion(name: impl Into<String>) -> Result<Self, CookieError> {
        let mut cookie = Self::new(name, "")?;
        cookie.expires = Some(DateTime::<Utc>::UNIX_EPOCH);
        Ok(cookie)
    }

    /// Sets the `Max-Age` attribute. Negative values fail fast.
    pub fn with_max_age(mut self, seconds: i64) -> Result<Self, CookieError> {
        if seconds < 0 {
            return Err(CookieError::NegativeMaxAge(seconds));
        }
        self.max_age = Some(seconds);
        Ok(self)
    }

    /// Sets the `Path` attribute.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the `Expires` attribute.
    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Returns true once the cookie's expiry has passed.
    ///
    /// `Max-Age=0` counts as expired; positive `Max-Age` values do not tick
    /// down during a test run.
    pub fn is_expired(&self) -> bool {
        if self.max_age == Some(0) {
            return true;
        }
        self.expires.is_some_and(|exp| Utc::now() > exp)
    }

    /// Serializes the cookie as a `Set-Cookie` header value.
    pub fn to_set_cookie_header(&self) -> String {
        let mut header = format!("{}={}", self.name, self.value);
        if let Some(max_age) = self.max_age {
            header.push_str(&format!("; Max-Age={max_age}"));
        }
        if let Some(path) = &self.path {
            header.push_str(&format!("; Path={path}"));
        }
        if let Some(expires) = self.expires {
            header.push_str(&format!("; Expires={}", expires.format(EXPIRES_FORMAT)));
        }
        header
    }

    /// Formats the cookie as `name=value` for request-side Cookie headers.
    pub fn to_cookie_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }

    /// Parses one `Set-Cookie` style string.
    ///
    /// Attributes other than `Max-Age`, `Path` and `Expires` are outside the
    /// modeled semantics and are skipped with a warning.
    pub fn parse_set_cookie(header: &str) -> Result<Self, CookieError> {
        let mut parts = header.split(';');

        let assignment = parts
            .next()
            .ok_or_else(|| CookieError::MalformedHeader(header.to_string()))?;
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| CookieError::MalformedHeader(header.to_string()))?;
        let mut cookie = Self::new(name.trim(), value.trim())?;

        for attribute in parts {
            let (key, val) = match attribute.split_once('=') {
                Some((key, val)) => (key.trim(), val.trim()),
                None => (attribute.trim(), ""),
            };
            match key.to_ascii_lowercase().as_str() {
                "max-age" => {
                    let seconds: i64 = val
                        .parse()
                        .map_err(|_| CookieError::MalformedHeader(header.to_string()))?;
                    cookie = cookie.with_max_age(seconds)?;
                }
                "path" => {
                    cookie = cookie.with_path(val);
                }
                "expires" => {
                    let parsed = DateTime::parse_from_rfc2822(val)
                        .map_err(|_| CookieError::MalformedHeader(header.to_string()))?;
                    cookie = cookie.with_expires(parsed.with_timezone(&Utc));
                }
                other => {
                    tracing::warn!(attribute = other, "Skipping unmodeled cookie attribute");
                }
            }
        }

        Ok(cookie)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_new_is_session_cookie() {
        let cookie = Cookie::new("MyCookie", "ABCD1234").unwrap();
        assert_eq!(cookie.name, "MyCookie");
        assert_eq!(cookie.value, "ABCD1234");
        assert!(cookie.max_age.is_none());
        assert!(cookie.expires.is_none());
        assert!(!cookie.is_expired());
    }

    #[test]
    fn test_empty_name_fails_fast() {
        assert!(matches!(Cookie::new("", "v"), Err(CookieError::EmptyName)));
    }

    #[test]
    fn test_negative_max_age_fails_fast() {
        let result = Cookie::new("a", "b").unwrap().with_max_age(-1);
        assert!(matches!(result, Err(CookieError::NegativeMaxAge(-1))));
    }

    #[test]
    fn test_serialize_with_attributes() {
        let cookie = Cookie::new("MyCookie", "ABCD1234")
            .unwrap()
            .with_max_age(43200)
            .unwrap()
            .with_path("/");
        assert_eq!(
            cookie.to_set_cookie_header(),
            "MyCookie=ABCD1234; Max-Age=43200; Path=/"
        );
    }

    #[test]
    fn test_serialize_deletion_marker() {
        let cookie = Cookie::deletion("MyCookie").unwrap();
        assert_eq!(
            cookie.to_set_cookie_header(),
            "MyCookie=; Expires=Thu, 01 Jan 1970 00:00:00 GMT"
        );
        assert!(cookie.is_expired());
    }

    #[test]
    fn test_is_expired_with_future_timestamp() {
        let cookie = Cookie::new("a", "b")
            .unwrap()
            .with_expires(Utc::now() + Duration::hours(1));
        assert!(!cookie.is_expired());
    }

    #[test]
    fn test_max_age_zero_is_expired() {
        let cookie = Cookie::new("a", "b").unwrap().with_max_age(0).unwrap();
        assert!(cookie.is_expired());
    }

    #[test]
    fn test_to_cookie_header_format() {
        let cookie = Cookie::new("session", "abc123").unwrap();
        assert_eq!(cookie.to_cookie_header(), "session=abc123");
    }

    #[test]
    fn test_parse_round_trips_attributes() {
        let parsed =
            Cookie::parse_set_cookie("MyCookie=ABCD1234; Max-Age=43200; Path=/").unwrap();
        assert_eq!(parsed.name, "MyCookie");
        assert_eq!(parsed.value, "ABCD1234");
        assert_eq!(parsed.max_age, Some(43200));
        assert_eq!(parsed.path.as_deref(), Some("/"));
    }

    #[test]
    fn test_parse_epoch_expires_is_expired() {
        let parsed =
            Cookie::parse_set_cookie("MyCookie=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT")
                .unwrap();
        assert_eq!(parsed.expires, Some(DateTime::<Utc>::UNIX_EPOCH));
        assert!(parsed.is_expired());
    }

    #[test]
    fn test_parse_without_assignment_is_rejected() {
        assert!(matches!(
            Cookie::parse_set_cookie("no assignment here"),
            Err(CookieError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_parse_skips_unmodeled_attributes() {
        let parsed = Cookie::parse_set_cookie("a=b; Secure; HttpOnly; SameSite=Lax").unwrap();
        assert_eq!(parsed.value, "b");
        assert!(parsed.max_age.is_none());
    }
}
