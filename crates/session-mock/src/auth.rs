use std::collections::HashMap;

/// Decides whether a request carries an authenticated session.
///
/// Authentication is reduced to an equality check of one cookie against a
/// fixed shared secret so that tests are deterministic and need no token
/// issuance. That is acceptable only because the subject is a mock; any
/// migration towards real systems must replace this with actual credential
/// verification.
#[derive(Clone, Debug)]
pub struct SessionAuthenticator {
    cookie_name: String,
    authorized_value: String,
}

impl SessionAuthenticator {
    /// Creates an authenticator for the given session cookie name and
    /// authorized value.
    pub fn new(cookie_name: impl Into<String>, authorized_value: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            authorized_value: authorized_value.into(),
        }
    }

    /// Returns true iff the session cookie is present and holds the
    /// authorized value. Pure and total: an absent key yields false.
    pub fn is_authenticated(&self, cookies: &HashMap<String, String>) -> bool {
        cookies
            .get(&self.cookie_name)
            .is_some_and(|value| *value == self.authorized_value)
    }

    /// The name of the session cookie this authenticator inspects.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> SessionAuthenticator {
        SessionAuthenticator::new("MyCookie", "ABCD1234")
    }

    #[test]
    fn test_authorized_value_passes() {
        let cookies = HashMap::from([("MyCookie".to_string(), "ABCD1234".to_string())]);
        assert!(authenticator().is_authenticated(&cookies));
    }

    #[test]
    fn test_absent_cookie_fails() {
        assert!(!authenticator().is_authenticated(&HashMap::new()));
    }

    #[test]
    fn test_wrong_value_fails() {
        let cookies = HashMap::from([("MyCookie".to_string(), "WXYZ0000".to_string())]);
        assert!(!authenticator().is_authenticated(&cookies));
    }

    #[test]
    fn test_other_cookies_are_ignored() {
        let cookies = HashMap::from([("OtherCookie".to_string(), "ABCD1234".to_string())]);
        assert!(!authenticator().is_authenticated(&cookies));
    }
}
