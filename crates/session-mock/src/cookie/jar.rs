use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use tokio::sync::RwLock;

use super::{Cookie, CookieError, CookieStore};
use crate::Origin;

static AMBIENT: OnceLock<MemoryCookieJar> = OnceLock::new();

/// In-memory cookie jar keyed by origin, with RwLock for thread-safe access.
///
/// Clones share the underlying table, so a jar can be handed to both the
/// test setup code and the dispatcher and they observe the same state.
#[derive(Clone)]
pub struct MemoryCookieJar {
    cookies: Arc<RwLock<HashMap<Origin, HashMap<String, Cookie>>>>,
}

impl MemoryCookieJar {
    /// Creates a new empty jar.
    pub fn new() -> Self {
        Self {
            cookies: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the process-wide ambient jar, created on first use.
    ///
    /// This is the analogue of writing to a document-level cookie surface:
    /// every caller in the process shares it. Prefer an explicitly
    /// constructed jar when tests run concurrently.
    pub fn ambient() -> Self {
        AMBIENT.get_or_init(Self::new).clone()
    }
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CookieStore for MemoryCookieJar {
    async fn add(&self, origin: &Origin, set_cookie: &str) -> Result<(), CookieError> {
        // Parse everything before taking the write lock so a malformed
        // string cannot leave a partial update behind.
        let parsed = set_cookie
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Cookie::parse_set_cookie)
            .collect::<Result<Vec<_>, _>>()?;

        let mut cookies = self.cookies.write().await;
        let jar = cookies.entry(origin.clone()).or_default();
        for cookie in parsed {
            if cookie.is_expired() {
                // Deletion marker: logically removed, not retained.
                jar.remove(&cookie.name);
            } else {
                jar.insert(cookie.name.clone(), cookie);
            }
        }
        Ok(())
    }

    async fn remove(&self, origin: &Origin, name: &str) -> Result<(), CookieError> {
        let mut cookies = self.cookies.write().await;
        if let Some(jar) = cookies.get_mut(origin) {
            jar.remove(name);
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), CookieError> {
        let mut cookies = self.cookies.write().await;
        cookies.clear();
        Ok(())
    }

    async fn resolve(&self, origin: &Origin) -> Result<HashMap<String, String>, CookieError> {
        let cookies = self.cookies.read().await;
        Ok(cookies
            .get(origin)
            .map(|jar| {
                jar.values()
                    .filter(|c| !c.is_expired())
                    .map(|c| (c.name.clone(), c.value.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
