use std::fmt;

use thiserror::Error;
use url::Url;

/// Errors from deriving an [`Origin`] out of a request target.
#[derive(Debug, Error)]
pub enum OriginError {
    /// The request target is not a valid URL.
    #[error(transparent)]
    Parse(#[from] url::ParseError),

    /// The URL carries no host or port to partition cookies by.
    #[error("URL has no usable host or port: {0}")]
    MissingAuthority(String),
}

/// Scheme + host + port of a request target.
///
/// Used as the partition key of the cookie jar: cookies stored under one
/// origin are never visible to requests against another.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
    port: u16,
}

impl Origin {
    /// Derives the origin of a parsed URL.
    ///
    /// Fails for URLs without a host (e.g. `data:`) or without a known
    /// default port for their scheme.
    pub fn from_url(url: &Url) -> Result<Self, OriginError> {
        let host = url
            .host_str()
            .ok_or_else(|| OriginError::MissingAuthority(url.to_string()))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| OriginError::MissingAuthority(url.to_string()))?;

        Ok(Self {
            scheme: url.scheme().to_string(),
            host: host.to_string(),
            port,
        })
    }

    /// Parses a URL string and derives its origin.
    pub fn parse(input: &str) -> Result<Self, OriginError> {
        Self::from_url(&Url::parse(input)?)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme, self.host, self.port)
    }
}
