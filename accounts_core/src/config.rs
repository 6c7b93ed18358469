use core::str::FromStr;
use thiserror::Error;
use url::Url;

/// Where the account API lives. Build this once at startup and hand it to
/// `api::Client`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL for every request. May include a path prefix (e.g.
    /// `https://example.com/api`), which is kept when joining routes.
    base_url: Url,
}

impl Config {
    /// Parse and check a base URL.
    ///
    /// ## Errors
    ///
    /// - `Error::Url` if `base_url` is not a valid absolute URL
    /// - `Error::Scheme` if it is not `http` or `https`
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url.trim())?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Scheme(base_url.scheme().to_string()));
        }

        Ok(Self { base_url })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join a route (like `/auth/login`) onto the base URL.
    ///
    /// ## Errors
    ///
    /// Fails if the result is not a valid URL.
    pub fn url(&self, route: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            route.trim_start_matches('/'),
        ))
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Problems with a configured base URL
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    /// The base URL used something other than HTTP(S).
    #[error("base URL must use http or https, not `{0}`")]
    Scheme(String),
}
