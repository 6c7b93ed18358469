use super::error::{Error, Result};
use crate::Config;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use std::borrow::Cow;

/// Client for the REST API. Every operation issues exactly one request
/// against the configured base URL.
#[derive(Debug, Clone)]
pub struct Client {
    /// Where the API lives.
    config: Config,

    /// Shared HTTP connection pool.
    http: reqwest::Client,
}

impl Client {
    /// Construct a new client. `reqwest::Client` is cheap to clone, so pass
    /// the same one around to share connections.
    pub fn new(config: Config, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `GET {route}`
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self, route: &str) -> Result<Response> {
        let url = self.config.url(route)?;

        Self::handle_response(self.http.get(url)).await
    }

    /// `GET {route}/{id}`
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, route: &str, id: i64) -> Result<Response> {
        let url = self.config.url(&with_id(route, id))?;

        Self::handle_response(self.http.get(url)).await
    }

    /// `POST {route}` with a JSON body
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create<P>(&self, route: &str, payload: &P) -> Result<Response>
    where
        P: Serialize + ?Sized,
    {
        let url = self.config.url(route)?;

        Self::handle_response(self.http.post(url).json(payload)).await
    }

    /// `PUT {route}/{id}` with a JSON body
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update<P>(&self, route: &str, id: i64, payload: &P) -> Result<Response>
    where
        P: Serialize + ?Sized,
    {
        let url = self.config.url(&with_id(route, id))?;

        Self::handle_response(self.http.put(url).json(payload)).await
    }

    /// `DELETE {route}/{id}`
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, route: &str, id: i64) -> Result<Response> {
        let url = self.config.url(&with_id(route, id))?;

        Self::handle_response(self.http.delete(url)).await
    }

    /// Send a request and sort the response into success or failure without
    /// looking at the body.
    ///
    /// ## Errors
    ///
    /// - `Ok(..)` if the server returned a success (2xx)
    /// - `Error::Http` if the request could not be sent or the body could not
    ///   be read
    /// - `Error::Status` for any other status
    async fn handle_response(req: reqwest::RequestBuilder) -> Result<Response> {
        let resp = req.send().await?;

        let status = resp.status();
        let body = resp.bytes().await?.to_vec();

        tracing::debug!(%status, len = body.len(), "got response");

        if status.is_success() {
            Ok(Response { status, body })
        } else {
            Err(Error::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            })
        }
    }
}

fn with_id(route: &str, id: i64) -> String {
    format!("{}/{id}", route.trim_end_matches('/'))
}

/// A successful response, as the server sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Always a 2xx.
    pub status: StatusCode,

    /// The raw body. May be empty.
    pub body: Vec<u8>,
}

impl Response {
    /// Decode the body as JSON. An empty body decodes as `null`.
    ///
    /// ## Errors
    ///
    /// `Error::Json` if the body isn't JSON of the requested shape.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let body: &[u8] = if self.body.is_empty() {
            b"null"
        } else {
            &self.body
        };

        Ok(serde_json::from_slice(body)?)
    }

    /// The body as text, for logging.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
