use super::{error::Result, Client, Response};
use crate::{Field, FormValues};
use serde::{Deserialize, Serialize};

/// The request to log into the server.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Req {
    /// Email to use for contact and login.
    pub email: String,

    /// Plaintext password to use for login.
    pub password: String,
}

impl From<&FormValues> for Req {
    fn from(values: &FormValues) -> Self {
        Self {
            email: values.get(Field::Email).to_string(),
            password: values.get(Field::Password).to_string(),
        }
    }
}

/// Where the login endpoint lives.
pub const PATH: &str = "/auth/login";

/// Log into the server.
///
/// ## Errors
///
/// Errors are the same as `Client::create`.
#[tracing::instrument(skip(client, req), fields(email = %req.email))]
pub async fn login(client: &Client, req: &Req) -> Result<Response> {
    client.create(PATH, req).await
}
