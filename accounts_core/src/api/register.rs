use super::{error::Result, Client, Response};
use crate::{Field, FormValues};
use serde::{Deserialize, Serialize};

/// The request to register a new account.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Req {
    /// Email to use for contact and login.
    pub email: String,

    /// Plaintext password to use for login.
    pub password: String,

    /// What the account holder wants to be called.
    pub first_name: String,
}

impl From<&FormValues> for Req {
    fn from(values: &FormValues) -> Self {
        Self {
            email: values.get(Field::Email).to_string(),
            password: values.get(Field::Password).to_string(),
            first_name: values.get(Field::FirstName).to_string(),
        }
    }
}

/// Where the register endpoint lives.
pub const PATH: &str = "/auth/register";

/// Register with the server.
///
/// ## Errors
///
/// Errors are the same as `Client::create`.
#[tracing::instrument(skip(client, req), fields(email = %req.email))]
pub async fn register(client: &Client, req: &Req) -> Result<Response> {
    client.create(PATH, req).await
}
