use super::Action;
use accounts_core::api::{self, login, register, Client, Response};

/// Tags one form submission so its response can find the form that sent it.
/// A form that was left and recreated never matches an older id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionId(pub u64);

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// Register a new account on the server
    Register(SubmissionId, Client, register::Req),

    /// Log in to an existing account.
    LogIn(SubmissionId, Client, login::Req),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle. Failures come back inside
    /// the action so the form that started the request can finish up.
    pub async fn run(self) -> Action {
        match self {
            Self::Register(id, client, req) => {
                tracing::info!(?id, "registering");

                let result = register(&client, &req).await;
                log_outcome("register", &result);

                Action::Registered(id, result)
            }

            Self::LogIn(id, client, req) => {
                tracing::info!(?id, "logging in");

                let result = login(&client, &req).await;
                log_outcome("login", &result);

                Action::LoggedIn(id, result)
            }
        }
    }
}

/// The only place request outcomes end up: the user sees the form reset
/// either way.
fn log_outcome(what: &str, result: &api::Result<Response>) {
    match result {
        Ok(resp) => tracing::info!(what, status = %resp.status, body = %resp.text(), "request succeeded"),
        Err(problem) => tracing::warn!(what, ?problem, "request failed"),
    }
}
