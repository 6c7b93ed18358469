use accounts_core::api::{self, Response};
use super::effect::SubmissionId;
use crossterm::event::KeyEvent;

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// Something bad happened; display it to the user
    Problem(String),

    /// The server answered a registration
    Registered(SubmissionId, api::Result<Response>),

    /// The server answered a login
    LoggedIn(SubmissionId, api::Result<Response>),
}
