//! Account creation and login, independent of how it gets drawn: form
//! values, validation rules, submission, and the HTTP API they talk to.

/// Talking to the account API.
pub mod api;

/// Where the API lives.
pub mod config;
pub use config::Config;

/// The inputs our forms have.
pub mod field;
pub use field::Field;

/// Form state and submission.
pub mod form;
pub use form::{FormState, Submission};

/// View models for the form pages.
pub mod pages;
pub use pages::{CreateAccountPage, LoginPage, Page};

/// Client-side routes.
pub mod routes;
pub use routes::Route;

/// Validation rules.
pub mod validation;
pub use validation::{Schema, ValidationErrors};

/// What's been typed into a form.
pub mod values;
pub use values::FormValues;
