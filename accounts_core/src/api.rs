/// Things that can go wrong in the API
pub mod error;
pub use error::{Error, Result};

/// A thin client for the REST API
pub mod client;
pub use client::{Client, Response};

/// Register a new account
pub mod register;
pub use register::register;

/// Log into an existing account
pub mod login;
pub use login::login;
