use core::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};

/// A named string input in one of the account forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// The name the account holder wants to be called by.
    FirstName,

    /// Email to use for contact and login.
    Email,

    /// Plaintext password.
    Password,
}

impl Field {
    /// The name used for this field on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    /// Human-readable label to show next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "Your name",
            Self::Email => "Email Address",
            Self::Password => "Password",
        }
    }

    /// Hint to show in an empty input.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::FirstName => "Enter name",
            Self::Email => "Enter email",
            Self::Password => "Enter password",
        }
    }

    /// Whether the input should be masked when displayed.
    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
