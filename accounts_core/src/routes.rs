use core::fmt::{self, Display, Formatter};

/// Every page the app can show.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Route {
    /// Landing page
    #[default]
    Home,

    /// Register a new account
    CreateAccount,

    /// Log into an existing account
    Login,
}

impl Route {
    /// Routes in the order the header shows them.
    pub const NAV: &'static [Route] = &[Route::Home, Route::Login, Route::CreateAccount];

    /// The path this route is mounted at.
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::CreateAccount => "/auth/create-account",
            Self::Login => "/auth/login",
        }
    }

    /// Find the route for a path. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        Self::NAV.iter().copied().find(|route| route.path() == path)
    }

    /// What the header calls this route.
    pub fn nav_label(self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::CreateAccount => "create account",
            Self::Login => "login",
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.path())
    }
}
