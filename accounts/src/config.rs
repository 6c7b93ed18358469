use accounts_core::Route;
use clap::Parser;
use std::path::PathBuf;

/// A TUI for creating and logging into accounts
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Base URL of the account API, e.g. `https://accounts.example.com/api`
    #[clap(long, env = "BACKEND_URL")]
    pub backend_url: accounts_core::Config,

    /// Where should we write logs?
    #[clap(long, env)]
    data_dir: Option<PathBuf>,

    /// Which page to start on
    #[clap(long, default_value = "/", value_parser = route_parser)]
    pub route: Route,
}

fn route_parser(s: &str) -> Result<Route, String> {
    Route::from_path(s).ok_or_else(|| {
        let known: Vec<&str> = Route::NAV.iter().map(|route| route.path()).collect();
        format!("unknown route `{s}` (expected one of {})", known.join(", "))
    })
}

impl Config {
    /// Get either the configured or a default data directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("com", "example", "accounts")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
