use crate::error::{DirectoryError, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_DIRECTORY_URL: &str =
    "https://www.utdallas.edu/directory/includes/directories.class.php";
pub const DEFAULT_REVEAL_URL: &str = "https://www.utdallas.edu/directory/includes/email.php";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.0.0 Safari/537.36";

/// Endpoints and transport settings for [`DirectoryClient`](crate::DirectoryClient).
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Search endpoint, queried with `dirType` and `dirSearch`.
    pub directory_url: String,
    /// Email reveal endpoint, queried with `f`.
    pub reveal_url: String,
    pub user_agent: String,
    /// Per-request timeout. `None` (the default) sets none; callers opt in.
    pub timeout: Option<Duration>,
    /// When false, listings are returned without following the reveal link.
    pub resolve_email: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            reveal_url: DEFAULT_REVEAL_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            resolve_email: true,
        }
    }
}

impl DirectoryConfig {
    /// Defaults overridden by `UTD_*` variables, read after loading `.env`
    /// from the working directory if there is one.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("UTD_DIRECTORY_URL") {
            config.directory_url = url;
        }
        if let Some(url) = lookup("UTD_REVEAL_URL") {
            config.reveal_url = url;
        }
        if let Some(agent) = lookup("UTD_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(secs) = lookup("UTD_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                DirectoryError::Config(format!("UTD_TIMEOUT_SECS must be a whole number, got '{}'", secs))
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(flag) = lookup("UTD_RESOLVE_EMAIL") {
            config.resolve_email = parse_flag(&flag).ok_or_else(|| {
                DirectoryError::Config(format!("UTD_RESOLVE_EMAIL must be true or false, got '{}'", flag))
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
