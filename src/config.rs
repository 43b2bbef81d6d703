use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = concat!("github-explorer/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How requests to the GitHub API are made.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Personal access token. Raises the rate limit ceiling when set.
    pub token: Option<String>,
    /// Upper bound for a single request, connect to last byte.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        // Empty env vars count as unset
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub favorites_path: PathBuf,
    /// Where to write the rendered page after each action.
    pub html_out: Option<PathBuf>,
}

/// `<data dir>/github-explorer/favorites.json`, or `./favorites.json` when
/// the platform has no data directory.
pub fn default_favorites_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("github-explorer").join("favorites.json"),
        None => PathBuf::from("favorites.json"),
    }
}
