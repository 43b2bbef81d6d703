use crate::config::{
    default_favorites_path, AppConfig, ClientConfig, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_USER_AGENT,
};
use crate::models::FavoriteKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "github-explorer")]
#[command(about = "GitHub Explorer - Search users, browse their repositories, and keep favorites")]
#[command(version)]
pub struct Cli {
    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// User-Agent sent with every request
    #[arg(long, env = "GITHUB_USER_AGENT", default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Personal access token; raises the rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// File holding saved favorites
    #[arg(long, env = "EXPLORER_FAVORITES_PATH", global = true)]
    pub favorites_path: Option<PathBuf>,

    /// Write the rendered page here after every action
    #[arg(long, env = "EXPLORER_HTML_OUT", global = true)]
    pub html_out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Look up a user and list their repositories
    Search {
        /// GitHub username to search for
        username: String,
    },

    /// Manage saved favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// Read searches from stdin, one per line
    Interactive,
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// Show saved favorites
    List,

    /// Add the entry, or remove it if already saved
    Toggle {
        /// `user` or `repo`
        kind: FavoriteKind,
        /// Login or `owner/name`
        id: String,
    },

    /// Remove a saved entry
    Remove {
        kind: FavoriteKind,
        id: String,
    },

    /// Remove every saved entry
    Clear,
}

impl Cli {
    pub fn app_config(&self) -> AppConfig {
        let client = ClientConfig {
            base_url: self.api_url.clone(),
            user_agent: self.user_agent.clone(),
            token: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
        .with_token(self.token.clone());

        AppConfig {
            client,
            favorites_path: self.favorites_path.clone().unwrap_or_else(default_favorites_path),
            html_out: self.html_out.clone(),
        }
    }
}
