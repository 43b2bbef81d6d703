use thiserror::Error;

pub const EMPTY_USERNAME_MESSAGE: &str = "Please enter a GitHub username.";
pub const USER_NOT_FOUND_MESSAGE: &str = "GitHub user not found.";
pub const RATE_LIMIT_MESSAGE: &str =
    "API Rate Limit Exceeded. Please wait a few minutes or provide an Authentication Token.";

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    RateLimitExceeded(String),

    #[error("{0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Coarse classification used when deciding how a failure is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    RateLimit,
    Transport,
    StorageCorruption,
}

impl ExplorerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExplorerError::Validation(_) => ErrorKind::Validation,
            ExplorerError::NotFound(_) => ErrorKind::NotFound,
            ExplorerError::RateLimitExceeded(_) => ErrorKind::RateLimit,
            ExplorerError::StorageError(_) => ErrorKind::StorageCorruption,
            ExplorerError::ApiError(_)
            | ExplorerError::NetworkError(_)
            | ExplorerError::JsonError(_)
            | ExplorerError::IoError(_)
            | ExplorerError::InvalidUrl(_) => ErrorKind::Transport,
        }
    }

    /// Text shown in the top-level error region, without the `Error: ` prefix.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::NotFound => self.to_string(),
            _ => format!("GitHub API Error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
