use serde::{Deserialize, Serialize};

// GitHub API response structures

/// Body of `GET /search/users`.
#[derive(Debug, Deserialize)]
pub struct UserSearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<UserSearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSearchItem {
    pub login: String,
    pub id: u64,
    /// API URL of the full profile.
    pub url: String,
}

/// Full user profile from `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: u64,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    #[serde(default)]
    pub public_repos: u32,
}

impl GitHubUser {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.login)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    pub language: Option<String>,
    pub updated_at: Option<String>,
}
