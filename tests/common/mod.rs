#![allow(dead_code)]

use github_explorer::config::ClientConfig;
use github_explorer::storage::MemoryStore;
use github_explorer::{Controller, FavoritesStore, GitHubClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER_AGENT: &str = "github-explorer-tests";

/// Mock GitHub API plus helpers to build clients pointed at it.
pub struct TestContext {
    pub server: MockServer,
}

impl TestContext {
    pub async fn new() -> Self {
        TestContext {
            server: MockServer::start().await,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.server.uri(),
            user_agent: USER_AGENT.to_string(),
            token: None,
            ..ClientConfig::default()
        }
    }

    pub fn client(&self) -> GitHubClient {
        GitHubClient::new(self.config()).expect("Failed to create client")
    }

    pub fn controller(&self) -> Controller<GitHubClient, MemoryStore> {
        Controller::new(self.client(), FavoritesStore::new(MemoryStore::new()))
    }

    /// Search hit and profile for `login`.
    pub async fn mount_user(&self, login: &str) {
        Mock::given(method("GET"))
            .and(path("/search/users"))
            .and(query_param("q", login))
            .and(query_param("per_page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 1,
                "incomplete_results": false,
                "items": [{
                    "login": login,
                    "id": 1,
                    "url": format!("{}/users/{}", self.server.uri(), login),
                }]
            })))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("/users/{}", login)))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(login)))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_empty_search(&self, query: &str) {
        Mock::given(method("GET"))
            .and(path("/search/users"))
            .and(query_param("q", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 0,
                "incomplete_results": false,
                "items": []
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_repos(&self, login: &str, repos: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{}/repos", login)))
            .and(query_param("sort", "updated"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repos))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_repos_status(&self, login: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{}/repos", login)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_search_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/search/users"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "message": "API rate limit exceeded"
            })))
            .mount(&self.server)
            .await;
    }
}

pub fn user_json(login: &str) -> Value {
    json!({
        "login": login,
        "id": 1024025,
        "name": "Linus Torvalds",
        "avatar_url": format!("https://avatars.githubusercontent.com/{}", login),
        "html_url": format!("https://github.com/{}", login),
        "bio": null,
        "location": "Portland, OR",
        "followers": 230000,
        "following": 0,
        "public_repos": 2
    })
}

pub fn repo_json(full_name: &str, updated_at: &str) -> Value {
    let name = full_name.split('/').nth(1).unwrap_or(full_name);
    json!({
        "name": name,
        "full_name": full_name,
        "html_url": format!("https://github.com/{}", full_name),
        "description": null,
        "stargazers_count": 100,
        "language": "C",
        "updated_at": updated_at
    })
}
