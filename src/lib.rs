pub mod cli;
pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod favorites;
pub mod github;
pub mod models;
pub mod page;
pub mod render;
pub mod storage;
pub mod types;

pub use controller::{Controller, RepoFetch, RepoLoad, SearchHit};
pub use error::{ExplorerError, Result};
pub use favorites::FavoritesStore;
pub use github::{GitHubApi, GitHubClient};
