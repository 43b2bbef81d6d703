use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a favorite points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteKind {
    User,
    Repo,
}

impl FavoriteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteKind::User => "user",
            FavoriteKind::Repo => "repo",
        }
    }

    /// Guess the kind from the identifier shape: `owner/name` is a repository.
    pub fn infer(id: &str) -> Self {
        if id.contains('/') {
            FavoriteKind::Repo
        } else {
            FavoriteKind::User
        }
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FavoriteKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "user" => Ok(FavoriteKind::User),
            "repo" => Ok(FavoriteKind::Repo),
            other => Err(format!("unknown favorite kind: {}", other)),
        }
    }
}

/// A pinned user login or repository full name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Favorite {
    pub kind: FavoriteKind,
    pub id: String,
}

impl Favorite {
    pub fn new(kind: FavoriteKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }

    pub fn user(login: impl Into<String>) -> Self {
        Self::new(FavoriteKind::User, login)
    }

    pub fn repo(full_name: impl Into<String>) -> Self {
        Self::new(FavoriteKind::Repo, full_name)
    }
}

impl fmt::Display for Favorite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

// Older saves hold bare strings; accept both shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredFavorite {
    Tagged { kind: FavoriteKind, id: String },
    Bare(String),
}

impl<'de> Deserialize<'de> for Favorite {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match StoredFavorite::deserialize(deserializer)? {
            StoredFavorite::Tagged { kind, id } => Favorite { kind, id },
            StoredFavorite::Bare(id) => Favorite { kind: FavoriteKind::infer(&id), id },
        })
    }
}

/// Rate limit state reported by the last API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitState {
    pub remaining: u32,
    pub limit: u32,
    pub reset_time: Option<DateTime<Utc>>,
    pub is_limited: bool,
}

impl Default for RateLimitState {
    fn default() -> Self {
        // Anonymous quota
        Self {
            remaining: 60,
            limit: 60,
            reset_time: None,
            is_limited: false,
        }
    }
}

/// Where the controller is in a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Loading,
    Success,
    NotFound,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_strings_infer_kind() {
        let favs: Vec<Favorite> =
            serde_json::from_str(r#"["torvalds", "octocat/Hello-World"]"#).unwrap();
        assert_eq!(favs, vec![Favorite::user("torvalds"), Favorite::repo("octocat/Hello-World")]);
    }

    #[test]
    fn tagged_entries_round_trip() {
        let fav = Favorite::user("weird/login");
        let json = serde_json::to_string(&fav).unwrap();
        assert_eq!(json, r#"{"kind":"user","id":"weird/login"}"#);
        let back: Favorite = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, FavoriteKind::User);
    }

    #[test]
    fn kind_parses_from_cli_words() {
        assert_eq!("repo".parse::<FavoriteKind>().unwrap(), FavoriteKind::Repo);
        assert!("org".parse::<FavoriteKind>().is_err());
    }
}
