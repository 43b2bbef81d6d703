//! Headless model of the explorer page.
//!
//! The page is a set of regions with visibility flags. Regions hold the data
//! they were last painted with; their HTML is produced on demand by the
//! fragment builders in [`crate::render`].

use crate::models::{Favorite, FavoriteKind};
use crate::render;
use crate::types::{GitHubRepo, GitHubUser};

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileCard {
    Empty,
    User { user: GitHubUser, favorited: bool },
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepoRow {
    pub repo: GitHubRepo,
    pub favorited: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RepoList {
    Empty,
    Rows(Vec<RepoRow>),
    NoRepositories,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub user_results_hidden: bool,
    pub repo_section_hidden: bool,
    pub spinner_hidden: bool,
    pub profile: ProfileCard,
    pub repos: RepoList,
    pub favorites: Vec<Favorite>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            user_results_hidden: true,
            repo_section_hidden: true,
            spinner_hidden: true,
            profile: ProfileCard::Empty,
            repos: RepoList::Empty,
            favorites: Vec::new(),
        }
    }
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        !self.spinner_hidden
    }

    /// Text of the error currently shown in the profile region, if any.
    pub fn error_text(&self) -> Option<&str> {
        match &self.profile {
            ProfileCard::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Update the label and style of every control targeting `(kind, id)` in
    /// the profile and repository regions. Nothing else is repainted.
    pub fn set_control_state(&mut self, kind: FavoriteKind, id: &str, favorited: bool) {
        match kind {
            FavoriteKind::User => {
                if let ProfileCard::User { user, favorited: state } = &mut self.profile {
                    if user.login == id {
                        *state = favorited;
                    }
                }
            }
            FavoriteKind::Repo => {
                if let RepoList::Rows(rows) = &mut self.repos {
                    for row in rows.iter_mut().filter(|r| r.repo.full_name == id) {
                        row.favorited = favorited;
                    }
                }
            }
        }
    }

    pub fn profile_card_html(&self) -> String {
        match &self.profile {
            ProfileCard::Empty => String::new(),
            ProfileCard::User { user, favorited } => render::user_profile_html(user, *favorited),
            ProfileCard::Error(message) => render::error_html(message),
        }
    }

    pub fn repo_list_html(&self) -> String {
        match &self.repos {
            RepoList::Empty => String::new(),
            RepoList::Rows(rows) => rows
                .iter()
                .map(|row| render::repository_row_html(&row.repo, row.favorited))
                .collect(),
            RepoList::NoRepositories => render::NO_REPOSITORIES_HTML.to_string(),
            RepoList::Error(message) => render::repository_error_html(message),
        }
    }

    pub fn favorites_list_html(&self) -> String {
        render::favorites_list_html(&self.favorites)
    }

    /// Full standalone document for the current state.
    pub fn to_html(&self) -> String {
        render::document_html(self)
    }
}

/// A click on a generated control, decoded from its data attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ToggleFavorite { kind: FavoriteKind, id: String },
    RemoveFavorite { kind: FavoriteKind, id: String },
}

impl UiEvent {
    /// Decode `data-action`, `data-kind` and `data-id`. Returns `None` for
    /// clicks that did not land on a favorites control.
    pub fn from_attributes<'a, I>(attributes: I) -> Option<UiEvent>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut action = None;
        let mut kind = None;
        let mut id = None;
        for (name, value) in attributes {
            match name {
                "data-action" => action = Some(value),
                "data-kind" => kind = value.parse::<FavoriteKind>().ok(),
                "data-id" => id = Some(value.to_string()),
                _ => {}
            }
        }

        let id = id.filter(|id| !id.is_empty())?;
        let kind = kind.unwrap_or_else(|| FavoriteKind::infer(&id));
        match action? {
            "toggle" => Some(UiEvent::ToggleFavorite { kind, id }),
            "remove" => Some(UiEvent::RemoveFavorite { kind, id }),
            _ => None,
        }
    }
}
