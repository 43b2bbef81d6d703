use crate::error::{ErrorKind, ExplorerError, Result, EMPTY_USERNAME_MESSAGE};
use crate::favorites::FavoritesStore;
use crate::github::GitHubApi;
use crate::models::{Favorite, FavoriteKind, SearchState};
use crate::page::{Page, UiEvent};
use crate::render;
use crate::storage::KeyValueStore;
use crate::types::{GitHubRepo, GitHubUser};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Pending repository fetch for a resolved user.
///
/// Tagged with the search generation that produced it; results for an
/// older generation are dropped instead of painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFetch {
    pub generation: u64,
    pub login: String,
}

#[derive(Debug, Clone)]
pub struct SearchHit {
    pub user: GitHubUser,
    pub fetch: RepoFetch,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RepoLoad {
    Loaded(Vec<GitHubRepo>),
    Failed(String),
    /// A newer search started before this fetch completed.
    Stale,
}

/// Drives the search, repository and favorites workflow against one page.
pub struct Controller<A, S> {
    api: A,
    favorites: FavoritesStore<S>,
    favorites_view: watch::Receiver<Vec<Favorite>>,
    page: Page,
    state: SearchState,
    generation: u64,
}

impl<A: GitHubApi, S: KeyValueStore> Controller<A, S> {
    pub fn new(api: A, favorites: FavoritesStore<S>) -> Self {
        let favorites_view = favorites.subscribe();
        Self {
            api,
            favorites,
            favorites_view,
            page: Page::new(),
            state: SearchState::Idle,
            generation: 0,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    /// Paint the favorites list, as on first page load.
    pub fn on_page_load(&mut self) {
        self.repaint_favorites();
    }

    /// Resolve `input` to a user and paint the profile. Failures are painted
    /// into the page before being returned. The repository list is fetched
    /// separately through [`Controller::load_repositories`].
    pub async fn search(&mut self, input: &str) -> Result<SearchHit> {
        self.generation += 1;
        let generation = self.generation;

        let username = input.trim();
        if username.is_empty() {
            self.state = SearchState::Error;
            render::render_error(&mut self.page, EMPTY_USERNAME_MESSAGE);
            return Err(ExplorerError::Validation(EMPTY_USERNAME_MESSAGE.to_string()));
        }

        self.state = SearchState::Loading;
        render::set_loading(&mut self.page, true);
        debug!(username, generation, "Searching user");

        let result = self.api.search_user(username).await;

        let outcome = match result {
            Ok(user) => {
                info!(login = %user.login, generation, "User found");
                self.state = SearchState::Success;
                let favorites = self.favorites.list();
                render::render_user_profile(&mut self.page, &user, &favorites);
                let fetch = RepoFetch {
                    generation,
                    login: user.login.clone(),
                };
                Ok(SearchHit { user, fetch })
            }
            Err(e) => {
                self.state = if e.kind() == ErrorKind::NotFound {
                    info!(username, "No user matched");
                    SearchState::NotFound
                } else {
                    error!(username, error = %e, "User search failed");
                    SearchState::Error
                };
                render::render_error(&mut self.page, &e.user_message());
                Err(e)
            }
        };

        render::set_loading(&mut self.page, false);
        outcome
    }

    /// Fetch and paint the repository list for a previous search. Failures
    /// only touch the repository section.
    pub async fn load_repositories(&mut self, fetch: &RepoFetch) -> RepoLoad {
        let result = self.api.list_repositories(&fetch.login).await;

        if fetch.generation != self.generation {
            debug!(
                login = %fetch.login,
                generation = fetch.generation,
                current = self.generation,
                "Discarding stale repository response"
            );
            return RepoLoad::Stale;
        }

        match result {
            Ok(repos) => {
                info!(login = %fetch.login, count = repos.len(), "Repositories loaded");
                let favorites = self.favorites.list();
                render::render_repository_list(&mut self.page, &repos, &favorites);
                RepoLoad::Loaded(repos)
            }
            Err(e) => {
                warn!(login = %fetch.login, error = %e, "Repository fetch failed");
                let message = match &e {
                    ExplorerError::ApiError(_) | ExplorerError::RateLimitExceeded(_) => {
                        format!("Failed to fetch repositories. {}", e)
                    }
                    _ => e.to_string(),
                };
                render::render_repository_error(&mut self.page, &message);
                RepoLoad::Failed(message)
            }
        }
    }

    /// Search, then load repositories for the match.
    pub async fn run_search(&mut self, input: &str) -> Result<(GitHubUser, RepoLoad)> {
        let hit = self.search(input).await?;
        let repos = self.load_repositories(&hit.fetch).await;
        Ok((hit.user, repos))
    }

    /// Single entry point for clicks on generated controls.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<bool> {
        match event {
            UiEvent::ToggleFavorite { kind, id } => self.toggle_favorite(kind, &id),
            UiEvent::RemoveFavorite { kind, id } => {
                self.remove_favorite(kind, &id).map(|_| false)
            }
        }
    }

    /// Flip membership of `(kind, id)`; returns the new membership.
    pub fn toggle_favorite(&mut self, kind: FavoriteKind, id: &str) -> Result<bool> {
        let favorited = self.favorites.toggle(kind, id)?;
        info!(%kind, id, favorited, "Favorite toggled");
        self.page.set_control_state(kind, id, favorited);
        self.repaint_favorites();
        Ok(favorited)
    }

    /// Returns whether the entry was present.
    pub fn remove_favorite(&mut self, kind: FavoriteKind, id: &str) -> Result<bool> {
        let removed = self.favorites.remove(kind, id)?;
        if removed {
            info!(%kind, id, "Favorite removed");
            self.page.set_control_state(kind, id, false);
        }
        self.repaint_favorites();
        Ok(removed)
    }

    pub fn clear_favorites(&mut self) -> Result<()> {
        let cleared = self.favorites.list();
        self.favorites.clear()?;
        info!(count = cleared.len(), "Favorites cleared");
        for favorite in &cleared {
            self.page.set_control_state(favorite.kind, &favorite.id, false);
        }
        self.repaint_favorites();
        Ok(())
    }

    pub fn list_favorites(&self) -> Vec<Favorite> {
        self.favorites.list()
    }

    /// Paint the last list the store published.
    fn repaint_favorites(&mut self) {
        let favorites = self.favorites_view.borrow_and_update().clone();
        render::render_favorites_list(&mut self.page, &favorites);
    }
}
