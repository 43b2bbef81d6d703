use crate::error::Result;
use crate::models::{Favorite, FavoriteKind};
use crate::storage::KeyValueStore;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Storage key the list lives under.
pub const FAVORITES_KEY: &str = "githubFavorites";

/// Ordered, duplicate-free list of favorites kept in a [`KeyValueStore`].
///
/// Reads fail open: unreadable or malformed data is treated as an empty
/// list. Every successful write is published on a watch channel; the
/// controller paints the favorites pane from its subscription.
pub struct FavoritesStore<S> {
    storage: S,
    changes: watch::Sender<Vec<Favorite>>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        let (changes, _) = watch::channel(Vec::new());
        let store = Self { storage, changes };
        let initial = store.list();
        store.changes.send_replace(initial);
        store
    }

    pub fn list(&self) -> Vec<Favorite> {
        let raw = match self.storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Favorites storage unavailable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Favorite>>(&raw) {
            Ok(favorites) => dedup(favorites),
            Err(e) => {
                warn!(error = %e, "Stored favorites are malformed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored list. Duplicates are dropped, first one wins.
    pub fn save(&mut self, favorites: Vec<Favorite>) -> Result<()> {
        let favorites = dedup(favorites);
        let json = serde_json::to_string(&favorites)?;
        self.storage.set(FAVORITES_KEY, &json)?;

        debug!(count = favorites.len(), "Favorites saved");
        self.changes.send_replace(favorites);
        Ok(())
    }

    pub fn contains(&self, kind: FavoriteKind, id: &str) -> bool {
        self.list().iter().any(|f| f.kind == kind && f.id == id)
    }

    /// Remove the entry if present, else append it. Returns the new membership.
    pub fn toggle(&mut self, kind: FavoriteKind, id: &str) -> Result<bool> {
        let mut favorites = self.list();
        let before = favorites.len();
        favorites.retain(|f| !(f.kind == kind && f.id == id));

        let now_favorite = favorites.len() == before;
        if now_favorite {
            favorites.push(Favorite::new(kind, id));
        }

        self.save(favorites)?;
        Ok(now_favorite)
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, kind: FavoriteKind, id: &str) -> Result<bool> {
        let mut favorites = self.list();
        let before = favorites.len();
        favorites.retain(|f| !(f.kind == kind && f.id == id));
        if favorites.len() == before {
            return Ok(false);
        }
        self.save(favorites)?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.save(Vec::new())
    }

    /// Receiver holding the last saved list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Favorite>> {
        self.changes.subscribe()
    }
}

fn dedup(favorites: Vec<Favorite>) -> Vec<Favorite> {
    let mut out: Vec<Favorite> = Vec::with_capacity(favorites.len());
    for favorite in favorites {
        if !out.contains(&favorite) {
            out.push(favorite);
        }
    }
    out
}
