//! Favorite storage
//!
//! Favorites are held in process memory. Reads see a consistent snapshot
//! and id assignment is serialized under the same write lock.

use parking_lot::RwLock;
use tracing::debug;

use crate::Result;
use crate::error::FavoritesError;
use crate::models::Favorite;

/// Storage operations for favorites
pub trait FavoriteStore: Send + Sync {
    /// All favorites in insertion order
    fn find_all(&self) -> Vec<Favorite>;

    /// The favorite stored under `id`, or `NotFound`
    fn find_by_id(&self, id: u64) -> Result<Favorite>;

    /// Insert or overwrite a favorite.
    ///
    /// A favorite without an id gets a fresh one; `favorite.id` is updated
    /// in place and a copy of the stored record is returned.
    fn save(&self, favorite: &mut Favorite) -> Result<Favorite>;
}

#[derive(Debug)]
struct Records {
    favorites: Vec<Favorite>,
    next_id: u64,
}

/// List-backed in-memory store
#[derive(Debug)]
pub struct InMemoryFavoriteStore {
    records: RwLock<Records>,
}

impl Default for InMemoryFavoriteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFavoriteStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Records {
                favorites: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored favorites
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().favorites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FavoriteStore for InMemoryFavoriteStore {
    fn find_all(&self) -> Vec<Favorite> {
        self.records.read().favorites.clone()
    }

    fn find_by_id(&self, id: u64) -> Result<Favorite> {
        self.records
            .read()
            .favorites
            .iter()
            .find(|f| f.id == Some(id))
            .cloned()
            .ok_or_else(|| FavoritesError::not_found(id))
    }

    fn save(&self, favorite: &mut Favorite) -> Result<Favorite> {
        let mut records = self.records.write();

        match favorite.id {
            None => {
                let id = records.next_id;
                records.next_id = id
                    .checked_add(1)
                    .ok_or_else(|| FavoritesError::validation("favorite id space exhausted"))?;
                favorite.set_id(id);
                records.favorites.push(favorite.clone());
                debug!("Stored new favorite {} for '{}'", id, favorite.place_id);
            }
            Some(id) => {
                if let Some(existing) = records.favorites.iter_mut().find(|f| f.id == Some(id)) {
                    *existing = favorite.clone();
                    debug!("Updated favorite {}", id);
                } else {
                    // keep generated ids clear of explicitly chosen ones
                    if id >= records.next_id {
                        records.next_id = id.saturating_add(1);
                    }
                    records.favorites.push(favorite.clone());
                    debug!("Stored favorite with caller-supplied id {}", id);
                }
            }
        }

        Ok(favorite.clone())
    }
}
