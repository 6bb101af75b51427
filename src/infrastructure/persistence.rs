use crate::domain::{FavoriteSet, PersistenceError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default slot name for the persisted favorites.
pub const DEFAULT_FAVORITES_FILE: &str = "rickAndMortyFavorites.json";

/// Durable storage for the favorite set.
pub trait FavoriteStore: Send {
    /// Reads the persisted favorites. An absent slot is an empty set.
    fn load(&self) -> Result<FavoriteSet, PersistenceError>;

    /// Overwrites the slot with the full set.
    fn save(&mut self, favorites: &FavoriteSet) -> Result<(), PersistenceError>;
}

/// Keeps the favorite ids as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct FileFavoriteStore {
    path: PathBuf,
}

impl FileFavoriteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoriteStore for FileFavoriteStore {
    fn load(&self) -> Result<FavoriteSet, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FavoriteSet::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(FavoriteSet::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&mut self, favorites: &FavoriteSet) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(favorites)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
