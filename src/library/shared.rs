//! Thread-safe handles for embedding the library in a concurrent host.
//!
//! Each catalog and each playlist gets its own lock; nothing here ever holds
//! two locks at once. The guarded values are consistent after every
//! operation, so a poisoned lock is recovered rather than propagated.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::catalog::Catalog;
use super::playlist::Playlist;
use crate::domain::{Song, SongId};

/// Cloneable handle to a catalog behind a read-write lock
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Check-then-insert under a single write lock
    pub fn insert(&self, song: Song) -> bool {
        self.write().insert(song)
    }

    pub fn remove(&self, id: &SongId) -> Option<Song> {
        self.write().remove(id)
    }

    pub fn get(&self, id: &SongId) -> Option<Song> {
        self.read().get(id).cloned()
    }

    pub fn by_artist(&self, artist: &str) -> Vec<Song> {
        self.read().by_artist(artist).into_iter().cloned().collect()
    }

    pub fn by_album(&self, album: &str) -> Vec<Song> {
        self.read().by_album(album).into_iter().cloned().collect()
    }

    pub fn by_genre(&self, genre: &str) -> Vec<Song> {
        self.read().by_genre(genre).into_iter().cloned().collect()
    }

    pub fn by_title(&self, title: &str) -> Vec<Song> {
        self.read().by_title(title).into_iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Run `f` with shared access to the catalog
    pub fn with<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R {
        f(&*self.read())
    }

    fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cloneable handle to a playlist behind a mutex
#[derive(Debug, Clone)]
pub struct SharedPlaylist {
    inner: Arc<Mutex<Playlist>>,
}

impl SharedPlaylist {
    pub fn new(playlist: Playlist) -> Self {
        Self {
            inner: Arc::new(Mutex::new(playlist)),
        }
    }

    pub fn add(&self, song: Option<&Song>) -> bool {
        self.lock().add(song)
    }

    pub fn remove(&self, id: &SongId) -> bool {
        self.lock().remove(id)
    }

    pub fn reorder(&self, new_order: impl IntoIterator<Item = SongId>) {
        self.lock().reorder(new_order)
    }

    /// Owned snapshot of the current 1-based order
    pub fn display(&self) -> Vec<(usize, SongId)> {
        self.lock()
            .display()
            .into_iter()
            .map(|(position, id)| (position, id.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run `f` with exclusive access to the playlist
    pub fn with<R>(&self, f: impl FnOnce(&mut Playlist) -> R) -> R {
        f(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Playlist> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
