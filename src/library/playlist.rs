//! User playlists: ordered, duplicate-free lists of song ids.
//!
//! A playlist never owns song data. It keeps the order songs should be shown
//! in plus a membership set for constant-time duplicate checks; both always
//! hold the same ids.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use super::catalog::Catalog;
use crate::domain::{Song, SongId};

/// Unique playlist identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaylistId(Uuid);

impl PlaylistId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PlaylistId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered, duplicate-free list of songs
#[derive(Debug, Clone)]
pub struct Playlist {
    id: PlaylistId,
    name: String,
    order: Vec<SongId>,
    members: HashSet<SongId>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PlaylistId::new(),
            name: name.into(),
            order: Vec::new(),
            members: HashSet::new(),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn id(&self) -> PlaylistId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Append a song to the end of the playlist.
    ///
    /// Accepts the result of a catalog lookup directly, so a missing song
    /// is rejected the same way as one that is already listed.
    pub fn add<'a>(&mut self, song: impl Into<Option<&'a Song>>) -> bool {
        let song: Option<&Song> = song.into();
        let Some(song) = song else {
            debug!(playlist = %self.name, "No song given, nothing added");
            return false;
        };

        let id = song.id();
        if !self.members.insert(id.clone()) {
            debug!(playlist = %self.name, song = %id, "Song already in playlist");
            return false;
        }

        debug!(playlist = %self.name, song = %id, "Song added to playlist");
        self.order.push(id);
        self.touch();
        true
    }

    /// Remove a song from the playlist
    pub fn remove(&mut self, id: &SongId) -> bool {
        if !self.members.remove(id) {
            return false;
        }

        // At most one entry, since ids are never listed twice
        if let Some(pos) = self.order.iter().position(|listed| listed == id) {
            self.order.remove(pos);
        }
        debug!(playlist = %self.name, song = %id, "Song removed from playlist");
        self.touch();
        true
    }

    /// Replace the playlist order.
    ///
    /// Keeps the ids of `new_order` that are already in the playlist, in the
    /// given order. Ids that are not members are ignored, repeats keep their
    /// first position, and members missing from `new_order` leave the playlist.
    pub fn reorder(&mut self, new_order: impl IntoIterator<Item = SongId>) {
        let mut kept = HashSet::with_capacity(self.members.len());
        let order: Vec<SongId> = new_order
            .into_iter()
            .filter(|id| self.members.contains(id) && kept.insert(id.clone()))
            .collect();

        let dropped = self.members.len() - kept.len();
        if dropped > 0 {
            warn!(
                playlist = %self.name,
                dropped,
                "Songs missing from the new order were dropped from the playlist"
            );
        }

        self.order = order;
        self.members = kept;
        self.touch();
    }

    /// Current order as 1-based `(position, id)` pairs
    pub fn display(&self) -> Vec<(usize, &SongId)> {
        self.order
            .iter()
            .enumerate()
            .map(|(index, id)| (index + 1, id))
            .collect()
    }

    /// Like [`Playlist::display`], with each id looked up in `catalog`.
    ///
    /// Ids the catalog does not know resolve to `None`.
    pub fn resolve<'c>(&self, catalog: &'c Catalog) -> Vec<(usize, Option<&'c Song>)> {
        self.display()
            .into_iter()
            .map(|(position, id)| {
                let song = catalog.get(id);
                if song.is_none() {
                    warn!(playlist = %self.name, song = %id, "Playlist entry not found in catalog");
                }
                (position, song)
            })
            .collect()
    }

    pub fn contains(&self, id: &SongId) -> bool {
        self.members.contains(id)
    }

    /// Song ids in playlist order
    pub fn ids(&self) -> impl Iterator<Item = &SongId> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}
