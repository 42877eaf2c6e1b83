//! A user's set of playlists.

use tracing::debug;

use super::playlist::{Playlist, PlaylistId};

/// Any number of playlists, kept in creation order.
///
/// Names are labels only; two playlists may share one.
#[derive(Debug, Clone, Default)]
pub struct Playlists {
    playlists: Vec<Playlist>,
}

impl Playlists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty playlist and return its id
    pub fn create(&mut self, name: impl Into<String>) -> PlaylistId {
        let playlist = Playlist::new(name);
        let id = playlist.id();
        debug!(playlist = %playlist.name(), %id, "Playlist created");
        self.playlists.push(playlist);
        id
    }

    pub fn get(&self, id: PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: PlaylistId) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| p.id() == id)
    }

    /// First playlist with this name, in creation order
    pub fn find_by_name(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name() == name)
    }

    /// Delete a playlist, returning it
    pub fn delete(&mut self, id: PlaylistId) -> Option<Playlist> {
        let pos = self.playlists.iter().position(|p| p.id() == id)?;
        let playlist = self.playlists.remove(pos);
        debug!(playlist = %playlist.name(), %id, "Playlist deleted");
        Some(playlist)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.iter()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}
