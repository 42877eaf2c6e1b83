//! Catalog of all known songs.
//!
//! Songs are stored once under their `SongId`. Artist, album and genre
//! indexes map each attribute value to the ids sharing it, and are updated
//! in the same call that changes the primary store.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::domain::{Song, SongId};

/// Attribute value -> ids of songs carrying that value
#[derive(Debug, Clone, Default)]
struct AttributeIndex {
    buckets: HashMap<String, BTreeSet<SongId>>,
}

impl AttributeIndex {
    fn add(&mut self, key: &str, id: SongId) {
        self.buckets.entry(key.to_string()).or_default().insert(id);
    }

    /// Drops the bucket once its last id is gone
    fn remove(&mut self, key: &str, id: &SongId) {
        if let Some(bucket) = self.buckets.get_mut(key) {
            bucket.remove(id);
            if bucket.is_empty() {
                self.buckets.remove(key);
            }
        }
    }

    fn get(&self, key: &str) -> impl Iterator<Item = &SongId> {
        self.buckets.get(key).into_iter().flatten()
    }

    fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.buckets.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// De-duplicated song store with attribute lookups
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: BTreeMap<SongId, Song>,
    by_artist: AttributeIndex,
    by_album: AttributeIndex,
    by_genre: AttributeIndex,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a song to the catalog.
    ///
    /// Returns `false` without touching anything when a song with the same
    /// artist and title is already stored; the existing entry is kept.
    pub fn insert(&mut self, song: Song) -> bool {
        let id = song.id();
        if self.songs.contains_key(&id) {
            debug!(song = %id, "Song already in catalog, skipping");
            return false;
        }

        self.by_artist.add(song.artist(), id.clone());
        self.by_album.add(song.album(), id.clone());
        self.by_genre.add(song.genre(), id.clone());
        debug!(song = %id, "Song added to catalog");
        self.songs.insert(id, song);

        true
    }

    /// Insert every song, returning how many were new
    pub fn insert_all(&mut self, songs: impl IntoIterator<Item = Song>) -> usize {
        songs
            .into_iter()
            .map(|song| self.insert(song))
            .filter(|inserted| *inserted)
            .count()
    }

    /// Remove a song and every index entry pointing at it.
    ///
    /// Playlists are not notified; ids they hold become dangling.
    pub fn remove(&mut self, id: &SongId) -> Option<Song> {
        let song = self.songs.remove(id)?;

        self.by_artist.remove(song.artist(), id);
        self.by_album.remove(song.album(), id);
        self.by_genre.remove(song.genre(), id);
        debug!(song = %id, "Song removed from catalog");

        Some(song)
    }

    /// Get a song by ID
    pub fn get(&self, id: &SongId) -> Option<&Song> {
        self.songs.get(id)
    }

    pub fn contains(&self, id: &SongId) -> bool {
        self.songs.contains_key(id)
    }

    /// Songs by the given artist (empty for an unknown artist)
    pub fn by_artist(&self, artist: &str) -> Vec<&Song> {
        self.resolve(self.by_artist.get(artist))
    }

    /// Songs on the given album (empty for an unknown album)
    pub fn by_album(&self, album: &str) -> Vec<&Song> {
        self.resolve(self.by_album.get(album))
    }

    /// Songs in the given genre (empty for an unknown genre)
    pub fn by_genre(&self, genre: &str) -> Vec<&Song> {
        self.resolve(self.by_genre.get(genre))
    }

    /// Every song with exactly this title, across all artists.
    ///
    /// Titles are not unique, so this scans the whole store.
    pub fn by_title(&self, title: &str) -> Vec<&Song> {
        self.songs
            .values()
            .filter(|song| song.title() == title)
            .collect()
    }

    /// All songs, ordered by artist then title
    pub fn iter(&self) -> impl Iterator<Item = &Song> {
        self.songs.values()
    }

    /// Distinct artists, sorted
    pub fn artists(&self) -> Vec<&str> {
        self.by_artist.keys()
    }

    /// Distinct albums, sorted
    pub fn albums(&self) -> Vec<&str> {
        self.by_album.keys()
    }

    /// Distinct genres, sorted
    pub fn genres(&self) -> Vec<&str> {
        self.by_genre.keys()
    }

    /// Get the number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    fn resolve<'a>(&'a self, ids: impl Iterator<Item = &'a SongId>) -> Vec<&'a Song> {
        ids.filter_map(|id| self.songs.get(id)).collect()
    }
}

impl Extend<Song> for Catalog {
    fn extend<T: IntoIterator<Item = Song>>(&mut self, songs: T) {
        self.insert_all(songs);
    }
}

impl FromIterator<Song> for Catalog {
    fn from_iter<T: IntoIterator<Item = Song>>(songs: T) -> Self {
        let mut catalog = Catalog::new();
        catalog.insert_all(songs);
        catalog
    }
}
