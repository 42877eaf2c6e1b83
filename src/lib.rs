//! mfun - Music library and playlist core
//!
//! An in-memory song catalog with artist, album and genre lookups, plus
//! user playlists that keep songs in the order they were added.
//!
//! # Architecture
//!
//! - Songs are immutable values identified by `(artist, title)`
//! - The catalog stores each song once and indexes it by attribute
//! - Playlists hold song ids, never song data, and resolve them through
//!   the catalog when shown
//!
//! # Modules
//!
//! - `domain`: Data structures (Song, SongId, SongLength)
//! - `library`: Catalog, Playlist, Playlists and thread-safe handles
//! - `ingest`: Loaders for CSV, JSON tables, plain text and URLs
//! - `config`: Configuration file and environment handling
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Print the sample library and playlist
//! mfun demo
//!
//! # Songs by one artist
//! mfun query songs.csv --artist "Artist 1"
//!
//! # Build a playlist
//! mfun playlist songs.csv --name "Road Trip" --song "Artist 1::Song 1"
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod ingest;
pub mod library;

// Re-export main types at crate root for convenience
pub use domain::{Song, SongId, SongLength};
pub use ingest::{LoadError, SongLoader, Source, SourceFormat};
pub use library::{Catalog, Playlist, PlaylistId, Playlists, SharedCatalog, SharedPlaylist};
