//! Domain types for the music library.
//!
//! - Song: immutable track record
//! - SongId: composite (artist, title) catalog key
//! - SongLength: numeric-or-text track length

pub mod song;

pub use song::{Song, SongId, SongIdParseError, SongLength, SONG_ID_SEPARATOR};
