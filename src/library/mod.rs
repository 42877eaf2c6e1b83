//! The music library core.
//!
//! - `Catalog`: de-duplicated song store with artist/album/genre indexes
//! - `Playlist`: ordered, duplicate-free list of song ids
//! - `Playlists`: a user's collection of playlists
//! - `SharedCatalog` / `SharedPlaylist`: lock-guarded handles for threaded hosts
//!
//! # Ownership
//!
//! ```text
//! Catalog ── owns ──> Song
//!    ^
//!    │ resolve(SongId)
//!    │
//! Playlist ── holds ──> [SongId, SongId, ...]
//! ```

pub mod catalog;
pub mod playlist;
pub mod playlists;
pub mod shared;

pub use catalog::Catalog;
pub use playlist::{Playlist, PlaylistId};
pub use playlists::Playlists;
pub use shared::{SharedCatalog, SharedPlaylist};
