//! Song ingestion.
//!
//! Loaders read a source and hand the catalog validated songs. The pipeline:
//!
//! 1. **Source**: classify each path, glob or URL (`expand_sources`)
//! 2. **Loader**: pick the matching `SongLoader` (`loader_for`)
//! 3. **Parse**: CSV, JSON table or plain text into `Song` values
//!
//! # Architecture
//!
//! ```text
//! songs.csv ─┐
//! songs.json ┼─> SongLoader ─> Vec<Song> ─> Catalog::insert_all
//! https://.. ┘
//! ```

pub mod csv;
pub mod loader;
pub mod remote;
pub mod source;
pub mod table;
pub mod text;

// Re-export key types
pub use csv::{parse_csv, CsvLoader};
pub use loader::{load_all, loader_for, parse, LoadError, SongLoader};
pub use remote::RemoteLoader;
pub use source::{expand_sources, remote_format, Source, SourceFormat};
pub use table::{parse_table, TableLoader};
pub use text::{parse_text, TextLoader};
