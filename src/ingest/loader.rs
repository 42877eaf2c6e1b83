//! Loader capability shared by every song source.
//!
//! Each loader turns one source into validated `Song` values. The catalog
//! never parses anything itself; it only receives what a loader produced.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::csv::{parse_csv, CsvLoader};
use super::remote::RemoteLoader;
use super::source::{Source, SourceFormat};
use super::table::{parse_table, TableLoader};
use super::text::{parse_text, TextLoader};
use crate::config::RemoteSettings;
use crate::domain::{Song, SongLength};

/// Errors that can occur while loading songs
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),

    #[error("No files match pattern: {0}")]
    NoMatches(String),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source is empty")]
    Empty,

    #[error("Missing column in header: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Invalid table data: {0}")]
    Table(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Response from {url} exceeds {limit} bytes")]
    TooLarge { url: String, limit: u64 },

    #[error("Response from {0} is not valid UTF-8")]
    NotUtf8(String),
}

/// Trait for song sources
#[async_trait]
pub trait SongLoader: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Read the source and return every song it holds
    async fn load(&self) -> Result<Vec<Song>, LoadError>;
}

/// The five fields of one input row, before validation
pub(crate) struct RawSong<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub album: &'a str,
    pub genre: &'a str,
    pub length: SongLength,
}

impl RawSong<'_> {
    /// Build a `Song`, rejecting rows with any blank field
    pub fn validate(self, row: usize) -> Result<Song, LoadError> {
        let fields = [
            ("title", self.title),
            ("artist", self.artist),
            ("album", self.album),
            ("genre", self.genre),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(LoadError::InvalidRow {
                    row,
                    reason: format!("empty {}", name),
                });
            }
        }
        if matches!(&self.length, SongLength::Text(text) if text.trim().is_empty()) {
            return Err(LoadError::InvalidRow {
                row,
                reason: "empty length".to_string(),
            });
        }

        Ok(Song::new(
            self.title.trim(),
            self.artist.trim(),
            self.album.trim(),
            self.genre.trim(),
            self.length,
        ))
    }
}

/// Parse already-fetched text in the given format
pub fn parse(format: SourceFormat, content: &str) -> Result<Vec<Song>, LoadError> {
    match format {
        SourceFormat::Csv => parse_csv(content),
        SourceFormat::Table => parse_table(content),
        SourceFormat::Text => parse_text(content),
    }
}

/// Read a local file, tagging IO errors with its path
pub(crate) async fn read_source(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Pick the loader for a source
pub fn loader_for(source: &Source, remote: &RemoteSettings) -> Box<dyn SongLoader> {
    match source {
        Source::File { path, format } => match format {
            SourceFormat::Csv => Box::new(CsvLoader::new(path.clone())),
            SourceFormat::Table => Box::new(TableLoader::new(path.clone())),
            SourceFormat::Text => Box::new(TextLoader::new(path.clone())),
        },
        Source::Remote { url } => Box::new(RemoteLoader::new(url.clone(), remote.clone())),
    }
}

/// Load every source in order, stopping at the first failure
pub async fn load_all(sources: &[Source], remote: &RemoteSettings) -> Result<Vec<Song>, LoadError> {
    let mut songs = Vec::new();

    for source in sources {
        let loader = loader_for(source, remote);
        let loaded = loader.load().await?;
        info!(source = %loader.name(), songs = loaded.len(), "Loaded songs");
        songs.extend(loaded);
    }

    Ok(songs)
}
