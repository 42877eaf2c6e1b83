//! Song records and their catalog identity.
//!
//! A `Song` is an immutable value. Its identity for de-duplication is the
//! `(artist, title)` pair, carried as an explicit `SongId` key rather than a
//! concatenated string.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Separator used by the textual form of a `SongId` (`artist::title`).
///
/// An artist containing the separator, or starting with `"`, is written
/// double-quoted with `""` for a literal quote: `"AC::DC"::Thunder`.
pub const SONG_ID_SEPARATOR: &str = "::";

/// Composite catalog key derived from a song's artist and title
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SongId {
    /// Performing artist
    pub artist: String,

    /// Song title
    pub title: String,
}

impl SongId {
    /// Create an identity from its two components
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.artist.contains(SONG_ID_SEPARATOR) || self.artist.starts_with('"') {
            write!(f, "\"{}\"", self.artist.replace('"', "\"\""))?;
        } else {
            f.write_str(&self.artist)?;
        }
        write!(f, "{}{}", SONG_ID_SEPARATOR, self.title)
    }
}

/// Split a leading quoted artist (opening quote already consumed) from the rest
fn split_quoted(s: &str) -> Option<(String, &str)> {
    let mut artist = String::new();
    let mut chars = s.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if ch != '"' {
            artist.push(ch);
        } else if matches!(chars.peek(), Some((_, '"'))) {
            artist.push('"');
            chars.next();
        } else {
            return Some((artist, &s[index + 1..]));
        }
    }
    None
}

/// Errors from parsing the textual `artist::title` form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SongIdParseError {
    #[error("Missing '::' separator in song reference: {0}")]
    MissingSeparator(String),

    #[error("Empty artist or title in song reference: {0}")]
    EmptyComponent(String),

    #[error("Unterminated quoted artist in song reference: {0}")]
    UnterminatedQuote(String),
}

impl FromStr for SongId {
    type Err = SongIdParseError;

    /// Parses `artist::title`, splitting on the first separator so titles may
    /// themselves contain `::`. A double-quoted artist may contain it too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_start();

        let (artist, title) = match trimmed.strip_prefix('"') {
            Some(quoted) => {
                let (artist, rest) = split_quoted(quoted)
                    .ok_or_else(|| SongIdParseError::UnterminatedQuote(s.to_string()))?;
                let title = rest
                    .strip_prefix(SONG_ID_SEPARATOR)
                    .ok_or_else(|| SongIdParseError::MissingSeparator(s.to_string()))?;
                (artist, title)
            }
            None => {
                let (artist, title) = trimmed
                    .split_once(SONG_ID_SEPARATOR)
                    .ok_or_else(|| SongIdParseError::MissingSeparator(s.to_string()))?;
                (artist.trim().to_string(), title)
            }
        };

        let title = title.trim();
        if artist.trim().is_empty() || title.is_empty() {
            return Err(SongIdParseError::EmptyComponent(s.to_string()));
        }

        Ok(Self::new(artist, title))
    }
}

/// Song length, either numeric (minutes) or free text such as `"3:30"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SongLength {
    Minutes(f64),
    Text(String),
}

impl SongLength {
    /// Numeric when the text parses as a number, otherwise kept verbatim
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<f64>() {
            Ok(minutes) if minutes.is_finite() => SongLength::Minutes(minutes),
            _ => SongLength::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for SongLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SongLength::Minutes(minutes) => write!(f, "{}", minutes),
            SongLength::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for SongLength {
    fn from(minutes: f64) -> Self {
        SongLength::Minutes(minutes)
    }
}

impl From<&str> for SongLength {
    fn from(text: &str) -> Self {
        SongLength::Text(text.to_string())
    }
}

impl From<String> for SongLength {
    fn from(text: String) -> Self {
        SongLength::Text(text)
    }
}

/// A music track known to the library
///
/// Fields are private so a stored song cannot change under its `SongId`.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    title: String,
    artist: String,
    album: String,
    genre: String,
    length: SongLength,
}

impl Song {
    /// Create a new song record
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        genre: impl Into<String>,
        length: impl Into<SongLength>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            genre: genre.into(),
            length: length.into(),
        }
    }

    /// Catalog identity of this song
    pub fn id(&self) -> SongId {
        SongId::new(&self.artist, &self.title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn length(&self) -> &SongLength {
        &self.length
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}
