//! Tabular song sources: a JSON array of row objects.
//!
//! ```json
//! [
//!   {"title": "Song 1", "artist": "Artist 1", "album": "Album 1", "genre": "Genre 1", "length": 3.5},
//!   {"title": "Song 2", "artist": "Artist 2", "album": "Album 2", "genre": "Genre 2", "duration": "4:15"}
//! ]
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use super::loader::{read_source, LoadError, RawSong, SongLoader};
use crate::domain::{Song, SongLength};

#[derive(Debug, Deserialize)]
struct TableRow {
    title: String,
    artist: String,
    album: String,
    genre: String,
    #[serde(alias = "duration")]
    length: SongLength,
}

/// Parse a JSON table into songs.
///
/// Row numbers in errors are 1-based positions in the array.
pub fn parse_table(content: &str) -> Result<Vec<Song>, LoadError> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(content)?;

    rows.into_iter()
        .enumerate()
        .map(|(index, value)| {
            let row = index + 1;
            let parsed: TableRow =
                serde_json::from_value(value).map_err(|e| LoadError::InvalidRow {
                    row,
                    reason: e.to_string(),
                })?;

            RawSong {
                title: &parsed.title,
                artist: &parsed.artist,
                album: &parsed.album,
                genre: &parsed.genre,
                length: match &parsed.length {
                    SongLength::Text(text) => SongLength::parse(text),
                    minutes => minutes.clone(),
                },
            }
            .validate(row)
        })
        .collect()
}

/// Loads songs from a local JSON table
pub struct TableLoader {
    path: PathBuf,
    name: String,
}

impl TableLoader {
    pub fn new(path: PathBuf) -> Self {
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl SongLoader for TableLoader {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<Song>, LoadError> {
        let content = read_source(&self.path).await?;
        parse_table(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        let json = r#"[
            {"title": "Song 1", "artist": "Artist 1", "album": "Album 1", "genre": "Genre 1", "length": 3.5},
            {"title": "Song 2", "artist": "Artist 2", "album": "Album 2", "genre": "Genre 2", "duration": "4:15", "bpm": 120}
        ]"#;

        let songs = parse_table(json).unwrap();

        assert_eq!(
            songs,
            vec![
                Song::new("Song 1", "Artist 1", "Album 1", "Genre 1", 3.5),
                Song::new("Song 2", "Artist 2", "Album 2", "Genre 2", "4:15"),
            ]
        );
    }

    #[test]
    fn test_parse_table_numeric_text_length() {
        let json = r#"[
            {"title": "Song 1", "artist": "Artist 1", "album": "Album 1", "genre": "Genre 1", "length": " 3.5 "}
        ]"#;

        let csv = "title,artist,album,genre,length\nSong 1,Artist 1,Album 1,Genre 1, 3.5 \n";

        let songs = parse_table(json).unwrap();
        assert_eq!(songs[0].length(), &SongLength::Minutes(3.5));
        assert_eq!(songs, crate::ingest::parse_csv(csv).unwrap());
    }

    #[test]
    fn test_parse_table_missing_field() {
        let json = r#"[
            {"title": "Song 1", "artist": "Artist 1", "album": "Album 1", "genre": "Genre 1", "length": 3.5},
            {"title": "Song 2", "artist": "Artist 2", "album": "Album 2", "length": 4.25}
        ]"#;

        match parse_table(json) {
            Err(LoadError::InvalidRow { row, reason }) => {
                assert_eq!(row, 2);
                assert!(reason.contains("genre"), "unexpected reason: {}", reason);
            }
            other => panic!("Expected InvalidRow, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_table_not_an_array() {
        assert!(matches!(
            parse_table(r#"{"title": "Song 1"}"#),
            Err(LoadError::Table(_))
        ));
    }
}
