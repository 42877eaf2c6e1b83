//! Plain-text song sources.
//!
//! One song per line as `title | artist | album | genre | length`. Blank lines
//! and lines starting with `#` are skipped.

use std::path::PathBuf;

use async_trait::async_trait;

use super::loader::{read_source, LoadError, RawSong, SongLoader};
use crate::domain::{Song, SongLength};

const FIELD_SEPARATOR: char = '|';
const FIELD_COUNT: usize = 5;

/// Parse plain text into songs
pub fn parse_text(content: &str) -> Result<Vec<Song>, LoadError> {
    let mut songs = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = index + 1;
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(LoadError::InvalidRow {
                row,
                reason: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
            });
        }

        let song = RawSong {
            title: fields[0],
            artist: fields[1],
            album: fields[2],
            genre: fields[3],
            length: SongLength::parse(fields[4]),
        }
        .validate(row)?;

        songs.push(song);
    }

    Ok(songs)
}

/// Loads songs from a local text file
pub struct TextLoader {
    path: PathBuf,
    name: String,
}

impl TextLoader {
    pub fn new(path: PathBuf) -> Self {
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl SongLoader for TextLoader {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<Song>, LoadError> {
        let content = read_source(&self.path).await?;
        parse_text(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        let text = "# exported library\n\
                    Song 1 | Artist 1 | Album 1 | Genre 1 | 3:30\n\
                    \n\
                    Song 2|Artist 2|Album 2|Genre 2|4.25\n";

        let songs = parse_text(text).unwrap();

        assert_eq!(
            songs,
            vec![
                Song::new("Song 1", "Artist 1", "Album 1", "Genre 1", "3:30"),
                Song::new("Song 2", "Artist 2", "Album 2", "Genre 2", 4.25),
            ]
        );
    }

    #[test]
    fn test_parse_text_wrong_field_count() {
        let text = "Song 1 | Artist 1 | Album 1 | Genre 1 | 3:30\nSong 2 | Artist 2\n";
        match parse_text(text) {
            Err(LoadError::InvalidRow { row, reason }) => {
                assert_eq!(row, 2);
                assert_eq!(reason, "expected 5 fields, found 2");
            }
            other => panic!("Expected InvalidRow, got {:?}", other),
        }
    }
}
