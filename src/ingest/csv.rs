//! CSV song sources.
//!
//! The first line is a header naming the columns `title`, `artist`, `album`,
//! `genre` and `length` (or `duration`), in any order and case. Fields may be
//! double-quoted, with `""` for a literal quote, and quoted fields may span
//! lines. A leading byte-order mark is ignored.

use std::path::PathBuf;

use async_trait::async_trait;

use super::loader::{read_source, LoadError, RawSong, SongLoader};
use crate::domain::{Song, SongLength};

/// Column positions resolved from the header row
struct Columns {
    title: usize,
    artist: usize,
    album: usize,
    genre: usize,
    length: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, LoadError> {
        let names: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |wanted: &[&str], label: &'static str| {
            names
                .iter()
                .position(|name| wanted.contains(&name.as_str()))
                .ok_or(LoadError::MissingColumn(label))
        };

        Ok(Self {
            title: find(&["title"], "title")?,
            artist: find(&["artist"], "artist")?,
            album: find(&["album"], "album")?,
            genre: find(&["genre"], "genre")?,
            length: find(&["length", "duration"], "length")?,
        })
    }
}

/// Parse CSV text into songs.
///
/// Row numbers in errors are the line a record starts on.
pub fn parse_csv(content: &str) -> Result<Vec<Song>, LoadError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = parse_csv_records(content).into_iter();

    let (_, header) = records.next().ok_or(LoadError::Empty)?;
    let columns = Columns::from_header(&header)?;

    let mut songs = Vec::new();
    for (row, values) in records {
        let field = |pos: usize| values.get(pos).map(String::as_str).unwrap_or("");

        let song = RawSong {
            title: field(columns.title),
            artist: field(columns.artist),
            album: field(columns.album),
            genre: field(columns.genre),
            length: SongLength::parse(field(columns.length)),
        }
        .validate(row)?;

        songs.push(song);
    }

    Ok(songs)
}

/// Split CSV text into `(line, fields)` records.
///
/// A `"` opens a quoted field only at the start of a field; quoted fields may
/// span lines and use `""` for a literal quote. Blank lines are skipped.
fn parse_csv_records(content: &str) -> Vec<(usize, Vec<String>)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    current.push(ch);
                }
                _ => current.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            ',' => {
                fields.push(std::mem::take(&mut current));
                field_start = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                finish_record(&mut records, &mut fields, &mut current, record_line);
                line += 1;
                record_line = line;
                field_start = true;
            }
            _ => {
                current.push(ch);
                field_start = false;
            }
        }
    }

    if !fields.is_empty() || !current.is_empty() {
        finish_record(&mut records, &mut fields, &mut current, record_line);
    }

    records
}

fn finish_record(
    records: &mut Vec<(usize, Vec<String>)>,
    fields: &mut Vec<String>,
    current: &mut String,
    line: usize,
) {
    fields.push(std::mem::take(current));
    let record = std::mem::take(fields);

    let blank = record.len() == 1 && record[0].trim().is_empty();
    if !blank {
        records.push((line, record));
    }
}

/// Loads songs from a local CSV file
pub struct CsvLoader {
    path: PathBuf,
    name: String,
}

impl CsvLoader {
    pub fn new(path: PathBuf) -> Self {
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl SongLoader for CsvLoader {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<Song>, LoadError> {
        let content = read_source(&self.path).await?;
        parse_csv(&content)
    }
}
