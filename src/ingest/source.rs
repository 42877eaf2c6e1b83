//! Where songs come from: local files in one of three formats, or a URL.

use std::fmt;
use std::path::{Path, PathBuf};

use super::loader::LoadError;

/// On-disk / on-wire layout of a song source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values with a header row
    Csv,

    /// JSON array of row objects, as handed over by a table library
    Table,

    /// One `|`-separated song per line
    Text,
}

impl SourceFormat {
    /// Format implied by a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Table),
            "txt" => Some(SourceFormat::Text),
            _ => None,
        }
    }

    /// Format implied by an HTTP `Content-Type` header
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        match mime.as_str() {
            "text/csv" | "application/csv" => Some(SourceFormat::Csv),
            "application/json" | "text/json" => Some(SourceFormat::Table),
            "text/plain" => Some(SourceFormat::Text),
            _ => None,
        }
    }

    fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Csv => write!(f, "csv"),
            SourceFormat::Table => write!(f, "table"),
            SourceFormat::Text => write!(f, "text"),
        }
    }
}

/// A single song source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File { path: PathBuf, format: SourceFormat },
    Remote { url: String },
}

impl Source {
    /// Classify a path or URL.
    ///
    /// URLs are always accepted; their format is settled once the response
    /// arrives. Files need a known extension.
    pub fn detect(source: &str) -> Result<Self, LoadError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            return Ok(Source::Remote {
                url: source.to_string(),
            });
        }

        let path = PathBuf::from(source);
        let format = SourceFormat::from_path(&path)
            .ok_or_else(|| LoadError::UnsupportedFormat(source.to_string()))?;

        Ok(Source::File { path, format })
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File { path, format } => write!(f, "{} ({})", path.display(), format),
            Source::Remote { url } => write!(f, "{}", url),
        }
    }
}

/// Format of a fetched URL: path extension first, then `Content-Type`
pub fn remote_format(url: &str, content_type: Option<&str>) -> Result<SourceFormat, LoadError> {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let from_path = path
        .rsplit('/')
        .next()
        .and_then(|last| last.rsplit_once('.'))
        .and_then(|(_, ext)| SourceFormat::from_extension(ext));

    from_path
        .or_else(|| content_type.and_then(SourceFormat::from_content_type))
        .ok_or_else(|| LoadError::UnsupportedFormat(url.to_string()))
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Turn user-supplied paths, glob patterns and URLs into sources.
///
/// A glob that matches nothing is an error rather than an empty load.
pub fn expand_sources<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Source>, LoadError> {
    let mut sources = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();

        if pattern.starts_with("http://") || pattern.starts_with("https://") || !is_glob(pattern) {
            sources.push(Source::detect(pattern)?);
            continue;
        }

        let mut matched = false;
        for entry in glob::glob(pattern)? {
            let Ok(path) = entry else {
                continue;
            };
            if !path.is_file() {
                continue;
            }
            matched = true;
            sources.push(Source::detect(&path.to_string_lossy())?);
        }

        if !matched {
            return Err(LoadError::NoMatches(pattern.to_string()));
        }
    }

    Ok(sources)
}
