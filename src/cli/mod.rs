//! Command-line interface for mfun.
//!
//! Provides commands for querying a song library loaded from files or URLs,
//! building a playlist from it, showing the resolved configuration, and a
//! built-in demo.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config;
use crate::domain::{Song, SongId};
use crate::ingest::{expand_sources, load_all};
use crate::library::{Catalog, Playlist};

/// mfun - Music library and playlist manager
#[derive(Parser, Debug)]
#[command(name = "mfun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a sample library and playlist and print them
    Demo,

    /// Search the library
    Query {
        /// Files, glob patterns or URLs (configured sources if omitted)
        sources: Vec<String>,

        #[command(flatten)]
        filter: QueryFilter,
    },

    /// Build a playlist from library songs and show it
    Playlist {
        /// Files, glob patterns or URLs (configured sources if omitted)
        sources: Vec<String>,

        /// Playlist name
        #[arg(short, long)]
        name: String,

        /// Song to add, as ARTIST::TITLE (repeatable, added in order)
        #[arg(short, long = "song", required = true)]
        songs: Vec<SongId>,

        /// New order to apply after adding, as ARTIST::TITLE (repeatable)
        #[arg(short, long = "order")]
        order: Vec<SongId>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Lookup criterion for `query`; all songs are listed when none is given
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct QueryFilter {
    /// Songs by this artist
    #[arg(long)]
    pub artist: Option<String>,

    /// Songs on this album
    #[arg(long)]
    pub album: Option<String>,

    /// Songs in this genre
    #[arg(long)]
    pub genre: Option<String>,

    /// Songs with this exact title
    #[arg(long)]
    pub title: Option<String>,
}

impl QueryFilter {
    /// Run the lookup against `catalog`
    pub fn apply<'c>(&self, catalog: &'c Catalog) -> Vec<&'c Song> {
        if let Some(artist) = &self.artist {
            catalog.by_artist(artist)
        } else if let Some(album) = &self.album {
            catalog.by_album(album)
        } else if let Some(genre) = &self.genre {
            catalog.by_genre(genre)
        } else if let Some(title) = &self.title {
            catalog.by_title(title)
        } else {
            catalog.iter().collect()
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Demo => run_demo(),
            Commands::Query { sources, filter } => query_library(sources, filter).await,
            Commands::Playlist {
                sources,
                name,
                songs,
                order,
            } => build_playlist(sources, &name, songs, order).await,
            Commands::Config => show_config(),
        }
    }
}

/// Sample songs used by `demo`
pub fn demo_songs() -> Vec<Song> {
    vec![
        Song::new("Song 1", "Artist 1", "Album 1", "Genre 1", 3.5),
        Song::new("Song 2", "Artist 2", "Album 2", "Genre 2", 4.25),
    ]
}

/// Lines printed for a playlist, one per entry plus a heading
pub fn playlist_lines(playlist: &Playlist, catalog: &Catalog) -> Vec<String> {
    let mut lines = vec![format!("Playlist: {}", playlist.name())];

    for (position, id) in playlist.display() {
        match catalog.get(id) {
            Some(song) => lines.push(format!("{}. {}", position, song)),
            None => lines.push(format!("{}. {} (not in library)", position, id)),
        }
    }

    lines
}

fn run_demo() -> Result<()> {
    let mut catalog = Catalog::new();
    for song in demo_songs() {
        catalog.insert(song);
    }

    let mut playlist = Playlist::new("My Playlist 1");
    playlist.add(catalog.get(&SongId::new("Artist 1", "Song 1")));
    playlist.add(catalog.get(&SongId::new("Artist 2", "Song 2")));

    for line in playlist_lines(&playlist, &catalog) {
        println!("{}", line);
    }

    println!("\nSongs by Artist 1:");
    for song in catalog.by_artist("Artist 1") {
        println!("{} - {}", song.title(), song.album());
    }

    Ok(())
}

/// Load the given sources, or the configured defaults when none are given
async fn load_catalog(sources: Vec<String>) -> Result<Catalog> {
    let config = config::config()?;
    let patterns = if sources.is_empty() {
        config.sources.clone()
    } else {
        sources
    };

    if patterns.is_empty() {
        anyhow::bail!(
            "No sources given. Pass files or URLs, or set library.sources in .mfun/config.yaml"
        );
    }

    let sources = expand_sources(patterns.as_slice()).context("Failed to resolve sources")?;
    let songs = load_all(&sources, &config.remote)
        .await
        .context("Failed to load songs")?;

    let total = songs.len();
    let mut catalog = Catalog::new();
    let added = catalog.insert_all(songs);
    if added < total {
        eprintln!("Skipped {} duplicate songs", total - added);
    }

    Ok(catalog)
}

async fn query_library(sources: Vec<String>, filter: QueryFilter) -> Result<()> {
    let catalog = load_catalog(sources).await?;
    let results = filter.apply(&catalog);

    if results.is_empty() {
        println!("No matching songs.");
        return Ok(());
    }

    println!("Found {} songs:\n", results.len());
    for song in results {
        println!(
            "{} - {} [{} / {}] {}",
            song.title(),
            song.artist(),
            song.album(),
            song.genre(),
            song.length()
        );
    }

    Ok(())
}

async fn build_playlist(
    sources: Vec<String>,
    name: &str,
    songs: Vec<SongId>,
    order: Vec<SongId>,
) -> Result<()> {
    let catalog = load_catalog(sources).await?;
    let mut playlist = Playlist::new(name);

    for id in &songs {
        if !catalog.contains(id) {
            eprintln!("Not in library, skipped: {}", id);
        } else if !playlist.add(catalog.get(id)) {
            eprintln!("Already in playlist, skipped: {}", id);
        }
    }

    if !order.is_empty() {
        playlist.reorder(order);
    }

    for line in playlist_lines(&playlist, &catalog) {
        println!("{}", line);
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let config = config::config()?;

    println!("mfun configuration:");
    match &config.config_file {
        Some(path) => println!("  Config file: {}", path.display()),
        None => println!("  Config file: (none, using defaults)"),
    }
    println!("  Remote timeout: {}s", config.remote.timeout_seconds);
    println!("  Remote max bytes: {}", config.remote.max_bytes);
    if config.sources.is_empty() {
        println!("  Sources: (none)");
    } else {
        println!("  Sources:");
        for source in &config.sources {
            println!("    - {}", source);
        }
    }

    Ok(())
}
