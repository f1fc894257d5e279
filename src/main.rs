//!
//! src/main.rs
//!
//! CLI entry points and wiring for the resolve / save / convert
//! pipelines, plus live testbenches
//!
//!

mod catalog;
mod config;
mod convert;
mod errors;
mod fetch;
mod logging;
mod query;
mod resolve;
mod save;
mod types;

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};

use crate::catalog::EntityKind;
use crate::errors::SaverError;
use crate::types::{AlbumRecord, ResolvedAlbums, ResolvedTracks, TrackRecord};

#[derive(Parser, Debug)]
#[command(name = "rs-saver")]
#[command(about = "Resolve curated albums/tracks to catalog ids and save them to the user library")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search catalog ids for curated albums and/or tracks
    Resolve {
        /// Albums JSON file
        #[arg(short, long, value_name = "FILE")]
        albums: Option<PathBuf>,
        /// Tracks JSON file
        #[arg(short, long, value_name = "FILE")]
        tracks: Option<PathBuf>,
    },
    /// Save previously resolved ids to the user's library
    Save {
        /// Album IDs JSON file
        #[arg(short, long, value_name = "FILE")]
        albums: Option<PathBuf>,
        /// Track IDs JSON file
        #[arg(short, long, value_name = "FILE")]
        tracks: Option<PathBuf>,
    },
    /// Convert a tracks file to deduplicated albums for resolve
    Convert {
        /// Tracks JSON file
        #[arg(short, long, value_name = "FILE")]
        tracks: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), SaverError> {
    let args = Args::parse();

    match args.command {
        Command::Convert { tracks } => {
            // pure file transform; needs no remote configuration
            let _logger = logging::init_logging(&config::LoggingConfig::default())?;
            cmd_convert(&tracks)
        }
        Command::Resolve { albums, tracks } => {
            require_input(albums.as_deref(), tracks.as_deref());
            let cfgs = config::load_config()?;
            let _logger = logging::init_logging(&cfgs.logging)?;
            tracing::info!(
                service = "rs-saver",
                version = %env!("CARGO_PKG_VERSION"),
                "starting"
            );
            cmd_resolve(&cfgs, albums, tracks).await
        }
        Command::Save { albums, tracks } => {
            require_input(albums.as_deref(), tracks.as_deref());
            let cfgs = config::load_config()?;
            let _logger = logging::init_logging(&cfgs.logging)?;
            tracing::info!(
                service = "rs-saver",
                version = %env!("CARGO_PKG_VERSION"),
                "starting"
            );
            cmd_save(&cfgs, albums, tracks).await
        }
    }
}

/// At least one input file is required; mirror the usage text and exit 1
fn require_input(albums: Option<&Path>, tracks: Option<&Path>) {
    if albums.is_none() && tracks.is_none() {
        let _ = Args::command().print_help();
        std::process::exit(1);
    }
}

/// Read and parse one input file; malformed input is fatal before any
/// remote call for the affected stage
fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SaverError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| SaverError::Input(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| SaverError::Input(format!("{}: {e}", path.display())))
}

async fn cmd_resolve(
    cfgs: &config::AppConfig,
    albums: Option<PathBuf>,
    tracks: Option<PathBuf>
) -> Result<(), SaverError> {
    let client = fetch::SpotifyClient::new(&cfgs.http, &cfgs.spotify)?;
    let resolver = resolve::Resolver::new(client, &cfgs.pacing);

    if let Some(path) = albums {
        let records: Vec<AlbumRecord> = load_json(&path)?;
        let album_ids = resolver.resolve_albums(&records).await?;
        println!("{}", serde_json::to_string(&ResolvedAlbums { album_ids })?);
    }

    if let Some(path) = tracks {
        let records: Vec<TrackRecord> = load_json(&path)?;
        let track_ids = resolver.resolve_tracks(&records).await?;
        println!("{}", serde_json::to_string(&ResolvedTracks { track_ids })?);
    }

    Ok(())
}

async fn cmd_save(
    cfgs: &config::AppConfig,
    albums: Option<PathBuf>,
    tracks: Option<PathBuf>
) -> Result<(), SaverError> {
    let client = fetch::SpotifyClient::new(&cfgs.http, &cfgs.spotify)?;
    let submitter = save::Submitter::new(client, &cfgs.pacing);

    if let Some(path) = albums {
        let resolved: ResolvedAlbums = load_json(&path)?;
        submitter.submit(&resolved.album_ids, EntityKind::Album).await?;
    }

    if let Some(path) = tracks {
        let resolved: ResolvedTracks = load_json(&path)?;
        submitter.submit(&resolved.track_ids, EntityKind::Track).await?;
    }

    Ok(())
}

fn cmd_convert(path: &Path) -> Result<(), SaverError> {
    let records: Vec<TrackRecord> = load_json(path)?;
    let albums = convert::tracks_to_albums(&records);
    println!("{}", serde_json::to_string(&albums)?);
    Ok(())
}
