//!
//! src/resolve.rs
//!
//! Resolves curated album/track metadata to catalog ids through the
//! search capability, one record at a time
//!

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, EntityKind, SearchHit};
use crate::config::PacingConfig;
use crate::query;
use crate::types::{AlbumRecord, CatalogId, TrackRecord};
use crate::SaverError;

/// Top hit only; the service's ranking is the sole disambiguation
const SEARCH_LIMIT: u32 = 1;

pub struct Resolver<C> {
    catalog: C,
    pause: Duration,
}

impl<C: Catalog> Resolver<C> {
    pub fn new(catalog: C, pacing: &PacingConfig) -> Self {
        Self { catalog, pause: pacing.search_pause }
    }

    /// Resolve albums in order; misses are logged and omitted
    pub async fn resolve_albums(&self, records: &[AlbumRecord])
        -> Result<Vec<CatalogId>, SaverError> {

        let mut album_ids = Vec::new();
        for record in records {
            sleep(self.pause).await;
            if let Some(id) = self.resolve_album(&record.album, record.artist.as_deref())
                .await?
            {
                album_ids.push(id);
            }
        }
        Ok(album_ids)
    }

    /// Resolve tracks in order; records not marked liked never reach
    /// the search capability
    pub async fn resolve_tracks(&self, records: &[TrackRecord])
        -> Result<Vec<CatalogId>, SaverError> {

        let mut track_ids = Vec::new();
        for record in records.iter().filter(|r| r.liked) {
            sleep(self.pause).await;
            if let Some(id) = self.resolve_track(record).await? {
                track_ids.push(id);
            }
        }
        Ok(track_ids)
    }

    pub async fn resolve_album(&self, album: &str, artist: Option<&str>)
        -> Result<Option<CatalogId>, SaverError> {

        debug!(name = %album, artist = artist.unwrap_or(""), "search.album");

        let built = query::album_query(album, artist);
        let hits = self.catalog.search(&built, EntityKind::Album, SEARCH_LIMIT).await?;
        Ok(report(hits, &built))
    }

    pub async fn resolve_track(&self, record: &TrackRecord)
        -> Result<Option<CatalogId>, SaverError> {

        let artist = record.artist.as_deref();
        debug!(
            name = %record.track, album = %record.album,
            artist = artist.unwrap_or(""), "search.track");

        let built = query::track_query(&record.track, &record.album, artist);
        let mut hits = self.catalog.search(&built, EntityKind::Track, SEARCH_LIMIT)
            .await?;

        // Qualified phrasing can miss where the plain concatenation
        // would not; one retry when that is actually a different query.
        if hits.is_empty() {
            let plain = query::plain_query(&record.track, &record.album, artist);
            if plain != built {
                hits = self.catalog.search(&plain, EntityKind::Track, SEARCH_LIMIT)
                    .await?;
            }
        }
        Ok(report(hits, &built))
    }
}

/// A miss is a normal outcome, logged for manual audit; only the
/// transport erring is a failure
fn report(hits: Vec<SearchHit>, query: &str) -> Option<CatalogId> {
    match hits.into_iter().next() {
        Some(hit) => {
            info!(
                name = %hit.name, artists = %hit.artists.join(" "),
                id = %hit.id, "search.hit");
            Some(hit.id)
        }
        None => {
            warn!(query = %query, "search.miss");
            None
        }
    }
}
