//!
//! src/catalog.rs
//!
//! The capability seam to the remote catalog: ranked search plus
//! save-to-library, implemented over HTTP for Spotify and by
//! in-process doubles in tests
//!

use async_trait::async_trait;

use crate::fetch::SpotifyClient;
use crate::types::CatalogId;
use crate::SaverError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Album,
    Track,
}

impl EntityKind {
    pub fn search_type(&self) -> &'static str {
        match self {
            EntityKind::Album => "album",
            EntityKind::Track => "track",
        }
    }

    fn items_pointer(&self) -> &'static str {
        match self {
            EntityKind::Album => "/albums/items",
            EntityKind::Track => "/tracks/items",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.search_type())
    }
}

/// One ranked search result; carries the fields the resolver's
/// diagnostics report
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: CatalogId,
    pub name: String,
    pub artists: Vec<String>,
}

#[async_trait]
pub trait Catalog {
    /// Ranked search restricted to one entity kind
    async fn search(&self, query: &str, kind: EntityKind, limit: u32)
        -> Result<Vec<SearchHit>, SaverError>;

    /// Add ids to the user's saved library; at most
    /// save::MAX_IDS_PER_CALL ids per call
    async fn save(&self, ids: &[CatalogId], kind: EntityKind)
        -> Result<(), SaverError>;
}

fn hit_from_value(item: &serde_json::Value) -> Option<SearchHit> {
    let id = item.get("id").and_then(|v| v.as_str()).unwrap_or_default();
    if id.is_empty() {
        return None;
    }
    let name = item.get("name")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let artists = item.get("artists")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter()
            .filter_map(|a| a.get("name").and_then(|v| v.as_str()))
            .map(str::to_string)
            .collect())
        .unwrap_or_default();
    Some(SearchHit { id: CatalogId(id.to_string()), name, artists })
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn search(&self, query: &str, kind: EntityKind, limit: u32)
        -> Result<Vec<SearchHit>, SaverError> {

        let response = SpotifyClient::search(self, query, kind.search_type(), limit)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SaverError::Http(format!("search status {status}")));
        }

        let value = response.json::<serde_json::Value>().await?;
        let items = value.pointer(kind.items_pointer())
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        Ok(items.iter().filter_map(hit_from_value).collect())
    }

    async fn save(&self, ids: &[CatalogId], kind: EntityKind)
        -> Result<(), SaverError> {

        let ids_csv = ids.iter()
            .map(|id| id.0.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let request = match kind {
            EntityKind::Album => self.save_albums(&ids_csv),
            EntityKind::Track => self.save_tracks(&ids_csv),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SaverError::Http(format!("save {kind} status {status}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_without_ids_are_discarded() {
        let items = serde_json::json!([
            {"id": "abc123", "name": "Lateralus",
             "artists": [{"name": "Tool"}]},
            {"name": "no id here"},
            {"id": "", "name": "empty id"}
        ]);
        let hits: Vec<SearchHit> = items.as_array()
            .unwrap()
            .iter()
            .filter_map(hit_from_value)
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, CatalogId("abc123".to_string()));
        assert_eq!(hits[0].name, "Lateralus");
        assert_eq!(hits[0].artists, vec!["Tool".to_string()]);
    }

    #[test]
    fn entity_kind_names() {
        assert_eq!(EntityKind::Album.search_type(), "album");
        assert_eq!(EntityKind::Track.search_type(), "track");
        assert_eq!(EntityKind::Album.items_pointer(), "/albums/items");
        assert_eq!(EntityKind::Track.items_pointer(), "/tracks/items");
    }
}
