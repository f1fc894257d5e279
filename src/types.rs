use serde::{Deserialize, Serialize};

// Opaque identifier assigned by the catalog service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(pub String);

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One curated track. `liked` defaults to false when the key is absent
/// so the dedup input shape parses with the same type; a record only
/// resolves when liked is explicitly true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRecord {
    pub track: String,
    pub album: String,
    pub artist: Option<String>,
    #[serde(default)]
    pub liked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRecord {
    pub album: String,
    pub artist: Option<String>,
}

/// Resolved-ids file shapes, also the stdout result shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedAlbums {
    pub album_ids: Vec<CatalogId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedTracks {
    pub track_ids: Vec<CatalogId>,
}
