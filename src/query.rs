//!
//! src/query.rs
//!
//! Builds search query strings from curated metadata
//!
//!

/// Queries longer than this are less likely to match; the track query
/// drops its artist token to get back under it
pub const QUERY_MAX_LEN: usize = 80;

/// Field-qualified token, e.g. "album:Lateralus". Qualified search
/// silently fails to match non-Latin-script text (Japanese titles), so
/// anything outside plain ASCII alphanumerics is passed through raw.
pub fn field_query(field_name: &str, target: &str) -> String {
    if !target.is_empty() && target.chars().all(|c| c.is_ascii_alphanumeric()) {
        format!("{field_name}:{target}")
    } else {
        target.to_string()
    }
}

/// Unqualified concatenation of the same fields; the resolver compares
/// against this to decide whether a fallback search would differ
pub fn plain_query(track: &str, album: &str, artist: Option<&str>) -> String {
    format!("{track} {album} {}", artist.unwrap_or(""))
}

pub fn track_query(track: &str, album: &str, artist: Option<&str>) -> String {
    let query_track = field_query("track", track);
    let query_album = field_query("album", album);
    let query_artist = match artist {
        Some(artist) => field_query("artist", artist),
        None => String::new(),
    };

    let query = format!("{query_track} {query_album} {query_artist}");
    if query.len() > QUERY_MAX_LEN {
        format!("{query_track} {query_album}")
    } else {
        query
    }
}

pub fn album_query(album: &str, artist: Option<&str>) -> String {
    let query_album = field_query("album", album);
    let query_artist = match artist {
        Some(artist) => field_query("artist", artist),
        None => String::new(),
    };
    format!("{query_artist} {query_album}")
}
