//!
//! src/save.rs
//!
//! Batched submission of resolved ids to the user's saved library
//!

use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

use crate::catalog::{Catalog, EntityKind};
use crate::config::PacingConfig;
use crate::types::CatalogId;
use crate::SaverError;

// https://developer.spotify.com/documentation/web-api/reference/#endpoint-save-albums-user
pub const MAX_IDS_PER_CALL: usize = 50;

/// Plan the per-call payloads for one submission run.
///
/// The service prepends each newly saved item to the front of the
/// library, so the whole sequence is reversed once up front to land the
/// library in input order. The tracks endpoint applies a call's list in
/// the opposite per-call order from the albums endpoint; each track
/// chunk is flipped again to compensate. The asymmetry is intentional,
/// inferred from observed library ordering rather than documented
/// insertion semantics.
pub fn submission_chunks(ids: &[CatalogId], kind: EntityKind, chunk_size: usize)
    -> Vec<Vec<CatalogId>> {

    let reversed: Vec<CatalogId> = ids.iter().rev().cloned().collect();
    reversed.chunks(chunk_size)
        .map(|chunk| {
            let mut chunk = chunk.to_vec();
            if kind == EntityKind::Track {
                chunk.reverse();
            }
            chunk
        })
        .collect()
}

pub struct Submitter<C> {
    catalog: C,
    pause: Duration,
}

impl<C: Catalog> Submitter<C> {
    pub fn new(catalog: C, pacing: &PacingConfig) -> Self {
        Self { catalog, pause: pacing.save_pause }
    }

    /// Submit chunks strictly in sequence, each preceded by the fixed
    /// pause. A failed call propagates and aborts the chunks after it;
    /// already-applied chunks stay applied remotely.
    pub async fn submit(&self, ids: &[CatalogId], kind: EntityKind)
        -> Result<(), SaverError> {

        for chunk in submission_chunks(ids, kind, MAX_IDS_PER_CALL) {
            sleep(self.pause).await;
            self.catalog.save(&chunk, kind).await?;
            info!(kind = %kind, count = chunk.len(), "save.chunk");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::catalog::SearchHit;

    use super::*;

    fn ids(range: std::ops::Range<u32>) -> Vec<CatalogId> {
        range.map(|n| CatalogId(n.to_string())).collect()
    }

    #[test]
    fn album_chunks_are_outer_reversed_only() {
        let chunks = submission_chunks(&ids(0..120), EntityKind::Album, MAX_IDS_PER_CALL);

        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![50, 50, 20]);

        // first chunk holds the last 50 of the input, newest first
        assert_eq!(chunks[0][0], CatalogId("119".to_string()));
        assert_eq!(chunks[0][49], CatalogId("70".to_string()));
        assert_eq!(chunks[2][19], CatalogId("0".to_string()));
    }

    #[test]
    fn track_chunks_are_reversed_twice() {
        let input = ids(1..6);
        let chunks = submission_chunks(&input, EntityKind::Track, 2);

        let expect = |ns: &[u32]| -> Vec<CatalogId> {
            ns.iter().map(|n| CatalogId(n.to_string())).collect()
        };
        assert_eq!(chunks, vec![
            expect(&[4, 5]),
            expect(&[2, 3]),
            expect(&[1]),
        ]);
    }

    #[test]
    fn empty_input_plans_no_calls() {
        assert!(submission_chunks(&[], EntityKind::Album, MAX_IDS_PER_CALL).is_empty());
    }

    /// Catalog double recording save payloads, failing from a chosen
    /// call onward
    struct RecordingCatalog {
        saved: Mutex<Vec<Vec<CatalogId>>>,
        fail_from_call: Option<usize>,
    }

    impl RecordingCatalog {
        fn new(fail_from_call: Option<usize>) -> Self {
            Self { saved: Mutex::new(Vec::new()), fail_from_call }
        }
    }

    #[async_trait]
    impl Catalog for &RecordingCatalog {
        async fn search(&self, _query: &str, _kind: EntityKind, _limit: u32)
            -> Result<Vec<SearchHit>, SaverError> {
            Ok(Vec::new())
        }

        async fn save(&self, ids: &[CatalogId], _kind: EntityKind)
            -> Result<(), SaverError> {
            let mut saved = self.saved.lock().unwrap();
            if self.fail_from_call.is_some_and(|n| saved.len() + 1 >= n) {
                return Err(SaverError::Http("save status 429".to_string()));
            }
            saved.push(ids.to_vec());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn chunks_submit_in_sequence() {
        let catalog = RecordingCatalog::new(None);
        let submitter = Submitter::new(&catalog, &PacingConfig::default());

        let start = tokio::time::Instant::now();
        submitter.submit(&ids(0..120), EntityKind::Album).await.unwrap();

        // three chunks, each preceded by the fixed 2s pause
        assert!(start.elapsed() >= Duration::from_secs(6));

        let saved = catalog.saved.lock().unwrap();
        assert_eq!(saved.len(), 3);
        assert_eq!(saved[0][0], CatalogId("119".to_string()));
        assert_eq!(saved[2].len(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_chunk_aborts_the_rest() {
        let catalog = RecordingCatalog::new(Some(2));
        let submitter = Submitter::new(&catalog, &PacingConfig::default());

        let result = submitter.submit(&ids(0..120), EntityKind::Album).await;
        assert!(result.is_err());
        assert_eq!(catalog.saved.lock().unwrap().len(), 1);
    }
}
