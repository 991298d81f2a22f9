use color_eyre::eyre::Result;

use crate::ports::destination::DestinationClient;
use crate::ports::source::TrackDescriptor;
use crate::query::fallback_queries;

/// Terminal classification of one track after the fallback chain completes.
/// `Unresolved` is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Resolved { catalog_id: u64 },
    Unresolved(TrackDescriptor),
}

/// Resolves one track at a time against the destination catalog by walking
/// the fallback chain in order and stopping at the first non-empty result.
pub struct TrackResolver<'a, D: DestinationClient> {
    catalog: &'a D,
}

impl<'a, D: DestinationClient> TrackResolver<'a, D> {
    pub fn new(catalog: &'a D) -> Self {
        Self { catalog }
    }

    /// At most four search calls, sequential. The match is always the first
    /// candidate of the first query that returned anything; later, more
    /// permissive queries are never consulted once a query has hit.
    ///
    /// A search-client error is not a miss: it propagates and aborts the run.
    pub async fn resolve(&self, track: &TrackDescriptor) -> Result<ResolutionOutcome> {
        for query in fallback_queries(track) {
            tracing::debug!(
                "Searching catalog for {:?} with {} filter field(s)",
                track.title,
                query.field_count()
            );

            let candidates = self.catalog.search(&query).await?;
            if !candidates.is_empty() {
                tracing::debug!(
                    "Candidate ranks: {:?}",
                    candidates.iter().map(|c| c.rank).collect::<Vec<_>>()
                );
            }
            if let Some(hit) = candidates.first() {
                tracing::info!(
                    "Resolved {:?} to catalog id {} ({} - {} [{}])",
                    track.title,
                    hit.catalog_id,
                    hit.artist_name,
                    hit.title,
                    hit.album_title
                );
                return Ok(ResolutionOutcome::Resolved {
                    catalog_id: hit.catalog_id,
                });
            }
        }

        tracing::warn!("No catalog match for {:?} after all fallbacks", track.title);
        Ok(ResolutionOutcome::Unresolved(track.clone()))
    }
}
