use color_eyre::eyre::Result;

use crate::query::SearchQuery;

/// One result from the destination catalog's search index, in the order the
/// index returned it. Never re-sorted or deduplicated by this tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTrack {
    pub catalog_id: u64,
    pub title: String,
    pub artist_name: String,
    pub album_title: String,
    pub rank: i64,
}

/// A playlist owned by the destination account.
#[derive(Debug, Clone)]
pub struct DestinationPlaylist {
    pub id: u64,
    pub title: String,
}

/// Port trait wrapping the destination-service capabilities used by business
/// logic.
///
/// Implementations live in `deezer::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DestinationClient: Send + Sync {
    async fn list_playlists(&self) -> Result<Vec<DestinationPlaylist>>;

    /// Creates an empty playlist. `None` means the service answered without a
    /// usable id; the caller decides whether that is fatal.
    async fn create_playlist(&self, title: &str) -> Result<Option<u64>>;

    async fn delete_playlist(&self, playlist_id: u64) -> Result<()>;

    /// Full-text catalog search. An empty result is not an error.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<CandidateTrack>>;

    /// Appends tracks to a playlist in the given order, in one bulk call.
    async fn add_tracks(&self, playlist_id: u64, track_ids: &[u64]) -> Result<()>;
}
