use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;

/// One track as described by the source playlist. Only loose text metadata
/// is available; there is no identifier shared with the destination catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub title: String,
    pub creators: Vec<String>,
    pub album: Option<String>,
}

/// Decoupled summary of a playlist visible in the source account.
#[derive(Debug, Clone)]
pub struct SourcePlaylistSummary {
    pub title: String,
    pub date: DateTime<Utc>,
    /// Opaque reference ending in `/playlist/<id>`.
    pub identifier: String,
}

/// Port trait wrapping the source-service capabilities used by business logic.
///
/// Implementations live in `listenbrainz::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SourceClient: Send + Sync {
    /// Playlists generated for the configured account.
    async fn created_for_playlists(&self) -> Result<Vec<SourcePlaylistSummary>>;

    /// Full track list of one playlist, in playlist order.
    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<TrackDescriptor>>;
}
