use std::sync::LazyLock;

use color_eyre::eyre::{Report, Result, WrapErr};
use regex::Regex;
use thiserror::Error;

use crate::ports::destination::DestinationClient;
use crate::ports::source::{SourceClient, SourcePlaylistSummary, TrackDescriptor};
use crate::resolver::{ResolutionOutcome, TrackResolver};

/// Source playlists are selected by this title substring.
pub const SOURCE_PLAYLIST_MARKER: &str = "Weekly Exploration";

static PLAYLIST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"playlist/([^/]+)$").expect("invalid playlist id regex"));

/// Fatal run failures. An unresolved track is not in this taxonomy; it is a
/// normal outcome reported in the [`SyncReport`].
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("required configuration value `{0}` is missing or empty")]
    Configuration(&'static str),

    #[error("no source playlist title contains {0:?}")]
    NoCandidatePlaylist(String),

    #[error("source playlist identifier {0:?} has no playlist/<id> segment")]
    MalformedIdentifier(String),

    #[error("destination service did not return an id for the created playlist")]
    MissingDestinationId,
}

/// Outcome of a successful run, for operator visibility.
#[derive(Debug)]
pub struct SyncReport {
    pub source_playlist: String,
    pub destination_playlist_id: u64,
    /// Resolved catalog ids, in source-track order.
    pub resolved: Vec<u64>,
    /// Tracks with no catalog match after the full fallback chain.
    pub unresolved: Vec<TrackDescriptor>,
}

impl SyncReport {
    pub fn total_tracks(&self) -> usize {
        self.resolved.len() + self.unresolved.len()
    }
}

/// Pulls the playlist id out of a reference like
/// `https://listenbrainz.org/playlist/<id>`.
pub fn extract_playlist_id(identifier: &str) -> Result<String, SyncError> {
    PLAYLIST_ID
        .captures(identifier)
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| SyncError::MalformedIdentifier(identifier.to_string()))
}

/// End-to-end run coordination: select the source playlist, fetch its
/// tracks, recreate the destination playlist, resolve every track in order,
/// and commit the matches in one bulk call.
///
/// Everything is sequential by design; each fallback query depends on
/// knowing the previous one missed, and sequential track processing keeps
/// the external call volume predictable.
pub struct PlaylistSyncService<S: SourceClient, D: DestinationClient> {
    source: S,
    destination: D,
    destination_title: String,
}

impl<S: SourceClient, D: DestinationClient> PlaylistSyncService<S, D> {
    pub fn new(source: S, destination: D, destination_title: String) -> Self {
        Self {
            source,
            destination,
            destination_title,
        }
    }

    pub async fn run(&self) -> Result<SyncReport> {
        let summary = self.select_source_playlist().await?;
        tracing::info!(
            "Selected source playlist {:?} from {}",
            summary.title,
            summary.date
        );

        let source_id = extract_playlist_id(&summary.identifier)?;
        let tracks = self
            .source
            .playlist_tracks(&source_id)
            .await
            .wrap_err("Failed to fetch source playlist detail")?;
        tracing::info!("Source playlist has {} track(s)", tracks.len());

        let destination_id = self.prepare_destination().await?;

        let (resolved, unresolved) = self.resolve_tracks(&tracks).await?;
        tracing::info!("Resolved {} of {} track(s)", resolved.len(), tracks.len());

        self.destination
            .add_tracks(destination_id, &resolved)
            .await
            .wrap_err("Failed to commit resolved tracks to the destination playlist")?;

        Ok(SyncReport {
            source_playlist: summary.title,
            destination_playlist_id: destination_id,
            resolved,
            unresolved,
        })
    }

    /// Most recent marker-matching playlist wins; on equal dates the
    /// earliest element of the filtered sequence is kept.
    async fn select_source_playlist(&self) -> Result<SourcePlaylistSummary> {
        let playlists = self
            .source
            .created_for_playlists()
            .await
            .wrap_err("Failed to list source playlists")?;

        let mut best: Option<SourcePlaylistSummary> = None;
        for candidate in playlists
            .into_iter()
            .filter(|playlist| playlist.title.contains(SOURCE_PLAYLIST_MARKER))
        {
            match &best {
                Some(current) if candidate.date <= current.date => {}
                _ => best = Some(candidate),
            }
        }

        best.ok_or_else(|| {
            Report::new(SyncError::NoCandidatePlaylist(
                SOURCE_PLAYLIST_MARKER.to_string(),
            ))
        })
    }

    /// Replace semantics: an existing playlist with the configured title is
    /// deleted before a fresh empty one is created. Every run is a full
    /// resync, never an incremental merge.
    async fn prepare_destination(&self) -> Result<u64> {
        let existing = self
            .destination
            .list_playlists()
            .await
            .wrap_err("Failed to list destination playlists")?;

        if let Some(previous) = existing
            .into_iter()
            .find(|playlist| playlist.title == self.destination_title)
        {
            tracing::info!(
                "Deleting existing destination playlist {:?} (id {})",
                previous.title,
                previous.id
            );
            self.destination
                .delete_playlist(previous.id)
                .await
                .wrap_err("Failed to delete existing destination playlist")?;
        }

        let created = self
            .destination
            .create_playlist(&self.destination_title)
            .await
            .wrap_err("Failed to create destination playlist")?;

        created.ok_or_else(|| Report::new(SyncError::MissingDestinationId))
    }

    async fn resolve_tracks(
        &self,
        tracks: &[TrackDescriptor],
    ) -> Result<(Vec<u64>, Vec<TrackDescriptor>)> {
        let resolver = TrackResolver::new(&self.destination);
        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();

        for track in tracks {
            match resolver.resolve(track).await? {
                ResolutionOutcome::Resolved { catalog_id } => resolved.push(catalog_id),
                ResolutionOutcome::Unresolved(descriptor) => unresolved.push(descriptor),
            }
        }

        Ok((resolved, unresolved))
    }
}
