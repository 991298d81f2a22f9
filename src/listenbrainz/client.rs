use std::time::Duration;

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Result, WrapErr};

use crate::listenbrainz::types::{CreatedForPlaylists, PlaylistEnvelope};
use crate::ports::source::{SourceClient, SourcePlaylistSummary, TrackDescriptor};

const API_BASE: &str = "https://api.listenbrainz.org/1";
const PAGE_SIZE: u32 = 50;

/// ListenBrainz API client, authenticated with a `Token` header.
pub struct ListenBrainzClient {
    user: String,
    token: String,
    client: reqwest::Client,
}

impl ListenBrainzClient {
    pub fn new(user: String, token: String) -> Self {
        Self {
            user,
            token,
            client: reqwest::Client::new(),
        }
    }

    async fn created_for_page(&self, offset: u32) -> Result<CreatedForPlaylists> {
        let url = format!("{API_BASE}/user/{}/playlists/createdfor", self.user);
        let response = self
            .client
            .get(&url)
            .query(&[("offset", offset), ("count", PAGE_SIZE)])
            .header("Authorization", format!("Token {}", self.token))
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?;

        response
            .json()
            .await
            .wrap_err("Failed to decode created-for playlists response")
    }
}

/// Converts one page of JSPF envelopes into decoupled summaries, parsing
/// each playlist date at the client edge.
fn page_summaries(page: CreatedForPlaylists) -> Result<Vec<SourcePlaylistSummary>> {
    page.playlists
        .into_iter()
        .map(|envelope| {
            let playlist = envelope.playlist;
            let date = DateTime::parse_from_rfc3339(&playlist.date)
                .wrap_err_with(|| format!("Invalid playlist date: {}", playlist.date))?
                .with_timezone(&Utc);
            Ok(SourcePlaylistSummary {
                title: playlist.title,
                date,
                identifier: playlist.identifier,
            })
        })
        .collect()
}

/// Offset of the next page, or `None` once `playlist_count` entries have
/// been received or the service stops returning any.
fn next_page_offset(offset: u32, received: u32, playlist_count: u32) -> Option<u32> {
    let offset = offset + received;
    if received == 0 || offset >= playlist_count {
        None
    } else {
        Some(offset)
    }
}

#[async_trait::async_trait]
impl SourceClient for ListenBrainzClient {
    async fn created_for_playlists(&self) -> Result<Vec<SourcePlaylistSummary>> {
        let mut summaries = Vec::new();
        let mut offset = Some(0);

        while let Some(current) = offset {
            let page = self.created_for_page(current).await?;
            let received = page.playlists.len() as u32;
            tracing::debug!(
                "Received created-for page: count={} offset={}",
                page.count,
                page.offset
            );

            let playlist_count = page.playlist_count;
            summaries.extend(page_summaries(page)?);
            offset = next_page_offset(current, received, playlist_count);
        }

        tracing::debug!("Fetched {} created-for playlist(s)", summaries.len());
        Ok(summaries)
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<TrackDescriptor>> {
        let url = format!("{API_BASE}/playlist/{playlist_id}");
        let envelope: PlaylistEnvelope = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.token))
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .wrap_err("Failed to decode playlist detail response")?;

        Ok(envelope
            .playlist
            .track
            .into_iter()
            .map(TrackDescriptor::from)
            .collect())
    }
}
