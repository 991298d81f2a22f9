use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr, bail};
use reqwest::Method;
use url::Url;

use crate::deezer::types::{CreatedPlaylist, DeezerErrorBody, PlaylistPage, SearchPage};
use crate::ports::destination::{CandidateTrack, DestinationClient, DestinationPlaylist};
use crate::query::SearchQuery;

const API_BASE: &str = "https://api.deezer.com/";

/// Deezer API client, authenticated with an `access_token` query parameter.
/// Write operations go through Deezer's `request_method` override parameter.
pub struct DeezerClient {
    access_token: String,
    base_url: Url,
    client: reqwest::Client,
}

impl DeezerClient {
    pub fn new(access_token: String) -> Result<Self> {
        Ok(Self {
            access_token,
            base_url: Url::parse(API_BASE).wrap_err("Invalid Deezer API base URL")?,
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.join(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_token", &self.access_token);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Deezer answers failures with HTTP 200 and an `error` object in the
    /// body, so every response is checked for that envelope before decoding.
    async fn call(&self, method: Method, url: Url) -> Result<serde_json::Value> {
        let value: serde_json::Value = self
            .client
            .request(method, url)
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .wrap_err("Failed to decode Deezer response")?;

        check_error(&value)?;
        Ok(value)
    }
}

/// Fails on Deezer's HTTP-200 error envelope. A body whose `error` value
/// does not match the documented shape is still an error.
fn check_error(value: &serde_json::Value) -> Result<()> {
    if let Some(error) = value.get("error") {
        match serde_json::from_value::<DeezerErrorBody>(error.clone()) {
            Ok(body) => bail!(
                "Deezer API error {} ({}): {}",
                body.code,
                body.kind,
                body.message
            ),
            Err(_) => bail!("Deezer API error: {error}"),
        }
    }
    Ok(())
}

/// Appends one page of playlists and yields the next page URL, if any.
fn collect_playlist_page(
    playlists: &mut Vec<DestinationPlaylist>,
    page: PlaylistPage,
) -> Result<Option<Url>> {
    playlists.extend(page.data.into_iter().map(|entry| DestinationPlaylist {
        id: entry.id,
        title: entry.title,
    }));

    page.next
        .map(|next_url| Url::parse(&next_url).wrap_err("Invalid Deezer pagination URL"))
        .transpose()
}

#[async_trait::async_trait]
impl DestinationClient for DeezerClient {
    async fn list_playlists(&self) -> Result<Vec<DestinationPlaylist>> {
        let mut playlists = Vec::new();
        let mut next = Some(self.endpoint("user/me/playlists", &[])?);

        while let Some(url) = next {
            let value = self.call(Method::GET, url).await?;
            let page: PlaylistPage = serde_json::from_value(value)
                .wrap_err("Failed to decode Deezer playlists page")?;
            next = collect_playlist_page(&mut playlists, page)?;
        }

        Ok(playlists)
    }

    async fn create_playlist(&self, title: &str) -> Result<Option<u64>> {
        let url = self.endpoint(
            "user/me/playlists",
            &[
                ("title", title.to_string()),
                ("request_method", "POST".to_string()),
            ],
        )?;
        let value = self.call(Method::POST, url).await?;
        let created: CreatedPlaylist = serde_json::from_value(value)
            .wrap_err("Failed to decode Deezer playlist creation response")?;

        Ok(created.id.filter(|id| *id != 0))
    }

    async fn delete_playlist(&self, playlist_id: u64) -> Result<()> {
        let url = self.endpoint(
            &format!("playlist/{playlist_id}"),
            &[("request_method", "DELETE".to_string())],
        )?;
        self.call(Method::GET, url).await?;
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<CandidateTrack>> {
        let q = query.to_query_string();
        tracing::debug!("Searching Deezer catalog: {q:?}");

        let url = self.endpoint("search", &[("q", q)])?;
        let value = self.call(Method::GET, url).await?;
        let page: SearchPage =
            serde_json::from_value(value).wrap_err("Failed to decode Deezer search response")?;

        Ok(page.data.into_iter().map(CandidateTrack::from).collect())
    }

    async fn add_tracks(&self, playlist_id: u64, track_ids: &[u64]) -> Result<()> {
        let songs = track_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = self.endpoint(
            &format!("playlist/{playlist_id}/tracks"),
            &[
                ("songs", songs),
                ("request_method", "POST".to_string()),
            ],
        )?;
        self.call(Method::POST, url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deezer::types::DeezerPlaylistEntry;
    use serde_json::json;

    #[test]
    fn passes_clean_responses_through() {
        assert!(check_error(&json!({ "data": [], "total": 0 })).is_ok());
        assert!(check_error(&json!(true)).is_ok());
    }

    #[test]
    fn rejects_error_envelope() {
        let body = json!({
            "error": { "type": "OAuthException", "message": "Invalid token", "code": 300 }
        });

        let err = check_error(&body).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("OAuthException"));
        assert!(message.contains("300"));
        assert!(message.contains("Invalid token"));
    }

    #[test]
    fn rejects_malformed_error_envelope() {
        let err = check_error(&json!({ "error": "nope" })).unwrap_err();

        assert!(err.to_string().contains("Deezer API error"));
    }

    #[test]
    fn accumulates_playlists_across_pages() {
        let mut playlists = Vec::new();

        let next = collect_playlist_page(
            &mut playlists,
            PlaylistPage {
                data: vec![DeezerPlaylistEntry {
                    id: 1,
                    title: "First".into(),
                }],
                next: Some("https://api.deezer.com/user/me/playlists?index=25".into()),
            },
        )
        .unwrap();
        assert_eq!(next.unwrap().as_str(), "https://api.deezer.com/user/me/playlists?index=25");

        let next = collect_playlist_page(
            &mut playlists,
            PlaylistPage {
                data: vec![DeezerPlaylistEntry {
                    id: 2,
                    title: "Second".into(),
                }],
                next: None,
            },
        )
        .unwrap();
        assert!(next.is_none());

        let ids: Vec<u64> = playlists.iter().map(|playlist| playlist.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn rejects_invalid_pagination_url() {
        let mut playlists = Vec::new();
        let page = PlaylistPage {
            data: vec![],
            next: Some("not a url".into()),
        };

        assert!(collect_playlist_page(&mut playlists, page).is_err());
    }
}
