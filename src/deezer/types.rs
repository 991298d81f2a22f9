use serde::Deserialize;

use crate::ports::destination::CandidateTrack;

#[derive(Debug, Clone, Deserialize)]
pub struct DeezerTrack {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub rank: i64,
    pub artist: DeezerArtist,
    pub album: DeezerAlbum,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeezerArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeezerAlbum {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub data: Vec<DeezerTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeezerPlaylistEntry {
    pub id: u64,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistPage {
    #[serde(default)]
    pub data: Vec<DeezerPlaylistEntry>,
    #[serde(default)]
    pub next: Option<String>,
}

/// `POST /user/me/playlists` response. A body without an id is possible
/// when the token lacks the manage_library permission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPlaylist {
    #[serde(default)]
    pub id: Option<u64>,
}

/// Deezer reports failures as HTTP 200 bodies wrapping this object.
#[derive(Debug, Clone, Deserialize)]
pub struct DeezerErrorBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub code: i64,
}

impl From<DeezerTrack> for CandidateTrack {
    fn from(track: DeezerTrack) -> Self {
        CandidateTrack {
            catalog_id: track.id,
            title: track.title,
            artist_name: track.artist.name,
            album_title: track.album.title,
            rank: track.rank,
        }
    }
}
