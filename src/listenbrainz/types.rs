use serde::Deserialize;

use crate::ports::source::TrackDescriptor;

/// One page of `GET /user/{user}/playlists/createdfor`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedForPlaylists {
    #[serde(default)]
    pub playlists: Vec<PlaylistEnvelope>,
    pub playlist_count: u32,
    pub count: u32,
    pub offset: u32,
}

/// JSPF wraps every playlist in a one-field object. The same envelope is
/// returned by `GET /playlist/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistEnvelope {
    pub playlist: JspfPlaylist,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JspfPlaylist {
    pub title: String,
    /// RFC 3339 timestamp.
    pub date: String,
    pub identifier: String,
    #[serde(default)]
    pub track: Vec<JspfTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JspfTrack {
    pub title: String,
    pub creator: CreatorField,
    #[serde(default)]
    pub album: Option<String>,
}

/// JSPF serializes a single creator as a bare string and multiple creators
/// as an array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CreatorField {
    One(String),
    Many(Vec<String>),
}

impl CreatorField {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            CreatorField::One(creator) => vec![creator],
            CreatorField::Many(creators) => creators,
        }
    }
}

impl From<JspfTrack> for TrackDescriptor {
    fn from(track: JspfTrack) -> Self {
        TrackDescriptor {
            title: track.title,
            creators: track.creator.into_vec(),
            album: track.album.filter(|album| !album.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_creator_track() {
        let json = r#"{
            "title": "Song",
            "creator": "Alice feat. Bob",
            "album": "Album"
        }"#;

        let track: JspfTrack = serde_json::from_str(json).unwrap();
        let descriptor = TrackDescriptor::from(track);

        assert_eq!(descriptor.title, "Song");
        assert_eq!(descriptor.creators, vec!["Alice feat. Bob"]);
        assert_eq!(descriptor.album.as_deref(), Some("Album"));
    }

    #[test]
    fn parses_creator_array() {
        let json = r#"{
            "title": "Song",
            "creator": ["Alice", "Bob"]
        }"#;

        let track: JspfTrack = serde_json::from_str(json).unwrap();
        let descriptor = TrackDescriptor::from(track);

        assert_eq!(descriptor.creators, vec!["Alice", "Bob"]);
        assert_eq!(descriptor.album, None);
    }

    #[test]
    fn empty_album_becomes_none() {
        let json = r#"{ "title": "Song", "creator": "Alice", "album": "" }"#;

        let track: JspfTrack = serde_json::from_str(json).unwrap();
        let descriptor = TrackDescriptor::from(track);

        assert_eq!(descriptor.album, None);
    }

    #[test]
    fn parses_created_for_page() {
        let json = r#"{
            "playlists": [
                {
                    "playlist": {
                        "title": "Weekly Exploration for tester",
                        "date": "2026-01-19T00:00:00+00:00",
                        "identifier": "https://listenbrainz.org/playlist/abc",
                        "track": []
                    }
                }
            ],
            "playlist_count": 12,
            "count": 25,
            "offset": 0
        }"#;

        let page: CreatedForPlaylists = serde_json::from_str(json).unwrap();

        assert_eq!(page.playlist_count, 12);
        assert_eq!(page.playlists.len(), 1);
        assert_eq!(
            page.playlists[0].playlist.identifier,
            "https://listenbrainz.org/playlist/abc"
        );
    }
}
