use crate::sync::SyncError;

/// Everything a run needs, collected from CLI/environment before any
/// network call is made. Immutable for the duration of the run.
#[derive(Debug, Clone)]
pub struct Config {
    pub listenbrainz_user: String,
    pub listenbrainz_token: String,
    pub deezer_access_token: String,
    pub destination_playlist_title: String,
}

impl Config {
    /// Rejects blank values; clap already enforces presence, but an empty
    /// environment variable still parses as an empty string.
    pub fn new(
        listenbrainz_user: String,
        listenbrainz_token: String,
        deezer_access_token: String,
        destination_playlist_title: String,
    ) -> Result<Self, SyncError> {
        let config = Self {
            listenbrainz_user,
            listenbrainz_token,
            deezer_access_token,
            destination_playlist_title,
        };

        for (name, value) in [
            ("LISTEN_BRAINZ_USER", &config.listenbrainz_user),
            ("LISTEN_BRAINZ_TOKEN", &config.listenbrainz_token),
            ("DEEZER_ACCESS_TOKEN", &config.deezer_access_token),
            ("DEEZER_PLAYLIST_NAME", &config.destination_playlist_title),
        ] {
            if value.trim().is_empty() {
                return Err(SyncError::Configuration(name));
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_configuration() {
        let config = Config::new(
            "tester".into(),
            "lb-token".into(),
            "dz-token".into(),
            "My Weekly".into(),
        )
        .unwrap();

        assert_eq!(config.listenbrainz_user, "tester");
        assert_eq!(config.destination_playlist_title, "My Weekly");
    }

    #[test]
    fn rejects_blank_token() {
        let err = Config::new(
            "tester".into(),
            "   ".into(),
            "dz-token".into(),
            "My Weekly".into(),
        )
        .unwrap_err();

        assert!(matches!(err, SyncError::Configuration("LISTEN_BRAINZ_TOKEN")));
    }

    #[test]
    fn rejects_empty_playlist_name() {
        let err = Config::new(
            "tester".into(),
            "lb-token".into(),
            "dz-token".into(),
            String::new(),
        )
        .unwrap_err();

        assert!(matches!(err, SyncError::Configuration("DEEZER_PLAYLIST_NAME")));
    }
}
