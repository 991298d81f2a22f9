use std::sync::LazyLock;

use regex::Regex;

use crate::ports::source::TrackDescriptor;

/// Splits creator fields like "A feat. B" or "A & B" into separate artists.
static CREATOR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)feat[.:]?|&").expect("invalid creator separator regex"));

/// A structured catalog search. Fields left as `None`/empty are simply not
/// part of the filter; the query never mutates the descriptor it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub creators: Vec<String>,
    pub album: Option<String>,
}

impl SearchQuery {
    /// Number of filter kinds present (title / creators / album).
    pub fn field_count(&self) -> usize {
        usize::from(self.title.is_some())
            + usize::from(!self.creators.is_empty())
            + usize::from(self.album.is_some())
    }

    /// Renders the free-text query string, one `artist:` filter per creator.
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(title) = &self.title {
            parts.push(format!("track:\"{title}\""));
        }
        for creator in &self.creators {
            parts.push(format!("artist:\"{creator}\""));
        }
        if let Some(album) = &self.album {
            parts.push(format!("album:\"{album}\""));
        }
        parts.join(" ")
    }
}

/// Splits a single creator field on "feat"/"&" separators, trimming each
/// token and dropping empties. A token without separators passes through
/// unchanged, so applying this to already-split creators is a no-op.
pub fn split_creators(raw: &str) -> Vec<String> {
    CREATOR_SEPARATOR
        .split(raw)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

fn normalized_creators(track: &TrackDescriptor) -> Vec<String> {
    track
        .creators
        .iter()
        .flat_map(|creator| split_creators(creator))
        .collect()
}

/// The fixed fallback chain for one track, most specific first:
/// 1. title + creators + album
/// 2. title + creators
/// 3. title + album
/// 4. title only
///
/// Always exactly four entries; the title is mandatory on every descriptor so
/// no query is ever empty. Creator splitting happens before the first query
/// is assembled.
pub fn fallback_queries(track: &TrackDescriptor) -> [SearchQuery; 4] {
    let creators = normalized_creators(track);
    let title = Some(track.title.clone());

    [
        SearchQuery {
            title: title.clone(),
            creators: creators.clone(),
            album: track.album.clone(),
        },
        SearchQuery {
            title: title.clone(),
            creators,
            album: None,
        },
        SearchQuery {
            title: title.clone(),
            creators: Vec::new(),
            album: track.album.clone(),
        },
        SearchQuery {
            title,
            creators: Vec::new(),
            album: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(title: &str, creators: &[&str], album: Option<&str>) -> TrackDescriptor {
        TrackDescriptor {
            title: title.into(),
            creators: creators.iter().map(|c| c.to_string()).collect(),
            album: album.map(String::from),
        }
    }

    #[test]
    fn splits_on_feat() {
        assert_eq!(split_creators("Alice feat Bob"), vec!["Alice", "Bob"]);
        assert_eq!(split_creators("Alice feat. Bob"), vec!["Alice", "Bob"]);
        assert_eq!(split_creators("Alice feat: Bob"), vec!["Alice", "Bob"]);
    }

    #[test]
    fn splits_on_feat_case_insensitive() {
        assert_eq!(split_creators("Alice FEAT. Bob"), vec!["Alice", "Bob"]);
        assert_eq!(split_creators("Alice Feat Bob"), vec!["Alice", "Bob"]);
    }

    #[test]
    fn splits_on_ampersand() {
        assert_eq!(split_creators("Alice & Bob"), vec!["Alice", "Bob"]);
    }

    #[test]
    fn splits_multiple_separators() {
        assert_eq!(
            split_creators("Alice & Bob feat. Carol"),
            vec!["Alice", "Bob", "Carol"]
        );
    }

    #[test]
    fn split_trims_and_drops_empty_tokens() {
        assert_eq!(split_creators("Alice feat. "), vec!["Alice"]);
        assert_eq!(split_creators(" & Bob"), vec!["Bob"]);
    }

    #[test]
    fn split_passes_plain_names_through() {
        assert_eq!(split_creators("Alice"), vec!["Alice"]);
    }

    #[test]
    fn split_is_idempotent() {
        let once = split_creators("Alice feat. Bob & Carol");
        let twice: Vec<String> = once.iter().flat_map(|c| split_creators(c)).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn builds_exactly_four_queries_in_relaxation_order() {
        let track = descriptor("Song", &["Alice"], Some("Album"));
        let queries = fallback_queries(&track);

        assert_eq!(queries.len(), 4);
        assert_eq!(
            queries[0],
            SearchQuery {
                title: Some("Song".into()),
                creators: vec!["Alice".into()],
                album: Some("Album".into()),
            }
        );
        assert_eq!(
            queries[1],
            SearchQuery {
                title: Some("Song".into()),
                creators: vec!["Alice".into()],
                album: None,
            }
        );
        assert_eq!(
            queries[2],
            SearchQuery {
                title: Some("Song".into()),
                creators: Vec::new(),
                album: Some("Album".into()),
            }
        );
        assert_eq!(
            queries[3],
            SearchQuery {
                title: Some("Song".into()),
                creators: Vec::new(),
                album: None,
            }
        );
    }

    #[test]
    fn field_count_is_monotonically_non_increasing() {
        let track = descriptor("Song", &["Alice & Bob"], Some("Album"));
        let queries = fallback_queries(&track);

        for pair in queries.windows(2) {
            assert!(pair[0].field_count() >= pair[1].field_count());
        }
        assert_eq!(queries[0].field_count(), 3);
        assert_eq!(queries[3].field_count(), 1);
    }

    #[test]
    fn first_query_contains_every_split_creator() {
        let track = descriptor("Song", &["Alice feat. Bob", "Carol"], None);
        let queries = fallback_queries(&track);

        assert_eq!(queries[0].creators, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn title_is_always_present() {
        let track = descriptor("Song", &["Alice"], None);
        for query in fallback_queries(&track) {
            assert_eq!(query.title.as_deref(), Some("Song"));
        }
    }

    #[test]
    fn renders_full_query_string() {
        let query = SearchQuery {
            title: Some("Song".into()),
            creators: vec!["Alice".into(), "Bob".into()],
            album: Some("Album".into()),
        };
        assert_eq!(
            query.to_query_string(),
            "track:\"Song\" artist:\"Alice\" artist:\"Bob\" album:\"Album\""
        );
    }

    #[test]
    fn renders_title_only_query_string() {
        let query = SearchQuery {
            title: Some("Song".into()),
            ..SearchQuery::default()
        };
        assert_eq!(query.to_query_string(), "track:\"Song\"");
    }
}
