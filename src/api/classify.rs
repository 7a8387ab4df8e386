//! Response classification: raw `/api/update` JSON to [`PollOutcome`].
//!
//! This is the ONLY place where update DTOs are converted to domain types.
//! Every response is parsed exactly once into a closed set of outcomes; the
//! poller never inspects raw JSON.

use serde_json::Value;
use smallvec::SmallVec;

use super::dto;
use crate::model::{AnimeMatch, AnimeType, LinkedIds, ReleaseUnit, SongInfo, TrackRole};

/// How much of an unrecognised payload ends up in the debug log.
const LOG_PREVIEW_CHARS: usize = 200;

/// Everything a poll can tell us.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Same track as last time
    NoUpdate,
    NotPlaying,
    /// The session is missing or expired
    LoginRequired,
    /// The account is known but not allowed to use the service
    UnapprovedUser,
    Miss {
        song: SongInfo,
        track_id: Option<String>,
        possible: Vec<AnimeMatch>,
    },
    Hit {
        song: SongInfo,
        track_id: Option<String>,
        certainty: i32,
        matches: Vec<AnimeMatch>,
        more_by_artist: Vec<AnimeMatch>,
    },
}

impl PollOutcome {
    /// Short name for logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoUpdate => "no-update",
            Self::NotPlaying => "not-playing",
            Self::LoginRequired => "login-required",
            Self::UnapprovedUser => "unapproved-user",
            Self::Miss { .. } => "miss",
            Self::Hit { .. } => "hit",
        }
    }
}

/// Classify a decoded response body.
///
/// Never fails: anything unrecognised is a [`PollOutcome::NoUpdate`].
pub fn classify(body: &Value) -> PollOutcome {
    classify_value(body, true)
}

fn classify_value(body: &Value, unwrap_string: bool) -> PollOutcome {
    match body {
        Value::String(tag) => match tag.as_str() {
            "NoUpdates" | "NoUpdate" => PollOutcome::NoUpdate,
            "NotPlaying" => PollOutcome::NotPlaying,
            "LoginRequired" => PollOutcome::LoginRequired,
            "UnapprovedUser" => PollOutcome::UnapprovedUser,
            // Double-encoded body: a JSON document inside a JSON string
            other if unwrap_string => match serde_json::from_str::<Value>(other) {
                Ok(inner) => classify_value(&inner, false),
                Err(_) => unrecognised(body),
            },
            _ => unrecognised(body),
        },
        Value::Object(map) => match map.get("NewSong") {
            Some(new_song) => classify_new_song(new_song),
            None => unrecognised(body),
        },
        _ => unrecognised(body),
    }
}

fn classify_new_song(payload: &Value) -> PollOutcome {
    let new_song = match serde_json::from_value::<dto::NewSong>(payload.clone()) {
        Ok(new_song) => new_song,
        Err(e) => {
            tracing::warn!(target: "api::classify", "Malformed NewSong payload: {}", e);
            return PollOutcome::NoUpdate;
        }
    };

    match new_song {
        dto::NewSong::Hit(hit) => {
            let (song, track_id) = to_song(hit.song_info);
            PollOutcome::Hit {
                song,
                track_id,
                certainty: hit.certainty,
                matches: to_matches(hit.anime_info),
                more_by_artist: to_matches(hit.more_with_artist),
            }
        }
        dto::NewSong::Miss(miss) => {
            let (song, track_id) = to_song(miss.song_info);
            PollOutcome::Miss {
                song,
                track_id,
                possible: to_matches(miss.possible_anime),
            }
        }
    }
}

fn unrecognised(body: &Value) -> PollOutcome {
    let preview: String = body.to_string().chars().take(LOG_PREVIEW_CHARS).collect();
    tracing::debug!(target: "api::classify", "Ignoring unrecognised update: {}", preview);
    PollOutcome::NoUpdate
}

fn to_song(info: dto::SongInfo) -> (SongInfo, Option<String>) {
    let track_id = info.spotify_id.filter(|id| !id.is_empty());
    let song = SongInfo {
        title: info.title,
        artists: info.artists,
        album_art_url: info.album_picture_url.filter(|url| !url.is_empty()),
    };
    (song, track_id)
}

/// Decode each entry on its own so one malformed entry is dropped, not the list.
fn to_matches(entries: Vec<Value>) -> Vec<AnimeMatch> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<dto::Anime>(entry) {
            Ok(anime) => Some(to_match(anime)),
            Err(e) => {
                tracing::warn!(target: "api::classify", "Skipping anime entry {}: {}", index, e);
                None
            }
        })
        .collect()
}

fn to_match(anime: dto::Anime) -> AnimeMatch {
    AnimeMatch {
        title: anime.title.unwrap_or_default(),
        native_title: anime.title_japanese.unwrap_or_default(),
        release: anime
            .anime_index
            .as_ref()
            .map(parse_release)
            .unwrap_or(ReleaseUnit::Unknown),
        track_role: anime
            .track_index
            .as_ref()
            .map(parse_track_role)
            .unwrap_or_default(),
        anime_type: anime.anime_type.as_deref().and_then(AnimeType::parse),
        cover_url: anime.image_url.filter(|url| !url.is_empty()),
        banner_url: anime.banner_image.filter(|url| !url.is_empty()),
        score: anime
            .mean_score
            .filter(|s| s.is_finite() && *s >= 0.0)
            .map(|s| s.round() as u32),
        linked_ids: anime.linked_ids.map(to_linked_ids).unwrap_or_default(),
        song_name: anime.song_name.unwrap_or_default(),
        ann_song_id: anime.ann_song_id,
        artist_ids: SmallVec::from_vec(anime.artist_ids),
        artist_names: anime.artist_names,
    }
}

fn to_linked_ids(ids: dto::LinkedIds) -> LinkedIds {
    let positive = |id: Option<i64>| id.filter(|n| *n > 0).and_then(|n| u32::try_from(n).ok());
    LinkedIds {
        myanimelist: positive(ids.myanimelist),
        anilist: positive(ids.anilist),
        anidb: positive(ids.anidb),
        kitsu: positive(ids.kitsu),
    }
}

/// Lowercase and strip separators so "TV Special", "TVSpecial" and
/// "tv-special" compare equal.
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split a tagged index into `(key, raw ordinal)`.
///
/// Accepts the object form (`{"Season": 2}`) and the legacy string form
/// (`"Season 2"`). Callers take the first key they recognise.
fn tagged_entries(value: &Value) -> Vec<(String, Option<u64>)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, v)| (normalize_key(key), ordinal_of(v)))
            .collect(),
        Value::String(text) => {
            let mut parts = text.split_whitespace();
            let Some(first) = parts.next() else {
                return Vec::new();
            };
            let rest: Vec<&str> = parts.collect();
            // "TV Special 2": the trailing token is the number if it parses
            let (name_tail, number) = match rest.last().and_then(|t| t.parse::<u64>().ok()) {
                Some(n) => (&rest[..rest.len() - 1], Some(n)),
                None => (&rest[..], None),
            };
            let key = std::iter::once(first)
                .chain(name_tail.iter().copied())
                .collect::<String>();
            vec![(normalize_key(&key), number)]
        }
        _ => Vec::new(),
    }
}

fn ordinal_of(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_release(value: &Value) -> ReleaseUnit {
    for (key, raw) in tagged_entries(value) {
        let n = ReleaseUnit::ordinal(raw);
        let unit = match key.as_str() {
            "season" => ReleaseUnit::Season(n),
            "movie" => ReleaseUnit::Movie(n),
            "ona" => ReleaseUnit::Ona(n),
            "ova" => ReleaseUnit::Ova(n),
            "tvspecial" => ReleaseUnit::TvSpecial(n),
            "special" => ReleaseUnit::Special(n),
            "musicvideo" | "mv" => ReleaseUnit::MusicVideo(n),
            _ => continue,
        };
        return unit;
    }
    ReleaseUnit::Unknown
}

fn parse_track_role(value: &Value) -> TrackRole {
    for (key, raw) in tagged_entries(value) {
        let number = raw.and_then(|n| u32::try_from(n).ok());
        let role = match key.as_str() {
            "opening" | "op" => TrackRole::Opening(number),
            "insert" | "insertsong" | "in" => TrackRole::Insert,
            "ending" | "ed" => TrackRole::Ending(number),
            _ => continue,
        };
        return role;
    }
    TrackRole::Unspecified
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{hit_payload, miss_payload};
    use serde_json::json;

    #[test]
    fn test_sentinels() {
        assert_eq!(classify(&json!("NoUpdates")), PollOutcome::NoUpdate);
        assert_eq!(classify(&json!("NotPlaying")), PollOutcome::NotPlaying);
        assert_eq!(classify(&json!("LoginRequired")), PollOutcome::LoginRequired);
        assert_eq!(classify(&json!("UnapprovedUser")), PollOutcome::UnapprovedUser);
    }

    #[test]
    fn test_unknown_shapes_are_no_update() {
        assert_eq!(classify(&json!("Banana")), PollOutcome::NoUpdate);
        assert_eq!(classify(&json!(42)), PollOutcome::NoUpdate);
        assert_eq!(classify(&json!(null)), PollOutcome::NoUpdate);
        assert_eq!(classify(&json!({"Other": {}})), PollOutcome::NoUpdate);
        assert_eq!(
            classify(&json!({"NewSong": {"Maybe": {}}})),
            PollOutcome::NoUpdate
        );
    }

    #[test]
    fn test_hit_conversion() {
        let outcome = classify(&hit_payload(85, 2, 1));
        let PollOutcome::Hit {
            song,
            track_id,
            certainty,
            matches,
            more_by_artist,
        } = outcome
        else {
            panic!("expected hit");
        };
        assert_eq!(song.title, "Gurenge");
        assert_eq!(song.artists, vec!["LiSA".to_string()]);
        assert_eq!(track_id.as_deref(), Some("track-1"));
        assert_eq!(certainty, 85);
        assert_eq!(matches.len(), 2);
        assert_eq!(more_by_artist.len(), 1);
        assert_eq!(matches[0].release, ReleaseUnit::Season(1));
        assert_eq!(matches[0].track_role, TrackRole::Opening(Some(1)));
        assert_eq!(matches[0].anime_type, Some(AnimeType::Tv));
        assert_eq!(matches[0].linked_ids.myanimelist, Some(38000));
    }

    #[test]
    fn test_miss_conversion() {
        let outcome = classify(&miss_payload(0));
        let PollOutcome::Miss { possible, track_id, .. } = outcome else {
            panic!("expected miss");
        };
        assert!(possible.is_empty());
        assert_eq!(track_id.as_deref(), Some("track-1"));
    }

    #[test]
    fn test_double_encoded_body() {
        let inner = hit_payload(70, 1, 0).to_string();
        let outcome = classify(&Value::String(inner));
        assert!(matches!(outcome, PollOutcome::Hit { certainty: 70, .. }));

        let sentinel = Value::String("\"NotPlaying\"".to_string());
        assert_eq!(classify(&sentinel), PollOutcome::NotPlaying);
    }

    #[test]
    fn test_double_encoding_unwrapped_once() {
        let twice = Value::String(Value::String("\"NotPlaying\"".to_string()).to_string());
        assert_eq!(classify(&twice), PollOutcome::NoUpdate);
    }

    #[test]
    fn test_bad_entries_skipped_individually() {
        let body = json!({"NewSong": {"Miss": {
            "song_info": {"title": "x", "artists": []},
            "possible_anime": [
                {"title": "Good"},
                {"title": ["not", "a", "string"]},
                {"title": "Also good"}
            ]
        }}});
        let PollOutcome::Miss { possible, .. } = classify(&body) else {
            panic!("expected miss");
        };
        let titles: Vec<_> = possible.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Good", "Also good"]);
    }

    #[test]
    fn test_release_parsing() {
        assert_eq!(parse_release(&json!({"Season": 2})), ReleaseUnit::Season(2));
        assert_eq!(parse_release(&json!({"Season": 0})), ReleaseUnit::Season(1));
        assert_eq!(parse_release(&json!({"Movie": null})), ReleaseUnit::Movie(1));
        assert_eq!(parse_release(&json!({"ONA": 3})), ReleaseUnit::Ona(3));
        assert_eq!(parse_release(&json!({"TV Special": 2})), ReleaseUnit::TvSpecial(2));
        assert_eq!(parse_release(&json!({"TVSpecial": 1})), ReleaseUnit::TvSpecial(1));
        assert_eq!(parse_release(&json!({"MV": 1})), ReleaseUnit::MusicVideo(1));
        assert_eq!(parse_release(&json!({"Bogus": 1})), ReleaseUnit::Unknown);
        assert_eq!(parse_release(&json!({})), ReleaseUnit::Unknown);
        assert_eq!(parse_release(&json!("Season 4")), ReleaseUnit::Season(4));
        assert_eq!(parse_release(&json!("Movie")), ReleaseUnit::Movie(1));
        assert_eq!(parse_release(&json!("TV Special 2")), ReleaseUnit::TvSpecial(2));
    }

    #[test]
    fn test_track_role_parsing() {
        assert_eq!(
            parse_track_role(&json!({"Opening": 3})),
            TrackRole::Opening(Some(3))
        );
        assert_eq!(parse_track_role(&json!({"Insert": 0})), TrackRole::Insert);
        assert_eq!(
            parse_track_role(&json!({"Ending": null})),
            TrackRole::Ending(None)
        );
        assert_eq!(parse_track_role(&json!({})), TrackRole::Unspecified);
        assert_eq!(
            parse_track_role(&json!("Ending 2")),
            TrackRole::Ending(Some(2))
        );
    }

    #[test]
    fn test_linked_ids_drop_non_positive() {
        let ids = to_linked_ids(dto::LinkedIds {
            myanimelist: Some(0),
            anilist: Some(-3),
            anidb: Some(77),
            kitsu: None,
        });
        assert_eq!(ids.myanimelist, None);
        assert_eq!(ids.anilist, None);
        assert_eq!(ids.anidb, Some(77));
    }

    #[test]
    fn test_outcome_kind() {
        assert_eq!(PollOutcome::NoUpdate.kind(), "no-update");
        assert_eq!(classify(&hit_payload(1, 0, 0)).kind(), "hit");
    }
}
