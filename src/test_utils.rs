//! Test utilities and fixtures for anisong-radar tests.
//!
//! Domain fixtures (`mock_*`) and backend JSON payloads (`*_payload`) shaped
//! like real `/api/update` responses.
//!
//! # Example
//!
//! ```ignore
//! use anisong_radar::test_utils::{hit_payload, mock_song};
//!
//! let outcome = classify(&hit_payload(92, 1, 0));
//! ```

use serde_json::{Value, json};
use smallvec::smallvec;

use crate::model::{AnimeMatch, AnimeType, LinkedIds, ReleaseUnit, SongInfo, TrackRole};

/// A playing song with artwork.
pub fn mock_song() -> SongInfo {
    SongInfo {
        title: "Gurenge".to_string(),
        artists: vec!["LiSA".to_string()],
        album_art_url: Some("https://img.example.com/gurenge.jpg".to_string()),
    }
}

/// An opening-theme match with every field populated.
pub fn mock_anime_match(title: &str) -> AnimeMatch {
    AnimeMatch {
        title: title.to_string(),
        native_title: "鬼滅の刃".to_string(),
        release: ReleaseUnit::Season(1),
        track_role: TrackRole::Opening(Some(1)),
        anime_type: Some(AnimeType::Tv),
        cover_url: Some(format!("https://img.example.com/{title}.jpg")),
        banner_url: None,
        score: Some(85),
        linked_ids: LinkedIds {
            myanimelist: Some(38000),
            anilist: Some(101922),
            anidb: None,
            kitsu: None,
        },
        song_name: "Gurenge".to_string(),
        ann_song_id: Some(9001),
        artist_ids: smallvec![42],
        artist_names: vec!["LiSA".to_string()],
    }
}

/// One anime entry as the backend sends it.
pub fn anime_json(title: &str) -> Value {
    json!({
        "title": title,
        "title_japanese": "鬼滅の刃",
        "anime_index": {"Season": 1},
        "track_index": {"Opening": 1},
        "anime_type": "TV",
        "image_url": format!("https://img.example.com/{title}.jpg"),
        "mean_score": 85,
        "linked_ids": {"myanimelist": 38000, "anilist": 101922},
        "song_name": "Gurenge",
        "ann_song_id": 9001,
        "artist_ids": [42],
        "artist_names": ["LiSA"]
    })
}

fn song_json() -> Value {
    json!({
        "title": "Gurenge",
        "artists": ["LiSA"],
        "album_picture_url": "https://img.example.com/gurenge.jpg",
        "spotify_id": "track-1"
    })
}

fn entries(prefix: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| anime_json(&format!("{prefix} {i}")))
        .collect()
}

/// A `NewSong.Hit` response.
pub fn hit_payload(certainty: i32, matches: usize, more_by_artist: usize) -> Value {
    json!({
        "NewSong": {
            "Hit": {
                "song_info": song_json(),
                "certainty": certainty,
                "anime_info": entries("Match", matches),
                "more_with_artist": entries("More", more_by_artist)
            }
        }
    })
}

/// A `NewSong.Miss` response.
pub fn miss_payload(possible: usize) -> Value {
    json!({
        "NewSong": {
            "Miss": {
                "song_info": song_json(),
                "possible_anime": entries("Maybe", possible)
            }
        }
    })
}
