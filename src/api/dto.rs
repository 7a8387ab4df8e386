//! Backend API Data Transfer Objects
//!
//! These types match what `GET /api/update` returns inside the `NewSong`
//! variant. Everything else about the response (sentinel strings, double
//! encoding, unknown shapes) is handled by the classifier before these are
//! touched.
//! DO NOT use these types outside the api module - convert to domain types.
//!
//! Example response:
//! ```json
//! {
//!   "NewSong": {
//!     "Hit": {
//!       "song_info": {"title": "Gurenge", "artists": ["LiSA"], "album_picture_url": "https://..."},
//!       "certainty": 92,
//!       "anime_info": [{
//!         "title": "Demon Slayer",
//!         "title_japanese": "鬼滅の刃",
//!         "anime_index": {"Season": 1},
//!         "track_index": {"Opening": 1},
//!         "anime_type": "TV",
//!         "image_url": "https://...",
//!         "linked_ids": {"myanimelist": 38000, "anilist": 101922}
//!       }],
//!       "more_with_artist": []
//!     }
//!   }
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;

/// Payload of the `NewSong` response variant
#[derive(Debug, Clone, Deserialize)]
pub enum NewSong {
    Hit(SongHit),
    Miss(SongMiss),
}

/// A confident match for the playing track
#[derive(Debug, Clone, Deserialize)]
pub struct SongHit {
    pub song_info: SongInfo,
    /// Match certainty in percent
    pub certainty: i32,
    /// Kept as raw values so one bad entry doesn't sink the whole list
    #[serde(default)]
    pub anime_info: Vec<Value>,
    #[serde(default)]
    pub more_with_artist: Vec<Value>,
}

/// No confident match, only candidates
#[derive(Debug, Clone, Deserialize)]
pub struct SongMiss {
    pub song_info: SongInfo,
    #[serde(default)]
    pub possible_anime: Vec<Value>,
}

/// The playing track as the backend describes it
#[derive(Debug, Clone, Deserialize)]
pub struct SongInfo {
    pub title: String,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default, alias = "album_art_url")]
    pub album_picture_url: Option<String>,
    /// Streaming-service track id
    #[serde(default, alias = "id", alias = "track_id")]
    pub spotify_id: Option<String>,
}

/// One anime entry
#[derive(Debug, Clone, Deserialize)]
pub struct Anime {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_japanese: Option<String>,
    /// `{"Season": 2}`, `{"Movie": null}`, or the legacy string form `"Season 2"`
    #[serde(default)]
    pub anime_index: Option<Value>,
    /// `{"Opening": 3}`, `{"Insert": 0}`, or the legacy string form `"Ending 2"`
    #[serde(default)]
    pub track_index: Option<Value>,
    #[serde(default)]
    pub anime_type: Option<String>,
    #[serde(default, alias = "cover_image")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub banner_image: Option<String>,
    /// Sometimes sent as a float
    #[serde(default)]
    pub mean_score: Option<f64>,
    #[serde(default)]
    pub linked_ids: Option<LinkedIds>,
    #[serde(default)]
    pub song_name: Option<String>,
    #[serde(default)]
    pub ann_song_id: Option<i32>,
    #[serde(default)]
    pub artist_ids: Vec<i32>,
    #[serde(default)]
    pub artist_names: Vec<String>,
}

/// External site ids, any subset present
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkedIds {
    pub myanimelist: Option<i64>,
    pub anilist: Option<i64>,
    pub anidb: Option<i64>,
    pub kitsu: Option<i64>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the backend sends.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_hit() {
        let json = r#"{
            "Hit": {
                "song_info": {"title": "Gurenge", "artists": ["LiSA"], "album_picture_url": "https://img/a.png", "spotify_id": "sp1"},
                "certainty": 92,
                "anime_info": [{"title": "Demon Slayer"}],
                "more_with_artist": []
            }
        }"#;
        let parsed: NewSong = serde_json::from_str(json).unwrap();
        let NewSong::Hit(hit) = parsed else {
            panic!("expected hit");
        };
        assert_eq!(hit.certainty, 92);
        assert_eq!(hit.song_info.spotify_id.as_deref(), Some("sp1"));
        assert_eq!(hit.anime_info.len(), 1);
    }

    #[test]
    fn test_parse_miss_without_lists() {
        let json = r#"{"Miss": {"song_info": {"title": "Unknown", "artists": []}}}"#;
        let parsed: NewSong = serde_json::from_str(json).unwrap();
        let NewSong::Miss(miss) = parsed else {
            panic!("expected miss");
        };
        assert!(miss.possible_anime.is_empty());
        assert!(miss.song_info.album_picture_url.is_none());
    }

    #[test]
    fn test_song_id_aliases() {
        let json = r#"{"title": "x", "id": "abc"}"#;
        let song: SongInfo = serde_json::from_str(json).unwrap();
        assert_eq!(song.spotify_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_anime_full_entry() {
        let json = r#"{
            "title": "Bocchi the Rock!",
            "title_japanese": "ぼっち・ざ・ろっく！",
            "anime_index": {"Season": 1},
            "track_index": {"Ending": 2},
            "anime_type": "TV",
            "cover_image": "https://img/b.png",
            "mean_score": 88.4,
            "linked_ids": {"myanimelist": 47917, "kitsu": null},
            "song_name": "Distortion!!",
            "ann_song_id": 12345,
            "artist_ids": [7, 8],
            "artist_names": ["Kessoku Band"]
        }"#;
        let anime: Anime = serde_json::from_str(json).unwrap();
        assert_eq!(anime.image_url.as_deref(), Some("https://img/b.png"));
        assert_eq!(anime.artist_ids, vec![7, 8]);
        let ids = anime.linked_ids.unwrap();
        assert_eq!(ids.myanimelist, Some(47917));
        assert!(ids.kitsu.is_none());
    }

    #[test]
    fn test_anime_rejects_wrong_types() {
        let json = r#"{"title": 42}"#;
        assert!(serde_json::from_str::<Anime>(json).is_err());
    }
}
