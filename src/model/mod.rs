//! Core domain models for now-playing anime matches.
//!
//! Defines the entities the rest of the app works with: [`SongInfo`],
//! [`AnimeMatch`] and its tagged indices ([`ReleaseUnit`], [`TrackRole`]),
//! plus the per-poll [`PlaybackState`].
//!
//! These are OUR types. Backend responses are decoded into `api::dto` types
//! first and converted here by the classifier, so wire format drift stays in
//! the `api` module.

mod state;

use std::fmt;

use smallvec::SmallVec;

pub use state::{
    CONFIRM_CERTAINTY_CEILING, MORE_BY_ARTIST_LABEL, NO_MATCHES_LABEL, NOT_PLAYING_TITLE,
    POSSIBLE_MATCHES_LABEL, PlaybackState, UNAPPROVED_DETAIL, UNAPPROVED_TITLE, certainty_label,
};

/// The track currently playing on the user's account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongInfo {
    /// Track title
    pub title: String,
    /// Artist names in credit order
    pub artists: Vec<String>,
    /// Album artwork URL (absent for synthetic states like "not playing")
    pub album_art_url: Option<String>,
}

impl SongInfo {
    /// Build a synthetic song panel that carries a message instead of a track.
    pub fn message(title: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            title: title.into(),
            artists: detail.into_iter().collect(),
            album_art_url: None,
        }
    }

    /// Artists joined for display ("A, B, C").
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

/// Which release unit of a franchise an entry belongs to, with its ordinal.
///
/// Ordinals are always >= 1; the backend sends 0 or null for "first".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseUnit {
    Season(u32),
    Movie(u32),
    Ona(u32),
    Ova(u32),
    TvSpecial(u32),
    Special(u32),
    MusicVideo(u32),
    /// No recognised release key was present
    Unknown,
}

impl ReleaseUnit {
    /// Normalize a raw ordinal: zero or missing means the first unit.
    pub fn ordinal(raw: Option<u64>) -> u32 {
        match raw {
            Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => 1,
        }
    }
}

impl fmt::Display for ReleaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Season(n) => write!(f, "Season {n}"),
            Self::Movie(n) => write!(f, "Movie {n}"),
            Self::Ona(n) => write!(f, "ONA {n}"),
            Self::Ova(n) => write!(f, "OVA {n}"),
            Self::TvSpecial(n) => write!(f, "TV Special {n}"),
            Self::Special(n) => write!(f, "Special {n}"),
            Self::MusicVideo(n) => write!(f, "Music Video {n}"),
            Self::Unknown => f.write_str("wacky season"),
        }
    }
}

/// What role the matched song plays in the anime.
///
/// Opening/ending numbers can be missing even when the role is known; they
/// render with an empty suffix in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackRole {
    Opening(Option<u32>),
    Insert,
    Ending(Option<u32>),
    #[default]
    Unspecified,
}

impl fmt::Display for TrackRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opening(n) => write!(f, "Opening {}", optional_number(*n)),
            Self::Insert => f.write_str("Insert Song"),
            Self::Ending(n) => write!(f, "Ending {}", optional_number(*n)),
            Self::Unspecified => Ok(()),
        }
    }
}

fn optional_number(n: Option<u32>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

/// Broadcast format of an anime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimeType {
    Tv,
    Movie,
    Ova,
    Ona,
}

impl AnimeType {
    /// Parse the backend's type string. The backend has shipped the "Moive"
    /// typo before, so it is accepted too.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "TV" | "Tv" | "tv" => Some(Self::Tv),
            "Movie" | "Moive" | "movie" => Some(Self::Movie),
            "OVA" | "Ova" | "ova" => Some(Self::Ova),
            "ONA" | "Ona" | "ona" => Some(Self::Ona),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tv => "TV",
            Self::Movie => "Movie",
            Self::Ova => "OVA",
            Self::Ona => "ONA",
        }
    }
}

impl fmt::Display for AnimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers of the same anime on external tracking sites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkedIds {
    pub myanimelist: Option<u32>,
    pub anilist: Option<u32>,
    pub anidb: Option<u32>,
    pub kitsu: Option<u32>,
}

impl LinkedIds {
    pub fn is_empty(&self) -> bool {
        self.myanimelist.is_none()
            && self.anilist.is_none()
            && self.anidb.is_none()
            && self.kitsu.is_none()
    }
}

/// One candidate anime for the playing track.
///
/// Immutable snapshot from the backend. The app never edits these, it only
/// submits confirm/report requests that reference their ids.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimeMatch {
    /// English/romanized title (may be empty)
    pub title: String,
    /// Title in the original script
    pub native_title: String,
    pub release: ReleaseUnit,
    pub track_role: TrackRole,
    pub anime_type: Option<AnimeType>,
    pub cover_url: Option<String>,
    pub banner_url: Option<String>,
    /// Mean score (0-100)
    pub score: Option<u32>,
    pub linked_ids: LinkedIds,

    // Song metadata, only used for confirm/report
    pub song_name: String,
    /// AnimeNewsNetwork song id
    pub ann_song_id: Option<i32>,
    /// AnimeNewsNetwork artist ids, credit order
    pub artist_ids: SmallVec<[i32; 4]>,
    pub artist_names: Vec<String>,
}
