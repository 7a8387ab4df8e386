//! Display shaping for playback state.
//!
//! Pure functions from domain values to the strings and links the views
//! show. Nothing here mutates a [`PlaybackState`]; filter toggles only change
//! which entries are picked out of it.

use std::fmt::Write as _;

use bitflags::bitflags;

use crate::config::DisplayConfig;
use crate::model::{AnimeMatch, LinkedIds, PlaybackState, TrackRole};

pub const UNKNOWN_ANIME_TITLE: &str = "Unknown Anime";
pub const NO_SONG_TITLE: &str = "No song info";

bitflags! {
    /// Which track roles are shown.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Filters: u8 {
        const OPENING = 0b001;
        const INSERT = 0b010;
        const ENDING = 0b100;
    }
}

impl Default for Filters {
    fn default() -> Self {
        Self::all()
    }
}

impl Filters {
    /// Whether entries with this role pass. Unspecified roles never do.
    pub fn allows(&self, role: &TrackRole) -> bool {
        match role {
            TrackRole::Opening(_) => self.contains(Self::OPENING),
            TrackRole::Insert => self.contains(Self::INSERT),
            TrackRole::Ending(_) => self.contains(Self::ENDING),
            TrackRole::Unspecified => false,
        }
    }

    /// Toggle one category on or off.
    pub fn with(mut self, flag: Self, enabled: bool) -> Self {
        self.set(flag, enabled);
        self
    }
}

impl From<&DisplayConfig> for Filters {
    fn from(display: &DisplayConfig) -> Self {
        Self::empty()
            .with(Self::OPENING, display.show_openings)
            .with(Self::INSERT, display.show_inserts)
            .with(Self::ENDING, display.show_endings)
    }
}

/// Entries whose role is enabled, in their original order.
pub fn visible_matches(matches: &[AnimeMatch], filters: Filters) -> Vec<&AnimeMatch> {
    matches
        .iter()
        .filter(|m| filters.allows(&m.track_role))
        .collect()
}

/// A link to an anime on an external tracking site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub site: &'static str,
    pub url: String,
}

/// External links for the ids that are present, in a fixed site order.
pub fn external_links(ids: &LinkedIds) -> Vec<ExternalLink> {
    if ids.is_empty() {
        return Vec::new();
    }
    let sites = [
        ("MAL", "https://myanimelist.net/anime", ids.myanimelist),
        ("Anilist", "https://anilist.co/anime", ids.anilist),
        ("AniDB", "https://anidb.net/anime", ids.anidb),
        ("Kitsu", "https://kitsu.io/anime", ids.kitsu),
    ];
    sites
        .into_iter()
        .filter_map(|(site, base, id)| {
            id.filter(|id| *id > 0).map(|id| ExternalLink {
                site,
                url: format!("{base}/{id}"),
            })
        })
        .collect()
}

/// Everything one anime card shows.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub title: String,
    pub native_title: String,
    pub release_label: String,
    pub track_label: String,
    pub type_label: String,
    /// Empty when the backend sent no score
    pub score_label: String,
    pub links: Vec<ExternalLink>,
    pub cover_url: Option<String>,
    /// Wide strip above the card, only drawn once loaded
    pub banner_url: Option<String>,
}

impl EntryView {
    pub fn from_match(anime: &AnimeMatch) -> Self {
        let title = if anime.title.trim().is_empty() {
            UNKNOWN_ANIME_TITLE.to_string()
        } else {
            anime.title.clone()
        };
        Self {
            title,
            native_title: anime.native_title.clone(),
            release_label: anime.release.to_string(),
            track_label: anime.track_role.to_string(),
            type_label: format!(
                "Type: {}",
                anime.anime_type.map(|t| t.as_str()).unwrap_or("Unknown")
            ),
            score_label: anime
                .score
                .map(|s| format!("Score: {s}"))
                .unwrap_or_default(),
            links: external_links(&anime.linked_ids),
            cover_url: anime.cover_url.clone(),
            banner_url: anime.banner_url.clone(),
        }
    }
}

/// The now-playing panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlayingView {
    pub title: String,
    pub artists: String,
    pub album_art_url: Option<String>,
}

impl NowPlayingView {
    pub fn from_state(state: &PlaybackState) -> Self {
        match &state.song_info {
            Some(song) => Self {
                title: song.title.clone(),
                artists: song.artist_line(),
                album_art_url: song.album_art_url.clone(),
            },
            None => Self {
                title: NO_SONG_TITLE.to_string(),
                artists: String::new(),
                album_art_url: None,
            },
        }
    }
}

/// Plain-text rendering of the whole state, for the terminal.
pub fn render_text(state: &PlaybackState, filters: Filters) -> String {
    let now = NowPlayingView::from_state(state);
    let mut out = String::new();

    let _ = writeln!(out, "♪ {}", now.title);
    if !now.artists.is_empty() {
        let _ = writeln!(out, "  {}", now.artists);
    }

    let groups = [
        (&state.primary_label, &state.primary_matches),
        (&state.secondary_label, &state.secondary_matches),
    ];
    for (label, matches) in groups {
        if label.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n── {label} ──");
        for anime in visible_matches(matches, filters) {
            render_entry(&mut out, &EntryView::from_match(anime));
        }
    }

    out
}

fn render_entry(out: &mut String, entry: &EntryView) {
    let _ = write!(out, "  • {}", entry.title);
    if !entry.native_title.is_empty() {
        let _ = write!(out, " ({})", entry.native_title);
    }
    let _ = writeln!(out);

    let mut details = vec![entry.release_label.as_str()];
    if !entry.track_label.trim().is_empty() {
        details.push(entry.track_label.trim_end());
    }
    details.push(&entry.type_label);
    if !entry.score_label.is_empty() {
        details.push(&entry.score_label);
    }
    let _ = writeln!(out, "    {}", details.join(" · "));

    for link in &entry.links {
        let _ = writeln!(out, "    {}: {}", link.site, link.url);
    }
}
