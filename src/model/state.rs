//! The per-poll playback state and its constructors.

use super::{AnimeMatch, SongInfo};

/// A hit with certainty at or below this still lets the user confirm a match.
pub const CONFIRM_CERTAINTY_CEILING: i32 = 80;

pub const NOT_PLAYING_TITLE: &str = "Not playing anything";
pub const UNAPPROVED_TITLE: &str = "Account not approved";
pub const UNAPPROVED_DETAIL: &str =
    "Your account has not been approved yet, ask the server owner to add it";
pub const POSSIBLE_MATCHES_LABEL: &str = "Possible matches";
pub const NO_MATCHES_LABEL: &str = "No matches";
pub const MORE_BY_ARTIST_LABEL: &str = "More by this artist";

/// Separator label for a confident match.
pub fn certainty_label(certainty: i32) -> String {
    format!("{certainty}% Match")
}

/// Everything the views need to render the current poll result.
///
/// Created fresh for every state-changing poll outcome and swapped in
/// whole; never patched field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    /// Song panel contents (None until the first meaningful poll)
    pub song_info: Option<SongInfo>,
    pub primary_matches: Vec<AnimeMatch>,
    pub secondary_matches: Vec<AnimeMatch>,
    /// Empty when the primary group is hidden
    pub primary_label: String,
    /// Empty when the secondary group is hidden
    pub secondary_label: String,
    /// Whether the user may bind the current track to a candidate
    pub confirm_enabled: bool,
    /// Opaque id of the playing track, used for confirm/report
    pub current_track_id: Option<String>,
}

impl PlaybackState {
    /// Nothing is playing on the account.
    pub fn not_playing() -> Self {
        Self {
            song_info: Some(SongInfo::message(NOT_PLAYING_TITLE, None)),
            ..Default::default()
        }
    }

    /// The account exists but may not use the service yet.
    pub fn unapproved() -> Self {
        Self {
            song_info: Some(SongInfo::message(
                UNAPPROVED_TITLE,
                Some(UNAPPROVED_DETAIL.to_string()),
            )),
            ..Default::default()
        }
    }

    /// Only candidate matches exist for the track.
    pub fn miss(song: SongInfo, track_id: Option<String>, possible: Vec<AnimeMatch>) -> Self {
        let primary_label = if possible.is_empty() {
            NO_MATCHES_LABEL
        } else {
            POSSIBLE_MATCHES_LABEL
        };
        Self {
            song_info: Some(song),
            primary_matches: possible,
            secondary_matches: Vec::new(),
            primary_label: primary_label.to_string(),
            secondary_label: String::new(),
            confirm_enabled: true,
            current_track_id: track_id,
        }
    }

    /// A confident match was found.
    pub fn hit(
        song: SongInfo,
        track_id: Option<String>,
        certainty: i32,
        matches: Vec<AnimeMatch>,
        more_by_artist: Vec<AnimeMatch>,
    ) -> Self {
        Self {
            song_info: Some(song),
            primary_matches: matches,
            secondary_matches: more_by_artist,
            primary_label: certainty_label(certainty),
            secondary_label: MORE_BY_ARTIST_LABEL.to_string(),
            confirm_enabled: certainty <= CONFIRM_CERTAINTY_CEILING,
            current_track_id: track_id,
        }
    }

    /// Total number of entries across both groups.
    pub fn match_count(&self) -> usize {
        self.primary_matches.len() + self.secondary_matches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_anime_match, mock_song};

    #[test]
    fn test_not_playing_clears_everything() {
        let state = PlaybackState::not_playing();
        assert_eq!(
            state.song_info.as_ref().map(|s| s.title.as_str()),
            Some(NOT_PLAYING_TITLE)
        );
        assert!(state.primary_matches.is_empty());
        assert!(state.secondary_matches.is_empty());
        assert!(state.primary_label.is_empty());
        assert!(state.secondary_label.is_empty());
        assert!(!state.confirm_enabled);
        assert!(state.current_track_id.is_none());
    }

    #[test]
    fn test_unapproved_explains() {
        let state = PlaybackState::unapproved();
        let song = state.song_info.expect("message panel");
        assert_eq!(song.title, UNAPPROVED_TITLE);
        assert_eq!(song.artists, vec![UNAPPROVED_DETAIL.to_string()]);
        assert!(!state.confirm_enabled);
    }

    #[test]
    fn test_miss_labels() {
        let empty = PlaybackState::miss(mock_song(), Some("t1".into()), vec![]);
        assert_eq!(empty.primary_label, NO_MATCHES_LABEL);
        assert!(empty.confirm_enabled);
        assert_eq!(empty.current_track_id.as_deref(), Some("t1"));

        let some = PlaybackState::miss(mock_song(), None, vec![mock_anime_match("A")]);
        assert_eq!(some.primary_label, POSSIBLE_MATCHES_LABEL);
        assert!(some.secondary_label.is_empty());
    }

    #[test]
    fn test_hit_confirm_threshold() {
        let sure = PlaybackState::hit(mock_song(), None, 81, vec![], vec![]);
        assert!(!sure.confirm_enabled);
        assert_eq!(sure.primary_label, "81% Match");
        assert_eq!(sure.secondary_label, MORE_BY_ARTIST_LABEL);

        let unsure = PlaybackState::hit(mock_song(), None, 80, vec![], vec![]);
        assert!(unsure.confirm_enabled);
    }

    #[test]
    fn test_match_count() {
        let state = PlaybackState::hit(
            mock_song(),
            None,
            95,
            vec![mock_anime_match("A")],
            vec![mock_anime_match("B"), mock_anime_match("C")],
        );
        assert_eq!(state.match_count(), 3);
    }
}
