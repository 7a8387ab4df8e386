//! Now-playing panel: album art, title and artists.

use iced::widget::{column, container, row, text};
use iced::{Alignment, Element, Length};

use super::helpers::picture;
use crate::presenter::NowPlayingView;
use crate::ui::messages::Message;
use crate::ui::state::RadarState;
use crate::ui::theme::{self, color, layout, spacing, typography};

pub fn now_playing_panel(s: &RadarState) -> Element<'_, Message> {
    let now = NowPlayingView::from_state(&s.playback);

    let art = match &now.album_art_url {
        Some(url) => picture(s.image(url), layout::ALBUM_ART, "No album art"),
        None => picture(None, layout::ALBUM_ART, "No album art"),
    };

    let mut details = column![
        text(now.title)
            .size(typography::SIZE_TITLE)
            .color(color::TEXT_PRIMARY),
    ]
    .spacing(spacing::XS);

    if !now.artists.is_empty() {
        details = details.push(
            text(now.artists)
                .size(typography::SIZE_BODY)
                .color(color::TEXT_SECONDARY),
        );
    }

    if let Some(track_id) = &s.playback.current_track_id {
        details = details.push(
            text(format!("Track {}", track_id))
                .size(typography::SIZE_SMALL)
                .color(color::TEXT_MUTED),
        );
    }

    container(
        row![art, details]
            .spacing(spacing::LG)
            .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(spacing::LG)
    .style(|_| theme::card_style())
    .into()
}
