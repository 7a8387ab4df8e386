//! One anime card.

use iced::widget::{Row, button, column, container, image, row, text};
use iced::{Alignment, ContentFit, Element, Length};

use super::helpers::{action_button, detail_line, picture};
use crate::model::AnimeMatch;
use crate::presenter::EntryView;
use crate::ui::messages::Message;
use crate::ui::state::{ImageState, RadarState};
use crate::ui::theme::{self, color, layout, spacing, typography};

/// Card for `anime`. `can_confirm` adds the confirm button.
pub fn entry_card<'a>(
    s: &'a RadarState,
    anime: &'a AnimeMatch,
    can_confirm: bool,
) -> Element<'a, Message> {
    let view = EntryView::from_match(anime);

    let cover = match &view.cover_url {
        Some(url) => picture(s.image(url), layout::COVER_ART, &view.title),
        None => picture(None, layout::COVER_ART, &view.title),
    };

    let mut info = column![text(view.title.clone()).size(typography::SIZE_HEADING)]
        .spacing(spacing::XS)
        .width(Length::Fill);

    if !view.native_title.is_empty() {
        info = info.push(
            text(view.native_title.clone())
                .size(typography::SIZE_BODY)
                .color(color::TEXT_SECONDARY),
        );
    }

    info = info.push(
        text(detail_line(&[&view.release_label, &view.track_label]))
            .size(typography::SIZE_BODY)
            .color(color::TEXT_SECONDARY),
    );
    info = info.push(
        text(detail_line(&[&view.type_label, &view.score_label]))
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_MUTED),
    );

    if !anime.song_name.is_empty() {
        info = info.push(
            text(format!("♪ {}", anime.song_name))
                .size(typography::SIZE_SMALL)
                .color(color::TEXT_MUTED),
        );
    }

    if !view.links.is_empty() {
        let links = view.links.into_iter().fold(Row::new(), |links, link| {
            links.push(
                button(text(link.site).size(typography::SIZE_SMALL))
                    .padding([2, 6])
                    .style(theme::button_link)
                    .on_press(Message::LinkPressed(link.url)),
            )
        });
        info = info.push(links.spacing(spacing::XS));
    }

    let mut actions = row![].spacing(spacing::SM);
    if can_confirm {
        let confirm = (!s.confirming && s.playback.current_track_id.is_some())
            .then(|| Message::ConfirmPressed(anime.clone()));
        actions = actions.push(action_button("Confirm", confirm, theme::button_primary));
    }
    if anime.ann_song_id.is_some() {
        let report = (s.report.is_none() && s.playback.current_track_id.is_some())
            .then(|| Message::ReportOpened(anime.clone()));
        actions = actions.push(action_button("Report", report, theme::button_secondary));
    }
    info = info.push(actions);

    let body = row![cover, info]
        .spacing(spacing::LG)
        .align_y(Alignment::Start);

    // The banner is decoration, so it has no placeholder
    let banner = view.banner_url.as_deref().and_then(|url| match s.image(url) {
        Some(ImageState::Ready(handle)) => Some(
            image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(layout::BANNER_HEIGHT as f32))
                .content_fit(ContentFit::Cover),
        ),
        _ => None,
    });

    container(
        column![]
            .push_maybe(banner)
            .push(body)
            .spacing(spacing::SM),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(|_| theme::card_style())
    .into()
}
