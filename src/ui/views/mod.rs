//! View rendering functions for the UI components.
//!
//! This module is organized into submodules by concern:
//! - `now_playing`: the current track panel
//! - `entry`: one anime card
//! - `report`: the report pop-up
//! - `helpers`: pictures, buttons, small formatting

mod entry;
pub mod helpers;
mod now_playing;
mod report;

use iced::widget::{
    Column, Space, center, checkbox, column, container, horizontal_rule,
    horizontal_space, opaque, row, scrollable, stack, text,
};
use iced::{Alignment, Element, Length};

use crate::model::AnimeMatch;
use crate::presenter::{Filters, visible_matches};
use crate::ui::messages::Message;
use crate::ui::state::{RadarState, StatusKind};
use crate::ui::theme::{self, color, layout, spacing, typography};

use entry::entry_card;
use helpers::action_button;
use now_playing::now_playing_panel;
use report::report_form;

/// Main view once the backend client is ready
pub fn radar_view(s: &RadarState) -> Element<'_, Message> {
    let mut body = column![header(s)].spacing(spacing::LG);

    if let Some(banner) = login_banner(s) {
        body = body.push(banner);
    }
    if let Some(status) = &s.status {
        let tint = match status.kind {
            StatusKind::Info => color::TEXT_SECONDARY,
            StatusKind::Warning => color::WARNING,
            StatusKind::Error => color::ERROR,
        };
        body = body.push(text(status.text.clone()).size(typography::SIZE_SMALL).color(tint));
    }

    body = body.push(now_playing_panel(s));

    let groups = [
        (&s.playback.primary_label, &s.playback.primary_matches, true),
        (&s.playback.secondary_label, &s.playback.secondary_matches, false),
    ];
    for (label, matches, primary) in groups {
        if label.is_empty() {
            continue;
        }
        body = body.push(match_group(s, label, matches, primary));
    }

    let content = container(
        scrollable(
            container(body.max_width(layout::MAX_CONTENT_WIDTH as f32))
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding([0, spacing::MD]),
        )
        .style(theme::scrollbar_style)
        .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(|_| theme::container_style(color::BASE));

    match &s.report {
        Some(form) => stack![
            content,
            opaque(
                center(report_form(form))
                    .style(|_| theme::container_style(color::with_alpha(color::BASE, 0.8)))
            ),
        ]
        .into(),
        None => content.into(),
    }
}

/// Title, filter toggles and the refresh button
fn header(s: &RadarState) -> Element<'_, Message> {
    let toggles = [
        ("Openings", Filters::OPENING),
        ("Inserts", Filters::INSERT),
        ("Endings", Filters::ENDING),
    ]
    .into_iter()
    .fold(row![].spacing(spacing::LG), |toggles, (label, flag)| {
        toggles.push(
            checkbox(label, s.filters.contains(flag))
                .on_toggle(move |on| Message::FilterToggled(flag, on))
                .size(16)
                .text_size(typography::SIZE_BODY)
                .style(theme::checkbox_style),
        )
    });

    let refresh = s.poller.as_ref().map(|_| Message::RefreshPressed);

    row![
        text("Anisong Radar")
            .size(typography::SIZE_TITLE)
            .color(color::PRIMARY),
        horizontal_space(),
        toggles,
        action_button("Refresh", refresh, theme::button_secondary),
    ]
    .spacing(spacing::LG)
    .align_y(Alignment::Center)
    .into()
}

/// Shown once the backend asked for a login and polling stopped
fn login_banner(s: &RadarState) -> Option<Element<'_, Message>> {
    let login_url = s.login_url.as_ref()?;
    let banner = container(
        column![
            text("You are not logged in.")
                .size(typography::SIZE_BODY)
                .color(color::WARNING),
            text(format!(
                "Log in at {login_url}, put the session cookie in the config file, then reconnect."
            ))
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_SECONDARY),
            row![
                action_button("Open login page", Some(Message::OpenLogin), theme::button_primary),
                action_button("Reconnect", Some(Message::Reconnect), theme::button_secondary),
            ]
            .spacing(spacing::SM),
        ]
        .spacing(spacing::SM),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(|_| theme::banner_style(color::WARNING));
    Some(banner.into())
}

/// A labelled list of cards, after the track-role filter
fn match_group<'a>(
    s: &'a RadarState,
    label: &'a str,
    matches: &'a [AnimeMatch],
    primary: bool,
) -> Element<'a, Message> {
    let visible = visible_matches(matches, s.filters);
    let label_color = if primary {
        theme::label_color(s.playback.confirm_enabled)
    } else {
        color::TEXT_SECONDARY
    };

    let mut group = column![
        horizontal_rule(1),
        row![
            text(label).size(typography::SIZE_HEADING).color(label_color),
            horizontal_space(),
            text(hidden_note(matches.len(), visible.len()))
                .size(typography::SIZE_SMALL)
                .color(color::TEXT_MUTED),
        ]
        .align_y(Alignment::Center),
    ]
    .spacing(spacing::MD);

    let can_confirm = primary && s.playback.confirm_enabled;
    let cards = visible
        .into_iter()
        .fold(Column::new().spacing(spacing::SM), |cards, anime| {
            cards.push(entry_card(s, anime, can_confirm))
        });
    group = group.push(cards).push(Space::with_height(spacing::SM));

    group.into()
}

/// "2 hidden by filters" when the toggles removed something
fn hidden_note(total: usize, visible: usize) -> String {
    match total.saturating_sub(visible) {
        0 => String::new(),
        n => format!("{n} hidden by filters"),
    }
}
