//! Report pop-up.

use iced::widget::{column, container, row, text, text_input};
use iced::{Element, Length};

use super::helpers::action_button;
use crate::presenter::EntryView;
use crate::ui::messages::Message;
use crate::ui::state::ReportForm;
use crate::ui::theme::{self, color, layout, spacing, typography};

pub fn report_form(form: &ReportForm) -> Element<'_, Message> {
    let view = EntryView::from_match(&form.anime);
    let submit = form.can_submit().then_some(Message::ReportSubmitted);

    let mut reason = text_input("What is wrong with this match?", &form.reason)
        .padding(spacing::SM)
        .size(typography::SIZE_BODY)
        .style(theme::text_input_style);
    if !form.sending {
        reason = reason.on_input(Message::ReportReasonChanged);
        if let Some(msg) = submit.clone() {
            reason = reason.on_submit(msg);
        }
    }

    let submit_label = if form.sending { "Sending…" } else { "Send report" };

    container(
        column![
            text("Report a wrong match").size(typography::SIZE_HEADING),
            text(format!(
                "{} · {}",
                view.title,
                role_or_release(&view.track_label, &view.release_label)
            ))
            .size(typography::SIZE_BODY)
            .color(color::TEXT_SECONDARY),
            reason,
            row![
                action_button(submit_label, submit, theme::button_primary),
                action_button(
                    "Cancel",
                    (!form.sending).then_some(Message::ReportCancelled),
                    theme::button_secondary,
                ),
            ]
            .spacing(spacing::SM),
        ]
        .spacing(spacing::MD),
    )
    .width(Length::Fixed(layout::REPORT_FORM_WIDTH as f32))
    .padding(spacing::XL)
    .style(|_| theme::card_elevated_style())
    .into()
}

fn role_or_release<'s>(preferred: &'s str, fallback: &'s str) -> &'s str {
    if preferred.trim().is_empty() {
        fallback
    } else {
        preferred.trim_end()
    }
}
