//! Helper functions shared across view components.

use iced::widget::{button, container, image, text};
use iced::{Element, Length};

use crate::ui::messages::Message;
use crate::ui::state::ImageState;
use crate::ui::theme;

/// Helper to create a conditionally-enabled button
pub fn action_button<'a>(
    label: &'a str,
    msg: Option<Message>,
    style: fn(&iced::Theme, button::Status) -> button::Style,
) -> iced::widget::Button<'a, Message> {
    button(text(label).size(theme::typography::SIZE_SMALL))
        .padding([6, 12])
        .style(style)
        .on_press_maybe(msg)
}

/// A square picture, or a text placeholder while loading or after a failure.
pub fn picture<'a>(state: Option<&ImageState>, size: u16, fallback: &str) -> Element<'a, Message> {
    match state {
        Some(ImageState::Ready(handle)) => image(handle.clone())
            .width(Length::Fixed(size as f32))
            .height(Length::Fixed(size as f32))
            .into(),
        Some(ImageState::Loading) => placeholder("…".to_string(), size),
        Some(ImageState::Failed) | None => placeholder(fallback.to_string(), size),
    }
}

fn placeholder<'a>(label: String, size: u16) -> Element<'a, Message> {
    container(
        text(label)
            .size(theme::typography::SIZE_SMALL)
            .color(theme::color::TEXT_MUTED),
    )
    .width(Length::Fixed(size as f32))
    .height(Length::Fixed(size as f32))
    .padding(theme::spacing::XS)
    .center(Length::Fixed(size as f32))
    .style(|_| theme::placeholder_style())
    .into()
}

/// Joins non-empty labels with a middle dot.
pub fn detail_line(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_line_skips_blanks() {
        assert_eq!(
            detail_line(&["Season 1", "Ending ", "", "Type: TV"]),
            "Season 1 · Ending · Type: TV"
        );
        assert_eq!(detail_line(&["", "  "]), "");
    }
}
