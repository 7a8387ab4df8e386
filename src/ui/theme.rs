//! Design System Theme Constants
//!
//! Centralized theme definitions for the radar window. Colors, spacing and
//! sizing live here so views only pick names.
//!
//! # Color Philosophy
//! - Dark theme with deep blue-grays (not pure black)
//! - Rose accent for actions
//! - Semantic colors for match certainty and status lines
//!
//! # Usage
//! ```ignore
//! use crate::ui::theme;
//!
//! let bg = theme::color::SURFACE;
//! let padding = theme::spacing::MD;
//! ```

use iced::Color;

// =============================================================================
// COLORS
// =============================================================================

pub mod color {
    use super::*;

    // -------------------------------------------------------------------------
    // Backgrounds (darkest to lightest)
    // -------------------------------------------------------------------------

    /// Main app background
    /// Hex: #11131a
    pub const BASE: Color = Color::from_rgb(
        0x11 as f32 / 255.0,
        0x13 as f32 / 255.0,
        0x1a as f32 / 255.0,
    );

    /// Cards and panels
    /// Hex: #191c25
    pub const SURFACE: Color = Color::from_rgb(
        0x19 as f32 / 255.0,
        0x1c as f32 / 255.0,
        0x25 as f32 / 255.0,
    );

    /// The report pop-up
    /// Hex: #222632
    pub const SURFACE_ELEVATED: Color = Color::from_rgb(
        0x22 as f32 / 255.0,
        0x26 as f32 / 255.0,
        0x32 as f32 / 255.0,
    );

    /// Hover states, image placeholders
    /// Hex: #2a2f3d
    pub const SURFACE_HOVER: Color = Color::from_rgb(
        0x2a as f32 / 255.0,
        0x2f as f32 / 255.0,
        0x3d as f32 / 255.0,
    );

    // -------------------------------------------------------------------------
    // Borders
    // -------------------------------------------------------------------------

    /// Hex: #262a36
    pub const BORDER_SUBTLE: Color = Color::from_rgb(
        0x26 as f32 / 255.0,
        0x2a as f32 / 255.0,
        0x36 as f32 / 255.0,
    );

    /// Hex: #363b4a
    pub const BORDER: Color = Color::from_rgb(
        0x36 as f32 / 255.0,
        0x3b as f32 / 255.0,
        0x4a as f32 / 255.0,
    );

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    /// Hex: #eceef4
    pub const TEXT_PRIMARY: Color = Color::from_rgb(
        0xec as f32 / 255.0,
        0xee as f32 / 255.0,
        0xf4 as f32 / 255.0,
    );

    /// Hex: #a4a9b8
    pub const TEXT_SECONDARY: Color = Color::from_rgb(
        0xa4 as f32 / 255.0,
        0xa9 as f32 / 255.0,
        0xb8 as f32 / 255.0,
    );

    /// Hex: #6b7082
    pub const TEXT_MUTED: Color = Color::from_rgb(
        0x6b as f32 / 255.0,
        0x70 as f32 / 255.0,
        0x82 as f32 / 255.0,
    );

    // -------------------------------------------------------------------------
    // Accent
    // -------------------------------------------------------------------------

    /// Hex: #e85d8a
    pub const PRIMARY: Color = Color::from_rgb(
        0xe8 as f32 / 255.0,
        0x5d as f32 / 255.0,
        0x8a as f32 / 255.0,
    );

    /// Hex: #f07aa1
    pub const PRIMARY_HOVER: Color = Color::from_rgb(
        0xf0 as f32 / 255.0,
        0x7a as f32 / 255.0,
        0xa1 as f32 / 255.0,
    );

    /// Hex: #c94672
    pub const PRIMARY_PRESSED: Color = Color::from_rgb(
        0xc9 as f32 / 255.0,
        0x46 as f32 / 255.0,
        0x72 as f32 / 255.0,
    );

    /// Links to external sites
    /// Hex: #7aa2f7
    pub const LINK: Color = Color::from_rgb(
        0x7a as f32 / 255.0,
        0xa2 as f32 / 255.0,
        0xf7 as f32 / 255.0,
    );

    // -------------------------------------------------------------------------
    // Semantic
    // -------------------------------------------------------------------------

    /// Hex: #9ece6a
    pub const SUCCESS: Color = Color::from_rgb(
        0x9e as f32 / 255.0,
        0xce as f32 / 255.0,
        0x6a as f32 / 255.0,
    );

    /// Hex: #e0af68
    pub const WARNING: Color = Color::from_rgb(
        0xe0 as f32 / 255.0,
        0xaf as f32 / 255.0,
        0x68 as f32 / 255.0,
    );

    /// Hex: #f7768e
    pub const ERROR: Color = Color::from_rgb(
        0xf7 as f32 / 255.0,
        0x76 as f32 / 255.0,
        0x8e as f32 / 255.0,
    );

    /// Same color with a different alpha
    pub const fn with_alpha(color: Color, alpha: f32) -> Color {
        Color {
            r: color.r,
            g: color.g,
            b: color.b,
            a: alpha,
        }
    }
}

// =============================================================================
// SPACING (4px grid)
// =============================================================================

pub mod spacing {
    pub const XS: u16 = 4;
    pub const SM: u16 = 8;
    pub const MD: u16 = 12;
    pub const LG: u16 = 16;
    pub const XL: u16 = 24;
}

// =============================================================================
// LAYOUT
// =============================================================================

pub mod layout {
    /// Album art in the now-playing panel
    pub const ALBUM_ART: u16 = 160;

    /// Cover picture on an anime entry
    pub const COVER_ART: u16 = 96;

    /// Height of the banner strip on an anime entry
    pub const BANNER_HEIGHT: u16 = 72;

    /// Width of the report pop-up
    pub const REPORT_FORM_WIDTH: u16 = 420;

    /// Widest the match list grows before centering
    pub const MAX_CONTENT_WIDTH: u16 = 900;
}

// =============================================================================
// TYPOGRAPHY
// =============================================================================

pub mod typography {
    pub const SIZE_TITLE: u16 = 24;
    pub const SIZE_HEADING: u16 = 18;
    pub const SIZE_BODY: u16 = 14;
    pub const SIZE_SMALL: u16 = 12;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
}

// =============================================================================
// CONTAINER STYLE HELPERS
// =============================================================================

use iced::Border;
use iced::widget::container;

/// Create a standard container style with the given background color
pub fn container_style(bg: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(bg)),
        border: Border::default(),
        ..Default::default()
    }
}

/// Card style - surface background with subtle border and radius
pub fn card_style() -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(color::SURFACE)),
        border: Border {
            color: color::BORDER_SUBTLE,
            width: 1.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Elevated card style - for the report pop-up
pub fn card_elevated_style() -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(color::SURFACE_ELEVATED)),
        border: Border {
            color: color::BORDER,
            width: 1.0,
            radius: radius::LG.into(),
        },
        ..Default::default()
    }
}

/// Placeholder box shown where a picture could not be loaded
pub fn placeholder_style() -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(color::SURFACE_HOVER)),
        text_color: Some(color::TEXT_MUTED),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Banner across the top when the session needs a login
pub fn banner_style(accent: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(color::with_alpha(accent, 0.12))),
        border: Border {
            color: accent,
            width: 1.0,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}

// =============================================================================
// BUTTON STYLE HELPERS
// =============================================================================

use iced::Theme;
use iced::widget::button;

/// Primary button - filled with accent color
pub fn button_primary(_theme: &Theme, status: button::Status) -> button::Style {
    let (bg, text) = match status {
        button::Status::Active => (color::PRIMARY, color::TEXT_PRIMARY),
        button::Status::Hovered => (color::PRIMARY_HOVER, color::TEXT_PRIMARY),
        button::Status::Pressed => (color::PRIMARY_PRESSED, color::TEXT_PRIMARY),
        button::Status::Disabled => (color::SURFACE_HOVER, color::TEXT_MUTED),
    };

    button::Style {
        background: Some(iced::Background::Color(bg)),
        text_color: text,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Secondary button - outlined
pub fn button_secondary(_theme: &Theme, status: button::Status) -> button::Style {
    let (bg, border, text) = match status {
        button::Status::Active => (color::SURFACE, color::BORDER, color::TEXT_SECONDARY),
        button::Status::Hovered => (color::SURFACE_HOVER, color::BORDER, color::TEXT_PRIMARY),
        button::Status::Pressed => (color::SURFACE_ELEVATED, color::BORDER, color::TEXT_PRIMARY),
        button::Status::Disabled => (color::SURFACE, color::BORDER_SUBTLE, color::TEXT_MUTED),
    };

    button::Style {
        background: Some(iced::Background::Color(bg)),
        text_color: text,
        border: Border {
            color: border,
            width: 1.0,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}

/// Link button - text only, for external sites
pub fn button_link(_theme: &Theme, status: button::Status) -> button::Style {
    let text = match status {
        button::Status::Active => color::LINK,
        button::Status::Hovered | button::Status::Pressed => color::TEXT_PRIMARY,
        button::Status::Disabled => color::TEXT_MUTED,
    };

    button::Style {
        background: None,
        text_color: text,
        ..Default::default()
    }
}

// =============================================================================
// TEXT INPUT STYLE HELPERS
// =============================================================================

use iced::widget::text_input;

/// Standard text input style
pub fn text_input_style(_theme: &Theme, status: text_input::Status) -> text_input::Style {
    let (border, value) = match status {
        text_input::Status::Active => (color::BORDER_SUBTLE, color::TEXT_PRIMARY),
        text_input::Status::Hovered => (color::BORDER, color::TEXT_PRIMARY),
        text_input::Status::Focused => (color::PRIMARY, color::TEXT_PRIMARY),
        text_input::Status::Disabled => (color::BORDER_SUBTLE, color::TEXT_MUTED),
    };

    text_input::Style {
        background: iced::Background::Color(color::SURFACE),
        border: Border {
            color: border,
            width: 1.0,
            radius: radius::SM.into(),
        },
        icon: color::TEXT_MUTED,
        placeholder: color::TEXT_MUTED,
        value,
        selection: color::with_alpha(color::PRIMARY, 0.4),
    }
}

// =============================================================================
// CHECKBOX STYLE HELPERS
// =============================================================================

use iced::widget::checkbox;

/// Filter toggle style
pub fn checkbox_style(_theme: &Theme, status: checkbox::Status) -> checkbox::Style {
    let (is_checked, border) = match status {
        checkbox::Status::Active { is_checked } => (is_checked, color::BORDER),
        checkbox::Status::Hovered { is_checked } => (is_checked, color::PRIMARY_HOVER),
        checkbox::Status::Disabled { is_checked } => (is_checked, color::BORDER_SUBTLE),
    };

    checkbox::Style {
        background: iced::Background::Color(if is_checked {
            color::PRIMARY
        } else {
            color::SURFACE
        }),
        icon_color: color::TEXT_PRIMARY,
        border: Border {
            color: border,
            width: 1.0,
            radius: radius::SM.into(),
        },
        text_color: Some(color::TEXT_SECONDARY),
    }
}

// =============================================================================
// SCROLLABLE STYLE HELPERS
// =============================================================================

use iced::widget::scrollable;
use iced::widget::scrollable::{Rail, Scroller, Status as ScrollStatus};

/// Standard scrollbar style
pub fn scrollbar_style(_theme: &Theme, status: ScrollStatus) -> scrollable::Style {
    let scroller_color = match status {
        ScrollStatus::Active => color::BORDER,
        ScrollStatus::Hovered { .. } => color::TEXT_MUTED,
        ScrollStatus::Dragged { .. } => color::PRIMARY,
    };

    let rail = Rail {
        background: None,
        border: Border::default(),
        scroller: Scroller {
            color: scroller_color,
            border: Border {
                radius: radius::LG.into(),
                ..Default::default()
            },
        },
    };

    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: rail,
        horizontal_rail: rail,
        gap: None,
    }
}

/// Color for a group label: strong matches green, weak ones amber.
pub fn label_color(confirm_enabled: bool) -> Color {
    if confirm_enabled {
        color::WARNING
    } else {
        color::SUCCESS
    }
}
