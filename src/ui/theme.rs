use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const BG_SURFACE: Color = Color::Rgb(18, 18, 22);
    pub const BG_ELEVATED: Color = Color::Rgb(30, 30, 36);
    pub const BORDER_DIM: Color = Color::Rgb(70, 70, 80);
    pub const TEXT_PRIMARY: Color = Color::Rgb(230, 230, 235);
    pub const TEXT_SECONDARY: Color = Color::Rgb(160, 160, 170);
    pub const TEXT_MUTED: Color = Color::Rgb(110, 110, 120);
    pub const ACCENT_TEAL: Color = Color::Rgb(80, 200, 210);
    pub const ACCENT_BLUE: Color = Color::Rgb(59, 130, 246);
    pub const ACCENT_AMBER: Color = Color::Rgb(230, 180, 80);
    pub const ACCENT_LAVENDER: Color = Color::Rgb(175, 140, 220);
    pub const ACCENT_RED: Color = Color::Rgb(230, 90, 90);
    pub const ACCENT_GREEN: Color = Color::Rgb(90, 210, 130);

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_type() -> BorderType {
        BorderType::Rounded
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn panel_bg() -> Style {
        Style::default().bg(Self::BG_SURFACE)
    }

    pub fn label() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn value() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn flag(on: bool) -> Style {
        if on {
            Style::default()
                .fg(Self::ACCENT_GREEN)
                .add_modifier(Modifier::BOLD)
        } else {
            Self::muted()
        }
    }

    pub fn inbound() -> Style {
        Style::default().fg(Self::ACCENT_AMBER)
    }

    pub fn outbound() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn info() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn warn() -> Style {
        Style::default().fg(Self::ACCENT_AMBER)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ACCENT_RED)
    }

    pub fn button() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Self::ACCENT_BLUE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_ELEVATED)
    }
}
