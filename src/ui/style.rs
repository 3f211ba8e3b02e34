use ratatui::style::{Color, Style};

use crate::profile::Theme;

pub const MMSU_GREEN: Color = Color::Rgb(0, 105, 55);
pub const MMSU_GOLD: Color = Color::Rgb(253, 185, 19);

/// Colors resolved for the active theme. The view layer never matches on the
/// theme directly.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub highlight: Color,
    pub user: Color,
    pub assistant: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            bg: Color::Rgb(15, 23, 42),
            fg: Color::Rgb(241, 245, 249),
            dim: Color::Rgb(100, 116, 139),
            accent: MMSU_GOLD,
            highlight: MMSU_GOLD,
            user: Color::Cyan,
            assistant: Color::Green,
        },
        Theme::Light => Palette {
            bg: Color::Rgb(248, 250, 252),
            fg: Color::Rgb(15, 23, 42),
            dim: Color::Rgb(148, 163, 184),
            accent: MMSU_GREEN,
            highlight: MMSU_GREEN,
            user: Color::Blue,
            assistant: MMSU_GREEN,
        },
    }
}

pub fn base(palette: &Palette) -> Style {
    Style::default().bg(palette.bg).fg(palette.fg)
}
