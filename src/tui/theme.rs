use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub on_accent: Color,
    pub error: Color,
    pub border: Color,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Color::Rgb(17, 24, 39),
                surface: Color::Rgb(31, 41, 55),
                text: Color::Rgb(249, 250, 251),
                muted: Color::Rgb(156, 163, 175),
                accent: Color::Rgb(34, 197, 94),
                on_accent: Color::Rgb(255, 255, 255),
                error: Color::Rgb(239, 68, 68),
                border: Color::Rgb(75, 85, 99),
            },
            Theme::Light => Palette {
                background: Color::Rgb(255, 255, 255),
                surface: Color::Rgb(229, 231, 235),
                text: Color::Rgb(17, 24, 39),
                muted: Color::Rgb(75, 85, 99),
                accent: Color::Rgb(22, 163, 74),
                on_accent: Color::Rgb(255, 255, 255),
                error: Color::Rgb(220, 38, 38),
                border: Color::Rgb(209, 213, 219),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Dark.palette().background, Theme::Light.palette().background);
    }
}
