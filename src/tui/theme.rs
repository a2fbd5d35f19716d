//! # Theme
//!
//! Maps semantic colour roles to ratatui styles. Panels never pick colours
//! directly; they ask for a role and get a styled span back.
//!
//! | Role          | Default    | Used for                          |
//! |---------------|------------|-----------------------------------|
//! | `Accent`      | Cyan       | separators, titles, selection     |
//! | `Dim`         | DarkGray   | footer hints, metadata            |
//! | `BorderMuted` | Gray       | detail box borders and guides     |
//! | `Warning`     | Yellow     | leader-mode footer                |
//!
//! Colours come from `[theme]` in the config file as anything ratatui's
//! `Color::from_str` accepts (`"cyan"`, `"darkgray"`, `"#88c0d0"`, `"42"`).

use std::str::FromStr;

use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::Tone;
use crate::core::config::{ConfigError, ThemeConfig};
use crate::core::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Accent,
    Dim,
    BorderMuted,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub dim: Color,
    pub border: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            dim: Color::DarkGray,
            border: Color::Gray,
            warning: Color::Yellow,
        }
    }
}

fn parse_color(value: Option<&String>, fallback: Color) -> Result<Color> {
    match value {
        Some(v) => Color::from_str(v).map_err(|_| Error::Config(ConfigError::Colour(v.clone()))),
        None => Ok(fallback),
    }
}

impl Theme {
    /// Overlay configured colours on the defaults.
    pub fn from_config(config: &ThemeConfig) -> Result<Self> {
        let base = Self::default();
        Ok(Self {
            accent: parse_color(config.accent.as_ref(), base.accent)?,
            dim: parse_color(config.dim.as_ref(), base.dim)?,
            border: parse_color(config.border.as_ref(), base.border)?,
            warning: parse_color(config.warning.as_ref(), base.warning)?,
        })
    }

    pub fn style(&self, role: Role) -> Style {
        let color = match role {
            Role::Accent => self.accent,
            Role::Dim => self.dim,
            Role::BorderMuted => self.border,
            Role::Warning => self.warning,
        };
        Style::new().fg(color)
    }

    /// Style for a content cell tone. `Normal` keeps the terminal default.
    pub fn tone(&self, tone: Tone) -> Style {
        match tone {
            Tone::Normal => Style::new(),
            Tone::Dim => self.style(Role::Dim),
            Tone::Accent => self.style(Role::Accent),
        }
    }

    pub fn fg(&self, role: Role, text: impl Into<String>) -> Span<'static> {
        Span::styled(text.into(), self.style(role))
    }
}
