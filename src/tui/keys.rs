//! # Key Bindings
//!
//! Pure predicates from a crossterm key event to a semantic action. The
//! runtime asks these in a fixed order; none of them look at state.
//!
//! | Predicate      | Keys                       |
//! |----------------|----------------------------|
//! | `esc`          | Esc                        |
//! | `enter`        | Enter                      |
//! | `up` / `down`  | ↑ / ↓, `k` / `j`           |
//! | `tab`          | Tab                        |
//! | `backtab`      | Shift+Tab                  |
//! | `slash`        | `/`                        |
//! | `about`        | `?`                        |
//! | `help`         | `H`                        |
//! | `view`         | `v`, `V`                   |
//! | `detail_scroll`| `J` (+1), `K` (-1)         |
//! | `back`         | Backspace                  |
//! | `text`         | printable ASCII            |
//!
//! The leader and exit chords are configurable, see [`KeyBinding`].

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::error::Error;

/// Plain character with no Ctrl/Alt held. Shift is allowed since
/// terminals report capitals with it.
fn plain(key: &KeyEvent) -> Option<char> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

pub fn esc(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
}

pub fn enter(key: &KeyEvent) -> bool {
    key.code == KeyCode::Enter
}

pub fn tab(key: &KeyEvent) -> bool {
    key.code == KeyCode::Tab && !key.modifiers.contains(KeyModifiers::SHIFT)
}

pub fn backtab(key: &KeyEvent) -> bool {
    key.code == KeyCode::BackTab
        || (key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT))
}

pub fn down(key: &KeyEvent) -> bool {
    key.code == KeyCode::Down || plain(key) == Some('j')
}

pub fn up(key: &KeyEvent) -> bool {
    key.code == KeyCode::Up || plain(key) == Some('k')
}

pub fn slash(key: &KeyEvent) -> bool {
    plain(key) == Some('/')
}

pub fn about(key: &KeyEvent) -> bool {
    plain(key) == Some('?')
}

pub fn help(key: &KeyEvent) -> bool {
    plain(key) == Some('H')
}

/// Toggles the detail overlay.
pub fn view(key: &KeyEvent) -> bool {
    matches!(plain(key), Some('v' | 'V'))
}

/// Detail overlay scroll direction: `J` down, `K` up, 0 otherwise.
pub fn detail_scroll(key: &KeyEvent) -> i8 {
    match plain(key) {
        Some('J') => 1,
        Some('K') => -1,
        _ => 0,
    }
}

pub fn back(key: &KeyEvent) -> bool {
    key.code == KeyCode::Backspace
}

/// Printable ASCII for search input.
pub fn text(key: &KeyEvent) -> Option<char> {
    plain(key).filter(|c| (' '..='~').contains(c))
}

/// A configurable chord such as `ctrl+x` or `shift+tab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Ctrl/Alt must match exactly. Shift is ignored for characters since
    /// the character itself already carries case, unless the binding
    /// names Shift on a non-letter such as `shift+1`.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let mask = match key.code {
            KeyCode::Char(_) if !self.modifiers.contains(KeyModifiers::SHIFT) => {
                KeyModifiers::CONTROL | KeyModifiers::ALT
            }
            _ => KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT,
        };
        let code_matches = match (self.code, key.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) if self.modifiers.contains(KeyModifiers::CONTROL) => {
                a.eq_ignore_ascii_case(&b)
            }
            (a, b) => a == b,
        };
        code_matches && (self.modifiers & mask) == (key.modifiers & mask)
    }
}

impl FromStr for KeyBinding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidKey(s.to_string());
        let mut modifiers = KeyModifiers::NONE;
        let mut parts: Vec<&str> = s.trim().split('+').collect();
        let last = parts.pop().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        for part in parts {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "meta" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(invalid()),
            };
        }
        let code = match last.to_ascii_lowercase().as_str() {
            "esc" | "escape" => KeyCode::Esc,
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "space" => KeyCode::Char(' '),
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            _ => {
                let mut chars = last.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(invalid()),
                }
            }
        };
        // Terminals report shift+letter as the capital, so store it that way
        if let KeyCode::Char(c) = code
            && c.is_ascii_alphabetic()
            && modifiers.contains(KeyModifiers::SHIFT)
        {
            return Ok(Self {
                code: KeyCode::Char(c.to_ascii_uppercase()),
                modifiers: modifiers - KeyModifiers::SHIFT,
            });
        }
        Ok(Self { code, modifiers })
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Esc => write!(f, "esc"),
            KeyCode::Enter => write!(f, "enter"),
            KeyCode::Tab => write!(f, "tab"),
            KeyCode::Backspace => write!(f, "backspace"),
            other => write!(f, "{other:?}"),
        }
    }
}
