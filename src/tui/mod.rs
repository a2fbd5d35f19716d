//! # TUI Adapter
//!
//! The ratatui-specific layer: key predicates, colour roles, the panel
//! composer, the runtime state machine and the terminal loop that drives
//! it. `core` knows nothing about any of this.
//!
//! ## Redraw Strategy
//!
//! The loop only draws when something changed:
//!
//! - a key whose [`Effect`] is not `Ignored`
//! - a terminal resize
//! - the leader timer expiring (checked on every 100ms poll, so the
//!   "More options" footer disappears without further input)
//!
//! Every draw recomposes panels for the current terminal width.

mod component;
mod event;
pub mod keys;
pub mod panel;
pub mod runtime;
pub mod theme;

use std::fmt::Debug;
use std::hash::Hash;
use std::io::stdout;
use std::ops::ControlFlow;
use std::time::Instant;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::info;
use ratatui::DefaultTerminal;

use crate::core::error::{Error, Result};
use crate::tui::component::{Component, LinesView};
use crate::tui::event::{TuiEvent, poll_event, poll_event_immediate};

pub use keys::KeyBinding;
pub use runtime::{Effect, KeyMap, LeaderAction, LeaderKey, Runtime, RuntimeConfig};
pub use theme::{Role, Theme};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Disambiguated escape codes let Esc, Shift+Tab and Ctrl chords
        // arrive as distinct keys; terminals without support ignore this
        execute!(
            stdout(),
            Hide,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, Show);
    }
}

/// Run `runtime` on the real terminal until it exits.
///
/// `Action` and `Link` effects are handed to `execute`; returning
/// `ControlFlow::Break(value)` ends the loop with `Some(value)`. Leaving
/// through esc or the exit key yields `None`. The terminal is restored on
/// every path out, errors included.
pub fn run<S, T>(runtime: &mut Runtime<S>, mut execute: impl FnMut(Effect) -> ControlFlow<T>) -> Result<Option<T>>
where
    S: Copy + Eq + Hash + Debug,
{
    let mut terminal = ratatui::init();
    let outcome = TerminalModeGuard::new()
        .map_err(Error::from)
        .and_then(|_guard| event_loop(&mut terminal, runtime, &mut execute));
    ratatui::restore();
    outcome
}

fn event_loop<S, T>(
    terminal: &mut DefaultTerminal,
    runtime: &mut Runtime<S>,
    execute: &mut impl FnMut(Effect) -> ControlFlow<T>,
) -> Result<Option<T>>
where
    S: Copy + Eq + Hash + Debug,
{
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            let width = terminal.size()?.width as usize;
            let mut view = LinesView::new(runtime.render(width)?);
            terminal.draw(|f| {
                let area = f.area();
                view.render(f, area);
            })?;
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let mut next = poll_event()?;
        if runtime.tick(Instant::now()) {
            needs_redraw = true;
        }
        while let Some(event) = next {
            match event {
                TuiEvent::Resize => needs_redraw = true,
                TuiEvent::Key(key) => match runtime.handle_key(&key, Instant::now())? {
                    Effect::Ignored => {}
                    Effect::Render => needs_redraw = true,
                    Effect::Exit => {
                        info!("Runtime exited");
                        return Ok(None);
                    }
                    effect => {
                        needs_redraw = true;
                        if let ControlFlow::Break(value) = execute(effect) {
                            info!("Embedding application ended the loop");
                            return Ok(Some(value));
                        }
                    }
                },
            }
            next = poll_event_immediate()?;
        }
    }
}
