//! Terminal list, menu and detail primitives with a keyboard-driven runtime.
//!
//! - [`core`]: primitives and the slot render model, no terminal code
//! - [`tui`]: key bindings, panel composer, runtime and terminal loop
//! - [`gallery`]: demo screens wired into a runtime

pub mod core;
pub mod gallery;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::{Error, Result};
