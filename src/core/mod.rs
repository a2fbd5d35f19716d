//! # Core
//!
//! Primitives and their render model. Nothing in here knows about
//! terminals, key codes, or colours.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │          CORE           │
//!                    │                         │
//!                    │  • Slot (render model)  │
//!                    │  • Primitive (trait)    │
//!                    │  • List / Action        │
//!                    │  • Detail               │
//!                    │  • Intent               │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                    ┌─────────────────────────┐
//!                    │   TUI adapter (ratatui) │
//!                    │  keys, panels, runtime  │
//!                    └─────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`slot`]: `Slot`, `Line`, `Cell`, `Tone`, `Tier`
//! - [`primitive`]: the `Primitive` trait and `StaticPrimitive`
//! - [`list`]: filtering/paging selection engine
//! - [`action`]: menus built on `list`
//! - [`detail`]: scrollable read-only panel
//! - [`config`]: TOML/env/CLI settings

pub mod action;
pub mod config;
pub mod detail;
pub mod error;
pub mod intent;
pub mod list;
pub mod primitive;
pub mod slot;
pub mod text;

pub use error::{Error, Result};
pub use intent::Intent;
pub use primitive::{Primitive, StaticPrimitive};
pub use slot::{Cell, Line, Slot, Tier, Tone};
