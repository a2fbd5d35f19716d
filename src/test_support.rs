//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::Intent;
use crate::core::list::{Col, List, ListOptions};

/// Minimal list item: just a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Named(pub String);

/// `item 0` through `item {n-1}`.
pub fn named_items(n: usize) -> Vec<Named> {
    (0..n).map(|i| Named(format!("item {i}"))).collect()
}

/// A list titled "Items" over [`named_items`] whose enter intent is
/// `Action(name)`.
pub fn named_list(count: usize, page: usize, flow: Option<usize>) -> List<Named, ()> {
    let mut opts = ListOptions::new("Items", named_items(count), vec![Col::new(10, |n: &Named| n.0.clone())])
        .page(page)
        .intent(|n: &Named| Some(Intent::Action(n.0.clone())));
    if let Some(columns) = flow {
        opts = opts.flow(columns);
    }
    List::new(opts).unwrap()
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Plain character press, with Shift set for capitals like a real terminal.
pub fn ch(c: char) -> KeyEvent {
    let modifiers = if c.is_ascii_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    KeyEvent::new(KeyCode::Char(c), modifiers)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}
