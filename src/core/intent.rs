//! # Intents
//!
//! What a primitive asks the runtime to do when the user confirms a row or
//! opens its secondary view. The runtime matches on every variant.
//!
//! `S` is the caller's screen identifier type, usually a small `Copy` enum.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent<S> {
    /// Switch the base panel to another registered screen.
    Screen(S),
    /// Attach a detail overlay by key.
    Detail(String),
    /// Opaque action for the embedding application.
    Action(String),
    /// External link for the embedding application.
    Link(String),
}
