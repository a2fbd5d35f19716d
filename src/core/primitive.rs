//! # Primitive
//!
//! The capability contract every interactive screen implements. The
//! runtime only ever talks to screens through this trait.

use crate::core::intent::Intent;
use crate::core::slot::Slot;

pub trait Primitive<S> {
    /// Current render snapshot. Pure with respect to internal state.
    fn slot(&self) -> Slot;

    fn up(&mut self);

    fn down(&mut self);

    /// Whether incremental search applies to this screen.
    fn search(&self) -> bool;

    /// Apply (or clear, with `""`) the search filter.
    fn set(&mut self, query: &str);

    /// Commit the current selection.
    fn enter(&self) -> Option<Intent<S>>;

    fn has_view(&self) -> bool;

    /// Secondary action on the current selection, usually opening a detail.
    fn view(&self) -> Option<Intent<S>>;
}

/// Read-only screen: same slot every time, every mutator a no-op.
pub struct StaticPrimitive {
    build: Box<dyn Fn() -> Slot>,
}

impl StaticPrimitive {
    pub fn new(build: impl Fn() -> Slot + 'static) -> Self {
        Self {
            build: Box::new(build),
        }
    }
}

impl<S> Primitive<S> for StaticPrimitive {
    fn slot(&self) -> Slot {
        (self.build)()
    }

    fn up(&mut self) {}

    fn down(&mut self) {}

    fn search(&self) -> bool {
        false
    }

    fn set(&mut self, _query: &str) {}

    fn enter(&self) -> Option<Intent<S>> {
        None
    }

    fn has_view(&self) -> bool {
        false
    }

    fn view(&self) -> Option<Intent<S>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slot::{Tone, row};

    #[test]
    fn test_static_primitive_ignores_mutators() {
        let mut page = StaticPrimitive::new(|| Slot::page("About", vec![row("hello", Tone::Normal)], ""));
        let before = Primitive::<()>::slot(&page);
        Primitive::<()>::down(&mut page);
        Primitive::<()>::set(&mut page, "zzz");
        Primitive::<()>::up(&mut page);
        assert_eq!(Primitive::<()>::slot(&page), before);
        assert!(!Primitive::<()>::search(&page));
        assert!(!Primitive::<()>::has_view(&page));
        assert_eq!(Primitive::<()>::enter(&page), None);
        assert_eq!(Primitive::<()>::view(&page), None);
    }
}
