//! # Action Primitive
//!
//! A menu is a [`List`] with search and the prompt row switched off. The
//! tier decides whether tab-cycling and the help/about keys apply.

use crate::core::error::Result;
use crate::core::list::{List, ListOptions};
use crate::core::slot::Tier;

pub type Action<T, S> = List<T, S>;

/// Build a menu over `opts`. Search, prompt, tier and tab are overridden.
pub fn action<T, S>(opts: ListOptions<T, S>, tier: Tier) -> Result<Action<T, S>> {
    List::new(ListOptions {
        tier,
        tab: tier == Tier::Top,
        search: false,
        prompt: false,
        ..opts
    })
}
