//! # Detail Primitive
//!
//! Read-only panel over pre-rendered rows: metadata, an optional
//! preformatted block, then the body. The first visible row is always a
//! live `scroll X-Y/N` indicator, so a page shows [`USABLE_ROWS`] rows of
//! content.
//!
//! Scrolling moves one row at a time and wraps at both ends. The panel is
//! a leaf: it never produces an intent.

use crate::core::intent::Intent;
use crate::core::primitive::Primitive;
use crate::core::slot::{Line, Slot, Tier, Tone, blank, row};

/// Rows per page, indicator included.
pub const PAGE_ROWS: usize = 24;
/// Content rows per page.
pub const USABLE_ROWS: usize = PAGE_ROWS - 1;

#[derive(Debug, Clone, Default)]
pub struct DetailOptions {
    pub title: String,
    pub meta: Vec<String>,
    pub block: Option<Vec<String>>,
    pub body: Vec<String>,
    pub shortcuts: String,
}

pub struct Detail {
    title: String,
    shortcuts: String,
    rows: Vec<Line>,
    top: usize,
}

impl Detail {
    pub fn new(opts: DetailOptions) -> Self {
        let mut rows: Vec<Line> = opts.meta.iter().map(|m| row(m.as_str(), Tone::Dim)).collect();
        rows.push(blank());
        if let Some(block) = opts.block.filter(|b| !b.is_empty()) {
            rows.extend(block.iter().map(|b| row(b.as_str(), Tone::Dim)));
            rows.push(blank());
        }
        rows.extend(opts.body.iter().map(|b| row(b.as_str(), Tone::Normal)));
        Self {
            title: opts.title,
            shortcuts: opts.shortcuts,
            rows,
            top: 0,
        }
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    /// Largest legal `top`: the last page ends on the last row. The
    /// indicator takes a page row, so exactly `PAGE_ROWS` rows still
    /// scroll by one.
    pub fn max_top(&self) -> usize {
        self.rows.len().saturating_sub(USABLE_ROWS)
    }

    fn scroll(&mut self, forward: bool) {
        let max = self.max_top();
        if max == 0 {
            self.top = 0;
            return;
        }
        self.top = match (forward, self.top) {
            (true, top) if top >= max => 0,
            (true, top) => top + 1,
            (false, 0) => max,
            (false, top) => top - 1,
        };
    }

    fn indicator(&self) -> Line {
        let total = self.rows.len();
        let (start, end) = if total == 0 {
            (0, 0)
        } else {
            (self.top + 1, total.min(self.top + USABLE_ROWS))
        };
        row(format!("scroll {start}-{end}/{total}"), Tone::Dim)
    }
}

impl<S> Primitive<S> for Detail {
    fn slot(&self) -> Slot {
        let end = self.rows.len().min(self.top + USABLE_ROWS);
        let mut content = Vec::with_capacity(PAGE_ROWS);
        content.push(self.indicator());
        content.extend_from_slice(&self.rows[self.top..end]);
        Slot {
            title: self.title.clone(),
            content,
            shortcuts: self.shortcuts.clone(),
            active: Vec::new(),
            tier: Tier::Nested,
            tab: false,
        }
    }

    fn up(&mut self) {
        self.scroll(false);
    }

    fn down(&mut self) {
        self.scroll(true);
    }

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
    use proptest::prelude::*;

    /// `total` rows: one meta row, the spacer, then body rows.
    fn detail(total: usize) -> Detail {
        assert!(total >= 2);
        Detail::new(DetailOptions {
            title: "Todo".to_string(),
            meta: vec!["status: open".to_string()],
            body: (0..total - 2).map(|i| format!("line {i}")).collect(),
            ..Default::default()
        })
    }

    fn slot(d: &Detail) -> Slot {
        Primitive::<()>::slot(d)
    }

    #[test]
    fn test_rows_layout_meta_block_body() {
        let d = Detail::new(DetailOptions {
            title: "Skill".to_string(),
            meta: vec!["name: a".to_string(), "description: b".to_string()],
            block: Some(vec!["$ run".to_string()]),
            body: vec!["hello".to_string()],
            shortcuts: "j/k scroll".to_string(),
        });
        let s = slot(&d);
        let texts: Vec<String> = s.content.iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["scroll 1-6/6", "name: a", "description: b", "", "$ run", "", "hello"]);
        assert_eq!(s.content[1].cells[0].tone, Tone::Dim);
        assert_eq!(s.content[6].cells[0].tone, Tone::Normal);
        assert_eq!(s.tier, Tier::Nested);
        assert_eq!(s.shortcuts, "j/k scroll");
    }

    #[test]
    fn test_empty_block_adds_no_spacer() {
        let d = Detail::new(DetailOptions {
            meta: vec!["m".to_string()],
            block: Some(Vec::new()),
            body: vec!["b".to_string()],
            ..Default::default()
        });
        assert_eq!(d.total(), 3);
    }

    #[test]
    fn test_short_detail_never_scrolls() {
        let mut d = detail(10);
        Primitive::<()>::down(&mut d);
        Primitive::<()>::up(&mut d);
        assert_eq!(d.top(), 0);
        assert_eq!(slot(&d).content[0].text(), "scroll 1-10/10");
    }

    #[test]
    fn test_thirty_rows_scroll_and_wrap() {
        let mut d = detail(30);
        assert_eq!(d.max_top(), 7);
        Primitive::<()>::down(&mut d);
        assert_eq!(d.top(), 1);
        for _ in 0..6 {
            Primitive::<()>::down(&mut d);
        }
        assert_eq!(d.top(), 7);
        assert_eq!(slot(&d).content[0].text(), "scroll 8-30/30");
        assert_eq!(slot(&d).content.last().map(|l| l.text()), Some("line 27".to_string()));
        Primitive::<()>::down(&mut d);
        assert_eq!(d.top(), 0);
        Primitive::<()>::up(&mut d);
        assert_eq!(d.top(), 7);
    }

    #[test]
    fn test_full_page_scrolls_one_row_for_indicator() {
        let mut d = detail(PAGE_ROWS);
        assert_eq!(d.max_top(), 1);
        Primitive::<()>::down(&mut d);
        assert_eq!(slot(&d).content[0].text(), "scroll 2-24/24");
        Primitive::<()>::down(&mut d);
        assert_eq!(d.top(), 0);
    }

    #[test]
    fn test_page_is_fixed_height() {
        let d = detail(100);
        assert_eq!(slot(&d).content.len(), PAGE_ROWS);
    }

    #[test]
    fn test_detail_is_leaf() {
        let d = detail(5);
        assert_eq!(Primitive::<()>::enter(&d), None);
        assert_eq!(Primitive::<()>::view(&d), None);
        assert!(!Primitive::<()>::has_view(&d));
    }

    proptest! {
        #[test]
        fn prop_scroll_stays_bounded_and_wraps_once(total in 2usize..80, moves in proptest::collection::vec(any::<bool>(), 0..120)) {
            let mut d = detail(total);
            let max = d.max_top();
            for forward in moves {
                let before = d.top();
                if forward { Primitive::<()>::down(&mut d) } else { Primitive::<()>::up(&mut d) }
                let after = d.top();
                prop_assert!(after <= max);
                if max > 0 {
                    let expected = match (forward, before) {
                        (true, b) if b == max => 0,
                        (true, b) => b + 1,
                        (false, 0) => max,
                        (false, b) => b - 1,
                    };
                    prop_assert_eq!(after, expected);
                }
            }
        }
    }
}
