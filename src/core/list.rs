//! # List Primitive
//!
//! Selection, pagination, and filtering engine behind every picker screen.
//!
//! ## Layouts
//!
//! - **Linear**: one item per row, window scrolls so the selection is
//!   always in view.
//! - **Flow**: `page` rows × `columns` columns, filled column-major. The
//!   window jumps a whole page (`page * columns` items) at a time.
//!
//! ```text
//! flow, page = 3, columns = 2, top = 0
//!
//!   › item 0      item 3
//!     item 1      item 4
//!     item 2
//! ```
//!
//! ## State
//!
//! Only `selected`, `top` and `query` are stored. The filtered view is
//! rebuilt from `items` on every read; items never change after
//! construction.

use crate::core::error::{Error, Result};
use crate::core::intent::Intent;
use crate::core::primitive::Primitive;
use crate::core::slot::{Cell, Line, Slot, Tier, Tone, blank};
use crate::core::text::{Align, pad};

const MARK: &str = "› ";
const NO_MARK: &str = "  ";
const COLUMN_GAP: &str = "  ";
const FLOW_GAP: &str = "    ";

type Pick<T> = Box<dyn Fn(&T) -> String>;
type Find<T> = Box<dyn Fn(&T, &str) -> bool>;
type Route<T, S> = Box<dyn Fn(&T) -> Option<Intent<S>>>;

/// How one projected field renders in a row.
pub struct Col<T> {
    pub show: bool,
    pub width: usize,
    pub tone: Tone,
    pub align: Align,
    pub pick: Pick<T>,
}

impl<T> Col<T> {
    /// A visible, left-aligned, normal-tone column.
    pub fn new(width: usize, pick: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            show: true,
            width,
            tone: Tone::Normal,
            align: Align::Left,
            pick: Box::new(pick),
        }
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }
}

/// Multi-column layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flow {
    pub columns: usize,
}

/// Construction inputs for [`List`].
pub struct ListOptions<T, S> {
    pub title: String,
    pub items: Vec<T>,
    pub shortcuts: String,
    pub tier: Tier,
    pub tab: bool,
    pub search: bool,
    pub prompt: bool,
    pub page: usize,
    pub find: Option<Find<T>>,
    pub intent: Route<T, S>,
    pub view: Option<Route<T, S>>,
    pub cols: Vec<Col<T>>,
    pub flow: Option<Flow>,
}

impl<T: 'static, S: 'static> ListOptions<T, S> {
    /// Defaults: top tier, tab on, no search, no prompt, page of 7, and a
    /// finder that matches the query against every visible column.
    pub fn new(title: impl Into<String>, items: Vec<T>, cols: Vec<Col<T>>) -> Self {
        Self {
            title: title.into(),
            items,
            shortcuts: String::new(),
            tier: Tier::Top,
            tab: true,
            search: false,
            prompt: false,
            page: 7,
            find: None,
            intent: Box::new(|_| None),
            view: None,
            cols,
            flow: None,
        }
    }

    pub fn shortcuts(mut self, shortcuts: impl Into<String>) -> Self {
        self.shortcuts = shortcuts.into();
        self
    }

    pub fn tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub fn tab(mut self, tab: bool) -> Self {
        self.tab = tab;
        self
    }

    pub fn search(mut self, search: bool) -> Self {
        self.search = search;
        self
    }

    pub fn prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// `find` receives the query already lowercased.
    pub fn find(mut self, find: impl Fn(&T, &str) -> bool + 'static) -> Self {
        self.find = Some(Box::new(find));
        self
    }

    pub fn intent(mut self, intent: impl Fn(&T) -> Option<Intent<S>> + 'static) -> Self {
        self.intent = Box::new(intent);
        self
    }

    pub fn view(mut self, view: impl Fn(&T) -> Option<Intent<S>> + 'static) -> Self {
        self.view = Some(Box::new(view));
        self
    }

    pub fn flow(mut self, columns: usize) -> Self {
        self.flow = Some(Flow { columns });
        self
    }
}

pub struct List<T, S> {
    opts: ListOptions<T, S>,
    selected: usize,
    top: usize,
    query: String,
}

impl<T, S> List<T, S> {
    /// Validates the layout up front so rendering can never fail.
    pub fn new(opts: ListOptions<T, S>) -> Result<Self> {
        if opts.page == 0 {
            return Err(Error::InvalidLayout("page size must be at least 1"));
        }
        if opts.cols.iter().any(|c| c.width == 0) {
            return Err(Error::InvalidLayout("column width must be at least 1"));
        }
        if let Some(flow) = opts.flow {
            if flow.columns == 0 {
                return Err(Error::InvalidLayout("flow needs at least one column"));
            }
            if !opts.cols.iter().any(|c| c.show) {
                return Err(Error::NoVisibleColumn);
            }
        }
        Ok(Self {
            opts,
            selected: 0,
            top: 0,
            query: String::new(),
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn top(&self) -> usize {
        self.top
    }

    /// Items matching the current query, in original order.
    pub fn visible(&self) -> Vec<&T> {
        if self.query.is_empty() {
            return self.opts.items.iter().collect();
        }
        let low = self.query.to_lowercase();
        self.opts
            .items
            .iter()
            .filter(|item| self.matches(item, &low))
            .collect()
    }

    fn matches(&self, item: &T, low: &str) -> bool {
        match &self.opts.find {
            Some(find) => find(item, low),
            None => self
                .opts
                .cols
                .iter()
                .filter(|c| c.show)
                .any(|c| (c.pick)(item).to_lowercase().contains(low)),
        }
    }

    pub fn visible_len(&self) -> usize {
        self.visible().len()
    }

    /// Items per window: `page` rows, times the column count in flow mode.
    fn window(&self) -> usize {
        match self.opts.flow {
            Some(flow) => self.opts.page * flow.columns,
            None => self.opts.page,
        }
    }

    fn step(&mut self, forward: bool) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let max = len - 1;
        let next = match (forward, self.selected) {
            (true, sel) if sel >= max => 0,
            (true, sel) => sel + 1,
            (false, 0) => max,
            (false, sel) => sel - 1,
        };
        if next == self.selected {
            return;
        }
        self.selected = next;
        self.follow();
    }

    /// Move the window so it contains the selection.
    fn follow(&mut self) {
        let size = self.window();
        if self.opts.flow.is_some() {
            if self.selected < self.top || self.selected >= self.top + size {
                self.top = self.selected / size * size;
            }
            return;
        }
        if self.selected < self.top {
            self.top = self.selected;
        } else if self.selected >= self.top + size {
            self.top = self.selected + 1 - size;
        }
    }

    /// Pull selection and window back into legal range for the current view.
    fn reset(&mut self) {
        let max = self.visible_len().saturating_sub(1);
        self.selected = self.selected.min(max);
        if self.opts.flow.is_some() {
            let size = self.window();
            self.top = self.selected / size * size;
            return;
        }
        let limit = (max + 1).saturating_sub(self.opts.page);
        self.top = self.top.min(limit);
    }

    fn title(&self) -> String {
        if self.query.is_empty() {
            self.opts.title.clone()
        } else {
            format!("{} (search: {})", self.opts.title, self.query)
        }
    }

    fn prompt_rows(&self) -> Vec<Line> {
        if !self.opts.prompt {
            return Vec::new();
        }
        let input = if self.query.is_empty() {
            Cell::new("", Tone::Dim)
        } else {
            Cell::new(self.query.clone(), Tone::Normal)
        };
        vec![Line::new(vec![Cell::new("> ", Tone::Normal), input]), blank()]
    }

    fn line(&self, item: &T, mark: &str) -> Line {
        let shown: Vec<&Col<T>> = self.opts.cols.iter().filter(|c| c.show).collect();
        let mut cells = vec![Cell::new(mark, Tone::Normal)];
        for (i, col) in shown.iter().enumerate() {
            cells.push(Cell::new(pad(&(col.pick)(item), col.width, col.align), col.tone));
            if i + 1 < shown.len() {
                cells.push(Cell::new(COLUMN_GAP, Tone::Normal));
            }
        }
        Line::new(cells)
    }

    fn flow_line(&self, list: &[&T], row_index: usize, columns: usize, col: &Col<T>) -> Line {
        let rows = self.opts.page;
        let mut cells = Vec::with_capacity(columns * 2);
        for c in 0..columns {
            let idx = self.top + c * rows + row_index;
            match list.get(idx) {
                Some(item) => {
                    let selected = idx == self.selected;
                    let mark = if selected { MARK } else { NO_MARK };
                    let text = format!("{mark}{}", pad(&(col.pick)(item), col.width, Align::Left));
                    let tone = if selected { Tone::Accent } else { col.tone };
                    cells.push(Cell::new(text, tone));
                }
                None => cells.push(Cell::new(pad("", col.width + 2, Align::Left), Tone::Normal)),
            }
            if c + 1 < columns {
                cells.push(Cell::new(FLOW_GAP, Tone::Normal));
            }
        }
        Line::new(cells)
    }
}

impl<T, S> Primitive<S> for List<T, S> {
    fn slot(&self) -> Slot {
        let list = self.visible();
        let mut content = self.prompt_rows();
        let base = content.len();

        let active = match self.opts.flow {
            None => {
                for i in 0..self.opts.page {
                    let idx = self.top + i;
                    match list.get(idx) {
                        Some(item) => {
                            let mark = if idx == self.selected { MARK } else { NO_MARK };
                            content.push(self.line(item, mark));
                        }
                        None => content.push(blank()),
                    }
                }
                if list.is_empty() {
                    Vec::new()
                } else {
                    vec![base + (self.selected - self.top)]
                }
            }
            Some(flow) => {
                // `new` guarantees a visible column exists in flow mode
                if let Some(col) = self.opts.cols.iter().find(|c| c.show) {
                    for i in 0..self.opts.page {
                        content.push(self.flow_line(&list, i, flow.columns, col));
                    }
                }
                Vec::new()
            }
        };

        Slot {
            title: self.title(),
            content,
            shortcuts: self.opts.shortcuts.clone(),
            active,
            tier: self.opts.tier,
            tab: self.opts.tab,
        }
    }

    fn up(&mut self) {
        self.step(false);
    }

    fn down(&mut self) {
        self.step(true);
    }

    fn search(&self) -> bool {
        self.opts.search
    }

    fn set(&mut self, query: &str) {
        self.query = query.to_string();
        self.selected = 0;
        self.top = 0;
        self.reset();
    }

    fn enter(&self) -> Option<Intent<S>> {
        let list = self.visible();
        let item = list.get(self.selected)?;
        (self.opts.intent)(item)
    }

    fn has_view(&self) -> bool {
        self.opts.view.is_some()
    }

    fn view(&self) -> Option<Intent<S>> {
        let view = self.opts.view.as_ref()?;
        let list = self.visible();
        let item = list.get(self.selected)?;
        view(item)
    }
}

/// Case-insensitive substring finder over string fields.
pub fn contains_any<T>(fields: impl Fn(&T) -> Vec<&str> + 'static) -> impl Fn(&T, &str) -> bool {
    move |item, query| fields(item).iter().any(|f| f.to_lowercase().contains(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Named, named_items, named_list};
    use proptest::prelude::*;

    fn linear(count: usize, page: usize) -> List<Named, ()> {
        named_list(count, page, None)
    }

    #[test]
    fn test_down_scrolls_window_and_wraps() {
        let mut list = linear(5, 3);
        for _ in 0..3 {
            Primitive::<()>::down(&mut list);
        }
        assert_eq!((list.selected(), list.top()), (3, 1));
        list.down();
        assert_eq!((list.selected(), list.top()), (4, 2));
        list.down();
        assert_eq!((list.selected(), list.top()), (0, 0));
    }

    #[test]
    fn test_up_from_zero_wraps_to_last_page() {
        let mut list = linear(5, 3);
        list.up();
        assert_eq!((list.selected(), list.top()), (4, 2));
    }

    #[test]
    fn test_single_item_movement_is_noop() {
        let mut list = linear(1, 3);
        list.down();
        list.up();
        assert_eq!((list.selected(), list.top()), (0, 0));
    }

    #[test]
    fn test_empty_list_renders_blank_window() {
        let list = linear(0, 4);
        let slot = list.slot();
        assert_eq!(slot.content.len(), 4);
        assert!(slot.active.is_empty());
        assert_eq!(Primitive::<()>::enter(&list), None);
    }

    #[test]
    fn test_no_match_query_empties_view() {
        let mut list = linear(5, 3);
        list.set("xyz");
        assert!(list.visible().is_empty());
        assert_eq!(list.enter(), None);
        assert_eq!(list.view(), None);
        assert!(list.slot().active.is_empty());
    }

    #[test]
    fn test_set_resets_selection_and_filters_case_insensitively() {
        let mut list = linear(12, 3);
        list.down();
        list.down();
        list.set("ITEM 1");
        // item 1, item 10, item 11
        assert_eq!(list.visible_len(), 3);
        assert_eq!((list.selected(), list.top()), (0, 0));
        assert_eq!(list.slot().title, "Items (search: ITEM 1)");
    }

    #[test]
    fn test_enter_uses_filtered_view() {
        let mut list = linear(12, 3);
        list.set("item 1");
        list.down();
        assert_eq!(list.enter(), Some(Intent::Action("item 10".to_string())));
    }

    #[test]
    fn test_linear_slot_marks_selected_row() {
        let mut list = linear(5, 3);
        list.down();
        let slot = list.slot();
        assert_eq!(slot.content.len(), 3);
        assert_eq!(slot.active, vec![1]);
        assert!(slot.content[1].text().starts_with("› item 1"));
        assert!(slot.content[0].text().starts_with("  item 0"));
    }

    #[test]
    fn test_prompt_offsets_active_row() {
        let opts = ListOptions::<Named, ()>::new("Items", named_items(4), vec![Col::new(8, |n: &Named| n.0.clone())])
            .prompt(true)
            .search(true)
            .page(3);
        let mut list = List::new(opts).unwrap();
        list.down();
        let slot = list.slot();
        assert_eq!(slot.content.len(), 5);
        assert_eq!(slot.content[0].text(), "> ");
        assert_eq!(slot.active, vec![3]);
    }

    #[test]
    fn test_columns_pad_align_and_separate() {
        let cols = vec![
            Col::new(6, |n: &Named| n.0.clone()),
            Col::new(4, |_: &Named| "7".to_string()).align(Align::Right).tone(Tone::Dim),
            Col::new(4, |_: &Named| "hidden".to_string()).show(false),
        ];
        let list = List::<Named, ()>::new(ListOptions::new("T", named_items(1), cols)).unwrap();
        let line = &list.slot().content[0];
        assert_eq!(line.text(), "› item 0     7");
        assert_eq!(line.cells.len(), 4);
        assert_eq!(line.cells[3].tone, Tone::Dim);
    }

    #[test]
    fn test_flow_layout_is_column_major() {
        let mut list = named_list(5, 3, Some(2));
        list.down();
        let slot = list.slot();
        assert_eq!(slot.content.len(), 3);
        assert!(slot.active.is_empty());
        let first = &slot.content[0];
        assert!(first.cells[0].text.contains("item 0"));
        assert!(first.cells[2].text.contains("item 3"));
        let second = &slot.content[1];
        assert_eq!(second.cells[0].tone, Tone::Accent);
        assert!(second.cells[0].text.starts_with("› item 1"));
        // slot 5 is past the end
        let third = &slot.content[2];
        assert_eq!(third.cells[2].text.trim(), "");
    }

    #[test]
    fn test_flow_window_jumps_by_page() {
        let mut list = named_list(14, 3, Some(2));
        for _ in 0..6 {
            list.down();
        }
        assert_eq!((list.selected(), list.top()), (6, 6));
        list.up();
        assert_eq!(list.top(), 0);
        list.up();
        list.up();
        list.up();
        list.up();
        list.up();
        list.up();
        assert_eq!((list.selected(), list.top()), (13, 12));
    }

    #[test]
    fn test_flow_without_visible_column_is_rejected() {
        let opts = ListOptions::<Named, ()>::new(
            "T",
            named_items(3),
            vec![Col::new(5, |n: &Named| n.0.clone()).show(false)],
        )
        .flow(2);
        assert!(matches!(List::new(opts), Err(Error::NoVisibleColumn)));
    }

    #[test]
    fn test_zero_page_is_rejected() {
        let opts = ListOptions::<Named, ()>::new("T", named_items(3), vec![Col::new(5, |n: &Named| n.0.clone())]).page(0);
        assert!(matches!(List::new(opts), Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn test_has_view_reflects_callback() {
        let list = linear(3, 3);
        assert!(!list.has_view());
        let opts = ListOptions::<Named, ()>::new("T", named_items(3), vec![Col::new(5, |n: &Named| n.0.clone())])
            .view(|n| Some(Intent::Detail(n.0.clone())));
        let list = List::new(opts).unwrap();
        assert!(list.has_view());
        assert_eq!(list.view(), Some(Intent::Detail("item 0".to_string())));
    }

    proptest! {
        #[test]
        fn prop_down_n_times_returns_home(count in 1usize..40, page in 1usize..10, start in 0usize..40) {
            let mut list = linear(count, page);
            for _ in 0..(start % count) {
                list.down();
            }
            let home = list.selected();
            for _ in 0..count {
                list.down();
            }
            prop_assert_eq!(list.selected(), home);
            for _ in 0..count {
                list.up();
            }
            prop_assert_eq!(list.selected(), home);
        }

        #[test]
        fn prop_linear_window_contains_selection(
            count in 1usize..40,
            page in 1usize..10,
            moves in proptest::collection::vec(0u8..3, 0..60),
        ) {
            let mut list = linear(count, page);
            for m in moves {
                match m {
                    0 => list.down(),
                    1 => list.up(),
                    _ => list.set("item"),
                }
                prop_assert!(list.top() <= list.selected());
                prop_assert!(list.selected() < list.top() + page);
                prop_assert!(list.selected() < list.visible_len());
            }
        }

        #[test]
        fn prop_flow_top_aligned_to_page(
            count in 1usize..60,
            page in 1usize..8,
            columns in 1usize..4,
            moves in proptest::collection::vec(any::<bool>(), 0..80),
        ) {
            let mut list = named_list(count, page, Some(columns));
            for forward in moves {
                if forward { list.down() } else { list.up() }
                prop_assert_eq!(list.top() % (page * columns), 0);
                prop_assert!(list.selected() >= list.top());
                prop_assert!(list.selected() < list.top() + page * columns);
            }
        }

        #[test]
        fn prop_set_is_idempotent(count in 0usize..30, query in "[a-z0-9 ]{0,6}") {
            let mut once = linear(count, 4);
            once.set(&query);
            let mut twice = linear(count, 4);
            twice.set(&query);
            twice.set(&query);
            prop_assert_eq!(once.slot(), twice.slot());
            prop_assert_eq!((once.selected(), once.top()), (twice.selected(), twice.top()));
        }
    }
}
