//! # Rendering Model
//!
//! A `Slot` is what a primitive looks like right now: a title, a fixed set
//! of content rows, footer shortcuts, and a couple of flags the runtime
//! reads to decide which keys apply.
//!
//! ```text
//! Slot
//! ├── title: String       // panel heading
//! ├── content: Vec<Line>  // rows, each a run of toned cells
//! ├── shortcuts: String   // footer hint prefix
//! ├── active: Vec<usize>  // rows to highlight
//! ├── tier: Tier          // Top (tab/help/about) or Nested (back only)
//! └── tab: bool           // tab-cycling allowed while shown
//! ```
//!
//! Slots are built fresh on every render and never mutated afterwards.
//! Nothing here knows about terminals; tones are mapped to styles by the
//! TUI layer.

/// Navigation tier of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tier {
    /// Reachable by tab-cycling; shows help/about/close hints.
    #[default]
    Top,
    /// Reachable only by drilling in; shows a back hint.
    Nested,
}

/// Semantic colour of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    Dim,
    Accent,
}

/// A run of text with one tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// One content row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub cells: Vec<Cell>,
}

impl Line {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Full row text before width clamping.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }
}

/// Single-cell line.
pub fn row(text: impl Into<String>, tone: Tone) -> Line {
    Line::new(vec![Cell::new(text, tone)])
}

/// Empty line.
pub fn blank() -> Line {
    row("", Tone::Normal)
}

/// Render snapshot of a primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub title: String,
    pub content: Vec<Line>,
    pub shortcuts: String,
    pub active: Vec<usize>,
    pub tier: Tier,
    pub tab: bool,
}

impl Slot {
    /// A read-only slot with no highlight and no tab-cycling.
    pub fn page(title: impl Into<String>, content: Vec<Line>, shortcuts: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content,
            shortcuts: shortcuts.into(),
            active: Vec::new(),
            tier: Tier::Nested,
            tab: false,
        }
    }
}
