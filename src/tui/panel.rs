//! # Panel Composer
//!
//! Turns a [`Slot`] into styled ratatui lines. Two shapes:
//!
//! ```text
//! compose (always PANEL_HEIGHT lines)     compose_detail
//!
//! ────────────────────────────            ┌──────────────────────┐
//!                                         │──────── Todo ────────│
//! Title                                   │                      │
//!                                         │scroll 1-6/6          │
//! › row 0                                 │...                   │
//!   row 1                                 └──────────────────────┘
//!   (blank fillers up to BODY_ROWS)
//!
//!  footer hint
//!
//! ────────────────────────────
//! ```
//!
//! The base panel height never changes so the runtime can stack a detail
//! box on top of it at a predictable offset. Every line is clamped to the
//! width passed in; nothing is cached between calls.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::core::slot::{self, Slot, Tier};
use crate::core::text::{Align, pad, truncate_to_width, visible_width};
use crate::tui::theme::{Role, Theme};

/// Total rows of the base panel.
pub const PANEL_HEIGHT: usize = 15;
/// Content rows between the title and the footer.
pub const BODY_ROWS: usize = PANEL_HEIGHT - 8;

const TOP_HINTS: &str = "shift+h help • ? about • esc close";
const NESTED_HINTS: &str = "esc back";

/// Footer text for a slot: its shortcuts followed by the tier's fixed hints.
pub fn footer(slot: &Slot) -> String {
    let fixed = match slot.tier {
        Tier::Top => TOP_HINTS,
        Tier::Nested => NESTED_HINTS,
    };
    if slot.shortcuts.is_empty() {
        fixed.to_string()
    } else {
        format!("{} • {fixed}", slot.shortcuts)
    }
}

/// Cut a run of spans so its total display width fits in `width`.
fn clamp(spans: Vec<Span<'static>>, width: usize) -> Line<'static> {
    let mut used = 0;
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if used >= width {
            break;
        }
        let room = width - used;
        let text = truncate_to_width(&span.content, room).to_string();
        used += visible_width(&text);
        out.push(Span::styled(text, span.style));
    }
    Line::from(out)
}

fn blank_line(width: usize) -> Line<'static> {
    Line::from(" ".repeat(width))
}

fn separator(theme: &Theme, width: usize) -> Line<'static> {
    Line::from(theme.fg(Role::Accent, "─".repeat(width)))
}

/// Styled spans for a content row. `highlight` recolours every cell.
fn cells(line: &slot::Line, theme: &Theme, highlight: Option<Style>) -> Vec<Span<'static>> {
    line.cells
        .iter()
        .map(|c| Span::styled(c.text.clone(), highlight.unwrap_or_else(|| theme.tone(c.tone))))
        .collect()
}

/// Render the base panel with the tier's default footer.
pub fn compose(slot: &Slot, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let hint = theme.fg(Role::Dim, footer(slot));
    compose_with_footer(slot, theme, width, hint)
}

/// Render the base panel with a caller-supplied footer hint, used while
/// leader mode replaces the usual shortcuts.
pub fn compose_with_footer(slot: &Slot, theme: &Theme, width: usize, hint: Span<'static>) -> Vec<Line<'static>> {
    let rows = &slot.content[..slot.content.len().min(BODY_ROWS)];
    let accent = theme.style(Role::Accent);

    let mut out = Vec::with_capacity(PANEL_HEIGHT);
    out.push(separator(theme, width));
    out.push(blank_line(width));
    out.push(clamp(vec![theme.fg(Role::Accent, slot.title.clone())], width));
    out.push(blank_line(width));
    for (i, line) in rows.iter().enumerate() {
        let highlight = slot.active.contains(&i).then_some(accent);
        out.push(clamp(cells(line, theme, highlight), width));
    }
    for _ in rows.len()..BODY_ROWS {
        out.push(blank_line(width));
    }
    out.push(blank_line(width));
    out.push(clamp(vec![Span::raw(" "), hint], width));
    out.push(blank_line(width));
    out.push(separator(theme, width));
    out
}

/// Leader-mode footer: `More options: k label • ...` in the warning tone.
pub fn leader_footer<'a>(theme: &Theme, entries: impl IntoIterator<Item = (char, &'a str)>) -> Span<'static> {
    let options: Vec<String> = entries.into_iter().map(|(k, label)| format!("{k} {label}")).collect();
    theme.fg(Role::Warning, format!("More options: {}", options.join(" • ")))
}

/// Centered title between muted guide rules, exactly `inner` cells wide.
fn title_bar(title: &str, inner: usize, theme: &Theme) -> Vec<Span<'static>> {
    let plain = format!(" {title} ");
    let spare = inner.saturating_sub(visible_width(&plain));
    let left = spare / 2;
    let right = spare - left;
    let spans = vec![
        theme.fg(Role::BorderMuted, "─".repeat(left)),
        theme.fg(Role::Accent, plain),
        theme.fg(Role::BorderMuted, "─".repeat(right)),
    ];
    clamp(spans, inner).spans
}

/// Pad or cut a styled row to exactly `inner` cells.
fn fit(spans: Vec<Span<'static>>, inner: usize) -> Vec<Span<'static>> {
    let mut spans = clamp(spans, inner).spans;
    let used: usize = spans.iter().map(|s| visible_width(&s.content)).sum();
    spans.push(Span::raw(pad("", inner - used, Align::Left)));
    spans
}

/// Render a detail slot as a bordered box sized from the base panel's
/// height: up to `max(1, 2 * base_height - 4)` content rows.
pub fn compose_detail(slot: &Slot, theme: &Theme, width: usize, base_height: usize) -> Vec<Line<'static>> {
    let inner = width.saturating_sub(4).max(4);
    let take = (base_height * 2).saturating_sub(4).max(1);
    let border = |s: &str| theme.fg(Role::BorderMuted, s.to_string());
    let framed = |body: Vec<Span<'static>>| {
        let mut spans = vec![border("│")];
        spans.extend(fit(body, inner));
        spans.push(border("│"));
        clamp(spans, width)
    };

    let mut out = Vec::with_capacity(take + 4);
    out.push(clamp(vec![border(&format!("┌{}┐", "─".repeat(inner)))], width));
    out.push(framed(title_bar(&slot.title, inner, theme)));
    out.push(framed(Vec::new()));
    for line in slot.content.iter().take(take) {
        out.push(framed(cells(line, theme, None)));
    }
    out.push(clamp(vec![border(&format!("└{}┘", "─".repeat(inner)))], width));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slot::{Tone, row};
    use crate::tui::component::{Component, LinesView};
    use proptest::prelude::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn slot(rows: usize, tier: Tier) -> Slot {
        Slot {
            title: "Items".to_string(),
            content: (0..rows).map(|i| row(format!("row {i}"), Tone::Normal)).collect(),
            shortcuts: "enter open".to_string(),
            active: vec![1],
            tier,
            tab: tier == Tier::Top,
        }
    }

    #[test]
    fn test_panel_layout() {
        let theme = Theme::default();
        let lines = compose(&slot(3, Tier::Top), &theme, 30);
        assert_eq!(lines.len(), PANEL_HEIGHT);
        assert_eq!(text(&lines[0]), "─".repeat(30));
        assert_eq!(text(&lines[2]), "Items");
        assert_eq!(text(&lines[4]), "row 0");
        assert_eq!(text(&lines[7]), " ".repeat(30));
        assert_eq!(text(&lines[14]), "─".repeat(30));
        // Active row is recoloured, others keep their tone
        assert_eq!(lines[5].spans[0].style, theme.style(Role::Accent));
        assert_eq!(lines[4].spans[0].style, Style::new());
    }

    #[test]
    fn test_footer_by_tier() {
        assert_eq!(footer(&slot(0, Tier::Top)), "enter open • shift+h help • ? about • esc close");
        assert_eq!(footer(&slot(0, Tier::Nested)), "enter open • esc back");
        let bare = Slot::page("About", Vec::new(), "");
        assert_eq!(footer(&bare), "esc back");
        let top = Slot { tier: Tier::Top, ..bare };
        assert_eq!(footer(&top), "shift+h help • ? about • esc close");

        let lines = compose(&slot(2, Tier::Nested), &Theme::default(), 80);
        assert_eq!(text(&lines[12]), " enter open • esc back");
    }

    #[test]
    fn test_long_content_is_truncated_to_body() {
        let lines = compose(&slot(20, Tier::Top), &Theme::default(), 40);
        assert_eq!(lines.len(), PANEL_HEIGHT);
        assert_eq!(text(&lines[10]), "row 6");
        assert_eq!(text(&lines[11]), " ".repeat(40));
    }

    #[test]
    fn test_leader_footer() {
        let theme = Theme::default();
        let hint = leader_footer(&theme, [('c', "create"), ('w', "open actions")]);
        assert_eq!(hint.content, "More options: c create • w open actions");
        assert_eq!(hint.style, theme.style(Role::Warning));
        let lines = compose_with_footer(&slot(1, Tier::Top), &theme, 80, hint);
        assert_eq!(text(&lines[12]), " More options: c create • w open actions");
    }

    #[test]
    fn test_detail_box() {
        let s = Slot::page("Todo", vec![row("scroll 1-1/1", Tone::Dim), row("body", Tone::Normal)], "");
        let lines = compose_detail(&s, &Theme::default(), 20, PANEL_HEIGHT);
        assert_eq!(lines.len(), 2 + 4);
        assert_eq!(text(&lines[0]), format!("┌{}┐", "─".repeat(16)));
        assert_eq!(text(&lines[1]), "│───── Todo ─────│");
        assert_eq!(text(&lines[2]), format!("│{}│", " ".repeat(16)));
        assert_eq!(text(&lines[4]), format!("│body{}│", " ".repeat(12)));
        assert_eq!(text(&lines[5]), format!("└{}┘", "─".repeat(16)));
    }

    #[test]
    fn test_detail_box_takes_twice_base_height() {
        let s = Slot::page("Long", (0..50).map(|i| row(format!("{i}"), Tone::Normal)).collect(), "");
        assert_eq!(compose_detail(&s, &Theme::default(), 40, PANEL_HEIGHT).len(), 26 + 4);
        assert_eq!(compose_detail(&s, &Theme::default(), 40, 2).len(), 1 + 4);
    }

    #[test]
    fn test_panel_draws_on_test_backend() {
        let backend = TestBackend::new(30, PANEL_HEIGHT as u16);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut view = LinesView::new(compose(&slot(2, Tier::Top), &Theme::default(), 30));
        terminal
            .draw(|f| {
                let area = f.area();
                view.render(f, area);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 2)].symbol(), "I");
        assert_eq!(buffer[(2, 5)].symbol(), "w");
        assert_eq!(buffer[(0, 14)].symbol(), "─");
    }

    proptest! {
        #[test]
        fn prop_panel_height_and_width_are_fixed(rows in 0usize..30, width in 0usize..120, title in "[a-zA-Z日本 ]{0,60}") {
            let mut s = slot(rows, Tier::Top);
            s.title = title;
            let lines = compose(&s, &Theme::default(), width);
            prop_assert_eq!(lines.len(), PANEL_HEIGHT);
            for line in &lines {
                prop_assert!(visible_width(&text(line)) <= width);
            }
        }

        #[test]
        fn prop_detail_rows_fit_width(width in 0usize..100, rows in 0usize..40) {
            let s = Slot::page("T", (0..rows).map(|i| row("x".repeat(i * 3), Tone::Normal)).collect(), "");
            for line in compose_detail(&s, &Theme::default(), width, PANEL_HEIGHT) {
                prop_assert!(visible_width(&text(&line)) <= width);
            }
        }
    }
}
