use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Text};
use ratatui::widgets::Paragraph;

/// A reusable UI component.
///
/// Components receive their data as struct fields and render into a
/// `Rect` of the frame. `render` takes `&mut self` so a component can keep
/// presentation caches between frames.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Pre-composed lines drawn top-down from the area's origin.
///
/// Panels are composed to an exact width before they get here, so this
/// does no wrapping of its own. Lines past the bottom of the area are
/// dropped by ratatui.
pub struct LinesView {
    lines: Vec<Line<'static>>,
}

impl LinesView {
    pub fn new(lines: Vec<Line<'static>>) -> Self {
        Self { lines }
    }
}

impl Component for LinesView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = Text::from(std::mem::take(&mut self.lines));
        frame.render_widget(Paragraph::new(text), area);
    }
}
