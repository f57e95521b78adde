// Telemetry strip: four cosmetic status tiles under the stage.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// (label, value) pairs, left to right.
pub const TILES: [(&str, &str); 4] = [
    ("UPLINK", "ENCRYPTED"),
    ("NODE", "MISSION HQ"),
    ("LATENCY", "0.04ms"),
    ("STATUS", "NOMINAL"),
];

/// Render the telemetry strip into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let profile = state.theme.profile();
    let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

    for ((label, value), column) in TILES.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(profile.border_type)
            .border_style(profile.border_style())
            .style(profile.base());
        let line = Line::from(vec![
            Span::styled(format!("{} ", label), profile.muted_style()),
            Span::styled(*value, profile.accent_style()),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), *column);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeId;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn renders_all_tiles() {
        let backend = TestBackend::new(120, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        for (_, value) in TILES {
            assert!(text.contains(value), "missing tile {}", value);
        }
    }

    #[test]
    fn narrow_strip_does_not_panic() {
        for theme in ThemeId::ALL {
            let backend = TestBackend::new(8, 3);
            let mut terminal = Terminal::new(backend).unwrap();
            let state = ViewState {
                theme,
                ..ViewState::default()
            };
            terminal
                .draw(|frame| render(frame, frame.area(), &state))
                .unwrap();
        }
    }
}
