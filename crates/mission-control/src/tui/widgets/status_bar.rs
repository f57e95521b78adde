// Status bar widget: context key hints on the left, footer on the right.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::stage::StageView;
use crate::tui::ViewState;

pub const FOOTER: &str = "MISSION CONTROL // PROTOCOL v5.2";

/// Key hints for the current input context, as (key, action) pairs.
pub fn key_hints(state: &ViewState) -> Vec<(&'static str, &'static str)> {
    if state.input_mode {
        return vec![("Enter", "add"), ("Esc", "done")];
    }
    if state.theme_menu_open {
        return vec![("↑↓", "move"), ("Enter", "apply"), ("Esc", "close")];
    }

    let mut hints = Vec::new();
    if !state.is_immersive() {
        hints.push(("a", "add"));
        hints.push(("d", "remove"));
    }
    match state.stage {
        StageView::Invite => hints.push(("s", "start")),
        StageView::Scanning { .. } => {}
        StageView::Announcement { .. } => {
            hints.push(("s", "re-roll"));
            hints.push(("c", "confirm"));
        }
    }
    hints.push(("t", "theme"));
    if state.is_immersive() {
        hints.push(("Esc", "exit full"));
    } else {
        hints.push(("f", "full screen"));
    }
    hints.push(("q", "quit"));
    hints
}

/// Render the status bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let profile = state.theme.profile();
    let key_style = Style::new()
        .fg(profile.accent)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::raw(" ")];
    for (key, action) in key_hints(state) {
        spans.push(Span::styled(format!("[{}]", key), key_style));
        spans.push(Span::styled(format!(" {}  ", action), profile.muted_style()));
    }

    let footer_width = FOOTER.chars().count() as u16 + 1;
    let columns =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(footer_width)]).split(area);

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(profile.base()),
        columns[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(FOOTER, profile.muted_style())).style(profile.base()),
        columns[1],
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
