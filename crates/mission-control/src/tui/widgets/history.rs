// Log history widget: most recent winners first.
//
// Each row: "<ordinal> <name>            HH:MM:SS"
// where ordinal counts down from the log length so the newest entry carries
// the highest number.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};
use ratatui::Frame;

use super::panel;
use crate::history::ordinal_label;
use crate::tui::ViewState;

pub const EMPTY_TEXT: &str = "Awaiting deployment...";

/// Render the history log into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let profile = state.theme.profile();
    let block = panel(profile, "Log History");

    if state.history.is_empty() {
        let paragraph = Paragraph::new(Span::styled(
            format!("  {}", profile.cased(EMPTY_TEXT)),
            profile.muted_style(),
        ))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let len = state.history.len();

    let items: Vec<ListItem> = state
        .history
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let ordinal = ordinal_label(len, idx);
            let time = row.decided_at.format("%H:%M:%S").to_string();
            let name = profile.cased(&row.name);
            // "NN " + name + padding + time
            let used = ordinal.len() + 1 + name.chars().count() + time.len();
            let pad = inner_width.saturating_sub(used).max(1);
            let name_style = if idx == 0 {
                Style::new()
                    .fg(profile.foreground)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::new().fg(profile.foreground)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", ordinal), profile.accent_style()),
                Span::styled(name, name_style),
                Span::raw(" ".repeat(pad)),
                Span::styled(time, profile.muted_style()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
