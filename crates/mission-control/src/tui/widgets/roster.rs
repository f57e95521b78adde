// Crew roster widget: candidate list, headcount and the add-personnel line.
//
// Layout inside the panel:
//   row 1: input line ("> ADD PERSONNEL..." placeholder or pending text)
//   rest:  candidate rows, cursor row highlighted, scrolled to keep the
//          cursor visible

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};
use ratatui::Frame;

use super::panel;
use crate::tui::ViewState;

pub const INPUT_PLACEHOLDER: &str = "ADD PERSONNEL...";

/// Headcount badge text, e.g. "3 ACTIVE".
pub fn headcount_label(count: usize) -> String {
    format!("{} ACTIVE", count)
}

/// First visible row so that `cursor` stays within `visible` rows.
pub fn scroll_offset(cursor: usize, visible: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    cursor.saturating_sub(visible - 1)
}

/// Render the roster panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let profile = state.theme.profile();
    let block = panel(profile, "Crew Roster").title_top(
        Line::from(Span::styled(
            format!(" {} ", headcount_label(state.candidates.len())),
            profile.muted_style(),
        ))
        .right_aligned(),
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    // Input line
    let input_line = if state.input_mode {
        Line::from(vec![
            Span::styled("> ", profile.accent_style()),
            Span::styled(state.input_text.clone(), Style::new().fg(profile.foreground)),
            Span::styled("█", Style::new().fg(profile.accent)),
        ])
    } else {
        Line::from(vec![
            Span::styled("+ ", profile.muted_style()),
            Span::styled(profile.cased(INPUT_PLACEHOLDER), profile.muted_style()),
            Span::styled("  [a]", profile.muted_style()),
        ])
    };
    frame.render_widget(Paragraph::new(input_line), rows[0]);

    if state.candidates.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                profile.cased("  No personnel on file."),
                profile.muted_style(),
            )),
            rows[1],
        );
        return;
    }

    let visible = rows[1].height as usize;
    let offset = scroll_offset(state.roster_cursor, visible);

    let items: Vec<ListItem> = state
        .candidates
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, name)| {
            let selected = idx == state.roster_cursor && !state.input_mode;
            let marker = if selected { "▸ " } else { "  " };
            let style = if selected {
                Style::new()
                    .fg(profile.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::new().fg(profile.foreground)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(profile.cased(name), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), rows[1]);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
