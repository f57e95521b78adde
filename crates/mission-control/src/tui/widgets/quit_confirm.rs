// Quit confirmation overlay widget.
//
// Renders a centered modal dialog asking the user to confirm leaving the
// console. Displayed on top of the main layout when
// `ViewState::confirm_quit` is true, styled with the active theme.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// Width and height of the confirmation dialog.
const DIALOG_WIDTH: u16 = 32;
const DIALOG_HEIGHT: u16 = 5;

/// Render the quit confirmation overlay centered on the screen.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let profile = state.theme.profile();
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);

    // Clear the area behind the dialog so it renders cleanly on top
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(profile.border_type)
        .border_style(Style::new().fg(profile.accent))
        .title(Span::styled(" Abort mission? ", profile.accent_style()));

    let key = Style::new()
        .fg(profile.accent)
        .add_modifier(Modifier::BOLD);
    let text = vec![
        Line::default(),
        Line::from(vec![
            Span::raw("  Leave mission control? ("),
            Span::styled("y", key),
            Span::raw("/"),
            Span::styled("n", key),
            Span::raw(")"),
        ]),
    ];

    let paragraph = Paragraph::new(text).block(block).style(profile.base());

    frame.render_widget(paragraph, dialog_area);
}

/// Compute a centered rectangle of the given size within `area`.
///
/// If the area is too small, the dialog is clamped to the available space.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
