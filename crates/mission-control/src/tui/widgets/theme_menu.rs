// Theme dropdown overlay.
//
// Anchored under the theme badge in the header's top-left corner. One row
// per theme: "<glyph> <name>  PROTOCOL ID: <id>", the active theme marked
// with a dot and the keyboard cursor highlighted.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem};
use ratatui::Frame;

use crate::theme::ThemeId;
use crate::tui::layout::AppLayout;
use crate::tui::ViewState;

const MENU_WIDTH: u16 = 52;
/// Theme rows plus top and bottom borders.
const MENU_HEIGHT: u16 = ThemeId::ALL.len() as u16 + 2;

/// Screen area of the dropdown, clamped to the terminal.
pub fn menu_rect(layout: &AppLayout, screen: Rect) -> Rect {
    let x = layout.header.x;
    let y = layout.header.y + 1;
    let width = MENU_WIDTH.min(screen.width.saturating_sub(x));
    let height = MENU_HEIGHT.min(screen.height.saturating_sub(y));
    Rect::new(x, y, width, height)
}

/// Theme under screen row `y` of the menu, if any.
pub fn theme_at(menu: Rect, y: u16) -> Option<ThemeId> {
    let row = y.checked_sub(menu.y + 1)? as usize;
    ThemeId::ALL.get(row).copied()
}

/// Render the dropdown over the header.
pub fn render(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let area = menu_rect(layout, frame.area());
    if area.is_empty() {
        return;
    }
    let profile = state.theme.profile();

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(profile.border_type)
        .border_style(Style::new().fg(profile.accent))
        .style(profile.base())
        .title(Span::styled(" SELECT ENVIRONMENT ", profile.muted_style()));

    let items: Vec<ListItem> = ThemeId::ALL
        .iter()
        .enumerate()
        .map(|(idx, theme)| {
            let option = theme.profile();
            let active = *theme == state.theme;
            let marker = if active { "●" } else { " " };
            let style = if idx == state.theme_menu_cursor {
                profile.button_style()
            } else if active {
                Style::new().fg(profile.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::new().fg(profile.foreground)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} {:<2} {:<15}", marker, option.glyph, option.name), style),
                Span::styled(
                    format!("PROTOCOL ID: {}", theme.as_str().to_uppercase()),
                    profile.muted_style(),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
