// Header widget: theme badge, fullscreen control and product title.
//
// Normal mode renders a bordered 5-row banner:
//   row 1: [glyph HUD MODE: <theme> ▾]  [FULL SCREEN]   (left-anchored)
//   row 2: ◢ MISSION CONTROL ◣  <version tag>           (centered)
//   row 3: FACILITATOR FORGE                            (centered)
// Immersive mode renders a single row with the badge and exit hint.
// In both modes the badge starts at the header's top-left cell, which is
// where mouse clicks open the theme menu.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::presentation::PresentationMode;
use crate::theme::ThemeProfile;
use crate::tui::ViewState;

pub const TITLE: &str = "MISSION CONTROL";
pub const SUBTITLE: &str = "FACILITATOR FORGE";

/// Label of the fullscreen control for the current mode.
pub fn fullscreen_label(mode: PresentationMode) -> &'static str {
    if mode.is_immersive() {
        "EXIT FULL"
    } else {
        "FULL SCREEN"
    }
}

/// Theme selector badge, with a caret showing whether the menu is open.
pub fn theme_badge(profile: &ThemeProfile, menu_open: bool) -> String {
    let caret = if menu_open { "▴" } else { "▾" };
    format!(
        " {} HUD MODE: {} {} ",
        profile.glyph,
        profile.cased(profile.name),
        caret
    )
}

/// Screen area of the theme badge inside `header`, for mouse hit-testing.
pub fn badge_rect(header: Rect, profile: &ThemeProfile, menu_open: bool) -> Rect {
    let width = Span::raw(theme_badge(profile, menu_open)).width() as u16;
    Rect::new(header.x, header.y, width.min(header.width), header.height.min(1))
}

/// Render the header into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    if state.is_immersive() {
        render_compact(frame, area, state);
        return;
    }

    let profile = state.theme.profile();
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_type(profile.border_type)
        .border_style(profile.border_style())
        .style(profile.base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let controls = Line::from(vec![
        Span::styled(
            theme_badge(profile, state.theme_menu_open),
            profile.button_style(),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" [f] {} ", fullscreen_label(state.presentation)),
            profile.muted_style(),
        ),
    ]);

    let mut title = vec![
        Span::styled("◢ ", Style::new().fg(profile.accent)),
        Span::styled(
            TITLE,
            Style::new()
                .fg(profile.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ◣", Style::new().fg(profile.accent)),
    ];
    if let Some(tag) = profile.version_tag {
        title.push(Span::styled(format!("  {}", tag), profile.muted_style()));
    }

    let lines = vec![
        Line::from(title),
        Line::from(Span::styled(SUBTITLE, profile.muted_style())),
    ];

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(inner);
    frame.render_widget(Paragraph::new(controls), rows[0]);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        rows[1],
    );
}

fn render_compact(frame: &mut Frame, area: Rect, state: &ViewState) {
    let profile = state.theme.profile();
    let line = Line::from(vec![
        Span::styled(
            theme_badge(profile, state.theme_menu_open),
            profile.button_style(),
        ),
        Span::styled(format!(" {} ", TITLE), profile.accent_style()),
        Span::styled(
            format!("[Esc/f] {}", fullscreen_label(state.presentation)),
            profile.muted_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).style(profile.base()), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
