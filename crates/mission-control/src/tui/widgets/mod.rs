// TUI widget modules for each console panel.

pub mod confetti;
pub mod header;
pub mod history;
pub mod quit_confirm;
pub mod roster;
pub mod stage;
pub mod status_bar;
pub mod telemetry;
pub mod theme_menu;

use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

use crate::theme::ThemeProfile;

/// Bordered panel block styled for the active theme.
pub fn panel<'a>(profile: &ThemeProfile, title: &str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(profile.border_type)
        .border_style(profile.border_style())
        .style(profile.base())
        .title(Span::styled(
            format!(" {} ", profile.cased(title)),
            profile.accent_style(),
        ))
}
