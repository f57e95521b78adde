// Keyboard and mouse input handling and command dispatch.
//
// Translates crossterm events into UserCommand messages for the
// orchestrator, or into local ViewState mutations (input line, cursors,
// theme menu, quit confirmation).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use super::layout::build_layout;
use super::widgets::{header, theme_menu};
use super::ViewState;
use crate::protocol::UserCommand;
use crate::roster::MIN_CANDIDATES_FOR_DRAW;
use crate::stage::StageView;
use crate::theme::ThemeId;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded (the
/// TUI loop itself consumes `ToggleFullscreen`, `ExitImmersive` and `Quit`).
/// Returns `None` when the key was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.input_mode {
        return handle_input_mode(key_event, view_state);
    }

    if view_state.theme_menu_open {
        return handle_theme_menu(key_event, view_state);
    }

    match key_event.code {
        // Roster editing: only while the roster panel is on screen
        KeyCode::Char('a') | KeyCode::Char('i') if !view_state.is_immersive() => {
            view_state.input_mode = true;
            None
        }
        KeyCode::Up | KeyCode::Char('k') if !view_state.is_immersive() => {
            view_state.roster_cursor = view_state.roster_cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') if !view_state.is_immersive() => {
            if view_state.roster_cursor + 1 < view_state.candidates.len() {
                view_state.roster_cursor += 1;
            }
            None
        }
        KeyCode::Char('d') | KeyCode::Delete if !view_state.is_immersive() => {
            if view_state.roster_cursor < view_state.candidates.len() {
                Some(UserCommand::RemoveCandidate(view_state.roster_cursor))
            } else {
                None
            }
        }

        // Stage actions
        KeyCode::Char('s') => start_command(view_state),
        KeyCode::Char('c') => match view_state.stage {
            StageView::Announcement { .. } => Some(UserCommand::Reset),
            _ => None,
        },
        KeyCode::Enter | KeyCode::Char(' ') => match view_state.stage {
            StageView::Invite => start_command(view_state),
            StageView::Announcement { .. } => Some(UserCommand::Reset),
            StageView::Scanning { .. } => None,
        },

        // Presentation
        KeyCode::Char('t') => {
            open_theme_menu(view_state);
            None
        }
        KeyCode::Char('f') => Some(UserCommand::ToggleFullscreen),
        KeyCode::Esc => {
            if view_state.is_immersive() {
                Some(UserCommand::ExitImmersive)
            } else {
                None
            }
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// Start (or re-roll) unless a run is on screen or the roster is too small.
fn start_command(view_state: &ViewState) -> Option<UserCommand> {
    if view_state.stage.is_scanning() || view_state.candidates.len() < MIN_CANDIDATES_FOR_DRAW {
        return None;
    }
    Some(UserCommand::StartSelection)
}

fn open_theme_menu(view_state: &mut ViewState) {
    view_state.theme_menu_open = true;
    view_state.theme_menu_cursor = view_state.theme.index();
}

/// Handle key events while in quit confirmation mode.
///
/// - `y` or `q` confirms quit
/// - `n` or `Esc` cancels
/// - All other keys are blocked
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Handle key events while typing a new candidate.
///
/// - Printable characters are appended to the input line
/// - Backspace removes the last character
/// - Enter submits; the line is kept when the name is empty or a duplicate
/// - Esc leaves input mode and clears the line
fn handle_input_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_mode = false;
            view_state.input_text.clear();
            None
        }
        KeyCode::Enter => {
            let name = view_state.input_text.trim();
            if name.is_empty() || view_state.candidates.iter().any(|c| c == name) {
                return None;
            }
            let name = name.to_string();
            view_state.input_text.clear();
            Some(UserCommand::AddCandidate(name))
        }
        KeyCode::Backspace => {
            view_state.input_text.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.input_text.push(c);
            None
        }
        _ => None,
    }
}

/// Handle key events while the theme dropdown is open.
fn handle_theme_menu(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let count = ThemeId::ALL.len();
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.theme_menu_cursor = (view_state.theme_menu_cursor + count - 1) % count;
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.theme_menu_cursor = (view_state.theme_menu_cursor + 1) % count;
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let theme = ThemeId::ALL[view_state.theme_menu_cursor % count];
            Some(choose_theme(view_state, theme))
        }
        KeyCode::Char(c @ '1'..='4') => {
            let idx = (c as usize) - ('1' as usize);
            Some(choose_theme(view_state, ThemeId::ALL[idx]))
        }
        KeyCode::Esc | KeyCode::Char('t') => {
            view_state.theme_menu_open = false;
            None
        }
        _ => None,
    }
}

/// Close the menu and emit the selection.
fn choose_theme(view_state: &mut ViewState, theme: ThemeId) -> UserCommand {
    view_state.theme_menu_open = false;
    view_state.theme = theme;
    UserCommand::SelectTheme(theme)
}

/// Handle a mouse event.
///
/// A button press on the header's theme badge toggles the theme menu. While
/// the menu is open, a press on a row selects that theme and a press
/// anywhere else closes it.
pub fn handle_mouse(mouse_event: MouseEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    if !matches!(mouse_event.kind, MouseEventKind::Down(_)) {
        return None;
    }

    let layout = build_layout(view_state.screen, view_state.is_immersive());
    let pointer = Position::new(mouse_event.column, mouse_event.row);

    if !view_state.theme_menu_open {
        let badge = header::badge_rect(layout.header, view_state.theme.profile(), false);
        if badge.contains(pointer) {
            open_theme_menu(view_state);
        }
        return None;
    }

    let menu = theme_menu::menu_rect(&layout, view_state.screen);
    if !menu.contains(pointer) {
        view_state.theme_menu_open = false;
        return None;
    }

    theme_menu::theme_at(menu, pointer.y).map(|theme| choose_theme(view_state, theme))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
