// TUI console: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the orchestrator's state plus
// purely local UI state (input line, cursors, theme menu, presentation mode,
// confetti). The orchestrator pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them to `ViewState` and re-renders at the
// configured frame rate.

pub mod input;
pub mod layout;
pub mod listeners;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::widgets::Block;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::history::HistoryEntry;
use crate::presentation::{Presentation, PresentationMode};
use crate::protocol::{AppSnapshot, UiUpdate, UserCommand};
use crate::stage::StageView;
use crate::theme::ThemeId;

use layout::build_layout;
use listeners::AmbientListeners;
use widgets::confetti::{self, Particle};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
///
/// Updated incrementally via `UiUpdate` messages from the orchestrator and
/// directly by the input handlers for local-only state.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Roster, in display order.
    pub candidates: Vec<String>,
    /// Past winners, most recent first.
    pub history: Vec<HistoryEntry>,
    /// Current stage view.
    pub stage: StageView,
    /// Active theme.
    pub theme: ThemeId,
    /// Normal, fullscreen or theater.
    pub presentation: PresentationMode,
    /// Whether keystrokes go to the "add personnel" input line.
    pub input_mode: bool,
    /// Pending text of the input line.
    pub input_text: String,
    /// Highlighted roster row.
    pub roster_cursor: usize,
    /// Whether the theme dropdown is open.
    pub theme_menu_open: bool,
    /// Highlighted theme in the dropdown.
    pub theme_menu_cursor: usize,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
    /// Last known terminal area, for mouse hit-testing.
    pub screen: Rect,
    /// Render tick counter driving animations.
    pub frame_count: u64,
    /// Live confetti particles (winner view only).
    pub confetti: Vec<Particle>,
}

impl ViewState {
    /// Apply a full state snapshot from the orchestrator.
    ///
    /// Local UI state (input line, menu, presentation) is left unchanged.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        self.candidates = snapshot.candidates;
        self.history = snapshot.history;
        self.theme = snapshot.theme;
        self.set_stage(snapshot.stage);
        self.clamp_roster_cursor();
    }

    fn set_stage(&mut self, stage: StageView) {
        if stage.winner().is_none() {
            self.confetti.clear();
        }
        self.stage = stage;
    }

    /// Keep the roster cursor on a valid row after the roster shrinks.
    pub fn clamp_roster_cursor(&mut self) {
        self.roster_cursor = self
            .roster_cursor
            .min(self.candidates.len().saturating_sub(1));
    }

    /// Whether the stage-only layout is in effect.
    pub fn is_immersive(&self) -> bool {
        self.presentation.is_immersive()
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::Stage(stage) => {
            state.set_stage(stage);
        }
        UiUpdate::SelectionComplete(_) => {
            state.confetti = confetti::spawn(&mut rand::rng(), state.frame_count);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete console frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let area = frame.area();
    let profile = state.theme.profile();
    let layout = build_layout(area, state.is_immersive());

    frame.render_widget(Block::default().style(profile.base()), area);

    widgets::header::render(frame, layout.header, state);
    if !state.is_immersive() {
        widgets::roster::render(frame, layout.roster, state);
        widgets::history::render(frame, layout.history, state);
        widgets::telemetry::render(frame, layout.telemetry, state);
    }
    widgets::stage::render(frame, layout.stage, state);
    widgets::status_bar::render(frame, layout.status_bar, state);

    // Overlays
    if state.theme_menu_open {
        widgets::theme_menu::render(frame, &layout, state);
    }
    if state.confirm_quit {
        widgets::quit_confirm::render(frame, area, state);
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Subscribes the ambient listeners (mouse capture) for its lifetime.
/// 4. Runs an async select loop: UI updates, terminal input, render ticks.
/// 5. Releases listeners, leaves fullscreen and restores the terminal.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut presentation: Presentation,
    frame_interval: Duration,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        AmbientListeners::release();
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let listeners = AmbientListeners::subscribe()?;

    let mut view_state = ViewState::default();
    let size = terminal.size()?;
    view_state.screen = Rect::new(0, 0, size.width, size.height);

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(frame_interval);
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // UI updates from the orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        // Channel closed: app is shutting down
                        break;
                    }
                }
            }

            // Terminal input
            maybe_event = event_stream.next() => {
                let command = match maybe_event {
                    Some(Ok(Event::Key(key_event))) => input::handle_key(key_event, &mut view_state),
                    Some(Ok(Event::Mouse(mouse_event))) => input::handle_mouse(mouse_event, &mut view_state),
                    Some(Ok(Event::Resize(width, height))) => {
                        view_state.screen = Rect::new(0, 0, width, height);
                        None
                    }
                    Some(Ok(_)) => None,
                    Some(Err(e)) => {
                        debug!("Terminal input error: {}", e);
                        break;
                    }
                    None => break,
                };

                match command {
                    Some(UserCommand::Quit) => {
                        let _ = cmd_tx.send(UserCommand::Quit).await;
                        break;
                    }
                    Some(UserCommand::ToggleFullscreen) => {
                        view_state.presentation = presentation.toggle();
                    }
                    Some(UserCommand::ExitImmersive) => {
                        view_state.presentation = presentation.exit_immersive();
                    }
                    Some(cmd) => {
                        let _ = cmd_tx.send(cmd).await;
                    }
                    None => {}
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                view_state.frame_count = view_state.frame_count.wrapping_add(1);
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    presentation.exit_immersive();
    drop(listeners);
    ratatui::restore();
    info!("TUI exited");

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn snapshot(candidates: &[&str], stage: StageView) -> AppSnapshot {
        AppSnapshot {
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
            history: vec![HistoryEntry {
                name: "Vega".into(),
                decided_at: Local::now(),
            }],
            stage,
            theme: ThemeId::RetroArcade,
        }
    }

    fn draw(state: &ViewState, width: u16, height: u16) {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_frame(frame, state)).unwrap();
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert!(state.candidates.is_empty());
        assert!(state.history.is_empty());
        assert_eq!(state.stage, StageView::Invite);
        assert_eq!(state.theme, ThemeId::CommandCenter);
        assert_eq!(state.presentation, PresentationMode::Normal);
        assert!(!state.input_mode);
        assert!(!state.theme_menu_open);
        assert!(!state.confirm_quit);
        assert!(state.confetti.is_empty());
    }

    #[test]
    fn apply_snapshot_updates_fields() {
        let mut state = ViewState::default();
        state.input_text = "draft".into();
        state.apply_snapshot(snapshot(&["A", "B"], StageView::Invite));
        assert_eq!(state.candidates, vec!["A", "B"]);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.theme, ThemeId::RetroArcade);
        assert_eq!(state.input_text, "draft");
    }

    #[test]
    fn apply_snapshot_clamps_cursor() {
        let mut state = ViewState::default();
        state.roster_cursor = 5;
        state.apply_snapshot(snapshot(&["A", "B"], StageView::Invite));
        assert_eq!(state.roster_cursor, 1);
        state.apply_snapshot(snapshot(&[], StageView::Invite));
        assert_eq!(state.roster_cursor, 0);
    }

    #[test]
    fn selection_complete_spawns_confetti() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::SelectionComplete("A".into()));
        assert!(!state.confetti.is_empty());
    }

    #[test]
    fn leaving_announcement_clears_confetti() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::SelectionComplete("A".into()));
        apply_ui_update(
            &mut state,
            UiUpdate::Stage(StageView::Scanning {
                progress: 1.0,
                flicker: None,
            }),
        );
        assert!(state.confetti.is_empty());
    }

    #[test]
    fn stage_update_replaces_stage() {
        let mut state = ViewState::default();
        let stage = StageView::Scanning {
            progress: 50.0,
            flicker: Some("B".into()),
        };
        apply_ui_update(&mut state, UiUpdate::Stage(stage.clone()));
        assert_eq!(state.stage, stage);
    }

    #[test]
    fn render_every_theme_and_stage() {
        let stages = [
            StageView::Invite,
            StageView::Scanning {
                progress: 37.5,
                flicker: Some("Gemini".into()),
            },
            StageView::Announcement {
                winner: "Apollo".into(),
            },
        ];
        for theme in ThemeId::ALL {
            for stage in &stages {
                let mut state = ViewState::default();
                state.apply_snapshot(snapshot(&["Apollo", "Gemini"], stage.clone()));
                state.theme = theme;
                draw(&state, 120, 40);
                state.presentation = PresentationMode::Theater;
                draw(&state, 120, 40);
            }
        }
    }

    #[test]
    fn render_with_overlays_on_tiny_terminal() {
        let mut state = ViewState::default();
        state.apply_snapshot(snapshot(&["A", "B"], StageView::Announcement { winner: "A".into() }));
        apply_ui_update(&mut state, UiUpdate::SelectionComplete("A".into()));
        state.theme_menu_open = true;
        state.confirm_quit = true;
        draw(&state, 20, 8);
        draw(&state, 1, 1);
    }
}
