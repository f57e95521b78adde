// Application state and orchestration logic.
//
// The orchestrator owns every piece of selection state (roster, engine,
// history, active theme). It consumes user commands from the TUI and timer
// events from its own ticker tasks, and pushes UI updates back to the TUI
// render loop.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::Config;
use crate::engine::{SelectionEngine, TickOutcome};
use crate::history::HistoryLog;
use crate::protocol::{AppSnapshot, SelectionEvent, UiUpdate, UserCommand};
use crate::roster::CandidateRoster;
use crate::stage::stage_view;
use crate::theme::ThemePresenter;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub roster: CandidateRoster,
    pub engine: SelectionEngine,
    pub history: HistoryLog,
    pub theme: ThemePresenter,
    pub rng: StdRng,
    /// The live ticker or settle timer, if any. At most one exists.
    pub current_timer: Option<JoinHandle<()>>,
    /// Sender handed to timer tasks so they can feed events back into the
    /// main event loop.
    pub selection_tx: mpsc::Sender<SelectionEvent>,
}

impl AppState {
    pub fn new(config: Config, selection_tx: mpsc::Sender<SelectionEvent>) -> Self {
        let roster = CandidateRoster::from_names(&config.roster.candidates);
        let engine = SelectionEngine::new(config.selection.timing());
        let history = HistoryLog::with_capacity(config.selection.history_capacity);
        let theme = ThemePresenter::new(config.display.theme_id());
        let rng = match config.selection.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        AppState {
            config,
            roster,
            engine,
            history,
            theme,
            rng,
            current_timer: None,
            selection_tx,
        }
    }

    /// Build a full snapshot for the TUI.
    pub fn build_snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            candidates: self.roster.names().to_vec(),
            history: self.history.iter().cloned().collect(),
            stage: stage_view(&self.engine),
            theme: self.theme.active(),
        }
    }

    /// Abort the live timer task, if any.
    pub fn cancel_timer(&mut self) {
        if let Some(handle) = self.current_timer.take() {
            handle.abort();
            debug!("Cancelled selection timer");
        }
    }

    /// Start (or restart) a draw.
    ///
    /// Returns `false` without touching any state when the roster has fewer
    /// than two candidates.
    pub fn start_selection(&mut self) -> bool {
        let Some(generation) = self.engine.start(&self.roster) else {
            return false;
        };
        info!(
            "Starting selection run #{} over {} candidates",
            generation,
            self.roster.len()
        );
        self.spawn_ticker(generation);
        true
    }

    /// Clear the stage and abandon any run in flight. History is kept.
    pub fn reset_selection(&mut self) {
        self.cancel_timer();
        self.engine.reset();
    }

    /// Apply one ticker event. On the final tick the ticker is stopped and
    /// the settle timer scheduled.
    pub fn handle_tick(&mut self, generation: u64) -> TickOutcome {
        let outcome = self.engine.tick(generation, &self.roster, &mut self.rng);
        if outcome == TickOutcome::Finished {
            debug!("Run #{} reached 100%, settling", generation);
            self.spawn_settle_timer(generation);
        }
        outcome
    }

    /// Apply the settle event: draw the winner and log it.
    pub fn handle_settled(&mut self, generation: u64) -> Option<String> {
        let winner = self.engine.settle(generation, &self.roster, &mut self.rng)?;
        self.current_timer = None;
        self.history.record(winner.clone());
        Some(winner)
    }

    fn spawn_ticker(&mut self, generation: u64) {
        self.cancel_timer();

        let period = self.engine.timing().tick_interval;
        let tx = self.selection_tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(SelectionEvent::Tick { generation }).await.is_err() {
                    break;
                }
            }
        });

        self.current_timer = Some(handle);
    }

    fn spawn_settle_timer(&mut self, generation: u64) {
        self.cancel_timer();

        let delay = self.engine.timing().settle_delay;
        let tx = self.selection_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(SelectionEvent::Settled { generation }).await;
        });

        self.current_timer = Some(handle);
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. Timer events from the selection ticker / settle tasks
/// 2. User commands from the TUI
///
/// Pushes UI updates through `ui_tx` for the TUI render loop. The live timer
/// is cancelled on exit so nothing mutates state after teardown.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut selection_rx: mpsc::Receiver<SelectionEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let _ = ui_tx
        .send(UiUpdate::StateSnapshot(Box::new(state.build_snapshot())))
        .await;

    loop {
        tokio::select! {
            // --- Timer events ---
            event = selection_rx.recv() => {
                match event {
                    Some(event) => {
                        handle_selection_event(&mut state, event, &ui_tx).await;
                    }
                    None => {
                        info!("Selection channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    // Cleanup
    state.cancel_timer();
    info!("Application event loop exiting");
    Ok(())
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.build_snapshot();
    let _ = ui_tx.send(UiUpdate::StateSnapshot(Box::new(snapshot))).await;
}

/// Handle a timer event from the ticker or settle task.
async fn handle_selection_event(
    state: &mut AppState,
    event: SelectionEvent,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match event {
        SelectionEvent::Tick { generation } => match state.handle_tick(generation) {
            TickOutcome::Stale => {
                debug!(
                    "Discarding stale tick (event gen: {}, current gen: {})",
                    generation,
                    state.engine.generation()
                );
            }
            TickOutcome::Advanced | TickOutcome::Finished => {
                let _ = ui_tx.send(UiUpdate::Stage(stage_view(&state.engine))).await;
            }
        },
        SelectionEvent::Settled { generation } => match state.handle_settled(generation) {
            Some(winner) => {
                info!("Selection run #{} complete: {}", generation, winner);
                let _ = ui_tx.send(UiUpdate::SelectionComplete(winner)).await;
                send_snapshot(state, ui_tx).await;
            }
            None if generation == state.engine.generation() => {
                // Roster emptied mid-run: the run ends without a winner.
                info!("Selection run #{} ended with an empty roster", generation);
                state.current_timer = None;
                send_snapshot(state, ui_tx).await;
            }
            None => {
                debug!("Discarding stale settle event (gen {})", generation);
            }
        },
    }
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::AddCandidate(name) => {
            if state.roster.add(&name) {
                info!("Added candidate {:?} ({} total)", name.trim(), state.roster.len());
                send_snapshot(state, ui_tx).await;
            } else {
                debug!("Ignored empty or duplicate candidate {:?}", name);
            }
        }
        UserCommand::RemoveCandidate(index) => {
            if let Some(name) = state.roster.remove(index) {
                info!("Removed candidate {:?} ({} left)", name, state.roster.len());
                send_snapshot(state, ui_tx).await;
            }
        }
        UserCommand::StartSelection => {
            if state.start_selection() {
                send_snapshot(state, ui_tx).await;
            } else {
                debug!(
                    "Start ignored: {} candidate(s), need at least 2",
                    state.roster.len()
                );
            }
        }
        UserCommand::Reset => {
            state.reset_selection();
            send_snapshot(state, ui_tx).await;
        }
        UserCommand::SelectTheme(theme) => {
            state.theme.select_theme(theme);
            info!("Switched theme to {}", theme);
            send_snapshot(state, ui_tx).await;
        }
        UserCommand::ToggleFullscreen | UserCommand::ExitImmersive => {
            debug!("Ignoring presentation command {:?}", cmd);
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EnginePhase;
    use crate::stage::StageView;
    use crate::theme::ThemeId;

    fn test_config(names: &[&str]) -> Config {
        let mut config = Config::default();
        config.selection.seed = Some(99);
        config.roster.candidates = names.iter().map(|n| n.to_string()).collect();
        config
    }

    fn test_state(names: &[&str]) -> (AppState, mpsc::Receiver<SelectionEvent>) {
        let (tx, rx) = mpsc::channel(256);
        (AppState::new(test_config(names), tx), rx)
    }

    /// Drive a started run to completion by feeding timer events by hand.
    async fn drive_to_completion(
        state: &mut AppState,
        rx: &mut mpsc::Receiver<SelectionEvent>,
    ) -> Option<String> {
        loop {
            match rx.recv().await.expect("timer channel open") {
                SelectionEvent::Tick { generation } => {
                    state.handle_tick(generation);
                }
                SelectionEvent::Settled { generation } => {
                    return state.handle_settled(generation);
                }
            }
        }
    }

    #[test]
    fn new_state_seeds_roster_and_theme() {
        let (tx, _rx) = mpsc::channel(1);
        let mut config = test_config(&["A", "B", "A"]);
        config.display.theme = "terminal-pro".into();
        let state = AppState::new(config, tx);
        assert_eq!(state.roster.len(), 2);
        assert_eq!(state.theme.active(), ThemeId::TerminalPro);
        assert!(state.history.is_empty());
        assert_eq!(state.engine.phase(), EnginePhase::Idle);
    }

    #[test]
    fn snapshot_reflects_state() {
        let (mut state, _rx) = test_state(&["A", "B"]);
        state.history.record("B");
        let snapshot = state.build_snapshot();
        assert_eq!(snapshot.candidates, vec!["A", "B"]);
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.history[0].name, "B");
        assert_eq!(snapshot.stage, StageView::Invite);
        assert_eq!(snapshot.theme, ThemeId::CommandCenter);
    }

    #[test]
    fn snapshot_history_matches_log_entries() {
        let (mut state, _rx) = test_state(&["A", "B"]);
        state.history.record("A");
        state.history.record("B");
        let snapshot = state.build_snapshot();
        let entries: Vec<_> = state.history.iter().cloned().collect();
        assert_eq!(snapshot.history, entries);
        assert_eq!(snapshot.history[0].name, "B");
    }

    #[tokio::test]
    async fn presentation_commands_leave_state_untouched() {
        let (mut state, _rx) = test_state(&["A", "B"]);
        let (ui_tx, mut ui_rx) = mpsc::channel(8);
        let before = state.build_snapshot();

        handle_user_command(&mut state, UserCommand::ToggleFullscreen, &ui_tx).await;
        handle_user_command(&mut state, UserCommand::ExitImmersive, &ui_tx).await;

        assert!(ui_rx.try_recv().is_err());
        assert_eq!(state.build_snapshot(), before);
        assert!(state.current_timer.is_none());
    }

    #[tokio::test]
    async fn start_with_one_candidate_is_noop() {
        let (mut state, _rx) = test_state(&["Solo"]);
        assert!(!state.start_selection());
        assert!(state.current_timer.is_none());
        assert_eq!(state.engine.phase(), EnginePhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn full_run_records_one_winner() {
        let (mut state, mut rx) = test_state(&["A", "B"]);
        assert!(state.start_selection());
        let winner = drive_to_completion(&mut state, &mut rx).await.unwrap();
        assert!(winner == "A" || winner == "B");
        assert_eq!(state.history.names(), vec![winner]);
        assert_eq!(state.engine.phase(), EnginePhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn run_takes_nominal_duration_plus_settle() {
        let (mut state, mut rx) = test_state(&["A", "B"]);
        let started = Instant::now();
        state.start_selection();
        drive_to_completion(&mut state, &mut rx).await.unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed >= std::time::Duration::from_millis(4000));
        assert!(elapsed < std::time::Duration::from_millis(4100));
    }

    #[tokio::test(start_paused = true)]
    async fn restart_cancels_previous_timer() {
        let (mut state, mut rx) = test_state(&["A", "B", "C"]);
        assert!(state.start_selection());
        assert!(state.start_selection());

        drive_to_completion(&mut state, &mut rx).await.unwrap();
        assert_eq!(state.history.len(), 1);

        // The first ticker was aborted, so nothing else ever arrives.
        let extra = tokio::time::timeout(std::time::Duration::from_secs(10), rx.recv()).await;
        assert!(extra.is_err(), "unexpected timer event: {:?}", extra);
        assert_eq!(state.history.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_mid_run_discards_pending_ticks() {
        let (mut state, mut rx) = test_state(&["A", "B"]);
        state.start_selection();
        let generation = state.engine.generation();
        tokio::time::sleep(std::time::Duration::from_millis(120)).await;
        state.reset_selection();
        assert!(state.current_timer.is_none());

        // Anything still queued from the aborted ticker is stale.
        while let Ok(SelectionEvent::Tick { generation: g }) = rx.try_recv() {
            assert_eq!(g, generation);
            assert_eq!(state.handle_tick(g), TickOutcome::Stale);
        }
        assert_eq!(state.engine.progress(), 0.0);
        assert!(state.history.is_empty());
    }
}
