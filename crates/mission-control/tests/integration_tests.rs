// Integration tests for mission control.
//
// These tests drive the orchestrator end-to-end through its channels, the
// same way the TUI does, with tokio's clock paused so full selection runs
// complete instantly and deterministically.

use std::time::Duration;

use mission_control::app::{self, AppState};
use mission_control::config::Config;
use mission_control::protocol::{AppSnapshot, UiUpdate, UserCommand};
use mission_control::stage::StageView;
use mission_control::theme::ThemeId;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

// ===========================================================================
// Test helpers
// ===========================================================================

/// A running orchestrator plus the TUI-side channel ends.
struct Harness {
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_rx: mpsc::Receiver<UiUpdate>,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    /// Spawn `app::run` over the given roster and consume the initial snapshot.
    async fn start(names: &[&str]) -> (Harness, AppSnapshot) {
        let mut config = Config::default();
        config.roster.candidates = names.iter().map(|n| n.to_string()).collect();
        config.selection.seed = Some(11);

        let (selection_tx, selection_rx) = mpsc::channel(256);
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (ui_tx, ui_rx) = mpsc::channel(4096);

        let state = AppState::new(config, selection_tx);
        let handle = tokio::spawn(app::run(cmd_rx, selection_rx, ui_tx, state));

        let mut harness = Harness {
            cmd_tx,
            ui_rx,
            handle,
        };
        let initial = harness.snapshot().await;
        (harness, initial)
    }

    async fn send(&self, cmd: UserCommand) {
        self.cmd_tx.send(cmd).await.unwrap();
    }

    /// Next full snapshot, skipping stage-only updates.
    async fn snapshot(&mut self) -> AppSnapshot {
        loop {
            match self.ui_rx.recv().await.expect("ui channel closed") {
                UiUpdate::StateSnapshot(snapshot) => return *snapshot,
                _ => continue,
            }
        }
    }

    /// Wait for the next completed run and return the winner.
    async fn winner(&mut self) -> String {
        loop {
            match self.ui_rx.recv().await.expect("ui channel closed") {
                UiUpdate::SelectionComplete(winner) => return winner,
                _ => continue,
            }
        }
    }

    /// Drain updates until the orchestrator goes quiet for a while.
    ///
    /// Returns the number of completed runs seen and the last snapshot.
    async fn drain(&mut self) -> (usize, Option<AppSnapshot>) {
        let mut completions = 0;
        let mut last = None;
        while let Ok(Some(update)) =
            tokio::time::timeout(Duration::from_secs(10), self.ui_rx.recv()).await
        {
            match update {
                UiUpdate::SelectionComplete(_) => completions += 1,
                UiUpdate::StateSnapshot(snapshot) => last = Some(*snapshot),
                UiUpdate::Stage(_) => {}
            }
        }
        (completions, last)
    }

    async fn quit(self) {
        self.send(UserCommand::Quit).await;
        self.handle.await.unwrap().unwrap();
    }
}

// ===========================================================================
// Selection runs
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn two_candidates_produce_one_winner() {
    let (mut h, initial) = Harness::start(&["A", "B"]).await;
    assert_eq!(initial.stage, StageView::Invite);

    h.send(UserCommand::StartSelection).await;
    let winner = h.winner().await;
    assert!(winner == "A" || winner == "B");

    let after = h.snapshot().await;
    assert_eq!(
        after.stage,
        StageView::Announcement {
            winner: winner.clone()
        }
    );
    assert_eq!(after.history.len(), 1);
    assert_eq!(after.history[0].name, winner);

    h.quit().await;
}

#[tokio::test(start_paused = true)]
async fn scanning_progress_climbs_to_one_hundred() {
    let (mut h, _) = Harness::start(&["A", "B", "C"]).await;
    h.send(UserCommand::StartSelection).await;

    let mut last_progress = 0.0;
    loop {
        match h.ui_rx.recv().await.unwrap() {
            UiUpdate::Stage(StageView::Scanning { progress, flicker }) => {
                assert!(progress >= last_progress);
                assert!(progress <= 100.0);
                let name = flicker.expect("flicker set after first tick");
                assert!(["A", "B", "C"].contains(&name.as_str()));
                last_progress = progress;
            }
            UiUpdate::SelectionComplete(_) => break,
            _ => {}
        }
    }
    assert_eq!(last_progress, 100.0);

    h.quit().await;
}

#[tokio::test(start_paused = true)]
async fn single_candidate_cannot_start() {
    let (mut h, _) = Harness::start(&["Solo"]).await;

    h.send(UserCommand::StartSelection).await;
    // The theme switch forces a snapshot after the ignored start.
    h.send(UserCommand::SelectTheme(ThemeId::ZenStudio)).await;
    let snap = h.snapshot().await;
    assert_eq!(snap.stage, StageView::Invite);
    assert!(snap.history.is_empty());

    let (completions, _) = h.drain().await;
    assert_eq!(completions, 0);

    h.quit().await;
}

#[tokio::test(start_paused = true)]
async fn double_start_completes_once() {
    let (mut h, _) = Harness::start(&["A", "B", "C"]).await;

    h.send(UserCommand::StartSelection).await;
    h.send(UserCommand::StartSelection).await;

    let (completions, last) = h.drain().await;
    assert_eq!(completions, 1);
    assert_eq!(last.unwrap().history.len(), 1);

    h.quit().await;
}

#[tokio::test(start_paused = true)]
async fn reset_mid_run_records_nothing() {
    let (mut h, _) = Harness::start(&["A", "B"]).await;

    h.send(UserCommand::StartSelection).await;
    tokio::time::sleep(Duration::from_millis(1000)).await;
    h.send(UserCommand::Reset).await;

    let (completions, last) = h.drain().await;
    assert_eq!(completions, 0);
    let last = last.unwrap();
    assert_eq!(last.stage, StageView::Invite);
    assert!(last.history.is_empty());

    h.quit().await;
}

#[tokio::test(start_paused = true)]
async fn confirm_after_winner_returns_to_invite_and_keeps_history() {
    let (mut h, _) = Harness::start(&["A", "B"]).await;

    h.send(UserCommand::StartSelection).await;
    h.winner().await;
    h.snapshot().await;

    h.send(UserCommand::Reset).await;
    let snap = h.snapshot().await;
    assert_eq!(snap.stage, StageView::Invite);
    assert_eq!(snap.history.len(), 1);

    h.quit().await;
}

#[tokio::test(start_paused = true)]
async fn history_keeps_eight_most_recent() {
    let (mut h, _) = Harness::start(&["A", "B", "C"]).await;

    let mut winners = Vec::new();
    for _ in 0..9 {
        h.send(UserCommand::StartSelection).await;
        winners.push(h.winner().await);
    }
    let snap = h.snapshot().await;

    assert_eq!(snap.history.len(), 8);
    let logged: Vec<String> = snap.history.iter().map(|r| r.name.clone()).collect();
    let expected: Vec<String> = winners.iter().rev().take(8).cloned().collect();
    assert_eq!(logged, expected);

    h.quit().await;
}

#[tokio::test(start_paused = true)]
async fn removing_everyone_mid_run_ends_without_winner() {
    let (mut h, _) = Harness::start(&["A", "B"]).await;

    h.send(UserCommand::StartSelection).await;
    h.send(UserCommand::RemoveCandidate(0)).await;
    h.send(UserCommand::RemoveCandidate(0)).await;

    let (completions, last) = h.drain().await;
    assert_eq!(completions, 0);
    let last = last.unwrap();
    assert!(last.candidates.is_empty());
    assert!(last.history.is_empty());
    assert_eq!(last.stage, StageView::Invite);

    h.quit().await;
}

// ===========================================================================
// Roster editing
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn duplicate_add_is_ignored() {
    let (mut h, _) = Harness::start(&["A", "B", "C"]).await;

    h.send(UserCommand::AddCandidate("A".into())).await;
    h.send(UserCommand::AddCandidate("   ".into())).await;
    h.send(UserCommand::AddCandidate(" D ".into())).await;

    let snap = h.snapshot().await;
    assert_eq!(snap.candidates, vec!["A", "B", "C", "D"]);

    h.quit().await;
}

#[tokio::test(start_paused = true)]
async fn remove_by_position() {
    let (mut h, _) = Harness::start(&["A", "B", "C"]).await;

    h.send(UserCommand::RemoveCandidate(1)).await;
    let snap = h.snapshot().await;
    assert_eq!(snap.candidates, vec!["A", "C"]);

    // Out of range is a no-op; the theme switch forces the next snapshot.
    h.send(UserCommand::RemoveCandidate(7)).await;
    h.send(UserCommand::SelectTheme(ThemeId::RetroArcade)).await;
    let snap = h.snapshot().await;
    assert_eq!(snap.candidates, vec!["A", "C"]);

    h.quit().await;
}

// ===========================================================================
// Themes
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn theme_switch_leaves_other_state_untouched() {
    let (mut h, _) = Harness::start(&["A", "B"]).await;

    h.send(UserCommand::StartSelection).await;
    h.winner().await;
    let before = h.snapshot().await;

    h.send(UserCommand::SelectTheme(ThemeId::TerminalPro)).await;
    let after = h.snapshot().await;

    assert_eq!(after.theme, ThemeId::TerminalPro);
    assert_eq!(after.candidates, before.candidates);
    assert_eq!(after.stage, before.stage);
    assert_eq!(after.history.len(), before.history.len());
    assert_eq!(after.history[0].name, before.history[0].name);

    h.quit().await;
}

#[tokio::test(start_paused = true)]
async fn quit_stops_the_loop_with_run_in_flight() {
    let (h, _) = Harness::start(&["A", "B"]).await;
    h.send(UserCommand::StartSelection).await;
    h.quit().await;
}
