// Messages exchanged between the TUI, the orchestrator and its timer tasks.

use crate::history::HistoryEntry;
use crate::stage::StageView;
use crate::theme::ThemeId;

/// Commands sent from the TUI to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    AddCandidate(String),
    RemoveCandidate(usize),
    /// Start a draw (also used to re-roll while a winner is shown).
    StartSelection,
    /// Clear the stage back to the invite view.
    Reset,
    SelectTheme(ThemeId),
    /// Presentation commands. The TUI owns the terminal and applies these
    /// itself; the orchestrator ignores them if they are forwarded.
    ToggleFullscreen,
    /// Leave fullscreen or theater mode.
    ExitImmersive,
    Quit,
}

/// Timer events fed back into the orchestrator. Each carries the run
/// generation it was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Tick { generation: u64 },
    Settled { generation: u64 },
}

/// Full view of orchestrator state pushed after structural changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppSnapshot {
    pub candidates: Vec<String>,
    /// Most recent first.
    pub history: Vec<HistoryEntry>,
    pub stage: StageView,
    pub theme: ThemeId,
}

/// Updates sent from the orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    StateSnapshot(Box<AppSnapshot>),
    /// Per-tick stage refresh; cheaper than a full snapshot.
    Stage(StageView),
    /// A run finished with this winner.
    SelectionComplete(String),
}
