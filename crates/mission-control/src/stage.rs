// Display stage: which of the three stage views the engine state maps to.

use crate::engine::{EnginePhase, SelectionEngine};

/// The mutually exclusive stage views.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StageView {
    /// Nothing drawn yet: radar animation and the start prompt.
    #[default]
    Invite,
    /// A run is in progress (Running or Settling).
    Scanning {
        progress: f64,
        flicker: Option<String>,
    },
    /// A winner has been drawn.
    Announcement { winner: String },
}

impl StageView {
    pub fn is_scanning(&self) -> bool {
        matches!(self, StageView::Scanning { .. })
    }

    pub fn winner(&self) -> Option<&str> {
        match self {
            StageView::Announcement { winner } => Some(winner),
            _ => None,
        }
    }
}

/// Project engine state onto a stage view.
pub fn stage_view(engine: &SelectionEngine) -> StageView {
    match engine.phase() {
        EnginePhase::Running | EnginePhase::Settling => StageView::Scanning {
            progress: engine.progress(),
            flicker: engine.flicker().map(str::to_string),
        },
        EnginePhase::Idle => match engine.winner() {
            Some(winner) => StageView::Announcement {
                winner: winner.to_string(),
            },
            None => StageView::Invite,
        },
    }
}

/// Rounded, clamped percentage for the progress label.
pub fn percent_label(progress: f64) -> u16 {
    progress.clamp(0.0, 100.0).round() as u16
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
