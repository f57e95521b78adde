// Selection engine: the state machine behind one animated draw.
//
// Idle -> Running -> Settling -> Idle
//
// The engine owns no timers. The orchestrator spawns a ticker task that
// feeds `tick` calls and a one-shot task that feeds `settle`; both carry the
// run generation returned by `start` so events from a cancelled run are
// recognized and dropped.
//
// Two independent uniform samples are taken from the roster: one per tick
// for the flicker name on screen, and one final draw for the real winner.
// The last flicker name says nothing about the winner.

use std::time::Duration;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::roster::CandidateRoster;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);
pub const DEFAULT_RUN_DURATION: Duration = Duration::from_millis(3500);
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Cadence of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTiming {
    pub tick_interval: Duration,
    pub run_duration: Duration,
    pub settle_delay: Duration,
}

impl Default for SelectionTiming {
    fn default() -> Self {
        SelectionTiming {
            tick_interval: DEFAULT_TICK_INTERVAL,
            run_duration: DEFAULT_RUN_DURATION,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl SelectionTiming {
    /// Number of ticks in the Running phase (70 with the defaults).
    pub fn total_ticks(&self) -> u32 {
        let interval = self.tick_interval.as_millis().max(1);
        let ticks = self.run_duration.as_millis() / interval;
        u32::try_from(ticks).unwrap_or(u32::MAX).max(1)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Idle,
    Running,
    Settling,
}

/// Result of feeding one tick to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belonged to a cancelled run or arrived outside `Running`.
    Stale,
    /// Progress advanced; keep ticking.
    Advanced,
    /// Progress hit 100; stop ticking and schedule the settle delay.
    Finished,
}

#[derive(Debug, Clone)]
pub struct SelectionEngine {
    timing: SelectionTiming,
    phase: EnginePhase,
    ticks: u32,
    flicker: Option<String>,
    winner: Option<String>,
    generation: u64,
}

impl SelectionEngine {
    pub fn new(timing: SelectionTiming) -> Self {
        SelectionEngine {
            timing,
            phase: EnginePhase::Idle,
            ticks: 0,
            flicker: None,
            winner: None,
            generation: 0,
        }
    }

    /// Begin a new run.
    ///
    /// Returns the generation of the new run, or `None` (state untouched)
    /// when the roster is too small to draw from.
    pub fn start(&mut self, roster: &CandidateRoster) -> Option<u64> {
        if !roster.can_draw() {
            return None;
        }
        self.generation += 1;
        self.phase = EnginePhase::Running;
        self.ticks = 0;
        self.flicker = None;
        self.winner = None;
        Some(self.generation)
    }

    /// Advance the run by one tick and resample the flicker name.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        generation: u64,
        roster: &CandidateRoster,
        rng: &mut R,
    ) -> TickOutcome {
        if generation != self.generation || self.phase != EnginePhase::Running {
            return TickOutcome::Stale;
        }

        let total = self.timing.total_ticks();
        self.ticks = (self.ticks + 1).min(total);

        // The roster may have been edited mid-run; keep the last flicker if
        // it is now empty.
        if let Some(name) = roster.names().choose(rng) {
            self.flicker = Some(name.clone());
        }

        if self.ticks >= total {
            self.phase = EnginePhase::Settling;
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }

    /// Draw the winner at the end of the settle delay.
    ///
    /// Returns the winner, or `None` if the event is stale or the roster
    /// was emptied during the run (in which case the run ends without one).
    pub fn settle<R: Rng + ?Sized>(
        &mut self,
        generation: u64,
        roster: &CandidateRoster,
        rng: &mut R,
    ) -> Option<String> {
        if generation != self.generation || self.phase != EnginePhase::Settling {
            return None;
        }
        self.phase = EnginePhase::Idle;
        self.winner = roster.names().choose(rng).cloned();
        self.winner.clone()
    }

    /// Return to the pre-selection view, abandoning any run in flight.
    pub fn reset(&mut self) {
        // Bumping the generation invalidates any timer event still queued.
        self.generation += 1;
        self.phase = EnginePhase::Idle;
        self.ticks = 0;
        self.flicker = None;
        self.winner = None;
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, EnginePhase::Running | EnginePhase::Settling)
    }

    /// Progress percentage, 0 to 100 inclusive.
    pub fn progress(&self) -> f64 {
        let total = self.timing.total_ticks();
        (f64::from(self.ticks) * 100.0 / f64::from(total)).min(100.0)
    }

    pub fn flicker(&self) -> Option<&str> {
        self.flicker.as_deref()
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn timing(&self) -> SelectionTiming {
        self.timing
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
