// Confetti overlay drawn over the stage after a winner is announced.
//
// Particles are spawned once per announcement and then positioned purely
// from the render frame counter, so the overlay needs no per-frame state
// updates. Coordinates are fractions of the target area; particles that have
// fallen past the bottom edge are skipped.

use rand::seq::IndexedRandom;
use rand::Rng;
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use ratatui::Frame;

/// Particles per burst.
pub const BURST_SIZE: usize = 60;

const GLYPHS: [&str; 6] = ["*", "•", "▪", "◆", "✦", "+"];

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal position, 0.0..1.0 of the area width.
    pub x: f32,
    /// Starting height, negative means above the top edge.
    pub y0: f32,
    /// Fall speed in area-heights per frame.
    pub speed: f32,
    /// Horizontal drift per frame.
    pub drift: f32,
    pub glyph: &'static str,
    /// Frame counter value at spawn time.
    pub born: u64,
}

impl Particle {
    /// Position at the given frame, or `None` once off screen.
    pub fn position(&self, frame_count: u64) -> Option<(f32, f32)> {
        let age = frame_count.saturating_sub(self.born) as f32;
        let y = self.y0 + self.speed * age;
        let x = self.x + self.drift * age;
        if !(0.0..1.0).contains(&y) || !(0.0..1.0).contains(&x) {
            return None;
        }
        Some((x, y))
    }
}

/// Spawn a fresh burst.
pub fn spawn<R: Rng + ?Sized>(rng: &mut R, frame_count: u64) -> Vec<Particle> {
    (0..BURST_SIZE)
        .map(|_| Particle {
            x: rng.random_range(0.0..1.0),
            y0: rng.random_range(-0.6..0.0),
            speed: rng.random_range(0.01..0.04),
            drift: rng.random_range(-0.004..0.004),
            glyph: GLYPHS.choose(rng).copied().unwrap_or("*"),
            born: frame_count,
        })
        .collect()
}

/// Draw all visible particles into `area`.
pub fn render(frame: &mut Frame, area: Rect, particles: &[Particle], frame_count: u64, color: Color) {
    if area.is_empty() {
        return;
    }
    let buf = frame.buffer_mut();
    for particle in particles {
        let Some((x, y)) = particle.position(frame_count) else {
            continue;
        };
        let col = area.x + ((x * area.width as f32) as u16).min(area.width - 1);
        let row = area.y + ((y * area.height as f32) as u16).min(area.height - 1);
        if let Some(cell) = buf.cell_mut(Position::new(col, row)) {
            cell.set_symbol(particle.glyph).set_fg(color);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
