// Screen layout: panel arrangement and sizing.
//
// Normal mode:
//
// +--------------------------------------------------+
// | Header (5 rows): theme badge, fullscreen, title   |
// +----------------------+---------------------------+
// | Crew Roster (fill)   | Stage (fill)              |
// |                      |                           |
// +----------------------+                           |
// | Log History (10)     +---------------------------+
// |                      | Telemetry (3)             |
// +----------------------+---------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
//
// Immersive mode (fullscreen / theater) collapses the header to one row and
// gives the stage everything else; roster, history and telemetry get empty
// rects and are not drawn.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Header height in normal mode.
pub const HEADER_HEIGHT: u16 = 5;
/// History panel height: 8 rows plus borders.
pub const HISTORY_HEIGHT: u16 = 10;

/// Resolved screen areas for each console zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub header: Rect,
    pub roster: Rect,
    pub history: Rect,
    pub stage: Rect,
    pub telemetry: Rect,
    pub status_bar: Rect,
}

/// Build the console layout from the available terminal area.
pub fn build_layout(area: Rect, immersive: bool) -> AppLayout {
    if immersive {
        return build_immersive(area);
    }

    // Vertical: header(5) | middle(fill) | status(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    let header = vertical[0];
    let middle = vertical[1];
    let status_bar = vertical[2];

    // Horizontal: sidebar (34%) | main (66%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(middle);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(HISTORY_HEIGHT)])
        .split(horizontal[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(horizontal[1]);

    AppLayout {
        header,
        roster: sidebar[0],
        history: sidebar[1],
        stage: main[0],
        telemetry: main[1],
        status_bar,
    }
}

fn build_immersive(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    AppLayout {
        header: vertical[0],
        roster: Rect::default(),
        history: Rect::default(),
        stage: vertical[1],
        telemetry: Rect::default(),
        status_bar: vertical[2],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 160, 50)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area(), false);
        let rects = [
            ("header", layout.header),
            ("roster", layout.roster),
            ("history", layout.history),
            ("stage", layout.stage),
            ("telemetry", layout.telemetry),
            ("status_bar", layout.status_bar),
        ];
        for (name, rect) in &rects {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn layout_fixed_heights() {
        let layout = build_layout(test_area(), false);
        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.history.height, HISTORY_HEIGHT);
        assert_eq!(layout.telemetry.height, 3);
        assert_eq!(layout.status_bar.height, 1);
    }

    #[test]
    fn layout_stage_wider_than_sidebar() {
        let layout = build_layout(test_area(), false);
        assert!(layout.stage.width > layout.roster.width);
        assert_eq!(layout.roster.width, layout.history.width);
    }

    #[test]
    fn layout_roster_above_history() {
        let layout = build_layout(test_area(), false);
        assert!(layout.roster.y < layout.history.y);
        assert!(layout.stage.y < layout.telemetry.y);
    }

    #[test]
    fn immersive_stage_takes_full_width() {
        let area = test_area();
        let layout = build_layout(area, true);
        assert_eq!(layout.stage.width, area.width);
        assert_eq!(layout.stage.height, area.height - 2);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.roster, Rect::default());
        assert_eq!(layout.history, Rect::default());
        assert_eq!(layout.telemetry, Rect::default());
    }

    #[test]
    fn layout_fits_within_area() {
        let area = test_area();
        for immersive in [false, true] {
            let layout = build_layout(area, immersive);
            for rect in [
                layout.header,
                layout.roster,
                layout.history,
                layout.stage,
                layout.telemetry,
                layout.status_bar,
            ] {
                assert!(rect.x + rect.width <= area.width);
                assert!(rect.y + rect.height <= area.height);
            }
        }
    }
}
