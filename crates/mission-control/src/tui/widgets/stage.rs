// Stage widget: the central display for the three stage views.
//
// Invite:        radar animation, "INITIATE SELECTION", start prompt
// Scanning:      "SEQUENCING DATA nn%", progress gauge, flicker name
// Announcement:  trophy, "NEW LEADER IDENTIFIED", winner, re-roll/confirm
//                hints, confetti overlay

use ratatui::layout::{Alignment, Constraint, Flex, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};
use ratatui::Frame;

use super::{confetti, panel};
use crate::roster::MIN_CANDIDATES_FOR_DRAW;
use crate::stage::{percent_label, StageView};
use crate::theme::{RadarStyle, ThemeProfile};
use crate::tui::ViewState;

const TROPHY: [&str; 6] = [
    "  _________  ",
    " |  * * *  | ",
    "  \\       /  ",
    "   '-. .-'   ",
    "     | |     ",
    "   _|___|_   ",
];

/// Render the stage into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let profile = state.theme.profile();
    let block = panel(profile, "Mission Stage");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &state.stage {
        StageView::Invite => render_invite(frame, inner, state, profile),
        StageView::Scanning { progress, flicker } => {
            render_scanning(frame, inner, profile, *progress, flicker.as_deref())
        }
        StageView::Announcement { winner } => {
            render_announcement(frame, inner, profile, winner);
            confetti::render(
                frame,
                inner,
                &state.confetti,
                state.frame_count,
                profile.confetti,
            );
        }
    }
}

fn render_invite(frame: &mut Frame, area: Rect, state: &ViewState, profile: &ThemeProfile) {
    let mut lines: Vec<Line> = radar_frame(profile.radar, state.frame_count)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, Style::new().fg(profile.accent))))
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "INITIATE SELECTION",
        Style::new()
            .fg(profile.foreground)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    if state.candidates.len() >= MIN_CANDIDATES_FOR_DRAW {
        lines.push(Line::from(Span::styled(
            profile.cased(" [s] Press start "),
            profile.button_style(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            profile.cased(start_hint(state.candidates.len())),
            profile.muted_style(),
        )));
    }

    render_centered(frame, area, lines);
}

/// Prompt shown instead of the start button while the roster is too small.
pub fn start_hint(count: usize) -> &'static str {
    if count == 0 {
        "Add personnel to begin"
    } else {
        "Add at least one more to begin"
    }
}

fn render_scanning(
    frame: &mut Frame,
    area: Rect,
    profile: &ThemeProfile,
    progress: f64,
    flicker: Option<&str>,
) {
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .split(area);

    let percent = percent_label(progress);
    let label = Line::from(vec![
        Span::styled("SEQUENCING DATA ", profile.muted_style()),
        Span::styled(format!("{}%", percent), profile.accent_style()),
    ]);
    frame.render_widget(Paragraph::new(label).alignment(Alignment::Center), rows[0]);

    let gauge_area = rows[2].inner(Margin {
        horizontal: rows[2].width / 6,
        vertical: 0,
    });
    let gauge = Gauge::default()
        .gauge_style(Style::new().fg(profile.accent).bg(profile.background))
        .ratio(f64::from(percent) / 100.0)
        .label("");
    frame.render_widget(gauge, gauge_area);

    let name = flicker.map(|n| profile.cased(n)).unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Span::styled(
            name,
            Style::new()
                .fg(profile.foreground)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        rows[4],
    );
}

fn render_announcement(frame: &mut Frame, area: Rect, profile: &ThemeProfile, winner: &str) {
    let mut lines: Vec<Line> = TROPHY
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::new().fg(profile.accent))))
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "NEW LEADER IDENTIFIED",
        profile.muted_style(),
    )));
    lines.push(Line::from(Span::styled(
        profile.cased(winner),
        Style::new()
            .fg(profile.foreground)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(profile.cased(" [s] Re-roll "), profile.muted_style()),
        Span::raw("   "),
        Span::styled(profile.cased(" [Enter] Confirm "), profile.button_style()),
    ]));

    render_centered(frame, area, lines);
}

/// Render lines centered both ways, clipping on short areas.
fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    let height = (lines.len() as u16).min(area.height);
    let rows = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        rows[0],
    );
}

// ---------------------------------------------------------------------------
// Radar art
// ---------------------------------------------------------------------------

const SWEEP_BASE: [&str; 5] = [
    " .-'''-. ",
    "/       \\",
    "|   o   |",
    "\\       /",
    " '-...-' ",
];

/// Hand cells per sweep step, as (row, col, char) relative to the dial.
const SWEEP_HANDS: [[(usize, usize, char); 2]; 8] = [
    [(1, 4, '|'), (1, 4, '|')],
    [(1, 5, '/'), (1, 6, '/')],
    [(2, 5, '-'), (2, 6, '-')],
    [(3, 5, '\\'), (3, 6, '\\')],
    [(3, 4, '|'), (3, 4, '|')],
    [(3, 3, '/'), (3, 2, '/')],
    [(2, 3, '-'), (2, 2, '-')],
    [(1, 3, '\\'), (1, 2, '\\')],
];

/// One animation frame of the idle radar for the given style.
pub fn radar_frame(style: RadarStyle, frame_count: u64) -> Vec<String> {
    match style {
        RadarStyle::Sweep => sweep_frame(frame_count),
        RadarStyle::Pixel => pixel_frame(frame_count),
        RadarStyle::Pulse => pulse_frame(frame_count),
    }
}

fn sweep_frame(frame_count: u64) -> Vec<String> {
    let step = ((frame_count / 3) % 8) as usize;
    let mut grid: Vec<Vec<char>> = SWEEP_BASE.iter().map(|r| r.chars().collect()).collect();
    for (row, col, ch) in SWEEP_HANDS[step] {
        grid[row][col] = ch;
    }
    grid.into_iter().map(|r| r.into_iter().collect()).collect()
}

fn pixel_frame(frame_count: u64) -> Vec<String> {
    const INNER: u64 = 7;
    // Ping-pong across the inner columns.
    let period = (INNER - 1) * 2;
    let t = (frame_count / 2) % period;
    let col = if t < INNER { t } else { period - t };
    let col = col as usize;

    let mut middle: Vec<char> = " ".repeat(INNER as usize).chars().collect();
    middle[col] = '■';
    let middle: String = middle.into_iter().collect();

    vec![
        "+-------+".to_string(),
        "|       |".to_string(),
        format!("|{}|", middle),
        "|       |".to_string(),
        "+-------+".to_string(),
    ]
}

fn pulse_frame(frame_count: u64) -> Vec<String> {
    let phase = (frame_count / 6) % 4;
    let (outer, inner) = match phase {
        0 => ("         ", "    *    "),
        1 => ("         ", "  ( * )  "),
        2 => ("  .   .  ", " (( * )) "),
        _ => ("  .   .  ", "  ( * )  "),
    };
    vec![
        "         ".to_string(),
        outer.to_string(),
        inner.to_string(),
        outer.to_string(),
        "         ".to_string(),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
