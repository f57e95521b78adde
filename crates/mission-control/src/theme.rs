// Theme profiles: a closed set of cosmetic style bundles.
//
// Each `ThemeId` maps to one immutable `ThemeProfile`. Switching themes only
// changes which profile the renderer reads; it never touches roster, run or
// history state.

use std::fmt;

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use tracing::warn;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeId {
    #[default]
    CommandCenter,
    RetroArcade,
    TerminalPro,
    ZenStudio,
}

impl ThemeId {
    /// All themes in menu order.
    pub const ALL: [ThemeId; 4] = [
        ThemeId::CommandCenter,
        ThemeId::RetroArcade,
        ThemeId::TerminalPro,
        ThemeId::ZenStudio,
    ];

    /// Canonical identifier string.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeId::CommandCenter => "command-center",
            ThemeId::RetroArcade => "retro-arcade",
            ThemeId::TerminalPro => "terminal-pro",
            ThemeId::ZenStudio => "zen-studio",
        }
    }

    /// Parse an identifier. Accepts the canonical ids and the short legacy
    /// ids (`navy`, `arcade`, `terminal`, `zen`), case-insensitively.
    pub fn parse(id: &str) -> Option<ThemeId> {
        match id.trim().to_ascii_lowercase().as_str() {
            "command-center" | "navy" => Some(ThemeId::CommandCenter),
            "retro-arcade" | "arcade" => Some(ThemeId::RetroArcade),
            "terminal-pro" | "terminal" => Some(ThemeId::TerminalPro),
            "zen-studio" | "zen" => Some(ThemeId::ZenStudio),
            _ => None,
        }
    }

    /// Parse an identifier, falling back to the default theme.
    pub fn from_id_or_default(id: &str) -> ThemeId {
        ThemeId::parse(id).unwrap_or_else(|| {
            warn!("Unknown theme id {:?}, falling back to {}", id, ThemeId::default());
            ThemeId::default()
        })
    }

    pub fn profile(self) -> &'static ThemeProfile {
        match self {
            ThemeId::CommandCenter => &COMMAND_CENTER,
            ThemeId::RetroArcade => &RETRO_ARCADE,
            ThemeId::TerminalPro => &TERMINAL_PRO,
            ThemeId::ZenStudio => &ZEN_STUDIO,
        }
    }

    /// Position in [`ThemeId::ALL`].
    pub fn index(self) -> usize {
        ThemeId::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Idle-stage animation drawn by the stage widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadarStyle {
    /// Concentric rings with a rotating sweep line.
    Sweep,
    /// Blocky bouncing pixel inside a square frame.
    Pixel,
    /// Slow breathing rings around a leaf glyph.
    Pulse,
}

/// Immutable bundle of presentation tokens for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeProfile {
    pub id: ThemeId,
    pub name: &'static str,
    pub glyph: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub button_fg: Color,
    pub button_bg: Color,
    pub border: Color,
    pub border_type: BorderType,
    pub uppercase: bool,
    pub radar: RadarStyle,
    pub confetti: Color,
    /// Small tag rendered in the header corner, if any.
    pub version_tag: Option<&'static str>,
}

impl ThemeProfile {
    /// Base style for panel bodies.
    pub fn base(&self) -> Style {
        Style::new().fg(self.foreground).bg(self.background)
    }

    pub fn accent_style(&self) -> Style {
        Style::new().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::new().fg(self.muted)
    }

    pub fn button_style(&self) -> Style {
        Style::new()
            .fg(self.button_fg)
            .bg(self.button_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::new().fg(self.border)
    }

    /// Apply the theme's casing rule to display text.
    pub fn cased(&self, text: &str) -> String {
        if self.uppercase {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }
}

static COMMAND_CENTER: ThemeProfile = ThemeProfile {
    id: ThemeId::CommandCenter,
    name: "Command Center",
    glyph: "◈",
    background: Color::Rgb(2, 6, 23),
    foreground: Color::Rgb(241, 245, 249),
    muted: Color::Rgb(100, 116, 139),
    accent: Color::Rgb(59, 130, 246),
    button_fg: Color::White,
    button_bg: Color::Rgb(37, 99, 235),
    border: Color::Rgb(51, 65, 85),
    border_type: BorderType::Rounded,
    uppercase: false,
    radar: RadarStyle::Sweep,
    confetti: Color::Rgb(59, 130, 246),
    version_tag: None,
};

static RETRO_ARCADE: ThemeProfile = ThemeProfile {
    id: ThemeId::RetroArcade,
    name: "Retro Arcade",
    glyph: "▣",
    background: Color::Rgb(59, 7, 100),
    foreground: Color::Rgb(250, 204, 21),
    muted: Color::Rgb(192, 132, 252),
    accent: Color::Rgb(236, 72, 153),
    button_fg: Color::Black,
    button_bg: Color::Rgb(250, 204, 21),
    border: Color::Rgb(168, 85, 247),
    border_type: BorderType::Thick,
    uppercase: true,
    radar: RadarStyle::Pixel,
    confetti: Color::Rgb(255, 0, 255),
    version_tag: None,
};

static TERMINAL_PRO: ThemeProfile = ThemeProfile {
    id: ThemeId::TerminalPro,
    name: "Terminal Pro",
    glyph: ">_",
    background: Color::Black,
    foreground: Color::Rgb(16, 185, 129),
    muted: Color::Rgb(6, 95, 70),
    accent: Color::Rgb(52, 211, 153),
    button_fg: Color::Rgb(52, 211, 153),
    button_bg: Color::Rgb(2, 44, 34),
    border: Color::Rgb(6, 78, 59),
    border_type: BorderType::Plain,
    uppercase: false,
    radar: RadarStyle::Sweep,
    confetti: Color::Rgb(59, 130, 246),
    version_tag: Some("v5.2.0_SECURE"),
};

static ZEN_STUDIO: ThemeProfile = ThemeProfile {
    id: ThemeId::ZenStudio,
    name: "Zen Studio",
    glyph: "❦",
    background: Color::Rgb(250, 250, 249),
    foreground: Color::Rgb(41, 37, 36),
    muted: Color::Rgb(168, 162, 158),
    accent: Color::Rgb(5, 150, 105),
    button_fg: Color::White,
    button_bg: Color::Rgb(41, 37, 36),
    border: Color::Rgb(231, 229, 228),
    border_type: BorderType::Rounded,
    uppercase: false,
    radar: RadarStyle::Pulse,
    confetti: Color::Rgb(16, 185, 129),
    version_tag: None,
};

// ---------------------------------------------------------------------------
// ThemePresenter
// ---------------------------------------------------------------------------

/// Tracks which profile is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemePresenter {
    active: ThemeId,
}

impl ThemePresenter {
    pub fn new(initial: ThemeId) -> Self {
        ThemePresenter { active: initial }
    }

    /// Activate a theme by identifier. Unknown ids activate the default.
    pub fn select(&mut self, id: &str) -> ThemeId {
        self.active = ThemeId::from_id_or_default(id);
        self.active
    }

    pub fn select_theme(&mut self, theme: ThemeId) {
        self.active = theme;
    }

    pub fn active(&self) -> ThemeId {
        self.active
    }

    pub fn profile(&self) -> &'static ThemeProfile {
        self.active.profile()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
