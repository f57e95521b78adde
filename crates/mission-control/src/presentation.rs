// Presentation mode: platform fullscreen with a silent theater fallback.
//
// Fullscreen is requested through a `DisplayHost`. If the host refuses or
// cannot do it, the console drops into theater mode (stage-only layout drawn
// inside the current window). The failure is logged and never shown.

use std::fmt;
use std::io;

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FullscreenError {
    #[error("fullscreen is not supported by this display")]
    Unsupported,

    #[error("fullscreen request was denied: {0}")]
    Denied(#[from] io::Error),
}

/// Something that can put the console into a platform fullscreen state.
pub trait DisplayHost: Send {
    fn request_fullscreen(&mut self) -> Result<(), FullscreenError>;
    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationMode {
    #[default]
    Normal,
    Fullscreen,
    Theater,
}

impl PresentationMode {
    /// Fullscreen and theater both render the stage-only layout.
    pub fn is_immersive(self) -> bool {
        !matches!(self, PresentationMode::Normal)
    }
}

pub struct Presentation {
    mode: PresentationMode,
    host: Box<dyn DisplayHost>,
}

impl fmt::Debug for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presentation")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl Presentation {
    pub fn new(host: Box<dyn DisplayHost>) -> Self {
        Presentation {
            mode: PresentationMode::Normal,
            host,
        }
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    /// Enter fullscreen (or theater on failure) from normal mode; leave
    /// either immersive mode otherwise.
    pub fn toggle(&mut self) -> PresentationMode {
        match self.mode {
            PresentationMode::Normal => {
                self.mode = match self.host.request_fullscreen() {
                    Ok(()) => {
                        info!("Entered fullscreen");
                        PresentationMode::Fullscreen
                    }
                    Err(e) => {
                        debug!("Fullscreen unavailable ({}), using theater mode", e);
                        PresentationMode::Theater
                    }
                };
            }
            PresentationMode::Fullscreen | PresentationMode::Theater => self.leave(),
        }
        self.mode
    }

    /// Leave any immersive mode. No-op in normal mode.
    pub fn exit_immersive(&mut self) -> PresentationMode {
        if self.mode.is_immersive() {
            self.leave();
        }
        self.mode
    }

    fn leave(&mut self) {
        if self.mode == PresentationMode::Fullscreen {
            if let Err(e) = self.host.exit_fullscreen() {
                debug!("Failed to exit fullscreen: {}", e);
            }
        }
        self.mode = PresentationMode::Normal;
    }
}

// ---------------------------------------------------------------------------
// Terminal host
// ---------------------------------------------------------------------------

/// xterm window operation: maximize (`CSI 9;1 t`) or restore (`CSI 9;0 t`).
#[derive(Debug, Clone, Copy)]
struct MaximizeWindow(bool);

impl crossterm::Command for MaximizeWindow {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b[9;{}t", u8::from(self.0))
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "window operations need an ANSI terminal",
        ))
    }
}

/// Maximizes the terminal window using xterm window operations.
///
/// Many terminals ignore these sequences, so the host only tries when
/// `window_fullscreen` is enabled in config; otherwise it reports
/// `Unsupported` and the console falls back to theater mode.
#[derive(Debug, Clone)]
pub struct TerminalHost {
    enabled: bool,
}

impl TerminalHost {
    pub fn new(enabled: bool) -> Self {
        TerminalHost { enabled }
    }
}

impl DisplayHost for TerminalHost {
    fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
        if !self.enabled {
            return Err(FullscreenError::Unsupported);
        }
        crossterm::execute!(io::stdout(), MaximizeWindow(true))?;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError> {
        if !self.enabled {
            return Ok(());
        }
        crossterm::execute!(io::stdout(), MaximizeWindow(false))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
