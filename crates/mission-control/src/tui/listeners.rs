// Console-wide input subscriptions scoped to the TUI's lifetime.
//
// Escape handling and outside-click dismissal of the theme menu need mouse
// reporting from the terminal. Capture is enabled when the guard is created
// and released when it drops, so the subscription never outlives the TUI.

use std::io;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use tracing::debug;

/// Guard holding the terminal mouse capture.
#[derive(Debug)]
pub struct AmbientListeners {
    _private: (),
}

impl AmbientListeners {
    pub fn subscribe() -> io::Result<Self> {
        crossterm::execute!(io::stdout(), EnableMouseCapture)?;
        debug!("Mouse capture enabled");
        Ok(AmbientListeners { _private: () })
    }

    /// Release capture without a guard (panic hook path).
    pub fn release() {
        let _ = crossterm::execute!(io::stdout(), DisableMouseCapture);
    }
}

impl Drop for AmbientListeners {
    fn drop(&mut self) {
        Self::release();
        debug!("Mouse capture released");
    }
}
