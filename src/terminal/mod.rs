//! Terminal: raw-mode setup, frame presentation and restore on drop.

mod output;

pub use output::{render_diff, render_full, DiffState, DiffStats};

use crate::buffer::Buffer;
use crate::error::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use tracing::debug;

/// The real terminal, held in raw mode for the lifetime of this value.
///
/// Dropping it leaves the alternate screen, releases the mouse and restores
/// cooked mode, even when the application unwinds.
pub struct Terminal {
    alternate_screen: bool,
    mouse: bool,
    /// What is currently on screen; `None` until the first frame.
    shown: Option<Buffer>,
    state: DiffState,
    output: Vec<u8>,
}

impl Terminal {
    /// Enter raw mode and optionally the alternate screen and mouse capture.
    pub fn new(alternate_screen: bool, mouse: bool) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        execute!(stdout, cursor::Hide)?;
        debug!(alternate_screen, mouse, "terminal initialized");

        Ok(Self {
            alternate_screen,
            mouse,
            shown: None,
            state: DiffState::new(),
            output: Vec::with_capacity(16 * 1024),
        })
    }

    /// Current terminal size in columns and rows.
    pub fn size() -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    /// Write `frame` to the screen, sending only what changed since the
    /// previous call.
    pub fn present(&mut self, frame: &Buffer) -> Result<DiffStats> {
        self.output.clear();
        let stats = match &self.shown {
            Some(shown) => render_diff(shown, frame, &mut self.output, &mut self.state),
            None => render_full(frame, &mut self.output, &mut self.state),
        };
        let mut stdout = io::stdout().lock();
        stdout.write_all(&self.output)?;
        stdout.flush()?;

        match &mut self.shown {
            Some(shown) => shown.clone_from(frame),
            None => self.shown = Some(frame.clone()),
        }
        Ok(stats)
    }

    /// Forget what is on screen so the next `present` redraws everything.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        debug!("terminal restored");
    }
}
