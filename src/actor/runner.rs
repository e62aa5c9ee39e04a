//! Runner: the main loop that ties the terminal, input thread and
//! application together.
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐   Buffer   ┌──────────┐
//! │ Input Thread │ ─────────────────▶  │  Main Loop   │ ─────────▶ │ Terminal │
//! └──────────────┘                     └──────────────┘            └──────────┘
//! ```

use std::ops::ControlFlow;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use tracing::{debug, info, warn};

use super::application::Application;
use super::input::InputActor;
use super::messages::InputEvent;
use crate::error::{Error, Result};
use crate::terminal::Terminal;
use crate::widget::WidgetHandle;

/// Configuration for the [`Runner`].
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// How long the input thread waits for an event before rechecking shutdown.
    pub input_poll_timeout: Duration,
    /// Redraw at least this often so background updates become visible.
    pub redraw_interval: Duration,
    /// Whether to enable mouse capture.
    pub enable_mouse: bool,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            input_poll_timeout: Duration::from_millis(10),
            redraw_interval: Duration::from_millis(50),
            enable_mouse: true,
            alternate_screen: true,
        }
    }
}

/// Owns the terminal and the input thread for the lifetime of a UI session.
pub struct Runner {
    config: RunnerConfig,
    app: Application,
    input_rx: Receiver<InputEvent>,
    input_actor: Option<InputActor>,
    terminal: Terminal,
}

impl Runner {
    /// Put the terminal into raw mode and start reading input.
    pub fn new(root: WidgetHandle, config: RunnerConfig) -> Result<Self> {
        let (width, height) = Terminal::size()?;
        let terminal = Terminal::new(config.alternate_screen, config.enable_mouse)?;

        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let input_actor = InputActor::spawn(input_tx, config.input_poll_timeout)?;
        info!(width, height, "runner started");

        Ok(Self {
            config,
            app: Application::new(root, width, height),
            input_rx,
            input_actor: Some(input_actor),
            terminal,
        })
    }

    /// The application, for setting focus before the loop starts.
    pub const fn application(&mut self) -> &mut Application {
        &mut self.app
    }

    /// Run until `on_event` breaks or the input thread shuts down.
    ///
    /// `on_event` sees every event before the widget tree does; returning
    /// [`ControlFlow::Break`] ends the loop without delivering it.
    pub fn run<F>(&mut self, mut on_event: F) -> Result<()>
    where
        F: FnMut(&InputEvent, &mut Application) -> ControlFlow<()>,
    {
        loop {
            let frame = self.app.draw();
            self.terminal.present(frame)?;

            let first = match self.input_rx.recv_timeout(self.config.redraw_interval) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Err(Error::InputDisconnected),
            };

            // Drain whatever queued up behind it so a fast drag costs one frame.
            let pending: Vec<InputEvent> = std::iter::once(first)
                .chain(self.input_rx.try_iter())
                .collect();
            for event in pending {
                match &event {
                    InputEvent::Shutdown => {
                        debug!("input thread shut down");
                        return Ok(());
                    }
                    InputEvent::Error(message) => {
                        warn!(%message, "input error");
                        continue;
                    }
                    InputEvent::Resize { .. } => self.terminal.invalidate(),
                    _ => {}
                }
                if on_event(&event, &mut self.app).is_break() {
                    return Ok(());
                }
                self.app.handle_event(&event);
            }
        }
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }
    }
}
