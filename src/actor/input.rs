//! Input Actor: Dedicated thread for polling terminal events.
//!
//! This actor runs in its own thread and uses crossterm's event polling
//! to capture keyboard, mouse, and resize events without blocking the
//! main application.

use super::messages::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseAction, MouseButton, MouseEvent};
use crate::error::{Error, Result};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// `poll_timeout` bounds how long the thread waits for an event before
    /// checking the shutdown flag again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpawnInput`] if the OS refuses to create the thread.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name("flexsplit-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })
            .map_err(Error::SpawnInput)?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.send(InputEvent::Shutdown);
                break;
            }

            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Some(input_event) = convert_event(event) {
                            if sender.send(input_event).is_err() {
                                debug!("input receiver dropped, stopping input thread");
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "terminal read failed");
                        let _ = sender.send(InputEvent::Error(e.to_string()));
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "terminal poll failed");
                    let _ = sender.send(InputEvent::Error(e.to_string()));
                }
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event to an [`InputEvent`].
///
/// Key releases and repeats, focus changes and unsupported keys map to `None`.
pub fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            let code = convert_key_code(key_event.code)?;
            let modifiers = convert_modifiers(key_event.modifiers);
            Some(InputEvent::Key(KeyEvent::with_modifiers(code, modifiers)))
        }
        Event::Mouse(mouse_event) => convert_mouse_event(mouse_event),
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        Event::Paste(text) => Some(InputEvent::Paste(text)),
        Event::FocusGained | Event::FocusLost => None,
    }
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::BackTab => KeyCode::BackTab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Insert => KeyCode::Insert,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
    }
}

const fn convert_mouse_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}

fn convert_mouse_event(mouse: event::MouseEvent) -> Option<InputEvent> {
    let mut event = MouseEvent {
        x: mouse.column,
        y: mouse.row,
        button: None,
        modifiers: convert_modifiers(mouse.modifiers),
    };

    let action = match mouse.kind {
        event::MouseEventKind::Down(button) => {
            event.button = Some(convert_mouse_button(button));
            match button {
                event::MouseButton::Left => MouseAction::LeftDown,
                event::MouseButton::Right => MouseAction::RightDown,
                event::MouseButton::Middle => MouseAction::MiddleDown,
            }
        }
        event::MouseEventKind::Up(button) => {
            event.button = Some(convert_mouse_button(button));
            match button {
                event::MouseButton::Left => MouseAction::LeftUp,
                event::MouseButton::Right => MouseAction::RightUp,
                event::MouseButton::Middle => MouseAction::MiddleUp,
            }
        }
        event::MouseEventKind::Drag(button) => {
            event.button = Some(convert_mouse_button(button));
            MouseAction::Move
        }
        event::MouseEventKind::Moved => MouseAction::Move,
        event::MouseEventKind::ScrollUp => MouseAction::ScrollUp,
        event::MouseEventKind::ScrollDown => MouseAction::ScrollDown,
        event::MouseEventKind::ScrollLeft | event::MouseEventKind::ScrollRight => return None,
    };

    Some(InputEvent::Mouse { action, event })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        KeyCode as CtKeyCode, KeyEvent as CtKeyEvent, KeyModifiers as CtModifiers,
        MouseEvent as CtMouseEvent, MouseEventKind,
    };

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(CtMouseEvent {
            kind,
            column,
            row,
            modifiers: CtModifiers::NONE,
        })
    }

    #[test]
    fn test_key_press_converts() {
        let event = Event::Key(CtKeyEvent::new(CtKeyCode::Char('x'), CtModifiers::CONTROL));
        let expected = KeyEvent::with_modifiers(
            KeyCode::Char('x'),
            KeyModifiers {
                control: true,
                ..KeyModifiers::NONE
            },
        );
        assert_eq!(convert_event(event), Some(InputEvent::Key(expected)));
    }

    #[test]
    fn test_key_release_is_dropped() {
        let mut key = CtKeyEvent::new(CtKeyCode::Enter, CtModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(convert_event(Event::Key(key)), None);
    }

    #[test]
    fn test_unsupported_key_is_dropped() {
        let event = Event::Key(CtKeyEvent::new(CtKeyCode::CapsLock, CtModifiers::NONE));
        assert_eq!(convert_event(event), None);
    }

    #[test]
    fn test_mouse_buttons_map_to_actions() {
        let down = convert_event(mouse(MouseEventKind::Down(event::MouseButton::Left), 4, 2));
        assert_eq!(
            down,
            Some(InputEvent::Mouse {
                action: MouseAction::LeftDown,
                event: MouseEvent::at(4, 2).with_button(MouseButton::Left),
            })
        );

        let up = convert_event(mouse(MouseEventKind::Up(event::MouseButton::Right), 0, 0));
        assert!(matches!(
            up,
            Some(InputEvent::Mouse {
                action: MouseAction::RightUp,
                ..
            })
        ));
    }

    #[test]
    fn test_drag_is_a_move_with_button() {
        let drag = convert_event(mouse(MouseEventKind::Drag(event::MouseButton::Left), 9, 1));
        assert_eq!(
            drag,
            Some(InputEvent::Mouse {
                action: MouseAction::Move,
                event: MouseEvent::at(9, 1).with_button(MouseButton::Left),
            })
        );
    }

    #[test]
    fn test_scroll_and_resize() {
        let scroll = convert_event(mouse(MouseEventKind::ScrollDown, 1, 1));
        assert!(matches!(
            scroll,
            Some(InputEvent::Mouse {
                action: MouseAction::ScrollDown,
                ..
            })
        ));
        assert_eq!(convert_event(mouse(MouseEventKind::ScrollLeft, 1, 1)), None);
        assert_eq!(
            convert_event(Event::Resize(100, 40)),
            Some(InputEvent::Resize {
                width: 100,
                height: 40
            })
        );
    }
}
