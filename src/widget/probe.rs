//! Probe: a recording widget for container tests.

use std::sync::Arc;

use parking_lot::RwLock;

use super::traits::{MouseOutcome, SetFocus, Widget};
use crate::actor::{KeyEvent, MouseAction, MouseEvent};
use crate::buffer::{Cell, Surface};
use crate::layout::Rect;

#[derive(Default)]
struct ProbeState {
    rect: Rect,
    focused: bool,
    hidden: bool,
    keys: Vec<KeyEvent>,
    mouse: Vec<MouseAction>,
    draws: usize,
}

/// Fills its rect with one character and records everything it is offered.
pub struct Probe {
    fill: char,
    /// Consume mouse events that land inside the rect.
    consume_mouse: bool,
    /// Paint far outside the rect, relying on the caller's clipping.
    overdraw: bool,
    state: RwLock<ProbeState>,
}

impl Probe {
    pub fn new(fill: char) -> Arc<Self> {
        Self::build(fill, false, false)
    }

    pub fn consuming(fill: char) -> Arc<Self> {
        Self::build(fill, true, false)
    }

    pub fn overdrawing(fill: char) -> Arc<Self> {
        Self::build(fill, false, true)
    }

    fn build(fill: char, consume_mouse: bool, overdraw: bool) -> Arc<Self> {
        Arc::new(Self {
            fill,
            consume_mouse,
            overdraw,
            state: RwLock::new(ProbeState::default()),
        })
    }

    pub fn keys(&self) -> Vec<KeyEvent> {
        self.state.read().keys.clone()
    }

    pub fn mouse_actions(&self) -> Vec<MouseAction> {
        self.state.read().mouse.clone()
    }

    pub fn draws(&self) -> usize {
        self.state.read().draws
    }
}

impl Widget for Probe {
    fn rect(&self) -> Rect {
        self.state.read().rect
    }

    fn set_rect(&self, rect: Rect) {
        self.state.write().rect = rect;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let mut state = self.state.write();
        state.draws += 1;
        let area = if self.overdraw {
            Rect::new(-100, -100, 400, 400)
        } else {
            state.rect.intersection(&surface.bounds())
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                surface.set(x, y, Cell::new(self.fill));
            }
        }
    }

    fn handle_key(&self, event: &KeyEvent, _set_focus: &mut SetFocus<'_>) {
        self.state.write().keys.push(*event);
    }

    fn handle_mouse(
        &self,
        action: MouseAction,
        event: &MouseEvent,
        _set_focus: &mut SetFocus<'_>,
    ) -> MouseOutcome {
        let mut state = self.state.write();
        state.mouse.push(action);
        let (x, y) = event.position();
        if self.consume_mouse && state.rect.contains(x, y) {
            MouseOutcome::CONSUMED
        } else {
            MouseOutcome::IGNORED
        }
    }

    fn has_focus(&self) -> bool {
        self.state.read().focused
    }

    fn focus(&self, _delegate: &mut SetFocus<'_>) {
        self.state.write().focused = true;
    }

    fn blur(&self) {
        self.state.write().focused = false;
    }

    fn is_visible(&self) -> bool {
        !self.state.read().hidden
    }

    fn set_visible(&self, visible: bool) {
        self.state.write().hidden = !visible;
    }
}
