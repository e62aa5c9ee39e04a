//! Widget trait: the one capability contract shared by leaves and containers.

use std::sync::Arc;

use crate::actor::{KeyEvent, MouseAction, MouseEvent};
use crate::buffer::Surface;
use crate::layout::Rect;

/// A shared, thread-safe handle to any widget.
///
/// Containers hold these without owning the widget's lifetime: whoever built
/// the widget may keep a clone and keep mutating it from another thread.
pub type WidgetHandle = Arc<dyn Widget>;

/// Callback a handler uses to ask the application to move keyboard focus.
pub type SetFocus<'a> = dyn FnMut(WidgetHandle) + 'a;

/// Result of offering a mouse event to a widget.
#[derive(Clone, Default)]
pub struct MouseOutcome {
    /// The widget handled the event; stop offering it to others.
    pub consumed: bool,
    /// Deliver subsequent mouse events to this widget regardless of position.
    pub capture: Option<WidgetHandle>,
}

impl MouseOutcome {
    /// Not handled.
    pub const IGNORED: Self = Self {
        consumed: false,
        capture: None,
    };

    /// Handled, no capture.
    pub const CONSUMED: Self = Self {
        consumed: true,
        capture: None,
    };

    /// Handled, and `widget` wants all following mouse events.
    pub fn captured(widget: WidgetHandle) -> Self {
        Self {
            consumed: true,
            capture: Some(widget),
        }
    }
}

impl std::fmt::Debug for MouseOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MouseOutcome")
            .field("consumed", &self.consumed)
            .field("capture", &self.capture.is_some())
            .finish()
    }
}

/// A UI component that can be drawn to a surface and handle input.
///
/// Every method takes `&self`: each widget keeps its mutable state behind its
/// own lock, so a handle can be drawn on one thread while another thread
/// updates it. A container calls into its children while holding its own
/// lock, so a child must never call back into a container that holds it.
pub trait Widget: Send + Sync {
    /// Get the current bounds of this widget.
    fn rect(&self) -> Rect;

    /// Set the bounds of this widget.
    fn set_rect(&self, rect: Rect);

    /// Render this widget.
    ///
    /// The widget should only write to cells within its rect; containers
    /// enforce this by passing a clipped surface.
    fn draw(&self, surface: &mut dyn Surface);

    /// Handle a key press. Only called while this widget (or, for
    /// containers, one of its children) has focus.
    fn handle_key(&self, _event: &KeyEvent, _set_focus: &mut SetFocus<'_>) {}

    /// Handle a mouse event.
    fn handle_mouse(
        &self,
        _action: MouseAction,
        _event: &MouseEvent,
        _set_focus: &mut SetFocus<'_>,
    ) -> MouseOutcome {
        MouseOutcome::IGNORED
    }

    /// Whether this widget (or a descendant) has keyboard focus.
    fn has_focus(&self) -> bool;

    /// Receive focus, or hand it on to a descendant through `delegate`.
    fn focus(&self, delegate: &mut SetFocus<'_>);

    /// Lose focus.
    fn blur(&self);

    /// Whether this widget is drawn at all.
    fn is_visible(&self) -> bool;

    /// Show or hide this widget.
    fn set_visible(&self, visible: bool);

    /// Check if a screen position falls within this widget's rect.
    fn in_rect(&self, x: i32, y: i32) -> bool {
        self.rect().contains(x, y)
    }
}
