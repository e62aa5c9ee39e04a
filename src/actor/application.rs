//! Application: owns the root widget and turns input events into widget calls.
//!
//! Keys go to the root, which forwards them down to whichever child has
//! focus. Mouse events go to the widget that captured the mouse, or to the
//! root when nothing has. A left press and release on the same cell is
//! followed by a synthesized [`MouseAction::LeftClick`].

use std::sync::Arc;

use tracing::{debug, trace};

use super::messages::{InputEvent, KeyCode, KeyEvent, MouseAction, MouseEvent};
use crate::buffer::Buffer;
use crate::layout::Rect;
use crate::widget::WidgetHandle;

/// Upper bound on focus delegation hops, so a cycle cannot hang `set_focus`.
const MAX_FOCUS_HOPS: usize = 64;

/// The widget tree plus focus, mouse capture and the back buffer.
pub struct Application {
    root: WidgetHandle,
    focus: Option<WidgetHandle>,
    mouse_capture: Option<WidgetHandle>,
    buffer: Buffer,
    last_left_down: Option<(u16, u16)>,
}

impl Application {
    /// Create an application whose root fills a `width` x `height` screen.
    pub fn new(root: WidgetHandle, width: u16, height: u16) -> Self {
        root.set_rect(Rect::from_size(width, height));
        Self {
            root,
            focus: None,
            mouse_capture: None,
            buffer: Buffer::new(width, height),
            last_left_down: None,
        }
    }

    /// The root widget.
    pub const fn root(&self) -> &WidgetHandle {
        &self.root
    }

    /// The widget that currently holds keyboard focus.
    pub const fn focus(&self) -> Option<&WidgetHandle> {
        self.focus.as_ref()
    }

    /// The widget receiving all mouse events, if one captured the mouse.
    pub const fn mouse_capture(&self) -> Option<&WidgetHandle> {
        self.mouse_capture.as_ref()
    }

    /// The last drawn frame.
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Move keyboard focus to `widget`, following delegation.
    ///
    /// A container asked to take focus hands it on to a child; the widget
    /// that finally accepts it becomes the focus.
    pub fn set_focus(&mut self, widget: WidgetHandle) {
        if let Some(old) = self.focus.take() {
            old.blur();
        }
        let mut target = widget;
        for _ in 0..MAX_FOCUS_HOPS {
            let mut next: Option<WidgetHandle> = None;
            target.focus(&mut |delegate| next = Some(delegate));
            match next {
                Some(delegate) if !Arc::ptr_eq(&delegate, &target) => target = delegate,
                _ => break,
            }
        }
        debug!(rect = ?target.rect(), "focus changed");
        self.focus = Some(target);
    }

    fn apply_focus_request(&mut self, requested: Option<WidgetHandle>) {
        if let Some(widget) = requested {
            self.set_focus(widget);
        }
    }

    /// Route one input event. Returns true if the screen should be redrawn.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => {
                self.dispatch_key(key);
                true
            }
            InputEvent::Mouse { action, event } => {
                self.handle_mouse(*action, event);
                true
            }
            InputEvent::Resize { width, height } => {
                self.resize(*width, *height);
                true
            }
            InputEvent::Paste(text) => {
                for c in text.chars() {
                    self.dispatch_key(&KeyEvent::new(KeyCode::Char(c)));
                }
                true
            }
            InputEvent::Error(_) | InputEvent::Shutdown => false,
        }
    }

    fn dispatch_key(&mut self, key: &KeyEvent) {
        let mut requested = None;
        self.root.handle_key(key, &mut |widget| requested = Some(widget));
        self.apply_focus_request(requested);
    }

    fn handle_mouse(&mut self, action: MouseAction, event: &MouseEvent) {
        self.dispatch_mouse(action, event);
        match action {
            MouseAction::LeftDown => self.last_left_down = Some((event.x, event.y)),
            MouseAction::LeftUp => {
                if self.last_left_down.take() == Some((event.x, event.y)) {
                    self.dispatch_mouse(MouseAction::LeftClick, event);
                }
            }
            _ => {}
        }
    }

    fn dispatch_mouse(&mut self, action: MouseAction, event: &MouseEvent) -> bool {
        let target = self
            .mouse_capture
            .clone()
            .unwrap_or_else(|| Arc::clone(&self.root));
        let mut requested = None;
        let outcome = target.handle_mouse(action, event, &mut |widget| requested = Some(widget));
        trace!(?action, x = event.x, y = event.y, consumed = outcome.consumed, "mouse dispatched");
        self.mouse_capture = outcome.capture;
        self.apply_focus_request(requested);
        outcome.consumed
    }

    /// Resize the screen and the root widget.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.buffer.resize(width, height);
        self.root.set_rect(Rect::from_size(width, height));
        debug!(width, height, "application resized");
    }

    /// Render the root into the back buffer and return it.
    pub fn draw(&mut self) -> &Buffer {
        self.buffer.clear();
        if self.root.is_visible() {
            self.root.draw(&mut self.buffer);
        }
        &self.buffer
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("root", &self.root.rect())
            .field("focused", &self.focus.is_some())
            .field("captured", &self.mouse_capture.is_some())
            .field("buffer", &self.buffer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::theme::Theme;
    use crate::widget::probe::Probe;
    use crate::widget::{TextInput, Widget};

    fn mouse(action: MouseAction, x: u16, y: u16) -> InputEvent {
        InputEvent::Mouse {
            action,
            event: MouseEvent::at(x, y),
        }
    }

    fn two_panes() -> (Arc<Layout>, Arc<Probe>, Arc<Probe>) {
        let layout = Layout::new(&Theme::default());
        let a = Probe::new('a');
        let b = Probe::new('b');
        layout.add_item(a.clone(), 0).add_item(b.clone(), 0);
        (layout, a, b)
    }

    #[test]
    fn test_new_sizes_root() {
        let (layout, _, _) = two_panes();
        let app = Application::new(layout.clone(), 41, 10);
        assert_eq!(layout.rect(), Rect::new(0, 0, 41, 10));
        assert_eq!(app.buffer().width(), 41);
    }

    #[test]
    fn test_draw_renders_tree() {
        let (layout, _, _) = two_panes();
        let mut app = Application::new(layout, 5, 1);
        let frame = app.draw();
        assert_eq!(frame.row_text(0), "aa│bb");
    }

    #[test]
    fn test_set_focus_follows_delegation() {
        let (layout, a, b) = two_panes();
        let mut app = Application::new(layout.clone(), 41, 10);

        app.set_focus(layout.clone());
        assert!(a.has_focus());
        assert!(!b.has_focus());
        assert!(layout.has_focus());

        let focused = app.focus().cloned().unwrap();
        let a_handle: WidgetHandle = a.clone();
        assert!(Arc::ptr_eq(&focused, &a_handle));

        app.set_focus(b.clone());
        assert!(!a.has_focus());
        assert!(b.has_focus());
    }

    #[test]
    fn test_keys_reach_focused_child() {
        let (layout, a, b) = two_panes();
        let mut app = Application::new(layout.clone(), 41, 10);
        app.set_focus(b.clone());

        app.handle_event(&InputEvent::Key(KeyEvent::new(KeyCode::Char('q'))));
        assert!(a.keys().is_empty());
        assert_eq!(b.keys(), vec![KeyEvent::new(KeyCode::Char('q'))]);
    }

    #[test]
    fn test_paste_arrives_as_keys() {
        let (layout, a, _) = two_panes();
        let mut app = Application::new(layout, 41, 10);
        app.set_focus(a.clone());
        app.handle_event(&InputEvent::Paste("hi".to_string()));
        assert_eq!(a.keys().len(), 2);
    }

    #[test]
    fn test_left_click_synthesized_on_same_cell() {
        let probe = Probe::new('p');
        let mut app = Application::new(probe.clone(), 10, 3);

        app.handle_event(&mouse(MouseAction::LeftDown, 1, 1));
        app.handle_event(&mouse(MouseAction::LeftUp, 1, 1));
        assert_eq!(
            probe.mouse_actions(),
            vec![MouseAction::LeftDown, MouseAction::LeftUp, MouseAction::LeftClick]
        );

        app.handle_event(&mouse(MouseAction::LeftDown, 1, 1));
        app.handle_event(&mouse(MouseAction::LeftUp, 2, 1));
        assert_eq!(probe.mouse_actions().len(), 5);
    }

    #[test]
    fn test_drag_keeps_capture_outside_layout() {
        let (layout, _, _) = two_panes();
        let mut app = Application::new(layout.clone(), 41, 10);

        app.handle_event(&mouse(MouseAction::LeftDown, 20, 5));
        assert!(layout.is_dragging());
        assert!(app.mouse_capture().is_some());

        // Far below the layout: only the capture gets this to the container.
        app.handle_event(&mouse(MouseAction::Move, 25, 40));
        app.handle_event(&mouse(MouseAction::LeftUp, 25, 40));

        assert!(!layout.is_dragging());
        assert!(app.mouse_capture().is_none());
        assert_eq!(layout.item(0).map(|item| item.size), Some(25));
        assert_eq!(layout.item(1).map(|item| item.size), Some(15));
    }

    #[test]
    fn test_click_focuses_text_input() {
        let theme = Theme::default();
        let layout = Layout::new(&theme);
        let a = Probe::new('a');
        let input = TextInput::new(&theme);
        layout.add_item(a.clone(), 0).add_item(input.clone(), 0);
        let mut app = Application::new(layout, 41, 1);
        app.set_focus(a.clone());

        app.handle_event(&mouse(MouseAction::LeftDown, 30, 0));
        assert!(input.has_focus());
        assert!(!a.has_focus());

        app.handle_event(&InputEvent::Key(KeyEvent::new(KeyCode::Char('z'))));
        assert_eq!(input.content(), "z");
    }

    #[test]
    fn test_resize_event() {
        let (layout, a, b) = two_panes();
        let mut app = Application::new(layout.clone(), 41, 10);
        app.handle_event(&InputEvent::Resize {
            width: 81,
            height: 24,
        });
        assert_eq!(layout.rect(), Rect::new(0, 0, 81, 24));
        assert_eq!(app.buffer().height(), 24);
        assert_eq!(a.rect().width, 40);
        assert_eq!(b.rect().x, 41);
    }
}
