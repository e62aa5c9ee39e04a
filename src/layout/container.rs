//! Layout: arranges child widgets along one axis with draggable splitters.
//!
//! # Sizing
//!
//! Each item has a size along the primary axis; 0 marks it automatic.
//! Automatic items share what fixed items and separators leave over, each
//! receiving the same floor-divided extent (see [`auto_extent`]). One cell
//! between adjacent items is reserved for a splitter whether or not the
//! splitter glyph is drawn.
//!
//! # Dragging
//!
//! A left press on a splitter starts a drag and captures the mouse. Each
//! move shifts the splitter by the pointer delta: the item before it grows
//! by the delta and the item after it shrinks by the same amount, and both
//! become fixed-size. Nothing is clamped, so an item can be dragged down to
//! zero or negative extent. Releasing the button ends the drag and rebuilds
//! the splitters from the final sizes.
//!
//! [`auto_extent`]: super::sizing::auto_extent

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::rect::Rect;
use super::sizing::{resolve_extents, Direction};
use super::splitter::{build_splitters, Splitter};
use crate::actor::{KeyEvent, MouseAction, MouseEvent};
use crate::buffer::{Cell, ClipRegion, Modifiers, Rgb, Style, Surface};
use crate::theme::Theme;
use crate::widget::{MouseOutcome, SetFocus, Widget, WidgetHandle};

/// Hook run before key dispatch. Returning `None` drops the event.
pub type InputCapture = dyn Fn(KeyEvent) -> Option<KeyEvent> + Send + Sync;

/// Hook run before mouse dispatch. Returning `None` drops the event.
pub type MouseCapture =
    dyn Fn(MouseAction, MouseEvent) -> Option<(MouseAction, MouseEvent)> + Send + Sync;

/// One child of a [`Layout`].
#[derive(Clone)]
pub struct LayoutItem {
    /// The child. The layout shares it; it does not own its lifetime.
    pub widget: WidgetHandle,
    /// Extent along the primary axis; 0 means automatic.
    pub size: i32,
}

impl LayoutItem {
    /// Whether this item takes a share of the leftover space.
    pub const fn is_automatic(&self) -> bool {
        self.size == 0
    }
}

impl std::fmt::Debug for LayoutItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutItem")
            .field("rect", &self.widget.rect())
            .field("size", &self.size)
            .finish()
    }
}

/// An active splitter drag.
#[derive(Debug, Clone, Copy)]
struct Drag {
    splitter: usize,
    anchor: (i32, i32),
}

struct LayoutState {
    items: Vec<LayoutItem>,
    direction: Direction,
    rect: Rect,
    splitters: Vec<Splitter>,
    focused_splitter: Option<usize>,
    drag: Option<Drag>,
    splitter_visible: bool,
    background: Rgb,
    splitter_style: Style,
    splitter_focused_style: Style,
    visible: bool,
    focused: bool,
    input_capture: Option<Arc<InputCapture>>,
    mouse_capture: Option<Arc<MouseCapture>>,
}

impl LayoutState {
    fn sizes(&self) -> Vec<i32> {
        self.items.iter().map(|item| item.size).collect()
    }

    fn extents(&self) -> Vec<i32> {
        resolve_extents(&self.sizes(), self.direction.extent(self.rect))
    }

    /// Recompute splitters from scratch. Structural changes also drop the
    /// splitter highlight and any drag in progress.
    fn rebuild(&mut self, structural: bool) {
        self.splitters = build_splitters(self.direction, self.rect, &self.extents());
        if structural {
            self.focused_splitter = None;
            self.drag = None;
        } else if self.focused_splitter.is_some_and(|i| i >= self.splitters.len()) {
            self.focused_splitter = None;
        }
        trace!(splitters = self.splitters.len(), structural, "splitters rebuilt");
    }

    /// Hand every child its slice of the container.
    fn apply_rects(&self) {
        let mut cursor = self.direction.origin(self.rect);
        for (item, extent) in self.items.iter().zip(self.extents()) {
            item.widget.set_rect(self.direction.slice(self.rect, cursor, extent));
            cursor = cursor.saturating_add(extent).saturating_add(1);
        }
    }

    fn relayout(&mut self, structural: bool) {
        self.rebuild(structural);
        self.apply_rects();
    }
}

/// A container that arranges its items along one axis.
///
/// Build one with [`Layout::new`]; it comes back as an `Arc` because a
/// layout hands itself out as the mouse capture target while a splitter is
/// being dragged.
pub struct Layout {
    me: Weak<Layout>,
    state: RwLock<LayoutState>,
}

impl Layout {
    /// Create an empty horizontal layout with visible splitters.
    pub fn new(theme: &Theme) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            state: RwLock::new(LayoutState {
                items: Vec::new(),
                direction: Direction::Horizontal,
                rect: Rect::ZERO,
                splitters: Vec::new(),
                focused_splitter: None,
                drag: None,
                splitter_visible: true,
                background: theme.primitive_background,
                splitter_style: theme.splitter_style(),
                splitter_focused_style: theme.splitter_focused_style(),
                visible: true,
                focused: false,
                input_capture: None,
                mouse_capture: None,
            }),
        })
    }

    /// Consumed, with this layout keeping the mouse until release.
    fn captured(&self) -> MouseOutcome {
        self.me
            .upgrade()
            .map_or(MouseOutcome::CONSUMED, |me| MouseOutcome::captured(me))
    }

    /// Append an item. `size == 0` makes it automatic.
    pub fn add_item(&self, widget: WidgetHandle, size: i32) -> &Self {
        let mut state = self.state.write();
        state.items.push(LayoutItem { widget, size });
        state.relayout(true);
        self
    }

    /// Remove the item at `index`. Out-of-range indices are ignored.
    pub fn remove_item(&self, index: usize) -> &Self {
        let mut state = self.state.write();
        if index < state.items.len() {
            state.items.remove(index);
            state.relayout(true);
        }
        self
    }

    /// The item at `index`, if any.
    pub fn item(&self, index: usize) -> Option<LayoutItem> {
        self.state.read().items.get(index).cloned()
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.state.read().items.len()
    }

    /// Remove every item and splitter.
    pub fn clear_items(&self) -> &Self {
        let mut state = self.state.write();
        state.items.clear();
        state.splitters.clear();
        state.focused_splitter = None;
        state.drag = None;
        self
    }

    /// Change the size of the item at `index`. Out-of-range indices are ignored.
    pub fn resize_item(&self, index: usize, size: i32) -> &Self {
        let mut state = self.state.write();
        if let Some(item) = state.items.get_mut(index) {
            item.size = size;
            state.relayout(false);
        }
        self
    }

    /// Set the axis items are arranged along.
    pub fn set_direction(&self, direction: Direction) -> &Self {
        let mut state = self.state.write();
        if state.direction != direction {
            state.direction = direction;
            state.relayout(true);
        }
        self
    }

    /// The axis items are arranged along.
    pub fn direction(&self) -> Direction {
        self.state.read().direction
    }

    /// Show or hide splitter glyphs. Their cells stay reserved either way.
    pub fn set_splitter(&self, visible: bool) -> &Self {
        self.state.write().splitter_visible = visible;
        self
    }

    /// Whether splitter glyphs are drawn.
    pub fn splitter_visible(&self) -> bool {
        self.state.read().splitter_visible
    }

    /// Set the foreground color of idle splitters.
    pub fn set_splitter_color(&self, color: Rgb) -> &Self {
        self.state.write().splitter_style.fg = Some(color);
        self
    }

    /// Set the text attributes of idle splitters.
    pub fn set_splitter_attributes(&self, modifiers: Modifiers) -> &Self {
        self.state.write().splitter_style.modifiers = modifiers;
        self
    }

    /// Set the color the layout clears its rect with before drawing children.
    pub fn set_background_color(&self, color: Rgb) -> &Self {
        self.state.write().background = color;
        self
    }

    /// Install a hook that sees every key before the children do.
    pub fn set_input_capture<F>(&self, hook: F) -> &Self
    where
        F: Fn(KeyEvent) -> Option<KeyEvent> + Send + Sync + 'static,
    {
        self.state.write().input_capture = Some(Arc::new(hook));
        self
    }

    /// Install a hook that sees every mouse event before the children do.
    pub fn set_mouse_capture<F>(&self, hook: F) -> &Self
    where
        F: Fn(MouseAction, MouseEvent) -> Option<(MouseAction, MouseEvent)> + Send + Sync + 'static,
    {
        self.state.write().mouse_capture = Some(Arc::new(hook));
        self
    }

    /// A snapshot of the current splitters.
    pub fn splitters(&self) -> Vec<Splitter> {
        self.state.read().splitters.clone()
    }

    /// Index of the highlighted splitter, if any.
    pub fn focused_splitter(&self) -> Option<usize> {
        self.state.read().focused_splitter
    }

    /// Whether a splitter drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.state.read().drag.is_some()
    }

    fn begin_drag(&self, state: &mut LayoutState, x: i32, y: i32) -> MouseOutcome {
        if state.drag.is_some() {
            return self.captured();
        }
        let direction = state.direction;
        let Some(index) = state.splitters.iter().position(|s| s.hit(direction, x, y)) else {
            state.focused_splitter = None;
            return MouseOutcome::IGNORED;
        };

        state.focused_splitter = Some(index);
        state.drag = Some(Drag {
            splitter: index,
            anchor: (x, y),
        });
        for item in &state.items {
            item.widget.blur();
        }
        debug!(splitter = index, x, y, "splitter drag started");
        self.captured()
    }

    fn continue_drag(&self, state: &mut LayoutState, x: i32, y: i32) -> MouseOutcome {
        let Some(drag) = state.drag else {
            return MouseOutcome::IGNORED;
        };
        let Some(splitter) = state.splitters.get(drag.splitter).copied() else {
            state.drag = None;
            return MouseOutcome::IGNORED;
        };

        let direction = state.direction;
        let delta = direction.coordinate(x, y) - direction.coordinate(drag.anchor.0, drag.anchor.1);
        let extents = state.extents();
        let (before, after) = (splitter.before, splitter.after);

        // Start of the item before the splitter: every earlier item plus its separator.
        let before_start = extents[..before]
            .iter()
            .fold(direction.origin(state.rect), |at, e| {
                at.saturating_add(*e).saturating_add(1)
            });
        let before_extent = extents[before].saturating_add(delta);
        let after_extent = extents[after].saturating_sub(delta);
        let after_start = before_start.saturating_add(before_extent).saturating_add(1);

        state.items[before].size = before_extent;
        state.items[after].size = after_extent;
        state.items[before]
            .widget
            .set_rect(direction.slice(state.rect, before_start, before_extent));
        state.items[after]
            .widget
            .set_rect(direction.slice(state.rect, after_start, after_extent));

        state.drag = Some(Drag {
            splitter: drag.splitter,
            anchor: (x, y),
        });
        self.captured()
    }

    fn end_drag(state: &mut LayoutState) -> MouseOutcome {
        let was_dragging = state.drag.take().is_some();
        // The highlight survives this rebuild so the released splitter
        // stays marked for one more frame.
        state.relayout(false);
        if was_dragging {
            debug!(sizes = ?state.sizes(), "splitter drag finished");
            MouseOutcome::CONSUMED
        } else {
            MouseOutcome::IGNORED
        }
    }
}

impl Widget for Layout {
    fn rect(&self) -> Rect {
        self.state.read().rect
    }

    fn set_rect(&self, rect: Rect) {
        let mut state = self.state.write();
        state.rect = rect;
        state.relayout(false);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let state = self.state.read();
        if !state.visible || state.rect.is_empty() {
            return;
        }

        let mut region = ClipRegion::new(surface, state.rect);
        region.fill(Cell::EMPTY.with_bg(state.background));

        let direction = state.direction;
        let (span_start, span_end) = direction.span(region.clip());
        let last = state.items.len().saturating_sub(1);
        let mut cursor = direction.origin(state.rect);

        for (i, (item, extent)) in state.items.iter().zip(state.extents()).enumerate() {
            let slice = direction.slice(state.rect, cursor, extent);
            item.widget.set_rect(slice);
            if item.widget.is_visible() {
                item.widget.draw(&mut ClipRegion::new(&mut region, slice));
            }
            cursor = cursor.saturating_add(extent);

            if i < last {
                if state.splitter_visible {
                    let style = if state.focused_splitter == Some(i) {
                        state.splitter_focused_style
                    } else {
                        state.splitter_style
                    };
                    let cell = Cell::new(direction.splitter_glyph())
                        .with_bg(state.background)
                        .with_style(style);
                    for across in span_start..span_end {
                        match direction {
                            Direction::Horizontal => region.set(cursor, across, cell),
                            Direction::Vertical => region.set(across, cursor, cell),
                        };
                    }
                }
                cursor = cursor.saturating_add(1);
            }
        }
    }

    fn handle_key(&self, event: &KeyEvent, set_focus: &mut SetFocus<'_>) {
        let hook = self.state.read().input_capture.clone();
        let event = match hook {
            Some(hook) => match hook(*event) {
                Some(event) => event,
                None => return,
            },
            None => *event,
        };

        let state = self.state.read();
        if let Some(item) = state.items.iter().find(|item| item.widget.has_focus()) {
            item.widget.handle_key(&event, set_focus);
        }
    }

    fn handle_mouse(
        &self,
        action: MouseAction,
        event: &MouseEvent,
        set_focus: &mut SetFocus<'_>,
    ) -> MouseOutcome {
        let hook = self.state.read().mouse_capture.clone();
        let (action, event) = match hook {
            Some(hook) => match hook(action, *event) {
                Some(rewritten) => rewritten,
                None => return MouseOutcome::IGNORED,
            },
            None => (action, *event),
        };

        let mut state = self.state.write();
        let (x, y) = event.position();
        if state.drag.is_none() && !state.rect.contains(x, y) {
            return MouseOutcome::IGNORED;
        }

        let taken = state
            .items
            .iter()
            .filter(|item| item.widget.is_visible())
            .map(|item| item.widget.handle_mouse(action, &event, set_focus))
            .find(|outcome| outcome.consumed);
        if let Some(outcome) = taken {
            // The dragged splitter stays highlighted until release.
            if state.drag.is_none() {
                state.focused_splitter = None;
            }
            return outcome;
        }

        match action {
            MouseAction::LeftDown => self.begin_drag(&mut state, x, y),
            MouseAction::Move => self.continue_drag(&mut state, x, y),
            MouseAction::LeftUp => Self::end_drag(&mut state),
            _ => MouseOutcome::IGNORED,
        }
    }

    fn has_focus(&self) -> bool {
        let state = self.state.read();
        state.focused || state.items.iter().any(|item| item.widget.has_focus())
    }

    fn focus(&self, delegate: &mut SetFocus<'_>) {
        let target = {
            let mut state = self.state.write();
            let target = state
                .items
                .iter()
                .find(|item| item.widget.is_visible())
                .map(|item| Arc::clone(&item.widget));
            state.focused = target.is_none();
            target
        };
        if let Some(target) = target {
            delegate(target);
        }
    }

    fn blur(&self) {
        let mut state = self.state.write();
        state.focused = false;
        for item in &state.items {
            item.widget.blur();
        }
    }

    fn is_visible(&self) -> bool {
        self.state.read().visible
    }

    fn set_visible(&self, visible: bool) {
        self.state.write().visible = visible;
    }
}

impl std::fmt::Debug for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Layout")
            .field("direction", &state.direction)
            .field("rect", &state.rect)
            .field("items", &state.items)
            .field("splitters", &state.splitters)
            .field("focused_splitter", &state.focused_splitter)
            .finish_non_exhaustive()
    }
}
