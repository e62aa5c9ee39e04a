//! `ClipRegion`: a surface view restricted to one rectangle.
//!
//! Containers hand each child a `ClipRegion` matching the child's rect, so a
//! child that miscalculates its own geometry cannot paint over a sibling or
//! the container's separators. Out-of-bounds writes are dropped, never
//! forwarded.

use super::cell::Cell;
use super::surface::Surface;
use crate::layout::Rect;

/// A [`Surface`] adapter that drops every write outside a fixed rectangle.
pub struct ClipRegion<'a> {
    inner: &'a mut dyn Surface,
    /// Requested rect intersected with the inner surface's bounds.
    clip: Rect,
}

impl<'a> ClipRegion<'a> {
    /// Bind `inner` to `rect`. Nested regions shrink to the intersection.
    pub fn new(inner: &'a mut dyn Surface, rect: Rect) -> Self {
        let clip = rect.intersection(&inner.bounds());
        Self { inner, clip }
    }

    /// The effective clip rectangle.
    pub const fn clip(&self) -> Rect {
        self.clip
    }
}

impl Surface for ClipRegion<'_> {
    fn bounds(&self) -> Rect {
        self.clip
    }

    fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if self.clip.contains(x, y) {
            self.inner.get(x, y)
        } else {
            None
        }
    }

    fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if !self.clip.contains(x, y) {
            return false;
        }
        // A wide glyph in the last column would paint into the next cell.
        let cell = if cell.display_width() == 2 && x.saturating_add(1) >= self.clip.right() {
            Cell::new(' ')
                .with_fg(cell.fg())
                .with_bg(cell.bg())
                .with_modifiers(cell.modifiers())
        } else {
            cell
        };
        self.inner.set(x, y, cell)
    }

    fn set_cursor(&mut self, x: i32, y: i32) -> bool {
        self.clip.contains(x, y) && self.inner.set_cursor(x, y)
    }

    fn hide_cursor(&mut self) {
        self.inner.hide_cursor();
    }
}

impl std::fmt::Debug for ClipRegion<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipRegion").field("clip", &self.clip).finish_non_exhaustive()
    }
}
