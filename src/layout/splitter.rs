//! Splitter: the 1-cell divider between two adjacent layout items.

use super::rect::Rect;
use super::sizing::Direction;

/// Derived geometry of one divider.
///
/// Splitters are rebuilt from item sizes whenever the layout's geometry
/// changes; nothing mutates one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splitter {
    /// Coordinate on the primary axis (x for horizontal layouts).
    pub position: i32,
    /// `[start, end)` across the perpendicular axis.
    pub span: (i32, i32),
    /// Index of the item before (left of / above) this splitter.
    pub before: usize,
    /// Index of the item after (right of / below) this splitter.
    pub after: usize,
}

impl Splitter {
    /// Whether (x, y) lies on this splitter's 1-cell hit line.
    pub const fn hit(&self, direction: Direction, x: i32, y: i32) -> bool {
        let (along, across) = match direction {
            Direction::Horizontal => (x, y),
            Direction::Vertical => (y, x),
        };
        along == self.position && across >= self.span.0 && across < self.span.1
    }
}

/// Lay out one splitter after every item but the last, walking the same
/// cursor the render pass walks. A degenerate container rect yields none.
pub fn build_splitters(direction: Direction, rect: Rect, extents: &[i32]) -> Vec<Splitter> {
    if rect.is_empty() || extents.len() < 2 {
        return Vec::new();
    }
    let span = direction.span(rect);
    let mut cursor = direction.origin(rect);
    extents[..extents.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, extent)| {
            cursor = cursor.saturating_add(*extent);
            let splitter = Splitter {
                position: cursor,
                span,
                before: i,
                after: i + 1,
            };
            cursor = cursor.saturating_add(1);
            splitter
        })
        .collect()
}
