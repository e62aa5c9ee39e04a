//! Size distribution along a layout's primary axis.

use super::rect::Rect;

/// The axis a layout arranges its items along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Items side by side, left to right; splitters are vertical lines.
    #[default]
    Horizontal,
    /// Items stacked top to bottom; splitters are horizontal lines.
    Vertical,
}

impl Direction {
    /// `rect`'s length along the primary axis.
    pub const fn extent(self, rect: Rect) -> i32 {
        match self {
            Self::Horizontal => rect.width,
            Self::Vertical => rect.height,
        }
    }

    /// `rect`'s start coordinate along the primary axis.
    pub const fn origin(self, rect: Rect) -> i32 {
        match self {
            Self::Horizontal => rect.x,
            Self::Vertical => rect.y,
        }
    }

    /// The primary-axis component of a point.
    pub const fn coordinate(self, x: i32, y: i32) -> i32 {
        match self {
            Self::Horizontal => x,
            Self::Vertical => y,
        }
    }

    /// `rect`'s `[start, end)` span across the perpendicular axis.
    pub const fn span(self, rect: Rect) -> (i32, i32) {
        match self {
            Self::Horizontal => (rect.y, rect.bottom()),
            Self::Vertical => (rect.x, rect.right()),
        }
    }

    /// The slice of `container` starting at primary offset `at` with length
    /// `extent`, spanning the full perpendicular dimension.
    pub const fn slice(self, container: Rect, at: i32, extent: i32) -> Rect {
        match self {
            Self::Horizontal => Rect::new(at, container.y, extent, container.height),
            Self::Vertical => Rect::new(container.x, at, container.width, extent),
        }
    }

    /// The glyph drawn for a splitter in this direction.
    pub const fn splitter_glyph(self) -> char {
        match self {
            Self::Horizontal => '│',
            Self::Vertical => '─',
        }
    }
}

/// Extent each automatic (size 0) item receives.
///
/// `floor((available - fixed_sum - separators) / auto_count)`, with the
/// subtraction saturating at the `i32` limits. The division
/// remainder is not handed out to anyone, so up to `auto_count - 1` cells at
/// the end of the axis stay empty. Returns 0 when no item is automatic.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn auto_extent(sizes: &[i32], available: i32) -> i32 {
    let auto_count = sizes.iter().filter(|&&s| s == 0).count();
    if auto_count == 0 {
        return 0;
    }
    let fixed_sum = sizes.iter().fold(0i32, |sum, &s| sum.saturating_add(s));
    let remaining = available
        .saturating_sub(fixed_sum)
        .saturating_sub(separator_count(sizes.len()));
    remaining.div_euclid(auto_count as i32)
}

/// Resolved extent of every item, in order.
pub fn resolve_extents(sizes: &[i32], available: i32) -> Vec<i32> {
    let auto = auto_extent(sizes, available);
    sizes.iter().map(|&s| if s == 0 { auto } else { s }).collect()
}

/// One separator cell between each pair of adjacent items.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn separator_count(items: usize) -> i32 {
    items.saturating_sub(1) as i32
}
