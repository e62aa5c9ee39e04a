//! Buffer: A grid of cells representing the terminal screen.
//!
//! The buffer uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order.

use super::cell::Cell;
use super::surface::Surface;
use crate::layout::Rect;

/// A grid of cells representing the terminal screen.
///
/// The buffer stores cells in a contiguous `Vec` for cache efficiency.
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Terminal width in columns.
    width: u16,
    /// Terminal height in rows.
    height: u16,
    /// Cursor position requested by the last draw (None = hidden).
    cursor: Option<(u16, u16)>,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to empty (space with default colors).
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
            cursor: None,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cursor position requested by the last draw, if visible.
    #[inline]
    pub const fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    #[allow(clippy::cast_sign_loss)]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height) {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get the symbols of one row as a string (continuation cells skipped).
    ///
    /// Mostly useful for assertions in tests.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = (y as usize) * (self.width as usize);
        self.cells[start..start + self.width as usize]
            .iter()
            .filter(|c| !c.is_wide_continuation())
            .map(Cell::symbol)
            .collect()
    }

    /// Clear the entire buffer (fill with empty cells) and hide the cursor.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
        self.cursor = None;
    }

    /// Resize the buffer, preserving content where possible.
    ///
    /// New cells are initialized to empty.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        if new_width == self.width && new_height == self.height {
            return;
        }

        let new_size = (new_width as usize) * (new_height as usize);
        let mut new_cells = vec![Cell::EMPTY; new_size];

        let copy_width = self.width.min(new_width) as usize;
        let copy_height = self.height.min(new_height) as usize;

        for y in 0..copy_height {
            let old_start = y * (self.width as usize);
            let new_start = y * (new_width as usize);
            new_cells[new_start..new_start + copy_width]
                .copy_from_slice(&self.cells[old_start..old_start + copy_width]);
        }

        self.cells = new_cells;
        self.width = new_width;
        self.height = new_height;
        self.cursor = None;
    }
}

impl Surface for Buffer {
    fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index_of(x, y).map(|i| self.cells[i])
    }

    #[inline]
    fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn set_cursor(&mut self, x: i32, y: i32) -> bool {
        if self.index_of(x, y).is_none() {
            return false;
        }
        self.cursor = Some((x as u16, y as u16));
        true
    }

    fn hide_cursor(&mut self) {
        self.cursor = None;
    }

    fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Style;

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.cells().len(), 80 * 24);
    }

    #[test]
    fn test_buffer_bounds() {
        let mut buffer = Buffer::new(80, 24);
        assert!(buffer.get(79, 23).is_some());
        assert!(buffer.get(80, 23).is_none());
        assert!(buffer.get(-1, 0).is_none());
        assert!(!buffer.set(0, 24, Cell::new('X')));
        assert!(!buffer.set_cursor(-1, 3));
        assert_eq!(buffer.cursor(), None);
    }

    #[test]
    fn test_buffer_set_str_wide() {
        let mut buffer = Buffer::new(10, 1);
        let used = buffer.set_str(0, 0, "a日b", Style::default());
        assert_eq!(used, 4);
        assert_eq!(buffer.get(1, 0).map(|c| c.symbol()), Some('日'));
        assert!(buffer.get(2, 0).is_some_and(|c| c.is_wide_continuation()));
        assert_eq!(buffer.row_text(0), "a日b      ");
    }

    #[test]
    fn test_buffer_set_str_stops_at_edge() {
        let mut buffer = Buffer::new(3, 1);
        assert_eq!(buffer.set_str(1, 0, "hello", Style::default()), 2);
        assert_eq!(buffer.row_text(0), " he");
    }

    #[test]
    fn test_buffer_resize() {
        let mut buffer = Buffer::new(80, 24);
        buffer.set(5, 5, Cell::new('X'));

        buffer.resize(100, 30);
        assert_eq!(buffer.get(5, 5).map(|c| c.symbol()), Some('X'));

        buffer.resize(10, 10);
        assert_eq!(buffer.get(5, 5).map(|c| c.symbol()), Some('X'));
        assert!(buffer.get(15, 15).is_none());
    }

    #[test]
    fn test_zero_sized_buffer_rejects_everything() {
        let mut buffer = Buffer::new(0, 0);
        assert!(!buffer.set(0, 0, Cell::new('X')));
        assert!(buffer.bounds().is_empty());
    }
}
