//! Surface: the drawing target every widget renders into.

use super::cell::{Cell, Style};
use crate::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;

/// A grid of cells that widgets draw into.
///
/// Coordinates are absolute screen positions. Writes outside [`Surface::bounds`]
/// are rejected and report `false`.
pub trait Surface {
    /// The writable area, in absolute coordinates.
    fn bounds(&self) -> Rect;

    /// Read the cell at (x, y), if it is inside the bounds.
    fn get(&self, x: i32, y: i32) -> Option<Cell>;

    /// Write a cell at (x, y).
    ///
    /// Returns `false` if the position is outside the bounds.
    fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool;

    /// Place the terminal cursor at (x, y).
    ///
    /// Returns `false` if the position is outside the bounds.
    fn set_cursor(&mut self, x: i32, y: i32) -> bool;

    /// Hide the terminal cursor.
    fn hide_cursor(&mut self);

    /// Fill every cell within the bounds.
    fn fill(&mut self, cell: Cell) {
        let area = self.bounds();
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Draw text starting at (x, y), one grapheme per cell (two for wide
    /// characters). Stops at the right edge of the bounds; a wide character
    /// that does not fit is replaced by a blank.
    ///
    /// Returns the number of columns advanced.
    fn set_str(&mut self, x: i32, y: i32, text: &str, style: Style) -> i32 {
        let right = self.bounds().right();
        let mut col = x;
        for grapheme in text.graphemes(true) {
            if col >= right {
                break;
            }
            let Some(c) = grapheme.chars().next() else {
                continue;
            };
            let cell = Cell::new(c).with_style(style);
            let width = i32::from(cell.display_width().max(1));
            if width == 2 && col.saturating_add(1) >= right {
                self.set(col, y, Cell::new(' ').with_style(style));
                col += 1;
                break;
            }
            self.set(col, y, cell);
            if width == 2 {
                self.set(col + 1, y, Cell::wide_continuation().with_style(style));
            }
            col += width;
        }
        col - x
    }
}
