//! Frame output: minimal ANSI sequences from buffer changes.
//!
//! Compares the frame on screen with the next one and emits escape sequences
//! only for cells that changed. Cursor position, colors and modifiers are
//! tracked so adjacent writes skip redundant moves and SGR sequences. All
//! output is accumulated in one `Vec<u8>` and flushed with a single write.

use crate::buffer::{Buffer, Cell, Modifiers, Rgb};
use std::io::Write;

/// Last known terminal state, used to skip redundant sequences.
#[derive(Debug, Clone)]
pub struct DiffState {
    cursor_x: u16,
    cursor_y: u16,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    modifiers: Option<Modifiers>,
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffState {
    /// A state that assumes nothing about the terminal.
    pub const fn new() -> Self {
        Self {
            cursor_x: u16::MAX,
            cursor_y: u16::MAX,
            fg: None,
            bg: None,
            modifiers: None,
        }
    }

    /// Forget everything (after a screen clear or an external write).
    pub const fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Counters from one diff pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Cells written.
    pub cells_changed: usize,
    /// Explicit cursor moves emitted.
    pub cursor_moves: usize,
    /// Color sequences emitted.
    pub color_changes: usize,
}

/// Emit the sequences that turn `current` into `next`.
///
/// When the two frames differ in size nothing can be reused, so the screen
/// is cleared and `next` is written in full.
pub fn render_diff(
    current: &Buffer,
    next: &Buffer,
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffStats {
    if current.width() != next.width() || current.height() != next.height() {
        return render_full(next, output, state);
    }

    let mut stats = DiffStats::default();
    let width = next.width() as usize;
    for (idx, (old, new)) in current.cells().iter().zip(next.cells()).enumerate() {
        if old == new || new.is_wide_continuation() {
            continue;
        }
        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = ((idx % width) as u16, (idx / width) as u16);
        emit_cell(output, state, &mut stats, x, y, new);
    }
    emit_cursor(output, next.cursor());
    stats
}

/// Clear the screen and write every cell of `frame`.
pub fn render_full(frame: &Buffer, output: &mut Vec<u8>, state: &mut DiffState) -> DiffStats {
    output.extend_from_slice(b"\x1b[0m\x1b[2J");
    state.reset();

    let mut stats = DiffStats::default();
    let width = frame.width() as usize;
    for (idx, cell) in frame.cells().iter().enumerate() {
        if cell.is_wide_continuation() {
            continue;
        }
        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = ((idx % width) as u16, (idx / width) as u16);
        emit_cell(output, state, &mut stats, x, y, cell);
    }
    emit_cursor(output, frame.cursor());
    stats
}

fn emit_cell(
    output: &mut Vec<u8>,
    state: &mut DiffState,
    stats: &mut DiffStats,
    x: u16,
    y: u16,
    cell: &Cell,
) {
    stats.cells_changed += 1;

    if state.cursor_y != y || state.cursor_x != x {
        emit_cursor_move(output, x, y);
        state.cursor_x = x;
        state.cursor_y = y;
        stats.cursor_moves += 1;
    }

    // Turning a modifier off needs a full SGR reset, which also drops colors.
    let mods = cell.modifiers();
    let current_mods = state.modifiers.unwrap_or(Modifiers::empty());
    if !current_mods.difference(mods).is_empty() {
        output.extend_from_slice(b"\x1b[0m");
        state.fg = None;
        state.bg = None;
        state.modifiers = None;
    }

    if state.fg != Some(cell.fg()) {
        let c = cell.fg();
        let _ = write!(output, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b);
        state.fg = Some(c);
        stats.color_changes += 1;
    }
    if state.bg != Some(cell.bg()) {
        let c = cell.bg();
        let _ = write!(output, "\x1b[48;2;{};{};{}m", c.r, c.g, c.b);
        state.bg = Some(c);
        stats.color_changes += 1;
    }
    if state.modifiers != Some(mods) {
        let added = mods.difference(state.modifiers.unwrap_or(Modifiers::empty()));
        emit_modifier_set(output, added);
        state.modifiers = Some(mods);
    }

    let mut utf8 = [0u8; 4];
    output.extend_from_slice(cell.symbol().encode_utf8(&mut utf8).as_bytes());
    state.cursor_x = state
        .cursor_x
        .saturating_add(u16::from(cell.display_width().max(1)));
}

/// Absolute cursor move. ANSI positions are 1-indexed.
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    let row = u32::from(y) + 1;
    let col = u32::from(x) + 1;
    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

fn emit_cursor(output: &mut Vec<u8>, cursor: Option<(u16, u16)>) {
    match cursor {
        Some((x, y)) => {
            emit_cursor_move(output, x, y);
            output.extend_from_slice(b"\x1b[?25h");
        }
        None => output.extend_from_slice(b"\x1b[?25l"),
    }
}

fn emit_modifier_set(output: &mut Vec<u8>, modifiers: Modifiers) {
    const CODES: [(Modifiers, &[u8]); 8] = [
        (Modifiers::BOLD, b"\x1b[1m"),
        (Modifiers::DIM, b"\x1b[2m"),
        (Modifiers::ITALIC, b"\x1b[3m"),
        (Modifiers::UNDERLINE, b"\x1b[4m"),
        (Modifiers::BLINK, b"\x1b[5m"),
        (Modifiers::REVERSED, b"\x1b[7m"),
        (Modifiers::HIDDEN, b"\x1b[8m"),
        (Modifiers::STRIKETHROUGH, b"\x1b[9m"),
    ];
    for (flag, code) in CODES {
        if modifiers.contains(flag) {
            output.extend_from_slice(code);
        }
    }
}
