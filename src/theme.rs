//! Theme: the palette widgets are constructed with.
//!
//! A theme is a plain immutable value. Widgets copy what they need out of it
//! at construction time, so changing the palette means building widgets
//! with a different `Theme`, never mutating shared state.

use crate::buffer::{Modifiers, Rgb, Style};

/// Colors used by the built-in widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Main background color for widgets.
    pub primitive_background: Rgb,
    /// Background for contrasting elements (input fields, bars).
    pub contrast_background: Rgb,
    /// Background for elements that contrast even more (focused splitters).
    pub more_contrast_background: Rgb,
    /// Box borders and separators.
    pub border: Rgb,
    /// Primary text.
    pub primary_text: Rgb,
    /// Secondary text (labels, prompts).
    pub secondary_text: Rgb,
    /// Tertiary text (placeholders, empty bar segments).
    pub tertiary_text: Rgb,
    /// Text on contrasting backgrounds.
    pub inverse_text: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primitive_background: Rgb::BLACK,
            contrast_background: Rgb::new(30, 30, 30),
            more_contrast_background: Rgb::new(60, 60, 60),
            border: Rgb::new(150, 150, 150),
            primary_text: Rgb::WHITE,
            secondary_text: Rgb::new(0, 255, 255),
            tertiary_text: Rgb::new(100, 100, 100),
            inverse_text: Rgb::BLACK,
        }
    }
}

impl Theme {
    /// Style for an idle splitter glyph. The background is left to the layout.
    pub const fn splitter_style(&self) -> Style {
        Style {
            fg: Some(self.border),
            bg: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// Style for the splitter that is being dragged or was just dragged.
    pub const fn splitter_focused_style(&self) -> Style {
        Style {
            fg: Some(self.secondary_text),
            bg: Some(self.more_contrast_background),
            modifiers: Modifiers::BOLD,
        }
    }
}
