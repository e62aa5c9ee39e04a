//! Progress Bar Widget: Horizontal progress indicator.
//!
//! The progress value can be advanced from any thread through a shared
//! handle while the bar is being drawn elsewhere.

use std::sync::Arc;

use parking_lot::RwLock;

use super::traits::{SetFocus, Widget};
use crate::buffer::{Cell, Rgb, Style, Surface};
use crate::layout::Rect;
use crate::theme::Theme;

/// Visual style for the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressStyle {
    /// Classic solid bar: ████████░░░░
    Solid,
    /// ASCII style: ========
    Ascii,
    /// Block characters: ▓▓▓▓▓▓░░░░
    #[default]
    Block,
}

/// Configuration for the progress bar widget.
#[derive(Debug, Clone)]
pub struct ProgressBarConfig {
    /// Style of the bar.
    pub style: ProgressStyle,
    /// Filled portion color.
    pub filled_fg: Rgb,
    /// Empty portion color.
    pub empty_fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Whether to show percentage text.
    pub show_percentage: bool,
    /// Percentage text color.
    pub percentage_fg: Rgb,
}

impl ProgressBarConfig {
    /// Derive a configuration from a theme.
    pub const fn from_theme(theme: &Theme) -> Self {
        Self {
            style: ProgressStyle::Block,
            filled_fg: theme.secondary_text,
            empty_fg: theme.tertiary_text,
            bg: theme.contrast_background,
            show_percentage: true,
            percentage_fg: theme.primary_text,
        }
    }
}

impl Default for ProgressBarConfig {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

#[derive(Debug)]
struct ProgressState {
    /// Current progress (0.0 to 1.0).
    progress: f32,
    rect: Rect,
    focused: bool,
    visible: bool,
}

/// A horizontal progress bar widget.
#[derive(Debug)]
pub struct ProgressBar {
    config: ProgressBarConfig,
    state: RwLock<ProgressState>,
}

impl ProgressBar {
    /// Create a progress bar styled from `theme`.
    pub fn new(theme: &Theme) -> Arc<Self> {
        Self::with_config(ProgressBarConfig::from_theme(theme))
    }

    /// Create a progress bar with custom configuration.
    pub fn with_config(config: ProgressBarConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            state: RwLock::new(ProgressState {
                progress: 0.0,
                rect: Rect::ZERO,
                focused: false,
                visible: true,
            }),
        })
    }

    /// Set the progress value (clamped to 0.0-1.0).
    pub fn set_progress(&self, progress: f32) {
        self.state.write().progress = progress.clamp(0.0, 1.0);
    }

    /// Get the current progress value.
    pub fn progress(&self) -> f32 {
        self.state.read().progress
    }

    /// Increment progress by a delta (clamped).
    pub fn increment(&self, delta: f32) {
        let mut state = self.state.write();
        state.progress = (state.progress + delta).clamp(0.0, 1.0);
    }

    /// Check if progress is complete (>= 1.0).
    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Get the filled and empty characters for the current style.
    const fn style_chars(&self) -> (char, char) {
        match self.config.style {
            ProgressStyle::Solid => ('█', '░'),
            ProgressStyle::Ascii => ('=', ' '),
            ProgressStyle::Block => ('▓', '░'),
        }
    }
}

impl Widget for ProgressBar {
    fn rect(&self) -> Rect {
        self.state.read().rect
    }

    fn set_rect(&self, rect: Rect) {
        self.state.write().rect = rect;
    }

    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_precision_loss)]
    fn draw(&self, surface: &mut dyn Surface) {
        let (rect, progress) = {
            let state = self.state.read();
            (state.rect, state.progress)
        };
        if rect.is_empty() {
            return;
        }
        // Only the columns the surface can show are walked.
        let visible = rect.intersection(&surface.bounds());
        let bg = Cell::new(' ').with_bg(self.config.bg);
        for x in visible.x..visible.right() {
            surface.set(x, rect.y, bg);
        }

        let pct_len = if self.config.show_percentage { 5 } else { 0 }; // " 100%"
        let bar_width = rect.width.saturating_sub(pct_len).max(0);
        let bar_end = rect.x.saturating_add(bar_width);
        let filled = (progress * bar_width as f32).round() as i32;
        let (filled_char, empty_char) = self.style_chars();

        for x in visible.x..bar_end.min(visible.right()) {
            let (c, fg) = if x.saturating_sub(rect.x) < filled {
                (filled_char, self.config.filled_fg)
            } else {
                (empty_char, self.config.empty_fg)
            };
            surface.set(x, rect.y, Cell::new(c).with_fg(fg).with_bg(self.config.bg));
        }

        if self.config.show_percentage {
            let pct = format!(" {:>3}%", (progress * 100.0).round() as u32);
            let style = Style::default().fg(self.config.percentage_fg).bg(self.config.bg);
            surface.set_str(bar_end, rect.y, &pct, style);
        }
    }

    fn has_focus(&self) -> bool {
        self.state.read().focused
    }

    fn focus(&self, _delegate: &mut SetFocus<'_>) {
        self.state.write().focused = true;
    }

    fn blur(&self) {
        self.state.write().focused = false;
    }

    fn is_visible(&self) -> bool {
        self.state.read().visible
    }

    fn set_visible(&self, visible: bool) {
        self.state.write().visible = visible;
    }
}
