//! Text Input Widget: Single-line text input with cursor.
//!
//! A focusable, single-line editor with character insertion, deletion and
//! navigation. The terminal cursor is placed at the edit position while the
//! widget has focus.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use unicode_width::UnicodeWidthStr;

use super::traits::{MouseOutcome, SetFocus, Widget, WidgetHandle};
use crate::actor::{KeyCode, KeyEvent, MouseAction, MouseEvent};
use crate::buffer::{Cell, Rgb, Style, Surface};
use crate::layout::Rect;
use crate::theme::Theme;

/// Callback invoked with the current content when Enter is pressed.
pub type SubmitHandler = dyn Fn(&str) + Send + Sync;

/// Configuration for the text input widget.
#[derive(Debug, Clone)]
pub struct TextInputConfig {
    /// Foreground color for text.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Placeholder text shown when empty.
    pub placeholder: String,
    /// Placeholder text color.
    pub placeholder_fg: Rgb,
    /// Prompt prefix (e.g., "> ").
    pub prompt: String,
    /// Prompt color.
    pub prompt_fg: Rgb,
}

impl TextInputConfig {
    /// Derive a configuration from a theme.
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            fg: theme.primary_text,
            bg: theme.contrast_background,
            placeholder: String::new(),
            placeholder_fg: theme.tertiary_text,
            prompt: String::from("> "),
            prompt_fg: theme.secondary_text,
        }
    }
}

impl Default for TextInputConfig {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

struct InputState {
    content: String,
    /// Cursor position as a byte offset into `content`, always on a char boundary.
    cursor: usize,
    rect: Rect,
    focused: bool,
    visible: bool,
    on_submit: Option<Arc<SubmitHandler>>,
}

/// A single-line text input widget with cursor and editing support.
pub struct TextInput {
    me: Weak<TextInput>,
    config: TextInputConfig,
    state: RwLock<InputState>,
}

impl TextInput {
    /// Create a text input styled from `theme`.
    pub fn new(theme: &Theme) -> Arc<Self> {
        Self::with_config(TextInputConfig::from_theme(theme))
    }

    /// Create a new text input widget with custom configuration.
    pub fn with_config(config: TextInputConfig) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            config,
            state: RwLock::new(InputState {
                content: String::new(),
                cursor: 0,
                rect: Rect::ZERO,
                focused: false,
                visible: true,
                on_submit: None,
            }),
        })
    }

    /// Get the current text content.
    pub fn content(&self) -> String {
        self.state.read().content.clone()
    }

    /// Set the content, moving cursor to end.
    pub fn set_content(&self, content: &str) -> &Self {
        let mut state = self.state.write();
        state.content = content.to_string();
        state.cursor = state.content.len();
        self
    }

    /// Clear the content.
    pub fn clear(&self) -> &Self {
        let mut state = self.state.write();
        state.content.clear();
        state.cursor = 0;
        self
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.state.read().content.is_empty()
    }

    /// Cursor position in characters from the start of the content.
    pub fn cursor(&self) -> usize {
        let state = self.state.read();
        state.content[..state.cursor].chars().count()
    }

    /// Call `handler` with the content whenever Enter is pressed.
    pub fn set_on_submit<F>(&self, handler: F) -> &Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.state.write().on_submit = Some(Arc::new(handler));
        self
    }
}

impl InputState {
    fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor]
            .char_indices()
            .last()
            .map_or(0, |(i, _)| i)
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.content.remove(prev);
            self.cursor = prev;
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    fn cursor_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    fn cursor_right(&mut self) {
        if let Some(c) = self.content[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Apply an editing key. Returns false for keys the editor does not use.
    fn edit(&mut self, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Char(c) if !event.modifiers.control && !event.modifiers.alt => {
                self.insert_char(c);
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.content.len(),
            _ => return false,
        }
        true
    }
}

impl Widget for TextInput {
    fn rect(&self) -> Rect {
        self.state.read().rect
    }

    fn set_rect(&self, rect: Rect) {
        self.state.write().rect = rect;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn draw(&self, surface: &mut dyn Surface) {
        let state = self.state.read();
        let rect = state.rect;
        if rect.is_empty() {
            return;
        }
        let (x, y) = (rect.x, rect.y);
        let visible = rect.intersection(&surface.bounds());
        for cx in visible.x..visible.right() {
            surface.set(cx, y, Cell::new(' ').with_bg(self.config.bg));
        }

        let prompt_style = Style::default().fg(self.config.prompt_fg).bg(self.config.bg);
        let text_start = x.saturating_add(surface.set_str(x, y, &self.config.prompt, prompt_style));
        let text_width = rect.right().saturating_sub(text_start).max(0) as usize;
        if text_width == 0 {
            return;
        }

        if state.content.is_empty() && !self.config.placeholder.is_empty() {
            let style = Style::default().fg(self.config.placeholder_fg).bg(self.config.bg);
            surface.set_str(text_start, y, &self.config.placeholder, style);
        } else {
            // Scroll so the cursor column stays inside the field.
            let cursor_chars = state.content[..state.cursor].chars().count();
            let scroll = (cursor_chars + 1).saturating_sub(text_width);
            let visible: String = state.content.chars().skip(scroll).collect();
            let style = Style::default().fg(self.config.fg).bg(self.config.bg);
            surface.set_str(text_start, y, &visible, style);

            if state.focused {
                let before: String = state.content[..state.cursor].chars().skip(scroll).collect();
                surface.set_cursor(text_start.saturating_add(before.width() as i32), y);
            }
        }
    }

    fn handle_key(&self, event: &KeyEvent, _set_focus: &mut SetFocus<'_>) {
        let submit = {
            let mut state = self.state.write();
            if event.code == KeyCode::Enter {
                state.on_submit.clone().map(|handler| (handler, state.content.clone()))
            } else {
                state.edit(event);
                None
            }
        };
        if let Some((handler, content)) = submit {
            handler(&content);
        }
    }

    fn handle_mouse(
        &self,
        action: MouseAction,
        event: &MouseEvent,
        set_focus: &mut SetFocus<'_>,
    ) -> MouseOutcome {
        let (x, y) = event.position();
        if action != MouseAction::LeftDown || !self.in_rect(x, y) {
            return MouseOutcome::IGNORED;
        }
        if let Some(me) = self.me.upgrade() {
            set_focus(me as WidgetHandle);
        }
        MouseOutcome::CONSUMED
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

impl std::fmt::Debug for TextInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("TextInput")
            .field("content", &state.content)
            .field("cursor", &state.cursor)
            .field("rect", &state.rect)
            .field("focused", &state.focused)
            .finish_non_exhaustive()
    }
}
