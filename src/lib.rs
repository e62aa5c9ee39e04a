//! # Flexsplit
//!
//! Resizable split layouts for terminal UIs.
//!
//! A [`Layout`] arranges widgets side by side or stacked, with fixed or
//! automatically shared sizes, and puts a draggable divider between each
//! pair of neighbours. Every child is drawn through a [`ClipRegion`], so a
//! misbehaving widget cannot paint over its siblings.
//!
//! ## Core Concepts
//!
//! - **One widget contract**: leaves and containers implement [`Widget`]
//! - **Shared handles**: widgets are `Arc<dyn Widget>` with their own locks,
//!   so background threads can update them while the UI draws
//! - **Splitter drag**: press on a divider, move, release; the layout
//!   captures the mouse for the whole gesture
//! - **Actor model**: a dedicated input thread feeds the main loop
//!
//! ## Example
//!
//! ```rust
//! use flexsplit::{Buffer, Layout, ProgressBar, Rect, Theme, Widget};
//!
//! let theme = Theme::default();
//! let bar = ProgressBar::new(&theme);
//! let layout = Layout::new(&theme);
//! layout.add_item(bar.clone(), 0).add_item(ProgressBar::new(&theme), 10);
//! layout.set_rect(Rect::new(0, 0, 40, 1));
//!
//! bar.set_progress(0.5);
//! let mut buffer = Buffer::new(40, 1);
//! layout.draw(&mut buffer);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod error;
pub mod layout;
pub mod terminal;
pub mod theme;
pub mod widget;

// Re-exports for convenience
pub use actor::{
    Application, InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseAction, MouseButton,
    MouseEvent, Runner, RunnerConfig,
};
pub use buffer::{Buffer, Cell, ClipRegion, Modifiers, Rgb, Style, Surface};
pub use error::{Error, Result};
pub use layout::{Direction, Layout, LayoutItem, Rect, Splitter};
pub use terminal::Terminal;
pub use theme::Theme;
pub use widget::{
    MouseOutcome, ProgressBar, ProgressBarConfig, ProgressStyle, SetFocus, TextInput,
    TextInputConfig, Widget, WidgetHandle,
};
