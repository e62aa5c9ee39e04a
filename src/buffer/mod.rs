//! Buffer module: the cell grid widgets draw into.
//!
//! This module contains:
//! - [`Cell`]: The atomic unit of display
//! - [`Buffer`]: A grid of cells representing the terminal screen
//! - [`Surface`]: The drawing interface shared by buffers and clip regions
//! - [`ClipRegion`]: A surface view that drops writes outside one rectangle
//! - [`Rgb`], [`Style`], [`Modifiers`]: Colors and text attributes

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
mod clip;
mod surface;

pub use buffer::Buffer;
pub use cell::{Cell, Modifiers, Rgb, Style};
pub use clip::ClipRegion;
pub use surface::Surface;
