//! Layout module: the split container and the geometry it is built on.
//!
//! A [`Layout`] arranges child widgets along one axis, resolving fixed and
//! automatic sizes into rectangles and placing a draggable [`Splitter`]
//! between every pair of neighbours. Sizes are only recomputed when the
//! container's rect or item list changes, or when a drag finishes.

mod container;
mod rect;
mod sizing;
mod splitter;

pub use container::{InputCapture, Layout, LayoutItem, MouseCapture};
pub use rect::Rect;
pub use sizing::{auto_extent, resolve_extents, separator_count, Direction};
pub use splitter::{build_splitters, Splitter};
