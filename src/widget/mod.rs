//! Widget trait and the built-in leaf widgets.
//!
//! Every widget, leaf or container, implements [`Widget`]. Widgets are shared
//! as [`WidgetHandle`]s (`Arc<dyn Widget>`) and guard their own state, so a
//! handle can be updated from a background thread while it is being drawn.

mod progress_bar;
mod text_input;
mod traits;

#[cfg(test)]
pub(crate) mod probe;

pub use progress_bar::{ProgressBar, ProgressBarConfig, ProgressStyle};
pub use text_input::{TextInput, TextInputConfig};
pub use traits::{MouseOutcome, SetFocus, Widget, WidgetHandle};
