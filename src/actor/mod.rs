//! Actor Model: input thread, event routing and the main loop.
//!
//! Terminal events are read on a dedicated input thread and sent over a
//! crossbeam channel to the main loop, which hands them to the
//! [`Application`] and presents the redrawn frame.

mod application;
mod input;
mod messages;
mod runner;

pub use application::Application;
pub use input::{convert_event, InputActor};
pub use messages::{
    InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseAction, MouseButton, MouseEvent,
};
pub use runner::{Runner, RunnerConfig};
