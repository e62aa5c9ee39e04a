//! Split demo: nested resizable panes with live background updates.
//!
//! Drag the dividers with the mouse. Type into the input on the left; Enter
//! restarts the progress bars. Press Escape or Ctrl-C to quit.
//!
//! Set `FLEXSPLIT_LOG=/path/to/file` (and optionally `RUST_LOG=flexsplit=debug`)
//! to write logs; the terminal itself is busy showing the UI.

use std::fs::File;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use flexsplit::{
    Direction, InputEvent, KeyCode, Layout, ProgressBar, Runner, RunnerConfig, TextInput,
    TextInputConfig, Theme,
};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let Some(path) = std::env::var_os("FLEXSPLIT_LOG") else {
        return;
    };
    let Ok(file) = File::create(path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flexsplit=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> flexsplit::Result<()> {
    init_logging();
    let theme = Theme::default();

    let input = TextInput::with_config(TextInputConfig {
        placeholder: String::from("type, then Enter"),
        ..TextInputConfig::from_theme(&theme)
    });
    let bars: Vec<Arc<ProgressBar>> = (0..3).map(|_| ProgressBar::new(&theme)).collect();

    let left = Layout::new(&theme);
    left.set_direction(Direction::Vertical).add_item(input.clone(), 1);
    for bar in &bars {
        left.add_item(bar.clone(), 0);
    }

    let right = Layout::new(&theme);
    right
        .set_direction(Direction::Vertical)
        .add_item(ProgressBar::new(&theme), 0)
        .add_item(ProgressBar::new(&theme), 0);

    let root = Layout::new(&theme);
    root.add_item(left.clone(), 0).add_item(right, 0);

    {
        let bars = bars.clone();
        input.set_on_submit(move |text| {
            tracing::info!(text, "restarting");
            for bar in &bars {
                bar.set_progress(0.0);
            }
        });
    }

    let stop = Arc::new(AtomicBool::new(false));
    let worker = {
        let stop = Arc::clone(&stop);
        let bars = bars.clone();
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                for (i, bar) in bars.iter().enumerate() {
                    #[allow(clippy::cast_precision_loss)]
                    bar.increment(0.002 * (i + 1) as f32);
                }
                thread::sleep(Duration::from_millis(20));
            }
        })
    };

    let mut runner = Runner::new(root, RunnerConfig::default())?;
    runner.application().set_focus(left);
    let result = runner.run(|event, _app| match event {
        InputEvent::Key(key)
            if key.code == KeyCode::Esc
                || (key.modifiers.control && key.code == KeyCode::Char('c')) =>
        {
            ControlFlow::Break(())
        }
        _ => ControlFlow::Continue(()),
    });
    drop(runner);

    stop.store(true, Ordering::Relaxed);
    let _ = worker.join();
    result
}
