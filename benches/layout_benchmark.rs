//! Layout benchmark: full-screen draws and splitter drags.
//!
//! Target: a 200×50 four-pane draw well under one 60 Hz frame.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flexsplit::terminal::{render_diff, DiffState};
use flexsplit::{
    Application, Buffer, Direction, InputEvent, Layout, MouseAction, MouseEvent, ProgressBar,
    Rect, Theme, Widget,
};
use std::sync::Arc;

/// Build a horizontal layout of `columns` vertical stacks of progress bars.
fn build_grid(theme: &Theme, columns: usize, rows: usize) -> Arc<Layout> {
    let root = Layout::new(theme);
    for _ in 0..columns {
        let column = Layout::new(theme);
        column.set_direction(Direction::Vertical);
        for r in 0..rows {
            let bar = ProgressBar::new(theme);
            #[allow(clippy::cast_precision_loss)]
            bar.set_progress(r as f32 / rows as f32);
            column.add_item(bar, 0);
        }
        root.add_item(column, 0);
    }
    root
}

fn draw_grid(c: &mut Criterion) {
    let theme = Theme::default();
    let mut group = c.benchmark_group("draw_200x50");
    for columns in [2usize, 4, 8] {
        let root = build_grid(&theme, columns, 10);
        root.set_rect(Rect::new(0, 0, 200, 50));
        let mut buffer = Buffer::new(200, 50);
        group.bench_with_input(BenchmarkId::from_parameter(columns), &columns, |b, _| {
            b.iter(|| {
                buffer.clear();
                root.draw(black_box(&mut buffer));
            });
        });
    }
    group.finish();
}

fn relayout(c: &mut Criterion) {
    let theme = Theme::default();
    let root = build_grid(&theme, 8, 10);
    let mut width = 200;
    c.bench_function("relayout_8x10", |b| {
        b.iter(|| {
            width = if width == 200 { 199 } else { 200 };
            root.set_rect(black_box(Rect::new(0, 0, width, 50)));
        });
    });
}

fn drag_and_present(c: &mut Criterion) {
    let theme = Theme::default();
    let root = build_grid(&theme, 2, 10);
    let mut app = Application::new(root, 201, 50);
    let mut previous = app.draw().clone();
    let mut state = DiffState::new();
    let mut output = Vec::with_capacity(64 * 1024);

    app.handle_event(&InputEvent::Mouse {
        action: MouseAction::LeftDown,
        event: MouseEvent::at(100, 10),
    });
    let mut x = 100u16;
    c.bench_function("drag_step_and_diff", |b| {
        b.iter(|| {
            x = if x == 100 { 101 } else { 100 };
            app.handle_event(&InputEvent::Mouse {
                action: MouseAction::Move,
                event: MouseEvent::at(x, 10),
            });
            let frame = app.draw();
            output.clear();
            render_diff(&previous, frame, &mut output, &mut state);
            previous.clone_from(frame);
        });
    });
}

criterion_group!(benches, draw_grid, relayout, drag_and_present);
criterion_main!(benches);
