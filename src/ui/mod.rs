pub mod overview;
pub mod process_table;
pub mod statusbar;
pub mod theme;
pub mod trend;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::system::CounterSource;
use crate::system::history::Metric;

/// Overview on top, one trend panel per metric in the middle, the process
/// table below and the status bar last.
pub fn draw<S: CounterSource>(frame: &mut Frame, app: &App<S>) {
    let table_height = app.snapshot.processes.len().max(1) as u16 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Min(5),
            Constraint::Length(table_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let snapshot = &app.snapshot;

    overview::render(frame, chunks[0], snapshot, &app.theme, app.border_style);

    let trend_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, Metric::ALL.len() as u32); 6])
        .split(chunks[1]);
    for (metric, area) in Metric::ALL.into_iter().zip(trend_areas.iter()) {
        trend::render(
            frame,
            *area,
            metric,
            snapshot.history.snapshot(metric),
            &app.theme,
            app.border_style,
        );
    }

    process_table::render(
        frame,
        chunks[2],
        &snapshot.processes,
        &app.theme,
        app.border_style,
    );

    statusbar::render(
        frame,
        chunks[3],
        &app.quit_label(),
        &app.logger.path().display().to_string(),
        app.log_error.as_deref(),
        &app.theme,
    );
}
