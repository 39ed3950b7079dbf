use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::system::history::{HistoryBuffer, Metric};
use crate::ui::theme::{BorderStyle, Theme};

const BAR: char = '\u{2588}';

/// Bar lengths for the newest `rows` samples, oldest first.
///
/// Percent series are drawn against a fixed 100% scale. Rate series have no
/// natural ceiling, so they scale against the largest value in the window.
pub fn bar_lengths(history: &HistoryBuffer, percent: bool, width: u16, rows: u16) -> Vec<usize> {
    let width = usize::from(width);
    let scale = if percent { 100.0 } else { history.max() };
    let skip = history.len().saturating_sub(usize::from(rows));

    history
        .iter()
        .skip(skip)
        .map(|value| {
            if scale <= 0.0 || !value.is_finite() {
                return 0;
            }
            let ratio = (value / scale).clamp(0.0, 1.0);
            (ratio * width as f64).round() as usize
        })
        .collect()
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    metric: Metric,
    history: &HistoryBuffer,
    theme: &Theme,
    border_style: BorderStyle,
) {
    let color = theme.metric_color(metric);
    let latest = history.latest().unwrap_or(0.0);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_style.border_type())
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} {latest:.1} ", metric.title()),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = bar_lengths(history, metric.is_percent(), inner.width, inner.height)
        .into_iter()
        .map(|len| {
            Line::from(Span::styled(
                BAR.to_string().repeat(len),
                Style::default().fg(color),
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
