use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::system::Snapshot;
use crate::system::history::Metric;
use crate::ui::theme::{BorderStyle, Theme};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    theme: &Theme,
    border_style: BorderStyle,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_style.border_type())
        .border_style(Style::default().fg(theme.overview_border))
        .title(Span::styled(
            " System Overview ",
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ));

    let network = format!(
        "{} | {}",
        snapshot.net_sent.display(),
        snapshot.net_received.display()
    );
    let lines = vec![
        overview_line(
            "CPU",
            format!("{:.1}%", snapshot.cpu_percent),
            theme.metric_color(Metric::Cpu),
            theme,
        ),
        overview_line(
            "Memory",
            format!("{:.1}%", snapshot.memory_percent),
            theme.metric_color(Metric::Memory),
            theme,
        ),
        overview_line(
            "Disk Read",
            snapshot.disk_read.display(),
            theme.metric_color(Metric::DiskRead),
            theme,
        ),
        overview_line(
            "Disk Write",
            snapshot.disk_write.display(),
            theme.metric_color(Metric::DiskWrite),
            theme,
        ),
        overview_line("Network", network, theme.metric_color(Metric::NetSent), theme),
        overview_line("Battery", snapshot.battery_label(), theme.battery, theme),
        overview_line("System", snapshot.identity.to_string(), theme.identity, theme),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn overview_line(label: &str, value: String, color: Color, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {label}: "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(theme.text_primary)),
    ])
}
