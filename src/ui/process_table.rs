use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::format::truncate_unicode;
use crate::system::process::ProcessInfo;
use crate::ui::theme::{BorderStyle, Theme};

const NAME_WIDTH: usize = 20;
const COMMAND_WIDTH: usize = 45;

/// Cell text for one table row: pid, name, cpu, mem, command.
pub fn row_cells(process: &ProcessInfo) -> [String; 5] {
    [
        process.pid.to_string(),
        truncate_unicode(&process.name, NAME_WIDTH),
        format!("{:.1}", process.cpu_percent),
        format!("{:.1}", process.memory_percent),
        truncate_unicode(&process.command, COMMAND_WIDTH),
    ]
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    processes: &[ProcessInfo],
    theme: &Theme,
    border_style: BorderStyle,
) {
    let header = Row::new(["PID", "Name", "CPU%", "Mem%", "Command"].map(Cell::from)).style(
        Style::default()
            .fg(theme.table_header)
            .add_modifier(Modifier::BOLD),
    );

    let rows = processes.iter().map(|process| {
        Row::new(row_cells(process).map(Cell::from))
            .style(Style::default().fg(theme.text_primary))
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(border_style.border_type())
            .border_style(Style::default().fg(theme.table_border))
            .title(Span::styled(
                " Top Processes ",
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    frame.render_widget(table, area);
}
