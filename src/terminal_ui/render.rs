use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::terminal_ui::board::{SliderBoard, SliderRow};

const ROW_HEIGHT: u16 = 3;
const KEY_HELP: &str = "↑↓ select  ←→ ±1  PgUp/PgDn ±10  Home/End min/max  r reset  q/Esc/Ctrl-C quit";

/// Draws the whole panel: one gauge per slider, key help and the status line.
pub fn draw(f: &mut Frame, board: &SliderBoard) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", board.title))
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = outer.inner(f.area());
    f.render_widget(outer, f.area());

    let mut constraints = vec![Constraint::Length(ROW_HEIGHT); board.rows.len()];
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, row) in board.rows.iter().enumerate() {
        render_row(f, chunks[index], row, index == board.selected);
    }

    let help_area = chunks[board.rows.len() + 1];
    let status_area = chunks[board.rows.len() + 2];

    f.render_widget(
        Paragraph::new(KEY_HELP).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(status) = &board.status {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                status.as_str(),
                Style::default().fg(Color::Yellow),
            ))),
            status_area,
        );
    }
}

fn render_row(f: &mut Frame, area: Rect, row: &SliderRow, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", row.name)),
        )
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(row.ratio())
        .label(format!("{}/{}", row.value, row.max));

    f.render_widget(gauge, area);
}
