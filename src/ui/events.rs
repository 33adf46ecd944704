//! Event calendar screen rendering
//!
//! Draws the month grid with event days marked and the selected day
//! highlighted, and lists the events of the selected day below it.

use chrono::{Local, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{render_footer, status_message, wrap_text};
use crate::app::App;
use crate::calendar::{events_on, month_grid, MonthGrid};
use crate::catalog::{CatalogKind, Event};

/// Width of one day cell
const CELL_WIDTH: usize = 5;

/// Month title, weekday header and six week rows, plus borders
const CALENDAR_HEIGHT: u16 = 11;

/// Renders the event calendar
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CALENDAR_HEIGHT), // Month grid
            Constraint::Min(3),                  // Events of the selected day
            Constraint::Length(1),               // Help text
        ])
        .split(area);

    let grid = month_grid(app.calendar.month, &app.events.items, app.week_start);
    render_grid(frame, chunks[0], &grid, app.calendar.selected);
    render_day_events(frame, chunks[1], app);
    render_footer(frame, chunks[2], app);
}

/// Builds the lines of the month grid
fn grid_lines(grid: &MonthGrid, selected: NaiveDate, today: NaiveDate) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("  ◀ {} ▶", grid.month),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];

    let labels: Vec<Span> = grid
        .week_start
        .labels()
        .iter()
        .map(|label| {
            Span::styled(
                format!("{:>width$} ", label, width = CELL_WIDTH - 1),
                Style::default().fg(Color::Gray),
            )
        })
        .collect();
    lines.push(Line::from(labels));

    for week in &grid.weeks {
        let cells: Vec<Span> = week
            .iter()
            .map(|cell| match cell {
                None => Span::raw(" ".repeat(CELL_WIDTH)),
                Some(day) => {
                    let marker = if day.has_event { "•" } else { " " };
                    let mut style = if day.has_event {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    if day.date == today {
                        style = style.add_modifier(Modifier::UNDERLINED);
                    }
                    if day.date == selected {
                        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                    }
                    Span::styled(
                        format!("{:>width$}{}", day.day, marker, width = CELL_WIDTH - 2) + " ",
                        style,
                    )
                }
            })
            .collect();
        lines.push(Line::from(cells));
    }

    lines
}

fn render_grid(frame: &mut Frame, area: Rect, grid: &MonthGrid, selected: NaiveDate) {
    let lines = grid_lines(grid, selected, Local::now().date_naive());

    let block = Block::default()
        .title(format!(" {} ", CatalogKind::Events.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Builds the lines listing `events` for `date`
fn day_lines(events: &[&Event], date: NaiveDate, width: usize) -> Vec<Line<'static>> {
    if events.is_empty() {
        return vec![Line::from(Span::styled(
            format!("No events on {}", date.format("%A, %B %-d")),
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines = Vec::new();
    for event in events {
        lines.push(Line::from(Span::styled(
            event.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for row in wrap_text(&event.description, width.saturating_sub(2)) {
            lines.push(Line::from(format!("  {}", row)));
        }
        lines.push(Line::from(""));
    }
    lines
}

fn render_day_events(frame: &mut Frame, area: Rect, app: &App) {
    let selected = app.calendar.selected;
    let day_events = events_on(&app.events.items, selected);

    let mut lines = Vec::new();
    if let Some((message, color)) = status_message(
        CatalogKind::Events,
        &app.events.outcome,
        app.events.loading,
        app.events.items.len(),
        "",
    ) {
        lines.push(Line::from(Span::styled(message, Style::default().fg(color))));
        lines.push(Line::from(""));
    }
    lines.extend(day_lines(
        &day_events,
        selected,
        area.width.saturating_sub(2) as usize,
    ));

    let block = Block::default()
        .title(format!(" {} ", selected.format("%a %b %-d, %Y")))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
