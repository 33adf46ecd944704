//! Help popup for the current screen
//!
//! Lists the keys of the screen underneath, then the keys that work
//! everywhere. Rows come from the same tables as the footer hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::keys::{screen_keys, screen_name, KeyHint, GLOBAL_KEYS};
use crate::app::App;

/// Width of the key column
const KEY_COLUMN: usize = 12;

/// Renders the help popup over the current screen
pub fn render(frame: &mut Frame, app: &App) {
    let lines = help_lines(screen_keys(app));

    // Borders add two rows and two columns
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let popup = popup_area(frame.area(), content_width + 4, lines.len() as u16 + 2);

    let block = Block::default()
        .title(format!(" Help: {} ", screen_name(app)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Popup rows: screen keys, global keys and a closing hint
fn help_lines(screen: &[KeyHint]) -> Vec<Line<'static>> {
    let heading = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ))
    };

    let mut lines = vec![heading("This screen")];
    lines.extend(screen.iter().map(key_row));
    lines.push(Line::from(""));
    lines.push(heading("Everywhere"));
    lines.extend(GLOBAL_KEYS.iter().map(key_row));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc or ? closes this help",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn key_row(hint: &KeyHint) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {:<width$}", hint.keys, width = KEY_COLUMN),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(hint.description),
    ])
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
