//! App detail screen rendering
//!
//! Shows one store app: its description (shortened until expanded), download
//! link, logo and screenshot URLs. The content scrolls with j/k.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{preview, render_footer, wrap_text, DETAIL_PREVIEW_CHARS};
use crate::app::{App, AppState};
use crate::catalog::StoreApp;

/// Renders the detail view of the app in `AppState::AppDetail`
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Content
            Constraint::Length(1), // Help text
        ])
        .split(area);

    match app.detail_app() {
        Some(store_app) => render_content(frame, chunks[0], store_app, app),
        None => render_missing(frame, chunks[0], app),
    }

    render_footer(frame, chunks[1], app);
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

/// Builds the scrollable content lines for `store_app`
fn content_lines(store_app: &StoreApp, expanded: bool, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            store_app.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("id: {}", store_app.id),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        section_title("Description"),
    ];

    let description = if expanded {
        store_app.description.clone()
    } else {
        preview(&store_app.description, DETAIL_PREVIEW_CHARS)
    };
    for row in wrap_text(&description, width) {
        lines.push(Line::from(row));
    }
    if !expanded && store_app.description.chars().count() > DETAIL_PREVIEW_CHARS {
        lines.push(Line::from(Span::styled(
            "Press e to read more",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(section_title("Download"));
    lines.push(Line::from(Span::styled(
        store_app.download_url.clone(),
        Style::default().fg(Color::Blue),
    )));

    if !store_app.logo_url.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_title("Logo"));
        lines.push(Line::from(store_app.logo_url.clone()));
    }

    lines.push(Line::from(""));
    lines.push(section_title(&format!(
        "Screenshots ({})",
        store_app.screenshots.len()
    )));
    for url in &store_app.screenshots {
        lines.push(Line::from(format!("  {}", url)));
    }

    lines
}

/// Largest scroll offset that still fills the content box
fn scroll_limit(line_count: usize, content_area: Rect) -> u16 {
    let height = content_area.height.saturating_sub(2) as usize;
    line_count.saturating_sub(height).min(u16::MAX as usize) as u16
}

/// Largest useful scroll offset for `store_app` on a `width` x `height` terminal
pub fn max_scroll(store_app: &StoreApp, expanded: bool, width: u16, height: u16) -> u16 {
    // Everything but the footer row
    let content_area = Rect::new(0, 0, width, height.saturating_sub(1));
    let lines = content_lines(
        store_app,
        expanded,
        content_area.width.saturating_sub(2) as usize,
    );
    scroll_limit(lines.len(), content_area)
}

fn render_content(frame: &mut Frame, area: Rect, store_app: &StoreApp, app: &App) {
    let width = area.width.saturating_sub(2) as usize;
    let lines = content_lines(store_app, app.detail_expanded, width);
    let scroll = app.detail_scroll_offset.min(scroll_limit(lines.len(), area));

    let block = Block::default()
        .title(format!(" {} ", store_app.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

fn render_missing(frame: &mut Frame, area: Rect, app: &App) {
    let message = match &app.state {
        AppState::AppDetail(id) if app.store.loading => format!("Loading {}...", id),
        AppState::AppDetail(id) => format!("App '{}' is no longer in the store", id),
        _ => String::new(),
    };

    let block = Block::default()
        .title(" App ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(
        Paragraph::new(Span::styled(message, Style::default().fg(Color::Gray))).block(block),
        area,
    );
}
