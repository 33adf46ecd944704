//! Catalog list screens
//!
//! Renders the app store, the Windows/Linux/Android download lists and the
//! Thunder OS image list. All of them share one layout: a search bar, the
//! filtered records, and a footer. The highlighted record also shows its
//! download links.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{preview, render_footer, status_message, wrap_text, LIST_PREVIEW_CHARS};
use crate::app::{App, CatalogView};
use crate::catalog::{CatalogKind, CatalogRecord};

/// How record descriptions are shown in a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DescriptionMode {
    /// Always a short preview
    Preview,
    /// A preview, or the full text once the record is expanded
    Expandable,
}

/// Renders the app store list
pub fn render_store(frame: &mut Frame, app: &App) {
    render_catalog(frame, app, CatalogKind::Apps, &app.store, DescriptionMode::Preview);
}

/// Renders a Windows, Linux or Android download list
pub fn render_products(frame: &mut Frame, app: &App, kind: CatalogKind) {
    let Some(view) = app.products(kind) else {
        return;
    };
    render_catalog(frame, app, kind, view, DescriptionMode::Expandable);
}

/// Renders the Thunder OS image list
pub fn render_thunder_os(frame: &mut Frame, app: &App) {
    render_catalog(frame, app, CatalogKind::ThunderOs, &app.thunder_os, DescriptionMode::Preview);
}

fn render_catalog<T: CatalogRecord>(
    frame: &mut Frame,
    app: &App,
    kind: CatalogKind,
    view: &CatalogView<T>,
    mode: DescriptionMode,
) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(3),    // Records
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_search_bar(frame, chunks[0], &view.query, app.search_active);
    render_records(frame, chunks[1], kind, view, mode);
    render_footer(frame, chunks[2], app);
}

fn render_search_bar(frame: &mut Frame, area: Rect, query: &str, active: bool) {
    let (text, style) = if active {
        (format!("{}_", query), Style::default().fg(Color::White))
    } else if query.is_empty() {
        (
            "Press / to search".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (query.to_string(), Style::default().fg(Color::White))
    };

    let border = if active { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    frame.render_widget(Paragraph::new(Span::styled(text, style)).block(block), area);
}

fn render_records<T: CatalogRecord>(
    frame: &mut Frame,
    area: Rect,
    kind: CatalogKind,
    view: &CatalogView<T>,
    mode: DescriptionMode,
) {
    let block = Block::default()
        .title(format!(" {} ", kind.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let visible = view.visible();

    let mut lines: Vec<Line> = Vec::new();
    if let Some((message, color)) =
        status_message(kind, &view.outcome, view.loading, visible.len(), &view.query)
    {
        lines.push(Line::from(Span::styled(message, Style::default().fg(color))));
        lines.push(Line::from(""));
    }

    // Line range of the highlighted record, to keep it on screen
    let mut selected_range = (0, 0);
    let text_width = inner_width.saturating_sub(4);

    for (index, item) in visible.iter().enumerate() {
        let is_selected = index == view.selected_index;
        let start = lines.len();

        let cursor = if is_selected { "\u{25B8} " } else { "  " };
        let name_style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            Span::styled(item.name().to_string(), name_style),
        ]));

        let description = item.description();
        if !description.is_empty() {
            let text = match mode {
                DescriptionMode::Expandable if view.is_expanded(item) => description.to_string(),
                _ => preview(description, LIST_PREVIEW_CHARS),
            };
            for row in wrap_text(&text, text_width) {
                lines.push(Line::from(Span::styled(
                    format!("    {}", row),
                    Style::default().fg(Color::Gray),
                )));
            }
        }

        if is_selected {
            for (label, url) in item.links() {
                lines.push(Line::from(vec![
                    Span::styled("    ↓ ", Style::default().fg(Color::Green)),
                    Span::styled(format!("{}: ", label), Style::default().fg(Color::Yellow)),
                    Span::styled(url.to_string(), Style::default().fg(Color::Blue)),
                ]));
            }
            selected_range = (start, lines.len());
        }
    }

    let scroll = scroll_offset(selected_range, inner_height);
    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Smallest scroll that shows the whole line range, or at least its start
fn scroll_offset((start, end): (usize, usize), height: usize) -> u16 {
    if height == 0 || end <= height {
        return 0;
    }
    let offset = (end - height).min(start);
    offset.min(u16::MAX as usize) as u16
}
