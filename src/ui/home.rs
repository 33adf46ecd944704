//! Home screen rendering
//!
//! Lists every catalog grouped into sections, with a load indicator per entry.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::render_footer;
use crate::app::{App, HOME_ENTRIES};
use crate::cache::LoadOutcome;

/// Renders the home screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // Entries
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_entries(frame, app, chunks[1]);
    render_footer(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let separator = "─".repeat((area.width as usize).saturating_sub(2));
    let lines = vec![
        Line::from(vec![
            Span::styled(
                "WINLAY",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled("Apps, downloads and events", Style::default().fg(Color::White)),
        ]),
        Line::from(Span::styled(separator, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Short marker for how a catalog last loaded
fn load_marker(outcome: &LoadOutcome) -> Option<(&'static str, Color)> {
    match outcome {
        LoadOutcome::NotLoaded => None,
        LoadOutcome::Loaded(_) => Some(("●", Color::Green)),
        LoadOutcome::Empty => Some(("○", Color::Gray)),
        LoadOutcome::Failed(_) => Some(("✗", Color::Red)),
        LoadOutcome::Offline { .. } => Some(("◐", Color::Yellow)),
    }
}

fn render_entries(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    let mut current_section = "";

    for (index, entry) in HOME_ENTRIES.iter().enumerate() {
        if entry.section != current_section {
            if !current_section.is_empty() {
                lines.push(Line::from(""));
            }
            current_section = entry.section;
            lines.push(Line::from(Span::styled(
                entry.section,
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        let is_selected = index == app.home_index;
        let cursor = if is_selected { "\u{25B8} " } else { "  " };
        let name_style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let mut spans = vec![
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            Span::styled(format!("{:<14}", entry.label), name_style),
        ];
        if let Some((marker, color)) = load_marker(app.outcome(entry.target)) {
            spans.push(Span::styled(marker, Style::default().fg(color)));
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default()
        .title(" Winlay ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogKind;
    use crate::loader::LoadMessage;
    use crate::ui::test_helpers::render_to_string;
    use std::sync::Arc;

    #[test]
    fn test_home_lists_sections_and_entries() {
        let app = App::new();
        let content = render_to_string(&app);

        assert!(content.contains("WINLAY"));
        for section in ["Download", "Explore More", "Store"] {
            assert!(content.contains(section), "Missing section {}", section);
        }
        for entry in HOME_ENTRIES {
            assert!(content.contains(entry.label), "Missing entry {}", entry.label);
        }
    }

    #[test]
    fn test_home_marks_selected_entry() {
        let mut app = App::new();
        app.home_index = 2;
        let content = render_to_string(&app);

        assert!(content.contains("▸ Windows"));
    }

    #[test]
    fn test_home_shows_failure_marker() {
        let mut app = App::new();
        app.apply(LoadMessage::Apps(
            Arc::new(Vec::new()),
            LoadOutcome::Failed("offline".to_string()),
        ));
        let content = render_to_string(&app);

        assert!(content.contains("✗"));
        assert_eq!(app.outcome(CatalogKind::Apps), &LoadOutcome::Failed("offline".to_string()));
    }
}
