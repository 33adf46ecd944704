//! UI rendering module for the Winlay client
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod app_detail;
pub mod catalog_list;
pub mod events;
pub mod help_overlay;
pub mod home;
pub mod keys;

use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, AppState};
use crate::cache::LoadOutcome;
use crate::catalog::CatalogKind;

/// Characters of description shown in list rows before "…"
pub const LIST_PREVIEW_CHARS: usize = 120;

/// Characters of description shown in the app detail view before "…"
pub const DETAIL_PREVIEW_CHARS: usize = 200;

/// Renders the current screen, with the help overlay on top when shown
pub fn render(frame: &mut Frame, app: &App) {
    match &app.state {
        AppState::Home => home::render(frame, app),
        AppState::Store => catalog_list::render_store(frame, app),
        AppState::AppDetail(_) => app_detail::render(frame, app),
        AppState::Products(kind) => catalog_list::render_products(frame, app, *kind),
        AppState::ThunderOs => catalog_list::render_thunder_os(frame, app),
        AppState::Events => events::render(frame, app),
    }

    if app.show_help {
        help_overlay::render(frame, app);
    }
}

/// Shortens `text` to `max_chars` characters, ending with "…" when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

/// Splits `text` into lines of at most `width` characters, breaking at spaces
///
/// Words longer than `width` are split mid-word.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Plural noun for the records of a catalog
fn record_noun(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Apps => "apps",
        CatalogKind::Windows | CatalogKind::Linux | CatalogKind::Android => "downloads",
        CatalogKind::ThunderOs => "images",
        CatalogKind::Events => "events",
    }
}

/// Message describing a catalog that has nothing to list, or is stale
///
/// Returns `None` when the list should simply be shown.
pub fn status_message(
    kind: CatalogKind,
    outcome: &LoadOutcome,
    loading: bool,
    visible: usize,
    query: &str,
) -> Option<(String, Color)> {
    if loading && visible == 0 {
        return Some((format!("Loading {}...", kind.title()), Color::Cyan));
    }

    match outcome {
        LoadOutcome::NotLoaded => Some((format!("Loading {}...", kind.title()), Color::Cyan)),
        LoadOutcome::Failed(_) => Some((
            format!(
                "Failed to load {}. Check your connection and press r to retry.",
                kind.title()
            ),
            Color::Red,
        )),
        LoadOutcome::Offline { cached_at, .. } => Some((
            format!(
                "Offline: showing copy from {}",
                cached_at.with_timezone(&Local).format("%b %d %H:%M")
            ),
            Color::Yellow,
        )),
        LoadOutcome::Empty => Some((format!("No {} available", record_noun(kind)), Color::Gray)),
        LoadOutcome::Loaded(_) if visible == 0 && !query.trim().is_empty() => Some((
            format!("No {} match \"{}\"", record_noun(kind), query.trim()),
            Color::Gray,
        )),
        LoadOutcome::Loaded(_) => None,
    }
}

/// Renders the key hints of the current screen with data freshness
pub fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hints = keys::footer_keys(app);
    let mut spans = Vec::with_capacity(hints.len() * 2 + 1);
    for hint in &hints {
        spans.push(Span::styled(hint.keys, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {}  ", hint.label)));
    }

    if let Some(last_refresh) = app.last_refresh {
        let elapsed = Local::now() - last_refresh;
        let mins_ago = elapsed.num_minutes();
        let freshness_text = if mins_ago < 1 {
            "│ Data: just now".to_string()
        } else if mins_ago < 60 {
            format!("│ Data: {}m ago", mins_ago)
        } else {
            format!("│ Data: {}h ago", elapsed.num_hours())
        };
        spans.push(Span::styled(
            freshness_text,
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
