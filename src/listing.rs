//! Plain-text catalog listings for `--print`

use std::io::{self, Write};

use chrono::Local;

use crate::cache::LoadOutcome;
use crate::catalog::{CatalogRecord, Event};
use crate::filter::filter_items;
use crate::loader::LoadMessage;

/// Writes the records of a finished load that match `query`
pub fn write_listing<W: Write>(out: &mut W, message: &LoadMessage, query: &str) -> io::Result<()> {
    match message {
        LoadMessage::Apps(items, _) => write_records(out, &filter_items(items, query)),
        LoadMessage::Products(_, items, _) => write_records(out, &filter_items(items, query)),
        LoadMessage::ThunderOs(items, _) => write_records(out, &filter_items(items, query)),
        LoadMessage::Events(items, _) => write_events(out, &filter_items(items, query)),
    }
}

/// One-line note about how the listing was obtained, for stderr
pub fn outcome_note(message: &LoadMessage) -> Option<String> {
    let kind = message.kind();
    match message.outcome() {
        LoadOutcome::Failed(reason) => Some(format!("Failed to load {}: {}", kind.title(), reason)),
        LoadOutcome::Offline { cached_at, reason } => Some(format!(
            "Offline ({}); showing copy of {} from {}",
            reason,
            kind.title(),
            cached_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        )),
        LoadOutcome::Empty => Some(format!("No {} records available", kind)),
        LoadOutcome::NotLoaded | LoadOutcome::Loaded(_) => None,
    }
}

fn write_records<W: Write, T: CatalogRecord>(out: &mut W, records: &[&T]) -> io::Result<()> {
    for record in records {
        writeln!(out, "{}", record.name())?;
        if !record.description().is_empty() {
            writeln!(out, "  {}", record.description())?;
        }
        for (label, url) in record.links() {
            writeln!(out, "  {}: {}", label, url)?;
        }
    }
    Ok(())
}

fn write_events<W: Write>(out: &mut W, events: &[&Event]) -> io::Result<()> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    for event in sorted {
        writeln!(out, "{}  {}", event.date, event.title)?;
        if !event.description.is_empty() {
            writeln!(out, "            {}", event.description)?;
        }
    }
    Ok(())
}
