//! Key bindings per screen
//!
//! One table per screen feeds both the footer hints and the help overlay, so
//! the two always agree with what `App::handle_key` accepts.

use crate::app::{App, AppState};

/// A key binding as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    /// Key or keys, as printed
    pub keys: &'static str,
    /// One-word label for the footer
    pub label: &'static str,
    /// Sentence for the help overlay
    pub description: &'static str,
}

const fn hint(keys: &'static str, label: &'static str, description: &'static str) -> KeyHint {
    KeyHint {
        keys,
        label,
        description,
    }
}

/// Keys that work on every screen
pub const GLOBAL_KEYS: &[KeyHint] = &[
    hint("r", "Refresh", "Fetch the current catalog again"),
    hint("Esc", "Back", "Go back (quits on the home screen)"),
    hint("?", "Help", "Toggle this help"),
    hint("q", "Quit", "Quit winlay"),
];

const HOME_KEYS: &[KeyHint] = &[
    hint("↑/↓ k/j", "Navigate", "Move between catalogs"),
    hint("Enter", "Open", "Open the highlighted catalog"),
];

const STORE_KEYS: &[KeyHint] = &[
    hint("↑/↓ k/j", "Navigate", "Move between apps"),
    hint("Enter", "Details", "Show the app's details"),
    hint("/", "Search", "Search names and descriptions"),
];

const PRODUCT_KEYS: &[KeyHint] = &[
    hint("↑/↓ k/j", "Navigate", "Move between downloads"),
    hint("Enter", "Expand", "Show or hide the full description"),
    hint("/", "Search", "Search names and descriptions"),
];

const THUNDER_OS_KEYS: &[KeyHint] = &[
    hint("↑/↓ k/j", "Navigate", "Move between images"),
    hint("/", "Search", "Search image names"),
];

const DETAIL_KEYS: &[KeyHint] = &[
    hint("↑/↓ k/j", "Scroll", "Scroll the details"),
    hint("g", "Top", "Back to the top"),
    hint("e Enter", "More", "Show or hide the full description"),
];

const CALENDAR_KEYS: &[KeyHint] = &[
    hint("←/→ h/l", "Day", "Previous or next day"),
    hint("↑/↓ k/j", "Week", "Previous or next week"),
    hint("[ ]", "Month", "Previous or next month"),
    hint("t", "Today", "Jump to today"),
];

const SEARCH_KEYS: &[KeyHint] = &[
    hint("type", "Filter", "Narrow the list as you type"),
    hint("Backspace", "Delete", "Remove the last character"),
    hint("Enter", "Done", "Keep the query and leave search"),
    hint("Esc", "Clear", "Clear the query and leave search"),
];

/// Keys specific to the screen the app is on
///
/// While a search is being typed only the search keys apply.
pub fn screen_keys(app: &App) -> &'static [KeyHint] {
    if app.search_active {
        return SEARCH_KEYS;
    }
    match app.state {
        AppState::Home => HOME_KEYS,
        AppState::Store => STORE_KEYS,
        AppState::Products(_) => PRODUCT_KEYS,
        AppState::ThunderOs => THUNDER_OS_KEYS,
        AppState::AppDetail(_) => DETAIL_KEYS,
        AppState::Events => CALENDAR_KEYS,
    }
}

/// Name of the current screen, for the help title
pub fn screen_name(app: &App) -> &'static str {
    if app.search_active {
        return "Search";
    }
    match app.state {
        AppState::Home => "Home",
        AppState::Store => "App Store",
        AppState::Products(kind) => kind.title(),
        AppState::ThunderOs => "Thunder OS",
        AppState::AppDetail(_) => "App details",
        AppState::Events => "Events Calendar",
    }
}

/// Keys listed in the footer: the screen's own, then the global ones
///
/// The home screen has nothing to refresh or go back to, so those are left out.
pub fn footer_keys(app: &App) -> Vec<KeyHint> {
    let mut keys = screen_keys(app).to_vec();
    if app.search_active {
        return keys;
    }
    keys.extend(
        GLOBAL_KEYS
            .iter()
            .filter(|key| app.state != AppState::Home || !matches!(key.keys, "r" | "Esc"))
            .copied(),
    );
    keys
}
