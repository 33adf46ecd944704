//! Application state management for the Winlay client
//!
//! This module contains the main application state, handling keyboard input,
//! applying finished catalog loads, and state transitions between screens.
//! Network work never happens here: screens queue `LoadRequest`s which the
//! main loop hands to the `Loader`.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::LoadOutcome;
use crate::calendar::{shift_days, WeekStart, YearMonth};
use crate::catalog::{CatalogKind, CatalogRecord, Event, Product, StoreApp, ThunderOsImage};
use crate::cli::StartupConfig;
use crate::filter::filter_items;
use crate::loader::{LoadMessage, LoadRequest};
use crate::ui::app_detail;

/// Application state enum representing the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Landing screen listing every catalog
    Home,
    /// App store list
    Store,
    /// Detail view for a store app, by id
    AppDetail(String),
    /// Windows, Linux or Android download list
    Products(CatalogKind),
    /// Thunder OS image list
    ThunderOs,
    /// Event calendar
    Events,
}

impl AppState {
    /// The screen showing `kind`
    pub fn for_catalog(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Apps => AppState::Store,
            CatalogKind::Windows | CatalogKind::Linux | CatalogKind::Android => {
                AppState::Products(kind)
            }
            CatalogKind::ThunderOs => AppState::ThunderOs,
            CatalogKind::Events => AppState::Events,
        }
    }

    /// The catalog this screen shows, if any
    pub fn catalog(&self) -> Option<CatalogKind> {
        match self {
            AppState::Home => None,
            AppState::Store | AppState::AppDetail(_) => Some(CatalogKind::Apps),
            AppState::Products(kind) => Some(*kind),
            AppState::ThunderOs => Some(CatalogKind::ThunderOs),
            AppState::Events => Some(CatalogKind::Events),
        }
    }

    /// Whether this screen is a searchable list
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            AppState::Store | AppState::Products(_) | AppState::ThunderOs
        )
    }
}

/// An entry on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeEntry {
    pub section: &'static str,
    pub label: &'static str,
    pub target: CatalogKind,
}

/// Home screen entries, grouped by section in display order
pub const HOME_ENTRIES: [HomeEntry; 6] = [
    HomeEntry {
        section: "Download",
        label: "Linux",
        target: CatalogKind::Linux,
    },
    HomeEntry {
        section: "Download",
        label: "Android",
        target: CatalogKind::Android,
    },
    HomeEntry {
        section: "Download",
        label: "Windows",
        target: CatalogKind::Windows,
    },
    HomeEntry {
        section: "Explore More",
        label: "Events",
        target: CatalogKind::Events,
    },
    HomeEntry {
        section: "Explore More",
        label: "Thunder OS",
        target: CatalogKind::ThunderOs,
    },
    HomeEntry {
        section: "Store",
        label: "App Store",
        target: CatalogKind::Apps,
    },
];

/// What a screen shows of one catalog
#[derive(Debug, Clone)]
pub struct CatalogView<T> {
    /// Last list received from the cache
    pub items: Arc<Vec<T>>,
    /// How that list was obtained
    pub outcome: LoadOutcome,
    /// A load for this catalog is in flight
    pub loading: bool,
    /// Index into the filtered list
    pub selected_index: usize,
    /// Current search query
    pub query: String,
    /// Names of records whose full description is shown
    pub expanded: HashSet<String>,
}

impl<T> Default for CatalogView<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            outcome: LoadOutcome::NotLoaded,
            loading: false,
            selected_index: 0,
            query: String::new(),
            expanded: HashSet::new(),
        }
    }
}

impl<T: CatalogRecord> CatalogView<T> {
    /// Records matching the current query, in catalog order
    pub fn visible(&self) -> Vec<&T> {
        filter_items(&self.items, &self.query)
    }

    /// The highlighted record, if the filtered list is non-empty
    pub fn selected(&self) -> Option<&T> {
        self.visible().get(self.selected_index).copied()
    }

    /// Whether the full description of `item` is shown
    pub fn is_expanded(&self, item: &T) -> bool {
        self.expanded.contains(item.name())
    }

    /// Replaces the list with a finished load
    pub fn apply(&mut self, items: Arc<Vec<T>>, outcome: LoadOutcome) {
        self.items = items;
        self.outcome = outcome;
        self.loading = false;
        if self.selected_index >= self.visible().len() {
            self.selected_index = 0;
        }
    }
}

/// Selection, search and load bookkeeping shared by every catalog view
pub trait ListControls {
    fn visible_len(&self) -> usize;
    fn selected_index(&self) -> usize;
    fn set_selected_index(&mut self, index: usize);
    fn query(&self) -> &str;
    /// Replaces the query and moves the selection back to the top
    fn set_query(&mut self, query: String);
    /// Shows or hides the full description of the selected record
    fn toggle_selected_expanded(&mut self);
    /// Nothing has been requested for this catalog yet
    fn needs_load(&self) -> bool;
    fn mark_loading(&mut self);

    /// Moves the selection up, wrapping to the bottom
    fn move_selection_up(&mut self) {
        let count = self.visible_len();
        if count == 0 {
            return;
        }
        let index = self.selected_index();
        if index == 0 {
            self.set_selected_index(count - 1);
        } else {
            self.set_selected_index(index - 1);
        }
    }

    /// Moves the selection down, wrapping to the top
    fn move_selection_down(&mut self) {
        let count = self.visible_len();
        if count == 0 {
            return;
        }
        self.set_selected_index((self.selected_index() + 1) % count);
    }
}

impl<T: CatalogRecord> ListControls for CatalogView<T> {
    fn visible_len(&self) -> usize {
        self.visible().len()
    }

    fn selected_index(&self) -> usize {
        self.selected_index
    }

    fn set_selected_index(&mut self, index: usize) {
        self.selected_index = index;
    }

    fn query(&self) -> &str {
        &self.query
    }

    fn set_query(&mut self, query: String) {
        self.query = query;
        self.selected_index = 0;
    }

    fn toggle_selected_expanded(&mut self) {
        let Some(name) = self.selected().map(|item| item.name().to_string()) else {
            return;
        };
        if !self.expanded.remove(&name) {
            self.expanded.insert(name);
        }
    }

    fn needs_load(&self) -> bool {
        self.outcome == LoadOutcome::NotLoaded && !self.loading
    }

    fn mark_loading(&mut self) {
        self.loading = true;
    }
}

/// Month shown in the event calendar and the highlighted day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    pub month: YearMonth,
    pub selected: NaiveDate,
}

impl CalendarState {
    /// Starts on the month containing `day`, with `day` selected
    pub fn new(day: NaiveDate) -> Self {
        Self {
            month: YearMonth::from_date(day),
            selected: day,
        }
    }

    /// Moves the selection by `days`; the month follows the selection
    pub fn move_days(&mut self, days: i64) {
        self.selected = shift_days(self.selected, days);
        self.month = YearMonth::from_date(self.selected);
    }

    /// Shows the previous month, keeping the day of month where possible
    pub fn previous_month(&mut self) {
        self.show_month(self.month.previous());
    }

    /// Shows the next month, keeping the day of month where possible
    pub fn next_month(&mut self) {
        self.show_month(self.month.next());
    }

    fn show_month(&mut self, month: YearMonth) {
        let day = self.selected.day().min(month.days_in_month());
        if let Some(date) = month.day(day) {
            self.month = month;
            self.selected = date;
        }
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current screen
    pub state: AppState,
    /// Screens to return to with Esc
    history: Vec<AppState>,
    /// Index of the highlighted home entry
    pub home_index: usize,
    pub store: CatalogView<StoreApp>,
    pub windows: CatalogView<Product>,
    pub linux: CatalogView<Product>,
    pub android: CatalogView<Product>,
    pub thunder_os: CatalogView<ThunderOsImage>,
    pub events: CatalogView<Event>,
    pub calendar: CalendarState,
    /// First column of the calendar grid
    pub week_start: WeekStart,
    /// Keys are typed into the search query
    pub search_active: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Scroll offset for the app detail view
    pub detail_scroll_offset: u16,
    /// Whether the app detail view shows the full description
    pub detail_expanded: bool,
    /// Time the last load finished
    pub last_refresh: Option<DateTime<Local>>,
    /// Loads queued for the main loop
    pending_loads: Vec<LoadRequest>,
    /// Terminal size as (width, height), kept current by the main loop
    viewport: (u16, u16),
}

impl App {
    /// Creates a new App on the home screen with today selected in the calendar
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Creates a new App whose calendar starts on `today`
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            state: AppState::Home,
            history: Vec::new(),
            home_index: 0,
            store: CatalogView::default(),
            windows: CatalogView::default(),
            linux: CatalogView::default(),
            android: CatalogView::default(),
            thunder_os: CatalogView::default(),
            events: CatalogView::default(),
            calendar: CalendarState::new(today),
            week_start: WeekStart::default(),
            search_active: false,
            show_help: false,
            should_quit: false,
            detail_scroll_offset: 0,
            detail_expanded: false,
            last_refresh: None,
            pending_loads: Vec::new(),
            viewport: (80, 24),
        }
    }

    /// Creates a new App instance with the given startup configuration.
    ///
    /// This is used to apply CLI arguments like --open and --search to set the
    /// initial screen.
    ///
    /// # Arguments
    /// * `config` - The startup configuration derived from CLI arguments
    pub fn with_startup_config(config: &StartupConfig) -> Self {
        let mut app = Self::new();
        app.week_start = config.week_start;

        if let Some(kind) = config.open {
            app.open(kind);
            if let Some(ref query) = config.search {
                app.view_mut(kind).set_query(query.clone());
            }
        }

        app
    }

    /// Records the terminal size, which bounds detail scrolling
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        self.detail_scroll_offset = self.detail_scroll_offset.min(self.detail_max_scroll());
    }

    /// Takes the loads queued since the last call
    pub fn take_pending_loads(&mut self) -> Vec<LoadRequest> {
        std::mem::take(&mut self.pending_loads)
    }

    /// Marks every catalog as loading ahead of a background prefetch
    pub fn begin_prefetch(&mut self) {
        for kind in CatalogKind::ALL {
            self.view_mut(kind).mark_loading();
        }
    }

    /// Selection and search controls of a catalog's view
    pub fn view_mut(&mut self, kind: CatalogKind) -> &mut dyn ListControls {
        match kind {
            CatalogKind::Apps => &mut self.store,
            CatalogKind::Windows => &mut self.windows,
            CatalogKind::Linux => &mut self.linux,
            CatalogKind::Android => &mut self.android,
            CatalogKind::ThunderOs => &mut self.thunder_os,
            CatalogKind::Events => &mut self.events,
        }
    }

    /// The product view for a Windows, Linux or Android catalog
    pub fn products(&self, kind: CatalogKind) -> Option<&CatalogView<Product>> {
        match kind {
            CatalogKind::Windows => Some(&self.windows),
            CatalogKind::Linux => Some(&self.linux),
            CatalogKind::Android => Some(&self.android),
            _ => None,
        }
    }

    fn products_mut(&mut self, kind: CatalogKind) -> Option<&mut CatalogView<Product>> {
        match kind {
            CatalogKind::Windows => Some(&mut self.windows),
            CatalogKind::Linux => Some(&mut self.linux),
            CatalogKind::Android => Some(&mut self.android),
            _ => None,
        }
    }

    /// Outcome of the last load of `kind` as seen by this screen
    pub fn outcome(&self, kind: CatalogKind) -> &LoadOutcome {
        match kind {
            CatalogKind::Apps => &self.store.outcome,
            CatalogKind::Windows => &self.windows.outcome,
            CatalogKind::Linux => &self.linux.outcome,
            CatalogKind::Android => &self.android.outcome,
            CatalogKind::ThunderOs => &self.thunder_os.outcome,
            CatalogKind::Events => &self.events.outcome,
        }
    }

    /// The store app shown in the detail view
    pub fn detail_app(&self) -> Option<&StoreApp> {
        match &self.state {
            AppState::AppDetail(id) => self.store.items.iter().find(|app| &app.id == id),
            _ => None,
        }
    }

    /// Applies a finished load to its view
    pub fn apply(&mut self, message: LoadMessage) {
        log::debug!("Applying {} load: {:?}", message.kind(), message.outcome());
        match message {
            LoadMessage::Apps(items, outcome) => self.store.apply(items, outcome),
            LoadMessage::Products(kind, items, outcome) => {
                if let Some(view) = self.products_mut(kind) {
                    view.apply(items, outcome);
                }
            }
            LoadMessage::ThunderOs(items, outcome) => self.thunder_os.apply(items, outcome),
            LoadMessage::Events(items, outcome) => self.events.apply(items, outcome),
        }
        self.last_refresh = Some(Local::now());
    }

    /// Opens the screen for `kind`, queueing a load if it has none yet
    pub fn open(&mut self, kind: CatalogKind) {
        self.navigate(AppState::for_catalog(kind));

        let view = self.view_mut(kind);
        if view.needs_load() {
            view.mark_loading();
            self.pending_loads.push(LoadRequest::get(kind));
        }
    }

    /// Returns to the previous screen; false if there is none
    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.state = previous;
                self.search_active = false;
                self.reset_detail_view_state();
                true
            }
            None => false,
        }
    }

    /// Queues a fresh fetch of the current screen's catalog
    pub fn request_refresh(&mut self) {
        if let Some(kind) = self.state.catalog() {
            self.view_mut(kind).mark_loading();
            self.pending_loads.push(LoadRequest::refresh(kind));
        }
    }

    fn navigate(&mut self, next: AppState) {
        let previous = std::mem::replace(&mut self.state, next);
        self.history.push(previous);
        self.search_active = false;
        self.reset_detail_view_state();
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Arguments
    /// * `key_event` - The keyboard event to handle
    ///
    /// # Key Bindings
    /// - `q`: Quit the application
    /// - `Esc`: Go back (quit on the home screen)
    /// - `Up`/`k`, `Down`/`j`: Move selection in lists
    /// - `Enter`: Open the highlighted entry or expand a product
    /// - `/`: Search the current list
    /// - `r`: Refresh the current catalog
    /// - `?`: Toggle help
    /// - Calendar: `Left`/`h`, `Right`/`l` day; `Up`/`k`, `Down`/`j` week;
    ///   `[`/`]` month; `t` today
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        if self.search_active {
            self.handle_search_key(key_event);
            return;
        }

        // Keys shared by every screen
        match key_event.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            KeyCode::Char('r') => {
                self.request_refresh();
                return;
            }
            KeyCode::Esc => {
                if !self.go_back() {
                    self.should_quit = true;
                }
                return;
            }
            _ => {}
        }

        match self.state.clone() {
            AppState::Home => self.handle_home_key(key_event),
            AppState::Store => self.handle_list_key(CatalogKind::Apps, key_event),
            AppState::Products(kind) => self.handle_list_key(kind, key_event),
            AppState::ThunderOs => self.handle_list_key(CatalogKind::ThunderOs, key_event),
            AppState::AppDetail(_) => self.handle_detail_key(key_event),
            AppState::Events => self.handle_calendar_key(key_event),
        }
    }

    fn handle_home_key(&mut self, key_event: KeyEvent) {
        let count = HOME_ENTRIES.len();
        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.home_index = (self.home_index + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.home_index = (self.home_index + 1) % count;
            }
            KeyCode::Enter => {
                let target = HOME_ENTRIES[self.home_index % count].target;
                self.open(target);
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, kind: CatalogKind, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => self.view_mut(kind).move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.view_mut(kind).move_selection_down(),
            KeyCode::Char('/') => self.search_active = true,
            KeyCode::Enter => match kind {
                CatalogKind::Apps => {
                    if let Some(app) = self.store.selected() {
                        let id = app.id.clone();
                        self.navigate(AppState::AppDetail(id));
                    }
                }
                _ => self.view_mut(kind).toggle_selected_expanded(),
            },
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
            KeyCode::Char('g') => self.scroll_to_top(),
            KeyCode::Char('e') | KeyCode::Enter => {
                self.detail_expanded = !self.detail_expanded;
                self.detail_scroll_offset =
                    self.detail_scroll_offset.min(self.detail_max_scroll());
            }
            _ => {}
        }
    }

    fn handle_calendar_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Left | KeyCode::Char('h') => self.calendar.move_days(-1),
            KeyCode::Right | KeyCode::Char('l') => self.calendar.move_days(1),
            KeyCode::Up | KeyCode::Char('k') => self.calendar.move_days(-7),
            KeyCode::Down | KeyCode::Char('j') => self.calendar.move_days(7),
            KeyCode::Char('[') => self.calendar.previous_month(),
            KeyCode::Char(']') => self.calendar.next_month(),
            KeyCode::Char('t') => self.calendar = CalendarState::new(Local::now().date_naive()),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) {
        let Some(kind) = self.state.catalog() else {
            self.search_active = false;
            return;
        };

        match key_event.code {
            KeyCode::Enter => self.search_active = false,
            KeyCode::Esc => {
                self.search_active = false;
                self.view_mut(kind).set_query(String::new());
            }
            KeyCode::Backspace => {
                let view = self.view_mut(kind);
                let mut query = view.query().to_string();
                query.pop();
                view.set_query(query);
            }
            KeyCode::Char(c) => {
                let view = self.view_mut(kind);
                let query = format!("{}{}", view.query(), c);
                view.set_query(query);
            }
            _ => {}
        }
    }

    /// Scrolls up in the detail view with bounds checking
    pub fn scroll_up(&mut self) {
        self.detail_scroll_offset = self.detail_scroll_offset.saturating_sub(1);
    }

    /// Scrolls down in the detail view, stopping once the last line is visible
    pub fn scroll_down(&mut self) {
        if self.detail_scroll_offset < self.detail_max_scroll() {
            self.detail_scroll_offset += 1;
        }
    }

    fn detail_max_scroll(&self) -> u16 {
        let (width, height) = self.viewport;
        self.detail_app()
            .map(|store_app| {
                app_detail::max_scroll(store_app, self.detail_expanded, width, height)
            })
            .unwrap_or(0)
    }

    /// Scrolls to the top of the detail view
    pub fn scroll_to_top(&mut self) {
        self.detail_scroll_offset = 0;
    }

    /// Resets detail view state when navigating away
    pub fn reset_detail_view_state(&mut self) {
        self.detail_scroll_offset = 0;
        self.detail_expanded = false;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
