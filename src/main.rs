//! Winlay - Browse the Winlay app store, OS downloads and event calendar
//!
//! A terminal UI application that lists the Winlay catalogs fetched from the
//! asset host, with search, per-catalog caching and an event calendar.

use std::error::Error;
use std::io::{self, Write};
use std::panic;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{
        self as term, disable_raw_mode, enable_raw_mode, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use winlay::app::App;
use winlay::cache::{Catalogs, LoadOutcome, SnapshotStore};
use winlay::catalog::{CatalogKind, FetchError, HttpSource};
use winlay::cli::{Cli, StartupConfig};
use winlay::listing::{outcome_note, write_listing};
use winlay::loader::{load, LoadRequest, Loader};
use winlay::{logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Builds the shared catalog caches from the startup configuration
fn build_catalogs(config: &StartupConfig) -> Result<Catalogs, FetchError> {
    let source = HttpSource::with_timeout(config.base_url.as_str(), config.timeout)?;
    let snapshots = if config.disk_cache {
        SnapshotStore::new()
    } else {
        None
    };
    if let Some(ref store) = snapshots {
        log::debug!("Catalog snapshots in {}", store.dir().display());
    }
    Ok(Catalogs::with_snapshots(Arc::new(source), snapshots))
}

/// Prints one catalog to stdout
///
/// Returns false if the catalog could not be fetched and no snapshot was available.
async fn print_catalog(
    catalogs: &Catalogs,
    kind: CatalogKind,
    query: Option<&str>,
) -> io::Result<bool> {
    let message = load(catalogs, LoadRequest::get(kind)).await;

    if let Some(note) = outcome_note(&message) {
        eprintln!("{}", note);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_listing(&mut out, &message, query.unwrap_or(""))?;
    out.flush()?;

    Ok(!matches!(message.outcome(), LoadOutcome::Failed(_)))
}

/// Runs the interactive interface until the user quits
async fn run_tui(config: StartupConfig, catalogs: Arc<Catalogs>) -> Result<(), Box<dyn Error>> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_startup_config(&config);
    let mut loader = Loader::new(catalogs);

    if config.prefetch {
        app.begin_prefetch();
        loader.prefetch_all();
    }

    let result = run_event_loop(&mut terminal, &mut app, &mut loader);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

/// Main event loop: dispatch loads, apply results, track size, draw, handle keys
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    loader: &mut Loader,
) -> Result<(), Box<dyn Error>> {
    loop {
        for request in app.take_pending_loads() {
            loader.request(request);
        }
        while let Some(message) = loader.try_recv() {
            app.apply(message);
        }

        let (width, height) = term::size()?;
        app.resize(width, height);

        terminal.draw(|f| ui::render(f, app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    logging::init(config.log_file.as_deref(), config.is_interactive())?;
    log::info!("Starting winlay against {}", config.base_url);

    let catalogs = Arc::new(build_catalogs(&config)?);

    if let Some(kind) = config.print {
        let ok = print_catalog(&catalogs, kind, config.search.as_deref()).await?;
        if !ok {
            process::exit(1);
        }
        return Ok(());
    }

    run_tui(config, catalogs).await
}
