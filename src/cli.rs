//! Command-line interface parsing for the Winlay client
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a validated `StartupConfig`: which screen to open, the asset host, the
//! request timeout and the calendar layout.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::calendar::WeekStart;
use crate::catalog::{CatalogKind, DEFAULT_BASE_URL};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified catalog name is not recognized
    #[error("Invalid catalog: '{0}'. Valid catalogs: apps, windows, linux, android, thunderos, events")]
    InvalidCatalog(String),

    /// The specified week start is not recognized
    #[error("Invalid week start: '{0}'. Valid values: sunday, monday")]
    InvalidWeekStart(String),

    /// The timeout must be at least one second
    #[error("Invalid timeout: {0}. The timeout must be at least 1 second")]
    InvalidTimeout(u64),

    /// The base URL is not an absolute http(s) URL
    #[error("Invalid base URL: '{0}'. Expected an http or https URL")]
    InvalidBaseUrl(String),
}

/// Winlay - Browse the Winlay app store, OS downloads and event calendar
#[derive(Parser, Debug)]
#[command(name = "winlay")]
#[command(about = "Browse the Winlay app store, OS downloads and event calendar")]
#[command(version)]
pub struct Cli {
    /// Open directly on a catalog screen
    ///
    /// Examples:
    ///   winlay --open linux       # Open the Linux downloads
    ///   winlay --open events      # Open the event calendar
    ///
    /// Valid catalogs: apps, windows, linux, android, thunderos, events
    #[arg(long, value_name = "CATALOG")]
    pub open: Option<String>,

    /// Preset search query for the opened or printed catalog
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Print a catalog to stdout instead of starting the interface
    #[arg(long, value_name = "CATALOG", conflicts_with = "open")]
    pub print: Option<String>,

    /// Base URL of the catalog host
    #[arg(long, value_name = "URL", env = "WINLAY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// First day of the week in the event calendar (sunday or monday)
    #[arg(long, value_name = "DAY", default_value = "sunday")]
    pub week_start: String,

    /// Keep a copy of each catalog on disk and show it when a fetch fails
    ///
    /// Off by default: a failed fetch then shows an empty list.
    #[arg(long)]
    pub disk_cache: bool,

    /// Load every catalog in the background at startup
    #[arg(long)]
    pub prefetch: bool,

    /// Append log output to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    /// Catalog screen to start on (home screen if `None`)
    pub open: Option<CatalogKind>,
    /// Catalog to print in non-interactive mode
    pub print: Option<CatalogKind>,
    /// Initial search query
    pub search: Option<String>,
    /// Base URL of the catalog host
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// First column of the event calendar
    pub week_start: WeekStart,
    /// Whether catalog snapshots are kept on disk (opt-in)
    pub disk_cache: bool,
    /// Whether every catalog is loaded at startup
    pub prefetch: bool,
    /// Log file, if any
    pub log_file: Option<PathBuf>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            open: None,
            print: None,
            search: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            week_start: WeekStart::default(),
            disk_cache: false,
            prefetch: false,
            log_file: None,
        }
    }
}

/// Parses a catalog string argument into a CatalogKind.
///
/// # Arguments
/// * `s` - The catalog string from CLI
///
/// # Returns
/// * `Ok(CatalogKind)` if the string matches a catalog or one of its aliases
/// * `Err(CliError::InvalidCatalog)` if the string doesn't match
pub fn parse_catalog_arg(s: &str) -> Result<CatalogKind, CliError> {
    CatalogKind::from_str(s).ok_or_else(|| CliError::InvalidCatalog(s.to_string()))
}

/// Parses a week start argument
pub fn parse_week_start_arg(s: &str) -> Result<WeekStart, CliError> {
    WeekStart::from_str(s).ok_or_else(|| CliError::InvalidWeekStart(s.to_string()))
}

/// Checks that the base URL is an absolute http(s) URL
pub fn validate_base_url(s: &str) -> Result<String, CliError> {
    let url = Url::parse(s).map_err(|_| CliError::InvalidBaseUrl(s.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(s.to_string()),
        _ => Err(CliError::InvalidBaseUrl(s.to_string())),
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if any argument fails validation
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let open = cli.open.as_deref().map(parse_catalog_arg).transpose()?;
        let print = cli.print.as_deref().map(parse_catalog_arg).transpose()?;

        if cli.timeout == 0 {
            return Err(CliError::InvalidTimeout(cli.timeout));
        }

        // A blank query is the same as no query
        let search = cli
            .search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        Ok(StartupConfig {
            open,
            print,
            search,
            base_url: validate_base_url(&cli.base_url)?,
            timeout: Duration::from_secs(cli.timeout),
            week_start: parse_week_start_arg(&cli.week_start)?,
            disk_cache: cli.disk_cache,
            prefetch: cli.prefetch,
            log_file: cli.log_file.clone(),
        })
    }

    /// Whether the interactive interface should start
    pub fn is_interactive(&self) -> bool {
        self.print.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["winlay"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_parse_catalog_arg_names() {
        assert_eq!(parse_catalog_arg("apps").unwrap(), CatalogKind::Apps);
        assert_eq!(parse_catalog_arg("windows").unwrap(), CatalogKind::Windows);
        assert_eq!(parse_catalog_arg("linux").unwrap(), CatalogKind::Linux);
        assert_eq!(parse_catalog_arg("android").unwrap(), CatalogKind::Android);
        assert_eq!(parse_catalog_arg("thunderos").unwrap(), CatalogKind::ThunderOs);
        assert_eq!(parse_catalog_arg("events").unwrap(), CatalogKind::Events);
    }

    #[test]
    fn test_parse_catalog_arg_aliases() {
        assert_eq!(parse_catalog_arg("store").unwrap(), CatalogKind::Apps);
        assert_eq!(parse_catalog_arg("Calendar").unwrap(), CatalogKind::Events);
    }

    #[test]
    fn test_parse_catalog_arg_invalid() {
        let result = parse_catalog_arg("macos");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid catalog"));
        assert!(err.to_string().contains("macos"));
    }

    #[test]
    fn test_parse_week_start_arg() {
        assert_eq!(parse_week_start_arg("monday").unwrap(), WeekStart::Monday);
        assert!(parse_week_start_arg("tuesday").is_err());
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://example.com/json").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8080").is_ok());
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert!(config.open.is_none());
        assert!(config.print.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.week_start, WeekStart::Sunday);
        assert!(!config.disk_cache);
        assert!(config.is_interactive());
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = parse(&["--base-url", DEFAULT_BASE_URL]);
        assert!(cli.open.is_none());
        assert!(cli.print.is_none());
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(!cli.disk_cache);
    }

    #[test]
    fn test_startup_config_from_cli_open_with_search() {
        let cli = parse(&["--open", "linux", "--search", "  ubuntu "]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(config.open, Some(CatalogKind::Linux));
        assert_eq!(config.search.as_deref(), Some("ubuntu"));
        assert!(config.is_interactive());
    }

    #[test]
    fn test_startup_config_blank_search_is_none() {
        let cli = parse(&["--search", "   "]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.search.is_none());
    }

    #[test]
    fn test_startup_config_print_mode() {
        let cli = parse(&["--print", "thunderos", "--timeout", "3"]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(config.print, Some(CatalogKind::ThunderOs));
        assert!(!config.disk_cache);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(!config.is_interactive());
    }

    #[test]
    fn test_disk_cache_is_opt_in() {
        let config = StartupConfig::from_cli(&parse(&[])).unwrap();
        assert!(!config.disk_cache);

        let config = StartupConfig::from_cli(&parse(&["--disk-cache"])).unwrap();
        assert!(config.disk_cache);
    }

    #[test]
    fn test_print_conflicts_with_open() {
        let result = Cli::try_parse_from(["winlay", "--open", "apps", "--print", "apps"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_startup_config_from_cli_invalid_catalog() {
        let cli = parse(&["--open", "beaches"]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_startup_config_from_cli_zero_timeout() {
        let cli = parse(&["--timeout", "0"]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_startup_config_from_cli_week_start_and_base_url() {
        let cli = parse(&["--week-start", "mon", "--base-url", "http://localhost:9000/json"]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.base_url, "http://localhost:9000/json");
    }

    #[test]
    fn test_startup_config_from_cli_bad_base_url() {
        let cli = parse(&["--base-url", "file:///tmp/json"]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidBaseUrl(_))
        ));
    }
}
