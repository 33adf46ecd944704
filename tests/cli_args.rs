//! Integration tests for CLI argument handling
//!
//! Tests the --open and --print flags from the command line. The print tests
//! run against a local one-shot HTTP server so no network access is needed.

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    let home = TempDir::new().expect("temp home");
    run_cli_with_home(args, home.path())
}

/// Runs the CLI with `home` as its home and cache directory
fn run_cli_with_home(args: &[&str], home: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_winlay"))
        .args(args)
        .env_remove("WINLAY_BASE_URL")
        .env_remove("RUST_LOG")
        .env("HOME", home)
        .env("XDG_CACHE_HOME", home.join(".cache"))
        .output()
        .expect("Failed to execute winlay")
}

/// Base URL of a local port with nothing listening on it
fn dead_base_url() -> String {
    // Bind then drop to get a port with nothing listening
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    };
    format!("http://127.0.0.1:{}", port)
}

/// Every file below `dir`, recursively
fn files_under(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(files_under(&path));
            } else {
                files.push(path);
            }
        }
    }
    files
}

const THUNDER_OS: &str = r#"[{"name": "ThunderX", "image": "", "download": "https://example.com/thunderx.zip"}]"#;

/// Serves `body` once as a JSON response and returns the base URL
fn serve_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}", addr)
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("winlay"), "Help should mention winlay");
    assert!(stdout.contains("open"), "Help should mention --open flag");
    assert!(stdout.contains("print"), "Help should mention --print flag");
}

#[test]
fn test_invalid_catalog_prints_error_and_exits() {
    let output = run_cli(&["--open", "beaches"]);
    assert!(!output.status.success(), "Expected invalid catalog to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid catalog"),
        "Should print error message about invalid catalog: {}",
        stderr
    );
}

#[test]
fn test_open_with_help_is_valid() {
    // With --help, it should succeed regardless of other flags
    let output = run_cli(&["--open", "events", "--help"]);
    assert!(output.status.success());
}

#[test]
fn test_print_lists_catalog() {
    let base_url = serve_once(
        r#"[
            {"name": "Ubuntu", "description": "Friendly desktop", "iconUrl": "", "downloads": [{"label": "ISO", "url": "https://example.com/ubuntu.iso"}]},
            {"name": "Fedora", "description": "Upstream first", "iconUrl": "", "downloads": []}
        ]"#,
    );

    let output = run_cli(&["--print", "linux", "--base-url", &base_url]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ubuntu"));
    assert!(stdout.contains("ISO: https://example.com/ubuntu.iso"));
    assert!(stdout.contains("Fedora"));
}

#[test]
fn test_print_with_search_filters() {
    let base_url = serve_once(
        r#"[
            {"name": "Ubuntu", "description": "Friendly desktop", "iconUrl": "", "downloads": []},
            {"name": "Fedora", "description": "Upstream first", "iconUrl": "", "downloads": []}
        ]"#,
    );

    let output = run_cli(&[
        "--print",
        "linux",
        "--search",
        "upstream",
        "--base-url",
        &base_url,
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Fedora"));
    assert!(!stdout.contains("Ubuntu"));
}

#[test]
fn test_print_unreachable_host_fails() {
    let base_url = dead_base_url();

    let output = run_cli(&[
        "--print",
        "apps",
        "--timeout",
        "2",
        "--base-url",
        &base_url,
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to load App Store"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_failed_fetch_after_success_prints_nothing() {
    let home = TempDir::new().expect("temp home");

    let base_url = serve_once(THUNDER_OS);
    let first = run_cli_with_home(&["--print", "thunderos", "--base-url", &base_url], home.path());
    assert!(first.status.success());
    assert!(String::from_utf8_lossy(&first.stdout).contains("ThunderX"));

    let second = run_cli_with_home(
        &["--print", "thunderos", "--timeout", "2", "--base-url", &dead_base_url()],
        home.path(),
    );

    assert_eq!(second.status.code(), Some(1));
    assert!(second.stdout.is_empty());
    assert!(
        files_under(home.path()).is_empty(),
        "nothing should be written without --disk-cache"
    );
}

#[test]
fn test_disk_cache_serves_last_copy_when_offline() {
    let home = TempDir::new().expect("temp home");

    let base_url = serve_once(THUNDER_OS);
    let first = run_cli_with_home(
        &["--print", "thunderos", "--disk-cache", "--base-url", &base_url],
        home.path(),
    );
    assert!(first.status.success());

    let second = run_cli_with_home(
        &[
            "--print",
            "thunderos",
            "--disk-cache",
            "--timeout",
            "2",
            "--base-url",
            &dead_base_url(),
        ],
        home.path(),
    );

    assert!(second.status.success());
    assert!(String::from_utf8_lossy(&second.stdout).contains("ThunderX"));
    assert!(String::from_utf8_lossy(&second.stderr).contains("Offline"));
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use winlay::catalog::CatalogKind;
    use winlay::cli::{parse_catalog_arg, Cli, StartupConfig};

    #[test]
    fn test_cli_no_args_opens_home() {
        let cli = Cli::parse_from(["winlay", "--base-url", "https://example.com/json"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.open.is_none());
        assert!(config.is_interactive());
    }

    #[test]
    fn test_cli_open_flag_with_android() {
        let cli = Cli::parse_from(["winlay", "--open", "android"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.open, Some(CatalogKind::Android));
    }

    #[test]
    fn test_cli_open_requires_value() {
        assert!(Cli::try_parse_from(["winlay", "--open"]).is_err());
    }

    #[test]
    fn test_parse_catalog_arg_is_case_insensitive() {
        assert_eq!(parse_catalog_arg("LINUX").unwrap(), CatalogKind::Linux);
        assert_eq!(parse_catalog_arg(" Events ").unwrap(), CatalogKind::Events);
    }

    #[test]
    fn test_cli_prefetch_and_log_file() {
        let cli = Cli::parse_from(["winlay", "--prefetch", "--log-file", "/tmp/winlay.log"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.prefetch);
        assert_eq!(
            config.log_file.as_deref(),
            Some(std::path::Path::new("/tmp/winlay.log"))
        );
    }
}
