//! Catalog data models for the Winlay client
//!
//! This module contains the record types for every remote catalog (store apps,
//! OS download products, Thunder OS images and events), the list of catalogs
//! with their remote file names, and the decoder that turns a response body
//! into typed records.

pub mod source;

pub use source::{CatalogSource, FetchError, HttpSource, DEFAULT_BASE_URL};

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

/// One of the remote catalogs served as a static JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// The app store listing
    Apps,
    /// Windows images and tools
    Windows,
    /// Linux distributions
    Linux,
    /// Android builds
    Android,
    /// Thunder OS images
    ThunderOs,
    /// The event calendar
    Events,
}

impl CatalogKind {
    /// Every catalog, in the order they are prefetched
    pub const ALL: [CatalogKind; 6] = [
        CatalogKind::Apps,
        CatalogKind::Windows,
        CatalogKind::Linux,
        CatalogKind::Android,
        CatalogKind::ThunderOs,
        CatalogKind::Events,
    ];

    /// The three catalogs that share the `Product` record shape
    pub const PRODUCTS: [CatalogKind; 3] =
        [CatalogKind::Windows, CatalogKind::Linux, CatalogKind::Android];

    /// Short identifier used on the command line and for snapshot files
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogKind::Apps => "apps",
            CatalogKind::Windows => "windows",
            CatalogKind::Linux => "linux",
            CatalogKind::Android => "android",
            CatalogKind::ThunderOs => "thunderos",
            CatalogKind::Events => "events",
        }
    }

    /// Name of the JSON document on the asset host
    pub fn file_name(self) -> &'static str {
        match self {
            CatalogKind::Apps => "apps.json",
            CatalogKind::Windows => "windows.json",
            CatalogKind::Linux => "linux.json",
            CatalogKind::Android => "android.json",
            CatalogKind::ThunderOs => "thunderos.json",
            CatalogKind::Events => "events.json",
        }
    }

    /// Human-readable screen title
    pub fn title(self) -> &'static str {
        match self {
            CatalogKind::Apps => "App Store",
            CatalogKind::Windows => "Windows",
            CatalogKind::Linux => "Linux",
            CatalogKind::Android => "Android",
            CatalogKind::ThunderOs => "Thunder OS",
            CatalogKind::Events => "Events Calendar",
        }
    }

    /// Whether this catalog holds `Product` records
    pub fn is_product(self) -> bool {
        Self::PRODUCTS.contains(&self)
    }

    /// Parses a catalog name, accepting a few common aliases
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "apps" | "app" | "store" | "appstore" | "app-store" => Some(CatalogKind::Apps),
            "windows" | "win" => Some(CatalogKind::Windows),
            "linux" => Some(CatalogKind::Linux),
            "android" => Some(CatalogKind::Android),
            "thunderos" | "thunder-os" | "thunder" => Some(CatalogKind::ThunderOs),
            "events" | "event" | "calendar" => Some(CatalogKind::Events),
            _ => None,
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behaviour shared by every catalog record
///
/// The cache and the search filter are written once against this trait. Each
/// record names the text the filter looks at and the links it offers.
pub trait CatalogRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Primary display text, matched by the filter
    fn name(&self) -> &str;

    /// Secondary text, matched by the filter
    fn description(&self) -> &str;

    /// Labelled action URLs (downloads and the like)
    fn links(&self) -> Vec<(&str, &str)>;
}

/// An entry in the app store catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreApp {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo_url: String,
    #[serde(default)]
    pub screenshots: Vec<String>,
    pub download_url: String,
}

impl CatalogRecord for StoreApp {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn links(&self) -> Vec<(&str, &str)> {
        vec![("Download", self.download_url.as_str())]
    }
}

/// A downloadable product in the Windows, Linux or Android catalogs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub description: String,
    pub icon_url: String,
    pub downloads: Vec<DownloadLink>,
}

/// A labelled download URL of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub label: String,
    pub url: String,
}

impl CatalogRecord for Product {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn links(&self) -> Vec<(&str, &str)> {
        self.downloads
            .iter()
            .map(|d| (d.label.as_str(), d.url.as_str()))
            .collect()
    }
}

/// A Thunder OS image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThunderOsImage {
    pub name: String,
    pub image: String,
    pub download: String,
}

impl CatalogRecord for ThunderOsImage {
    fn name(&self) -> &str {
        &self.name
    }

    /// Thunder OS entries carry no description
    fn description(&self) -> &str {
        ""
    }

    fn links(&self) -> Vec<(&str, &str)> {
        vec![("Download", self.download.as_str())]
    }
}

/// A calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub description: String,
    /// ISO calendar date (`YYYY-MM-DD`)
    pub date: String,
    pub image: String,
}

impl Event {
    /// Parses the event date, if it is a valid ISO date
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

impl CatalogRecord for Event {
    fn name(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn links(&self) -> Vec<(&str, &str)> {
        Vec::new()
    }
}

/// The events document wraps its list in an object
#[derive(Debug, Deserialize)]
struct EventsDocument<T> {
    events: Vec<T>,
}

/// Decodes a catalog response body into records
///
/// Every catalog is a top-level JSON array except `events`, whose records sit
/// in the `events` field of an object. The whole body must parse; a single bad
/// record fails the decode so callers never see a partial list.
pub fn decode_records<T: DeserializeOwned>(
    kind: CatalogKind,
    body: &str,
) -> Result<Vec<T>, FetchError> {
    let records = match kind {
        CatalogKind::Events => serde_json::from_str::<EventsDocument<T>>(body)?.events,
        _ => serde_json::from_str::<Vec<T>>(body)?,
    };
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPS_JSON: &str = r#"[
        {
            "id": "notes",
            "name": "Notes",
            "description": "A simple note taking app",
            "logoUrl": "https://example.com/notes.png",
            "screenshots": ["https://example.com/s1.png", "https://example.com/s2.png"],
            "downloadUrl": "https://example.com/notes.apk"
        },
        {
            "id": "player",
            "name": "Player",
            "description": "Music player",
            "logoUrl": "https://example.com/player.png",
            "screenshots": [],
            "downloadUrl": "https://example.com/player.apk",
            "rating": 5
        }
    ]"#;

    const PRODUCTS_JSON: &str = r#"[
        {
            "name": "Ubuntu 24.04",
            "description": "Long term support release",
            "iconUrl": "https://example.com/ubuntu.png",
            "downloads": [
                {"label": "Desktop ISO", "url": "https://example.com/desktop.iso"},
                {"label": "Server ISO", "url": "https://example.com/server.iso"}
            ]
        }
    ]"#;

    const EVENTS_JSON: &str = r#"{
        "events": [
            {
                "title": "Release party",
                "description": "New build goes live",
                "date": "2026-04-15",
                "image": "https://example.com/party.png"
            }
        ]
    }"#;

    #[test]
    fn test_decode_apps_array() {
        let apps: Vec<StoreApp> = decode_records(CatalogKind::Apps, APPS_JSON).unwrap();

        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].id, "notes");
        assert_eq!(apps[0].logo_url, "https://example.com/notes.png");
        assert_eq!(apps[0].screenshots.len(), 2);
        assert_eq!(apps[0].download_url, "https://example.com/notes.apk");
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let apps: Vec<StoreApp> = decode_records(CatalogKind::Apps, APPS_JSON).unwrap();
        assert_eq!(apps[1].name, "Player");
    }

    #[test]
    fn test_decode_products_with_downloads() {
        let products: Vec<Product> =
            decode_records(CatalogKind::Linux, PRODUCTS_JSON).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].icon_url, "https://example.com/ubuntu.png");
        assert_eq!(
            products[0].links(),
            vec![
                ("Desktop ISO", "https://example.com/desktop.iso"),
                ("Server ISO", "https://example.com/server.iso"),
            ]
        );
    }

    #[test]
    fn test_decode_events_envelope() {
        let events: Vec<Event> = decode_records(CatalogKind::Events, EVENTS_JSON).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Release party");
        assert_eq!(events[0].day(), NaiveDate::from_ymd_opt(2026, 4, 15));
    }

    #[test]
    fn test_decode_events_without_envelope_fails() {
        let bare = r#"[{"title": "t", "description": "d", "date": "2026-01-01", "image": ""}]"#;
        let result: Result<Vec<Event>, _> = decode_records(CatalogKind::Events, bare);
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_decode_missing_field_fails_whole_list() {
        let partial = r#"[
            {"name": "ok", "image": "i", "download": "d"},
            {"name": "broken", "image": "i"}
        ]"#;
        let result: Result<Vec<ThunderOsImage>, _> =
            decode_records(CatalogKind::ThunderOs, partial);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_malformed_json() {
        let result: Result<Vec<StoreApp>, _> = decode_records(CatalogKind::Apps, "{ nope");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_empty_array() {
        let apps: Vec<StoreApp> = decode_records(CatalogKind::Apps, "[]").unwrap();
        assert!(apps.is_empty());
    }

    #[test]
    fn test_encoded_list_decodes_to_same_list() {
        let original = vec![
            ThunderOsImage {
                name: "Thunder OS 2".to_string(),
                image: "https://example.com/t2.png".to_string(),
                download: "https://example.com/t2.zip".to_string(),
            },
            ThunderOsImage {
                name: "Thunder OS 3".to_string(),
                image: "https://example.com/t3.png".to_string(),
                download: "https://example.com/t3.zip".to_string(),
            },
        ];

        let json = serde_json::to_string(&original).unwrap();
        let decoded: Vec<ThunderOsImage> =
            decode_records(CatalogKind::ThunderOs, &json).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_event_day_invalid_date() {
        let event = Event {
            title: "t".to_string(),
            description: String::new(),
            date: "next tuesday".to_string(),
            image: String::new(),
        };
        assert!(event.day().is_none());
    }

    #[test]
    fn test_catalog_kind_from_str_aliases() {
        assert_eq!(CatalogKind::from_str("apps"), Some(CatalogKind::Apps));
        assert_eq!(CatalogKind::from_str("Store"), Some(CatalogKind::Apps));
        assert_eq!(CatalogKind::from_str("thunder-os"), Some(CatalogKind::ThunderOs));
        assert_eq!(CatalogKind::from_str("calendar"), Some(CatalogKind::Events));
        assert_eq!(CatalogKind::from_str("macos"), None);
    }

    #[test]
    fn test_catalog_kind_file_names() {
        for kind in CatalogKind::ALL {
            assert_eq!(kind.file_name(), format!("{}.json", kind.as_str()));
        }
    }

    #[test]
    fn test_product_kinds() {
        assert!(CatalogKind::Windows.is_product());
        assert!(CatalogKind::Linux.is_product());
        assert!(CatalogKind::Android.is_product());
        assert!(!CatalogKind::Apps.is_product());
        assert!(!CatalogKind::Events.is_product());
    }

    #[test]
    fn test_thunder_os_has_empty_description() {
        let image = ThunderOsImage {
            name: "Thunder".to_string(),
            image: String::new(),
            download: "https://example.com/t.zip".to_string(),
        };
        assert_eq!(image.description(), "");
        assert_eq!(image.links(), vec![("Download", "https://example.com/t.zip")]);
    }
}
