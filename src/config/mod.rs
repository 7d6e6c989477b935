//! Configuration for autotheme.
//!
//! Settings are read from `autotheme.toml` in `$XDG_CONFIG_HOME/autotheme/` (or the
//! directory passed with `--config`). A commented default file is written the first
//! time autotheme runs without one:
//!
//! ```toml
//! #[Location]
//! provider = "geoclue"      # Location provider: "geoclue" or "static"
//! accuracy = "approximate"  # Requested detail: "approximate" or "precise"
//! location_timeout = 60     # Seconds to wait for a location fix (1-600)
//!
//! #[Cache]
//! refresh_interval = 24     # Hours before a cached location is refreshed (1-720)
//! cache_key = "last_known_location" # Key the last known location is stored under
//!
//! #[GeoClue]
//! desktop_id = "autotheme"  # Application id presented to GeoClue
//! ```
//!
//! `latitude` and `longitude` are required when `provider = "static"`.

pub mod builder;
pub mod loading;
pub mod validation;

use serde::Deserialize;
use std::path::PathBuf;

use crate::constants::*;
use crate::engine::EnginePolicy;
use crate::location::Accuracy;

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};


/// Where location fixes come from.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// The GeoClue2 D-Bus service.
    #[default]
    GeoClue,
    /// Fixed coordinates from this file.
    Static,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::GeoClue => "geoclue",
            Provider::Static => "static",
        }
    }
}

/// Settings loaded from `autotheme.toml`. Absent fields fall back to defaults.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    pub provider: Option<Provider>,
    pub accuracy: Option<Accuracy>,
    pub location_timeout: Option<u64>, // seconds
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub refresh_interval: Option<u64>, // hours
    pub cache_key: Option<String>,
    pub desktop_id: Option<String>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        load()
    }

    pub fn get_config_path() -> anyhow::Result<PathBuf> {
        get_config_path()
    }

    pub fn provider(&self) -> Provider {
        self.provider.unwrap_or_default()
    }

    pub fn accuracy(&self) -> Accuracy {
        self.accuracy.unwrap_or_default()
    }

    pub fn location_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(
            self.location_timeout
                .unwrap_or(DEFAULT_LOCATION_TIMEOUT_SECS),
        )
    }

    pub fn refresh_interval(&self) -> chrono::Duration {
        let hours = self
            .refresh_interval
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_HOURS);
        chrono::Duration::hours(hours as i64)
    }

    pub fn cache_key(&self) -> &str {
        self.cache_key.as_deref().unwrap_or(DEFAULT_CACHE_KEY)
    }

    pub fn desktop_id(&self) -> &str {
        self.desktop_id.as_deref().unwrap_or(DEFAULT_DESKTOP_ID)
    }

    /// Engine settings derived from this configuration.
    pub fn engine_policy(&self) -> EnginePolicy {
        EnginePolicy {
            freshness: self.refresh_interval(),
            location_timeout: self.location_timeout(),
            accuracy: self.accuracy(),
            cache_key: self.cache_key().to_string(),
        }
    }

    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        log_indented!("Provider: {}", self.provider().as_str());
        if self.provider() == Provider::Static
            && let (Some(lat), Some(lon)) = (self.latitude, self.longitude)
        {
            let lat_dir = if lat >= 0.0 { "N" } else { "S" };
            let lon_dir = if lon >= 0.0 { "E" } else { "W" };
            log_indented!(
                "Location: {:.4}°{lat_dir}, {:.4}°{lon_dir}",
                lat.abs(),
                lon.abs()
            );
        }
        log_indented!("Accuracy: {}", self.accuracy().as_str());
        log_indented!("Location timeout: {}s", self.location_timeout().as_secs());
        log_indented!(
            "Refresh interval: {}h",
            self.refresh_interval().num_hours()
        );
        log_debug!("Cache key: {}", self.cache_key());
    }
}
