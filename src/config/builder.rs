//! Default configuration file creation.
//!
//! The default file is assembled with [`ConfigBuilder`] so every setting carries an
//! aligned explanatory comment.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::constants::*;
use crate::location::Accuracy;
use crate::utils::private_path;

use super::Provider;

/// Write a commented default configuration to `path`.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", private_path(path)))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", private_path(path));
    Ok(())
}

/// Rendered content of the default configuration file.
pub fn default_config_content() -> String {
    let content = ConfigBuilder::new()
        .add_section("Location")
        .add_setting(
            "provider",
            &format!("\"{}\"", Provider::default().as_str()),
            "Location provider: \"geoclue\" or \"static\"",
        )
        .add_setting(
            "accuracy",
            &format!("\"{}\"", Accuracy::default().as_str()),
            "Requested detail: \"approximate\" or \"precise\"",
        )
        .add_setting(
            "location_timeout",
            &DEFAULT_LOCATION_TIMEOUT_SECS.to_string(),
            &format!(
                "Seconds to wait for a location fix ({MINIMUM_LOCATION_TIMEOUT_SECS}-{MAXIMUM_LOCATION_TIMEOUT_SECS})"
            ),
        )
        .add_section("Cache")
        .add_setting(
            "refresh_interval",
            &DEFAULT_REFRESH_INTERVAL_HOURS.to_string(),
            &format!(
                "Hours before a cached location is refreshed ({MINIMUM_REFRESH_INTERVAL_HOURS}-{MAXIMUM_REFRESH_INTERVAL_HOURS})"
            ),
        )
        .add_setting(
            "cache_key",
            &format!("\"{DEFAULT_CACHE_KEY}\""),
            "Key the last known location is stored under",
        )
        .add_section("GeoClue")
        .add_setting(
            "desktop_id",
            &format!("\"{DEFAULT_DESKTOP_ID}\""),
            "Application id presented to GeoClue",
        )
        .build();

    format!(
        "{content}\n\n\
        #[Static location]\n\
        # Used when provider = \"static\"\n\
        # latitude = 40.7128\n\
        # longitude = -74.0060\n"
    )
}

struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        // One space between the widest setting and its comment
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(title);
                    first_section = false;
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}
