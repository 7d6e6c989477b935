//! Command-line command handlers for autotheme.
//!
//! Each command lives in its own submodule. They share [`prepare`], which applies
//! the global options and loads the configuration, and [`build_engine`], which wires
//! the configured provider and the state-directory cache into a [`ThemeEngine`].

pub mod clear;
pub mod get;
pub mod help;
pub mod refresh;
pub mod status;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::sync::Arc;

use crate::args::GlobalOptions;
use crate::cache::FileCache;
use crate::config::{self, Config};
use crate::engine::ThemeEngine;
use crate::location;
use crate::logger::Log;
use crate::time_source::{self, FixedTimeSource, RealTimeSource};

/// Everything a command needs after the global options were applied.
pub struct CommandContext {
    pub config: Config,
    pub now: DateTime<Local>,
    pub json: bool,
}

/// Apply global options, initialize the time source and load the configuration.
pub fn prepare(options: &GlobalOptions) -> Result<CommandContext> {
    Log::set_debug(options.debug_enabled);
    if options.json {
        Log::set_enabled(false);
    }

    config::set_config_dir(options.config_dir.clone())?;

    match &options.at {
        Some(at) => {
            let instant = time_source::parse_datetime(at).map_err(|e| anyhow::anyhow!(e))?;
            time_source::init_time_source(Arc::new(FixedTimeSource::new(instant)));
        }
        None => time_source::init_time_source(Arc::new(RealTimeSource)),
    }

    log_version!();
    if options.debug_enabled {
        log_pipe!();
        log_debug!("Debug mode enabled - showing solar calculation details");
    }

    let config = Config::load()?;
    config.log_config();

    Ok(CommandContext {
        config,
        now: time_source::now(),
        json: options.json,
    })
}

/// Build an engine backed by the state-directory cache and the configured provider.
pub fn build_engine(config: &Config) -> Result<ThemeEngine<FileCache>> {
    let cache = FileCache::open_default().context("Failed to open the location cache")?;
    log_debug!(
        "Location cache: {}",
        crate::utils::private_path(cache.path())
    );
    let source = location::from_config(config)?;
    Ok(ThemeEngine::new(cache, source, config.engine_policy()))
}
