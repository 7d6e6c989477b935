//! # autotheme
//!
//! Decides between a light and a dark theme from where the sun is at the user's
//! last known location.
//!
//! ## Architecture
//!
//! - **Engine**: [`engine::ThemeEngine`] ties everything together: freshness policy,
//!   bounded refresh, the solar window and the half-open daylight test
//! - **Cache**: [`cache`] stores the last known location (in memory or in the XDG
//!   state directory)
//! - **Location**: [`location`] providers (GeoClue2 over D-Bus, static coordinates)
//!   and the timeout-bounded fix request
//! - **Geographic**: [`geo`] coordinates, fixes and sunrise/sunset calculation
//! - **Front end**: [`args`], [`commands`] and [`config`] for the `autotheme` binary
//! - **Infrastructure**: logging, the time source used by `--at`, and state paths
//!
//! ```no_run
//! use std::sync::Arc;
//! use autotheme::cache::MemoryCache;
//! use autotheme::engine::{EnginePolicy, ThemeEngine};
//! use autotheme::geo::Coordinates;
//! use autotheme::location::StaticLocation;
//!
//! let location = Arc::new(StaticLocation::new(Coordinates::new(40.7128, -74.006)?));
//! let engine = ThemeEngine::new(MemoryCache::new(), location, EnginePolicy::default());
//! let decision = engine.should_use_dark_theme(&chrono::Local::now());
//! println!("{}", decision.theme_name());
//! # Ok::<(), anyhow::Error>(())
//! ```

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod cache;
pub mod commands;
pub mod config;
pub mod constants;
pub mod engine;
pub mod geo;
pub mod location;
pub mod state;
pub mod time_source;
pub mod utils;

pub use engine::{FixOrigin, NoDataAvailable, ThemeDecision, ThemeEngine};
