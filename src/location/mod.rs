//! Location providers and the bounded fix request.
//!
//! A provider answers two questions: may we locate the user at a given detail
//! level, and where are they now. [`request_fix`] wraps both into a single call
//! that never waits longer than its timeout.

pub mod fixed;
pub mod geoclue;
pub mod request;
#[cfg(any(test, feature = "testing-support"))]
pub mod scripted;

use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;

use crate::config::{Config, Provider};
use crate::geo::Coordinates;

pub use fixed::StaticLocation;
pub use geoclue::GeoClueSource;
pub use request::request_fix;
#[cfg(any(test, feature = "testing-support"))]
pub use scripted::{ScriptedLocation, ScriptedOutcome};


/// Requested detail level for a fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Accuracy {
    /// City-level precision is enough to place sunrise and sunset.
    #[default]
    Approximate,
    Precise,
}

impl Accuracy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accuracy::Approximate => "approximate",
            Accuracy::Precise => "precise",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Shared cancellation flag for an in-flight fix request.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Parameters handed to [`LocationSource::get_fix`].
#[derive(Debug, Clone)]
pub struct FixRequest {
    pub accuracy: Accuracy,
    /// Set when the caller stops waiting. Providers should return promptly once set.
    pub cancel: CancelToken,
}

/// A device or service that can report the user's position.
pub trait LocationSource: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Ask for permission to locate at `accuracy`. Returns whether it was granted.
    fn request_permission(&self, accuracy: Accuracy) -> bool;

    /// Obtain one fix. May block; must honor `request.cancel`.
    fn get_fix(&self, request: &FixRequest) -> Result<Coordinates, LocationError>;
}

/// Build the provider selected by the configuration.
pub fn from_config(config: &Config) -> anyhow::Result<Arc<dyn LocationSource>> {
    match config.provider.unwrap_or_default() {
        Provider::Static => {
            let (latitude, longitude) = match (config.latitude, config.longitude) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => anyhow::bail!("Static provider requires latitude and longitude"),
            };
            Ok(Arc::new(StaticLocation::new(Coordinates::new(
                latitude, longitude,
            )?)))
        }
        Provider::GeoClue => Ok(Arc::new(GeoClueSource::new(config.desktop_id()))),
    }
}
