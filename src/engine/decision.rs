//! Result of one theme decision.

use thiserror::Error;

use crate::geo::{GeoFix, SolarWindow};
use crate::location::LocationError;

/// How the location behind a decision was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOrigin {
    /// Fresh entry read from the cache.
    Cached,
    /// New fix obtained during this decision and persisted.
    Refreshed,
    /// Cached entry past its freshness window, used because the refresh failed.
    Stale,
    /// No location at all.
    Unavailable,
}

impl FixOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixOrigin::Cached => "cached",
            FixOrigin::Refreshed => "refreshed",
            FixOrigin::Stale => "stale",
            FixOrigin::Unavailable => "unavailable",
        }
    }
}

/// Nothing cached and no fix obtainable. The decision falls back to light.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no location data available: {cause}")]
pub struct NoDataAvailable {
    pub cause: LocationError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDecision {
    pub dark: bool,
    pub origin: FixOrigin,
    pub fix: Option<GeoFix>,
    pub window: Option<SolarWindow>,
    pub no_data: Option<NoDataAvailable>,
}

impl ThemeDecision {
    pub(crate) fn located(fix: GeoFix, window: SolarWindow, origin: FixOrigin, dark: bool) -> Self {
        Self {
            dark,
            origin,
            fix: Some(fix),
            window: Some(window),
            no_data: None,
        }
    }

    pub(crate) fn without_location(cause: LocationError) -> Self {
        Self {
            dark: false,
            origin: FixOrigin::Unavailable,
            fix: None,
            window: None,
            no_data: Some(NoDataAvailable { cause }),
        }
    }

    /// Whether the dark theme should be used.
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn theme_name(&self) -> &'static str {
        if self.dark { "dark" } else { "light" }
    }
}
