//! The theme decision engine.
//!
//! One decision reads the cached location, refreshes it when it is older than the
//! freshness window, computes today's sunrise/sunset for it, and answers whether the
//! current instant lies outside daylight. The cache write after a successful refresh
//! is the only side effect.
//!
//! ```text
//! cache ──► fresh?  ──yes──────────────────────────► window ──► dark?
//!             │ no / absent                           ▲
//!             ▼                                       │
//!        request_fix ──ok──► persist ─────────────────┘
//!             │ err
//!             ├─ stale entry present ──► use stale ───┘
//!             └─ nothing cached ──► NoDataAvailable, light
//! ```

pub mod decision;

use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;
use std::sync::Arc;

use crate::cache::{CacheError, PersistentCache, decode_fix, encode_fix};
use crate::constants::{
    DEFAULT_CACHE_KEY, DEFAULT_LOCATION_TIMEOUT_SECS, DEFAULT_REFRESH_INTERVAL_HOURS,
};
use crate::geo::{
    GeoFix, SolarCalculator, SolarWindow, SunriseCalculator, format_age, log_solar_debug_info,
};
use crate::location::{Accuracy, CancelToken, LocationError, LocationSource, request_fix};
use crate::logger::Log;

pub use decision::{FixOrigin, NoDataAvailable, ThemeDecision};

#[cfg(test)]
mod tests;

/// Tunables for the decision path.
#[derive(Debug, Clone, PartialEq)]
pub struct EnginePolicy {
    /// A cached fix younger than this is used without refreshing.
    pub freshness: chrono::Duration,
    /// Upper bound on one location request.
    pub location_timeout: std::time::Duration,
    pub accuracy: Accuracy,
    pub cache_key: String,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            freshness: chrono::Duration::hours(DEFAULT_REFRESH_INTERVAL_HOURS as i64),
            location_timeout: std::time::Duration::from_secs(DEFAULT_LOCATION_TIMEOUT_SECS),
            accuracy: Accuracy::Approximate,
            cache_key: DEFAULT_CACHE_KEY.to_string(),
        }
    }
}

/// Decides between the light and dark theme from the user's location and the time.
pub struct ThemeEngine<C, S = SunriseCalculator> {
    cache: C,
    location: Arc<dyn LocationSource>,
    solar: S,
    policy: EnginePolicy,
}

impl<C: PersistentCache> ThemeEngine<C> {
    pub fn new(cache: C, location: Arc<dyn LocationSource>, policy: EnginePolicy) -> Self {
        Self {
            cache,
            location,
            solar: SunriseCalculator,
            policy,
        }
    }
}

impl<C: PersistentCache, S: SolarCalculator> ThemeEngine<C, S> {
    /// Replace the sunrise/sunset calculator.
    pub fn with_solar_calculator<T: SolarCalculator>(self, solar: T) -> ThemeEngine<C, T> {
        ThemeEngine {
            cache: self.cache,
            location: self.location,
            solar,
            policy: self.policy,
        }
    }

    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    pub fn location_source(&self) -> &Arc<dyn LocationSource> {
        &self.location
    }

    /// Decide whether the dark theme should be active at `now`.
    ///
    /// Never fails: when no location can be found at all the decision is light and
    /// carries [`NoDataAvailable`].
    pub fn should_use_dark_theme<Tz>(&self, now: &DateTime<Tz>) -> ThemeDecision
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.decide(now, &CancelToken::new())
    }

    /// [`Self::should_use_dark_theme`] with a caller-owned cancellation token.
    ///
    /// Cancelling the token ends a pending location request early; it is handled
    /// like a timeout.
    pub fn decide<Tz>(&self, now: &DateTime<Tz>, cancel: &CancelToken) -> ThemeDecision
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let now_utc = now.with_timezone(&Utc);

        let (fix, origin) = match self.cached_fix(now_utc) {
            Some(fix) if fix.is_fresh(now_utc, self.policy.freshness) => {
                log_decorated!(
                    "Using cached location ({} old)",
                    format_age(fix.age(now_utc))
                );
                (fix, FixOrigin::Cached)
            }
            Some(stale) => {
                log_decorated!(
                    "Cached location is {} old, refreshing",
                    format_age(stale.age(now_utc))
                );
                match self.refresh(now_utc, cancel) {
                    Ok(fix) => (fix, FixOrigin::Refreshed),
                    Err(e) => {
                        log_warning!("Location refresh failed: {e}");
                        log_indented!("Continuing with the stale location");
                        (stale, FixOrigin::Stale)
                    }
                }
            }
            None => {
                log_decorated!("No cached location, requesting one");
                match self.refresh(now_utc, cancel) {
                    Ok(fix) => (fix, FixOrigin::Refreshed),
                    Err(e) => {
                        log_warning!("Location unavailable: {e}");
                        log_indented!("Defaulting to the light theme");
                        return ThemeDecision::without_location(e);
                    }
                }
            }
        };

        self.decide_with(fix, origin, now)
    }

    /// Decide from the cache alone, without ever contacting the location provider.
    ///
    /// A stale entry is used as-is and reported as [`FixOrigin::Stale`].
    pub fn decide_from_cache<Tz>(&self, now: &DateTime<Tz>) -> ThemeDecision
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let now_utc = now.with_timezone(&Utc);
        match self.cached_fix(now_utc) {
            Some(fix) => {
                let origin = if fix.is_fresh(now_utc, self.policy.freshness) {
                    FixOrigin::Cached
                } else {
                    FixOrigin::Stale
                };
                self.decide_with(fix, origin, now)
            }
            None => ThemeDecision::without_location(LocationError::Unavailable(
                "no cached location".to_string(),
            )),
        }
    }

    fn decide_with<Tz>(&self, fix: GeoFix, origin: FixOrigin, now: &DateTime<Tz>) -> ThemeDecision
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let window = self.window_for(&fix, now);
        let dark = window.is_dark(now);

        if Log::is_debug() {
            log_solar_debug_info(&fix, &window, now);
        }

        ThemeDecision::located(fix, window, origin, dark)
    }

    /// The cached fix, if one is stored and readable at `now`.
    ///
    /// Read errors, malformed entries and entries dated after `now` all count as
    /// absent.
    pub fn cached_fix(&self, now: DateTime<Utc>) -> Option<GeoFix> {
        match self.cache.get(&self.policy.cache_key) {
            Ok(Some(raw)) => match decode_fix(&raw, now) {
                Ok(fix) => Some(fix),
                Err(e) => {
                    log_warning!("Ignoring cached location: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log_warning!("Could not read the location cache: {e}");
                None
            }
        }
    }

    /// Request a new fix and persist it. Failing to persist is logged, not returned.
    pub fn refresh(&self, now: DateTime<Utc>, cancel: &CancelToken) -> Result<GeoFix, LocationError> {
        let fix = request_fix(
            &self.location,
            self.policy.accuracy,
            self.policy.location_timeout,
            now,
            cancel,
        )?;

        log_decorated!("Obtained location from {}", self.location.name());
        log_indented!("{}", fix.coordinates());

        let stored = encode_fix(&fix).and_then(|raw| self.cache.set(&self.policy.cache_key, &raw));
        if let Err(e) = stored {
            log_warning!("Could not store the location: {e}");
        }

        Ok(fix)
    }

    /// Forget the cached location.
    pub fn forget(&self) -> Result<(), CacheError> {
        self.cache.clear(&self.policy.cache_key)
    }

    /// Sunrise/sunset for `fix` on the local calendar date at the fix's position.
    ///
    /// The date comes from the instant and the longitude only, so the zone `now`
    /// is expressed in never changes the window.
    pub fn window_for<Tz: TimeZone>(&self, fix: &GeoFix, now: &DateTime<Tz>) -> SolarWindow {
        let date = fix.solar_date(now.with_timezone(&Utc));
        self.solar.compute_window(fix.latitude(), fix.longitude(), date)
    }
}
