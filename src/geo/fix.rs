//! Geographic fixes: a validated position and the time it was observed.

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// A latitude/longitude pair inside the valid geographic ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and build coordinates.
    ///
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180]. NaN is rejected.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            anyhow::bail!(
                "latitude must be between -90 and 90 degrees (got {})",
                latitude
            );
        }
        if !(-180.0..=180.0).contains(&longitude) {
            anyhow::bail!(
                "longitude must be between -180 and 180 degrees (got {})",
                longitude
            );
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.latitude, self.longitude)
    }
}

/// A single position observation with the time it was taken.
///
/// Immutable once built. The engine creates one per successful location query,
/// stamped with the query time, and stores it as the only cache entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    coordinates: Coordinates,
    observed_at: DateTime<Utc>,
}

impl GeoFix {
    pub fn new(coordinates: Coordinates, observed_at: DateTime<Utc>) -> Self {
        Self {
            coordinates,
            observed_at,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.longitude
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// Time elapsed between the observation and `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.observed_at)
    }

    /// A fix is fresh while its age is strictly below `max_age`.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.age(now) < max_age
    }

    /// Calendar date at the fix's position at `now`, by mean solar time
    /// (UTC shifted by longitude / 15 hours).
    pub fn solar_date(&self, now: DateTime<Utc>) -> NaiveDate {
        let offset_secs = (self.longitude() / 15.0 * 3600.0).round() as i64;
        (now + Duration::seconds(offset_secs)).date_naive()
    }
}

/// Render a duration as a short human-readable age ("3h 12m", "45s").
pub fn format_age(age: Duration) -> String {
    let secs = age.num_seconds().max(0);
    let (days, hours, minutes) = (secs / 86_400, (secs % 86_400) / 3600, (secs % 3600) / 60);
    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{secs}s")
    }
}
