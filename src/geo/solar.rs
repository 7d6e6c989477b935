//! Sunrise/sunset windows for a position and calendar date.
//!
//! The calculation itself is delegated to the `sunrise` crate. This module adds the
//! policies the theme decision relies on:
//!
//! - **Latitude capping**: positions beyond ±65° are treated as ±65° so a sunrise and
//!   a sunset always exist, even during polar day or polar night.
//! - **Degenerate fallback**: if the crate ever returns identical instants or instants
//!   far away from the requested date, a fixed equinox approximation is used instead.
//! - **Inverted window correction**: whenever a calculator reports `sunrise > sunset`,
//!   sunrise is replaced by `sunset - 24h`. The resulting window reaches back into the
//!   previous calendar day instead of being empty.
//!
//! Every step is pure: the same inputs always produce the same window.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use sunrise::{SolarDay, SolarEvent};

use crate::constants::{EQUINOX_HALF_DAY_HOURS, EXTREME_LATITUDE_CAP};

/// Source of raw sunrise/sunset instants.
///
/// Implementations must be pure. `compute_window` applies the inverted window
/// correction on top of whatever `solar_events` reports.
pub trait SolarCalculator {
    /// Raw (sunrise, sunset) instants for `date` at the given position.
    fn solar_events(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> (DateTime<Utc>, DateTime<Utc>);

    /// The corrected daylight window for `date`.
    fn compute_window(&self, latitude: f64, longitude: f64, date: NaiveDate) -> SolarWindow {
        let (sunrise, sunset) = self.solar_events(latitude, longitude, date);
        SolarWindow::from_raw(sunrise, sunset)
    }
}

/// The `[sunrise, sunset)` daylight interval of one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarWindow {
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
    corrected: bool,
}

impl SolarWindow {
    /// Build a window from raw calculator output, correcting inverted windows.
    pub fn from_raw(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        if sunrise > sunset {
            Self {
                sunrise: sunset - Duration::days(1),
                sunset,
                corrected: true,
            }
        } else {
            Self {
                sunrise,
                sunset,
                corrected: false,
            }
        }
    }

    pub fn sunrise(&self) -> DateTime<Utc> {
        self.sunrise
    }

    pub fn sunset(&self) -> DateTime<Utc> {
        self.sunset
    }

    /// Whether the raw sunrise came after sunset and had to be moved back a day.
    pub fn was_corrected(&self) -> bool {
        self.corrected
    }

    /// Sunrise expressed in the given time zone.
    pub fn sunrise_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        self.sunrise.with_timezone(tz)
    }

    /// Sunset expressed in the given time zone.
    pub fn sunset_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        self.sunset.with_timezone(tz)
    }

    pub fn day_length(&self) -> Duration {
        self.sunset.signed_duration_since(self.sunrise)
    }

    /// Sunrise is inclusive, sunset exclusive.
    pub fn is_daylight<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let now = now.with_timezone(&Utc);
        self.sunrise <= now && now < self.sunset
    }

    /// The sunset instant itself already counts as dark.
    pub fn is_dark<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        !self.is_daylight(now)
    }
}

/// Calculator backed by the `sunrise` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunriseCalculator;

impl SolarCalculator for SunriseCalculator {
    fn solar_events(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        let latitude = cap_latitude(latitude);

        let events = sunrise::Coordinates::new(latitude, longitude).map(|coord| {
            let solar_day = SolarDay::new(coord, date);
            (
                solar_day.event_time(SolarEvent::Sunrise),
                solar_day.event_time(SolarEvent::Sunset),
            )
        });

        match events {
            Some((sunrise, sunset)) if is_plausible(date, sunrise, sunset) => (sunrise, sunset),
            _ => equinox_approximation(longitude, date),
        }
    }
}

/// Clamp latitude into the range where sunrise and sunset always occur.
pub fn cap_latitude(latitude: f64) -> f64 {
    latitude.clamp(-EXTREME_LATITUDE_CAP, EXTREME_LATITUDE_CAP)
}

fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

// Events must be distinct and land within a day of the requested date.
fn is_plausible(date: NaiveDate, sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> bool {
    let earliest = utc_midnight(date) - Duration::days(1);
    let latest = utc_midnight(date) + Duration::days(2);
    let in_range = |t: DateTime<Utc>| t >= earliest && t <= latest;

    sunrise != sunset && in_range(sunrise) && in_range(sunset)
}

/// Twelve hours of daylight centered on local solar noon.
pub fn equinox_approximation(longitude: f64, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let offset_secs = (longitude / 15.0 * 3600.0).round() as i64;
    let solar_noon = utc_midnight(date) + Duration::hours(12) - Duration::seconds(offset_secs);
    (
        solar_noon - Duration::hours(EQUINOX_HALF_DAY_HOURS),
        solar_noon + Duration::hours(EQUINOX_HALF_DAY_HOURS),
    )
}
