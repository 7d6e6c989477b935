//! Debug display of solar windows.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

use super::fix::{GeoFix, format_age};
use super::solar::SolarWindow;

/// Log the window a decision was based on (only visible with `--debug`).
///
/// Times are shown in the zone of `now` and in UTC so the calendar date used for
/// the calculation can be checked against both.
pub fn log_solar_debug_info<Tz>(fix: &GeoFix, window: &SolarWindow, now: &DateTime<Tz>)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let tz = now.timezone();
    let day_length = window.day_length();

    log_pipe!();
    log_debug!("Solar calculation details:");
    log_indented!("        Coordinates: {}", fix.coordinates());
    log_indented!(
        "       Location age: {}",
        format_age(fix.age(now.with_timezone(&Utc)))
    );
    log_indented!(
        "      Calendar date: {}",
        fix.solar_date(now.with_timezone(&Utc)).format("%Y-%m-%d")
    );
    log_indented!(
        "            Sunrise: {} ({} UTC)",
        window.sunrise_in(&tz).format("%Y-%m-%d %H:%M:%S %Z"),
        window.sunrise().format("%H:%M")
    );
    log_indented!(
        "             Sunset: {} ({} UTC)",
        window.sunset_in(&tz).format("%Y-%m-%d %H:%M:%S %Z"),
        window.sunset().format("%H:%M")
    );
    log_indented!(
        "         Day length: {}h {}m",
        day_length.num_hours(),
        day_length.num_minutes() % 60
    );

    if window.was_corrected() {
        log_indented!("Sunrise came after sunset; moved back one day");
    }
}
