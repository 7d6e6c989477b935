//! Application-wide constants and defaults.

// # Location refresh

/// Maximum age of a cached location before a refresh is attempted, in hours.
pub const DEFAULT_REFRESH_INTERVAL_HOURS: u64 = 24;
pub const MINIMUM_REFRESH_INTERVAL_HOURS: u64 = 1;
pub const MAXIMUM_REFRESH_INTERVAL_HOURS: u64 = 720; // 30 days

/// How long a location query may take before it is abandoned, in seconds.
pub const DEFAULT_LOCATION_TIMEOUT_SECS: u64 = 60;
pub const MINIMUM_LOCATION_TIMEOUT_SECS: u64 = 1;
pub const MAXIMUM_LOCATION_TIMEOUT_SECS: u64 = 600;

/// Granularity of the wait loop around a location query.
pub const FIX_WAIT_SLICE_MS: u64 = 25;

// # Cache

/// The single well-known key the last fix is stored under.
pub const DEFAULT_CACHE_KEY: &str = "last_known_location";
pub const CACHE_FILE_NAME: &str = "cache.json";
pub const CACHE_LOCK_FILE_NAME: &str = "cache.lock";

// # Solar calculation

/// Latitudes beyond this are capped before calculating sunrise/sunset.
/// Above roughly 65.7° the sun can stay up (or down) all day.
pub const EXTREME_LATITUDE_CAP: f64 = 65.0;

/// Half of the day length used by the equinox approximation, in hours.
pub const EQUINOX_HALF_DAY_HOURS: i64 = 6;

// # GeoClue

pub const DEFAULT_DESKTOP_ID: &str = "autotheme";
pub const GEOCLUE_POLL_INTERVAL_MS: u64 = 250;
/// GeoClue accuracy levels (GClueAccuracyLevel).
pub const GEOCLUE_ACCURACY_NONE: u32 = 0;
pub const GEOCLUE_ACCURACY_CITY: u32 = 4;
pub const GEOCLUE_ACCURACY_EXACT: u32 = 8;

// # Application

pub const CONFIG_DIR_NAME: &str = "autotheme";
pub const CONFIG_FILE_NAME: &str = "autotheme.toml";
pub const EXIT_FAILURE: i32 = 1;
/// `get` decided light only because no location was available at all.
pub const EXIT_NO_DATA: i32 = 2;

#[cfg(test)]
pub mod test_constants {
    pub const TEST_NYC_LATITUDE: f64 = 40.7;
    pub const TEST_NYC_LONGITUDE: f64 = -74.0;
    pub const TEST_LONDON_LATITUDE: f64 = 51.5074;
    pub const TEST_LONDON_LONGITUDE: f64 = -0.1278;
    pub const TEST_SHORT_TIMEOUT_MS: u64 = 50;
}
