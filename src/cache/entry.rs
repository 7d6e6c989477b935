//! On-disk representation of a cached fix.
//!
//! A fix is stored as one JSON record under one key:
//!
//! ```json
//! {"latitude":40.7128,"longitude":-74.006,"observed_at":"2024-06-21T16:00:00Z"}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CacheError;
use crate::geo::{Coordinates, GeoFix};

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    latitude: f64,
    longitude: f64,
    observed_at: DateTime<Utc>,
}

/// Serialize a fix for storage.
pub fn encode_fix(fix: &GeoFix) -> Result<String, CacheError> {
    let entry = CacheEntry {
        latitude: fix.latitude(),
        longitude: fix.longitude(),
        observed_at: fix.observed_at(),
    };
    Ok(serde_json::to_string(&entry)?)
}

/// Parse a stored fix, rejecting anything that cannot be trusted.
///
/// Missing fields, malformed timestamps, out-of-range coordinates and entries
/// observed after `now` all yield [`CacheError::Unreadable`].
pub fn decode_fix(raw: &str, now: DateTime<Utc>) -> Result<GeoFix, CacheError> {
    let entry: CacheEntry =
        serde_json::from_str(raw).map_err(|e| CacheError::Unreadable(e.to_string()))?;

    let coordinates = Coordinates::new(entry.latitude, entry.longitude)
        .map_err(|e| CacheError::Unreadable(e.to_string()))?;

    if entry.observed_at > now {
        return Err(CacheError::Unreadable(format!(
            "entry is dated in the future ({})",
            entry.observed_at.to_rfc3339()
        )));
    }

    Ok(GeoFix::new(coordinates, entry.observed_at))
}
