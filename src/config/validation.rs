//! Configuration validation functionality.

use anyhow::Result;

use super::{Config, Provider};
use crate::constants::*;

/// Reject configurations that cannot drive the engine.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(timeout) = config.location_timeout
        && !(MINIMUM_LOCATION_TIMEOUT_SECS..=MAXIMUM_LOCATION_TIMEOUT_SECS).contains(&timeout)
    {
        anyhow::bail!(
            "location_timeout ({} s) must be between {} and {} seconds",
            timeout,
            MINIMUM_LOCATION_TIMEOUT_SECS,
            MAXIMUM_LOCATION_TIMEOUT_SECS
        );
    }

    if let Some(hours) = config.refresh_interval
        && !(MINIMUM_REFRESH_INTERVAL_HOURS..=MAXIMUM_REFRESH_INTERVAL_HOURS).contains(&hours)
    {
        anyhow::bail!(
            "refresh_interval ({} h) must be between {} and {} hours",
            hours,
            MINIMUM_REFRESH_INTERVAL_HOURS,
            MAXIMUM_REFRESH_INTERVAL_HOURS
        );
    }

    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if config.provider() == Provider::Static
        && (config.latitude.is_none() || config.longitude.is_none())
    {
        anyhow::bail!(
            "provider = \"static\" requires both latitude and longitude.\n\
            Add them to your configuration or switch to provider = \"geoclue\""
        );
    }

    if let Some(key) = &config.cache_key
        && key.trim().is_empty()
    {
        anyhow::bail!("cache_key must not be empty");
    }

    if let Some(id) = &config.desktop_id
        && id.trim().is_empty()
    {
        anyhow::bail!("desktop_id must not be empty");
    }

    Ok(())
}
