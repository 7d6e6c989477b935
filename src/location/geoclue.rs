//! GeoClue2 location provider over the system D-Bus.
//!
//! Flow for one fix:
//! 1. `Manager.GetClient` creates a per-request client object
//! 2. the client is identified (`DesktopId`) and given a `RequestedAccuracyLevel`
//! 3. `Client.Start` begins locating; the `Location` property turns from `/` into
//!    the path of a location object once a fix is known
//! 4. `Latitude`/`Longitude` are read from that object and the client is stopped
//!
//! Permission maps to the manager's `AvailableAccuracyLevel`: zero means the user
//! (or the agent) has disabled location services for us, and a level below the
//! requested accuracy is a denial of that accuracy.

use std::thread;
use std::time::Duration;
use zbus::blocking::Connection;
use zbus::proxy::CacheProperties;
use zbus::zvariant::OwnedObjectPath;

use super::{Accuracy, FixRequest, LocationError, LocationSource};
use crate::constants::{
    GEOCLUE_ACCURACY_CITY, GEOCLUE_ACCURACY_EXACT, GEOCLUE_ACCURACY_NONE,
    GEOCLUE_POLL_INTERVAL_MS,
};
use crate::geo::Coordinates;

#[zbus::proxy(
    interface = "org.freedesktop.GeoClue2.Manager",
    default_service = "org.freedesktop.GeoClue2",
    default_path = "/org/freedesktop/GeoClue2/Manager"
)]
trait Manager {
    fn get_client(&self) -> zbus::Result<OwnedObjectPath>;

    #[zbus(property)]
    fn available_accuracy_level(&self) -> zbus::Result<u32>;
}

#[zbus::proxy(
    interface = "org.freedesktop.GeoClue2.Client",
    default_service = "org.freedesktop.GeoClue2"
)]
trait Client {
    fn start(&self) -> zbus::Result<()>;

    fn stop(&self) -> zbus::Result<()>;

    #[zbus(property)]
    fn location(&self) -> zbus::Result<OwnedObjectPath>;

    #[zbus(property)]
    fn set_desktop_id(&self, id: &str) -> zbus::Result<()>;

    #[zbus(property)]
    fn set_requested_accuracy_level(&self, level: u32) -> zbus::Result<()>;
}

#[zbus::proxy(
    interface = "org.freedesktop.GeoClue2.Location",
    default_service = "org.freedesktop.GeoClue2"
)]
trait Location {
    #[zbus(property)]
    fn latitude(&self) -> zbus::Result<f64>;

    #[zbus(property)]
    fn longitude(&self) -> zbus::Result<f64>;
}

/// Locates through the GeoClue2 service.
#[derive(Debug, Clone)]
pub struct GeoClueSource {
    desktop_id: String,
}

impl GeoClueSource {
    pub fn new(desktop_id: impl Into<String>) -> Self {
        Self {
            desktop_id: desktop_id.into(),
        }
    }
}

/// GeoClue accuracy level for a requested detail level.
pub fn accuracy_level(accuracy: Accuracy) -> u32 {
    match accuracy {
        Accuracy::Approximate => GEOCLUE_ACCURACY_CITY,
        Accuracy::Precise => GEOCLUE_ACCURACY_EXACT,
    }
}

/// Whether an available accuracy level covers the requested detail.
pub fn grants_accuracy(available: u32, accuracy: Accuracy) -> bool {
    available > GEOCLUE_ACCURACY_NONE && available >= accuracy_level(accuracy)
}

/// Classify a D-Bus failure.
pub fn map_dbus_error(error: zbus::Error) -> LocationError {
    let text = error.to_string();
    if text.contains("AccessDenied") {
        LocationError::PermissionDenied
    } else {
        LocationError::Unavailable(text)
    }
}

impl LocationSource for GeoClueSource {
    fn name(&self) -> &str {
        "GeoClue"
    }

    fn request_permission(&self, accuracy: Accuracy) -> bool {
        let level = Connection::system()
            .and_then(|conn| ManagerProxyBlocking::new(&conn)?.available_accuracy_level());

        match level {
            Ok(level) => {
                log_debug!(
                    "GeoClue available accuracy level {level}, requested {}",
                    accuracy_level(accuracy)
                );
                grants_accuracy(level, accuracy)
            }
            Err(e) => {
                // An unreachable service is reported by get_fix as Unavailable
                log_debug!("Could not read GeoClue accuracy level: {e}");
                !matches!(map_dbus_error(e), LocationError::PermissionDenied)
            }
        }
    }

    fn get_fix(&self, request: &FixRequest) -> Result<Coordinates, LocationError> {
        let conn = Connection::system().map_err(map_dbus_error)?;
        let manager = ManagerProxyBlocking::new(&conn).map_err(map_dbus_error)?;
        let client_path = manager.get_client().map_err(map_dbus_error)?;

        let client = ClientProxyBlocking::builder(&conn)
            .path(client_path)
            .and_then(|b| b.cache_properties(CacheProperties::No).build())
            .map_err(map_dbus_error)?;

        client
            .set_desktop_id(&self.desktop_id)
            .map_err(map_dbus_error)?;
        client
            .set_requested_accuracy_level(accuracy_level(request.accuracy))
            .map_err(map_dbus_error)?;
        client.start().map_err(map_dbus_error)?;

        let result = wait_for_location(&conn, &client, request);

        if let Err(e) = client.stop() {
            log_debug!("Failed to stop GeoClue client: {e}");
        }
        result
    }
}

fn wait_for_location(
    conn: &Connection,
    client: &ClientProxyBlocking<'_>,
    request: &FixRequest,
) -> Result<Coordinates, LocationError> {
    loop {
        if request.cancel.is_cancelled() {
            return Err(LocationError::Timeout(Duration::ZERO));
        }

        let path = client.location().map_err(map_dbus_error)?;
        if path.as_str() != "/" {
            let location = LocationProxyBlocking::builder(conn)
                .path(path)
                .and_then(|b| b.cache_properties(CacheProperties::No).build())
                .map_err(map_dbus_error)?;
            let latitude = location.latitude().map_err(map_dbus_error)?;
            let longitude = location.longitude().map_err(map_dbus_error)?;

            return Coordinates::new(latitude, longitude)
                .map_err(|e| LocationError::Unavailable(e.to_string()));
        }

        thread::sleep(Duration::from_millis(GEOCLUE_POLL_INTERVAL_MS));
    }
}
