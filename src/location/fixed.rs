//! Fixed coordinates from configuration.

use super::{Accuracy, FixRequest, LocationError, LocationSource};
use crate::geo::Coordinates;

/// Always grants permission and always answers with the same coordinates.
#[derive(Debug, Clone, Copy)]
pub struct StaticLocation {
    coordinates: Coordinates,
}

impl StaticLocation {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

impl LocationSource for StaticLocation {
    fn name(&self) -> &str {
        "static"
    }

    fn request_permission(&self, _accuracy: Accuracy) -> bool {
        true
    }

    fn get_fix(&self, _request: &FixRequest) -> Result<Coordinates, LocationError> {
        Ok(self.coordinates)
    }
}
