//! Geographic positions and the sunrise/sunset windows derived from them.
//!
//! ## Module Structure
//!
//! - [`fix`]: validated coordinates and timestamped fixes
//! - [`solar`]: sunrise/sunset calculation with extreme latitude handling and the
//!   inverted window correction
//! - [`display`]: debug output for calculated windows

pub mod display;
pub mod fix;
pub mod solar;

pub use display::log_solar_debug_info;
pub use fix::{Coordinates, GeoFix, format_age};
pub use solar::{SolarCalculator, SolarWindow, SunriseCalculator};
