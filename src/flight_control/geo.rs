use crate::util::Vec3D;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Metres per degree of latitude, and of longitude at the equator.
    const METERS_PER_DEGREE: f64 = 111_320.0;

    pub const fn new(lat: f64, lon: f64) -> Self { Self { lat, lon } }

    pub fn lat(&self) -> f64 { self.lat }
    pub fn lon(&self) -> f64 { self.lon }

    /// Moves the point by a local east/north offset in metres.
    ///
    /// Uses an equirectangular approximation, which is accurate to well below a metre
    /// over the few kilometres a session covers.
    #[must_use]
    pub fn offset_by(&self, east: f64, north: f64) -> Self {
        let lat = self.lat + north / Self::METERS_PER_DEGREE;
        let lon = self.lon + east / (Self::METERS_PER_DEGREE * self.lat.to_radians().cos());
        Self { lat, lon }
    }

    /// Geodetic position of a local-frame point, taking `self` as the origin.
    #[must_use]
    pub fn locate(&self, local: Vec3D<f64>) -> Self { self.offset_by(local.x(), local.y()) }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}
