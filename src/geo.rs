//! Geographic points and pairwise distance.
//!
//! [`Location`] is an immutable latitude/longitude pair with a label.
//! Distance between two locations is computed by a [`DistanceMetric`], the
//! seam that keeps the engine independent of any particular geodesic
//! formula: [`Haversine`] is the default, [`Euclidean`] treats coordinates
//! as planar and is useful for tests with hand-computable expectations.

/// An immutable geographic point.
///
/// Identity for recombination purposes is the label: two locations with the
/// same coordinates but different labels are distinct cities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Display name, unique within a city set.
    pub label: String,
}

impl Location {
    /// Creates a location.
    pub fn new(latitude: f64, longitude: f64, label: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            label: label.into(),
        }
    }
}

/// Pairwise distance between two locations, in kilometers.
///
/// Implementations must be pure: non-negative, symmetric, and zero iff the
/// two points are coincident.
pub trait DistanceMetric: Send + Sync {
    /// Returns the distance between `a` and `b` in kilometers.
    fn distance(&self, a: &Location, b: &Location) -> f64;
}

/// Great-circle distance via the haversine formula.
///
/// Assumes a spherical Earth with mean radius 6371 km, which is accurate to
/// ~0.5% — more than enough for ranking candidate routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

impl DistanceMetric for Haversine {
    fn distance(&self, a: &Location, b: &Location) -> f64 {
        let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
        let dlat = (b.latitude - a.latitude).to_radians();
        let dlon = (b.longitude - a.longitude).to_radians();
        let s1 = (dlat / 2.0).sin();
        let s2 = (dlon / 2.0).sin();
        let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
        2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
    }
}

/// Planar Euclidean distance over raw coordinate values.
///
/// Not geographically meaningful; intended for tests and synthetic
/// problems where distances must be hand-computable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn distance(&self, a: &Location, b: &Location) -> f64 {
        let dx = a.latitude - b.latitude;
        let dy = a.longitude - b.longitude;
        (dx * dx + dy * dy).sqrt()
    }
}
