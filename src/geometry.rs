//! ## Geometry Primitives
//!
//! This module provides the distance-metric abstraction used by the metric
//! tree, a Euclidean metric for integer grid keys, and the geodesic value
//! type and helpers used by the track smoother.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used by the great-circle formulas.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A distance metric over keys of type `K`.
///
/// Implementations must satisfy the metric axioms: non-negativity, symmetry,
/// and the triangle inequality. Returned values must be finite; the metric
/// tree validates every observed value and rejects NaN or negative results.
///
/// The metric is selected as a type parameter, so calls are monomorphized:
///
/// ```
/// use metrum::geometry::{DistanceMetric, EuclideanDistance};
///
/// let d = EuclideanDistance::distance(&(0_i64, 0_i64), &(3, 4));
/// assert_eq!(d, 5.0);
/// ```
pub trait DistanceMetric<K> {
    /// Returns the distance between two keys.
    fn distance(a: &K, b: &K) -> f64;
}

/// Euclidean distance for integer grid keys.
#[derive(Debug, Clone, Copy)]
pub struct EuclideanDistance;

impl DistanceMetric<(i64, i64)> for EuclideanDistance {
    fn distance(a: &(i64, i64), b: &(i64, i64)) -> f64 {
        let dx = (a.0 - b.0) as f64;
        let dy = (a.1 - b.1) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl DistanceMetric<(i64, i64, i64)> for EuclideanDistance {
    fn distance(a: &(i64, i64, i64), b: &(i64, i64, i64)) -> f64 {
        let dx = (a.0 - b.0) as f64;
        let dy = (a.1 - b.1) as f64;
        let dz = (a.2 - b.2) as f64;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    /// Returns the great-circle distance to `other` in meters (haversine).
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();
        let a = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Returns the initial great-circle bearing to `other` in degrees,
    /// normalized to `[0, 360)`.
    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();
        let y = dlon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
        normalize_bearing(y.atan2(x).to_degrees())
    }

    /// Returns the midpoint between `self` and `other` on the sphere.
    pub fn midpoint(&self, other: &GeoPoint) -> GeoPoint {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let lon1 = self.longitude.to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();
        let bx = lat2.cos() * dlon.cos();
        let by = lat2.cos() * dlon.sin();
        let lat = (lat1.sin() + lat2.sin())
            .atan2(((lat1.cos() + bx).powi(2) + by.powi(2)).sqrt());
        let lon = lon1 + by.atan2(lat1.cos() + bx);
        GeoPoint {
            latitude: clamp_latitude(lat.to_degrees()),
            longitude: clamp_longitude(normalize_longitude(lon.to_degrees())),
        }
    }
}

/// Clamps a latitude into the legal `[-90, 90]` range.
pub fn clamp_latitude(latitude: f64) -> f64 {
    latitude.clamp(-90.0, 90.0)
}

/// Clamps a longitude into the legal `[-180, 180]` range.
pub fn clamp_longitude(longitude: f64) -> f64 {
    longitude.clamp(-180.0, 180.0)
}

/// Wraps a longitude into `(-180, 180]` without clamping.
pub fn normalize_longitude(longitude: f64) -> f64 {
    let mut lon = longitude % 360.0;
    if lon > 180.0 {
        lon -= 360.0;
    } else if lon <= -180.0 {
        lon += 360.0;
    }
    lon
}

/// Normalizes a bearing into `[0, 360)`.
pub fn normalize_bearing(bearing: f64) -> f64 {
    let b = bearing % 360.0;
    if b < 0.0 {
        b + 360.0
    } else {
        b
    }
}

/// Returns the signed angular difference `to - from` in `(-180, 180]`.
pub fn signed_bearing_delta(from: f64, to: f64) -> f64 {
    let mut delta = (to - from) % 360.0;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta <= -180.0 {
        delta += 360.0;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equator_distance() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        // One degree of longitude at the equator is about 111.2 km.
        let d = a.distance_to(&b);
        assert!((d - 111_195.0).abs() < 100.0, "distance was {}", d);
    }

    #[test]
    fn test_bearing_due_east() {
        let a = GeoPoint::new(0.0, 10.0);
        let b = GeoPoint::new(0.0, 11.0);
        let bearing = a.bearing_to(&b);
        assert!((bearing - 90.0).abs() < 1e-9, "bearing was {}", bearing);
    }

    #[test]
    fn test_midpoint_on_equator() {
        let a = GeoPoint::new(0.0, 10.0);
        let b = GeoPoint::new(0.0, 20.0);
        let m = a.midpoint(&b);
        assert!(m.latitude.abs() < 1e-9);
        assert!((m.longitude - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_longitude_wraps_seam() {
        assert!((normalize_longitude(190.0) + 170.0).abs() < 1e-9);
        assert!((normalize_longitude(-190.0) - 170.0).abs() < 1e-9);
        assert!((normalize_longitude(360.0)).abs() < 1e-9);
    }

    #[test]
    fn test_signed_bearing_delta_crosses_north() {
        assert!((signed_bearing_delta(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((signed_bearing_delta(10.0, 350.0) + 20.0).abs() < 1e-9);
    }
}
