//! ## Local Polynomial Track Smoothing
//!
//! This module converts a noisy, time-sorted series of geographic samples
//! into a smoothed kinematic snapshot at a query time. Latitude and
//! longitude are fitted with Gaussian-weighted quadratics on query-relative
//! time, altitude with a weighted line; speed, course, climb rate,
//! acceleration, and turn rate are derived from the fitted curves by finite
//! differences around the query time.
//!
//! Smoothing is a best-effort operation: a window with too little data, a
//! query outside the sampled interval, or a degenerate fit yields `None`
//! rather than an error.
//!
//! ### Example
//!
//! ```
//! use metrum::track_fit::{LocalPolyFit, TrackSample};
//!
//! let samples: Vec<TrackSample> = (0..5)
//!     .map(|i| TrackSample::new(i * 1000, 40.0, -75.0 + 0.001 * i as f64))
//!     .collect();
//! let smoother = LocalPolyFit::new(10_000).unwrap();
//! let snapshot = smoother.interpolate(&samples, 2000).unwrap();
//! assert!((snapshot.latitude - 40.0).abs() < 1e-6);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::MetrumError;
use crate::geometry::{clamp_latitude, clamp_longitude, signed_bearing_delta, GeoPoint};
use crate::poly_fit::weighted_polyfit;

/// Longitude span beyond which a window is considered to cross the
/// antimeridian and is shifted into `[0, 360)` before fitting.
const DATELINE_SPAN_DEG: f64 = 350.0;

/// One observed position. Input slices must be sorted by `time_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackSample {
    /// Observation time in epoch milliseconds.
    pub time_ms: i64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Altitude in meters.
    pub altitude: f64,
}

impl TrackSample {
    /// A sample with no altitude information (altitude 0).
    pub fn new(time_ms: i64, latitude: f64, longitude: f64) -> Self {
        TrackSample {
            time_ms,
            latitude,
            longitude,
            altitude: 0.0,
        }
    }

    pub fn with_altitude(time_ms: i64, latitude: f64, longitude: f64, altitude: f64) -> Self {
        TrackSample {
            time_ms,
            latitude,
            longitude,
            altitude,
        }
    }
}

/// A smoothed kinematic state at one instant. Immutable value.
///
/// Units: degrees for angles and coordinates, meters for altitude, m/s for
/// speed and climb rate, m/s² for acceleration, °/s for turn rate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KineticSnapshot {
    pub time_ms: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Ground speed in m/s over the two-second horizon around the query.
    pub speed: f64,
    /// Course over ground in degrees, `[0, 360)`.
    pub course: f64,
    /// Vertical rate in m/s.
    pub climb_rate: f64,
    /// Along-track acceleration in m/s².
    pub acceleration: f64,
    /// Heading change rate in °/s; positive when the incoming bearing
    /// exceeds the outgoing bearing.
    pub turn_rate: f64,
}

/// Gaussian-weighted local polynomial smoother for position tracks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPolyFit {
    window_ms: i64,
    required_points: usize,
    ignore_altitude: bool,
}

impl LocalPolyFit {
    /// Creates a smoother with the given full window duration in
    /// milliseconds. The Gaussian weight has σ = window / 6, so the window
    /// edge sits at three standard deviations.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::InvalidWindow` if `window_ms` is not positive.
    pub fn new(window_ms: i64) -> Result<Self, MetrumError> {
        if window_ms <= 0 {
            return Err(MetrumError::InvalidWindow { window_ms });
        }
        Ok(LocalPolyFit {
            window_ms,
            required_points: 3,
            ignore_altitude: false,
        })
    }

    /// Sets the minimum number of distinct sample timestamps inside the
    /// window below which the fit is refused. The default is 3.
    ///
    /// # Errors
    ///
    /// Returns `MetrumError::InvalidRequiredPoints` if `required` is zero.
    pub fn required_points(mut self, required: usize) -> Result<Self, MetrumError> {
        if required < 1 {
            return Err(MetrumError::InvalidRequiredPoints { required });
        }
        self.required_points = required;
        Ok(self)
    }

    /// Ignores altitude entirely: the altitude function is treated as
    /// identically zero and samples need not carry altitude data.
    pub fn ignore_altitude(mut self) -> Self {
        self.ignore_altitude = true;
        self
    }

    /// Returns the smoothed kinematic state at `query_ms`, or `None` when no
    /// fit is possible: too few distinct timestamps in the window, a query
    /// time outside the sampled interval (no extrapolation), or a degenerate
    /// fit.
    pub fn interpolate(&self, samples: &[TrackSample], query_ms: i64) -> Option<KineticSnapshot> {
        let half_window = self.window_ms / 2;
        let window: Vec<&TrackSample> = samples
            .iter()
            .filter(|s| {
                s.time_ms >= query_ms - half_window && s.time_ms <= query_ms + half_window
            })
            .collect();
        if window.is_empty() {
            return None;
        }

        let mut distinct: Vec<i64> = window.iter().map(|s| s.time_ms).collect();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() < self.required_points {
            debug!(
                "Refusing fit: {} distinct timestamps in window, {} required",
                distinct.len(),
                self.required_points
            );
            return None;
        }
        if query_ms < distinct[0] || query_ms > distinct[distinct.len() - 1] {
            debug!("Refusing fit: query time outside the sampled interval");
            return None;
        }

        // Query-relative milliseconds keep the quadratic term meaningful;
        // epoch-scale abscissas would cancel it away.
        let xs: Vec<f64> = window
            .iter()
            .map(|s| (s.time_ms - query_ms) as f64)
            .collect();
        let sigma = self.window_ms as f64 / 6.0;
        let weights: Vec<f64> = xs
            .iter()
            .map(|x| {
                let z = x / sigma;
                (-z * z / 2.0).exp()
            })
            .collect();

        let lats: Vec<f64> = window.iter().map(|s| s.latitude).collect();
        let mut lons: Vec<f64> = window.iter().map(|s| s.longitude).collect();

        // Antimeridian correction: only a window that actually spans the seam
        // is shifted into [0, 360); shifting a prime-meridian window would
        // manufacture a discontinuity there instead.
        let lon_min = lons.iter().cloned().fold(f64::INFINITY, f64::min);
        let lon_max = lons.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let crosses_dateline = lon_max - lon_min > DATELINE_SPAN_DEG;
        if crosses_dateline {
            for lon in lons.iter_mut() {
                *lon = lon.rem_euclid(360.0);
            }
        }

        let lat_poly = weighted_polyfit(&xs, &lats, &weights, 2)?;
        let lon_poly = weighted_polyfit(&xs, &lons, &weights, 2)?;
        let alt_poly = if self.ignore_altitude {
            None
        } else {
            let alts: Vec<f64> = window.iter().map(|s| s.altitude).collect();
            Some(weighted_polyfit(&xs, &alts, &weights, 1)?)
        };

        let position = |offset_ms: f64| -> GeoPoint {
            let latitude = clamp_latitude(lat_poly.value_at(offset_ms));
            let mut longitude = lon_poly.value_at(offset_ms);
            if crosses_dateline && longitude > 180.0 {
                longitude -= 360.0;
            }
            GeoPoint::new(latitude, clamp_longitude(longitude))
        };

        let here = position(0.0);
        let second_before = position(-1000.0);
        let second_after = position(1000.0);
        let half_before = position(-500.0);
        let half_after = position(500.0);

        // Speed and course over the two-second horizon straddling the query;
        // a one-second horizon is dominated by approximation noise.
        let speed = second_before.distance_to(&second_after) / 2.0;
        let course = second_before.bearing_to(&second_after);
        let speed_in = second_before.distance_to(&here);
        let speed_out = here.distance_to(&second_after);
        let acceleration = speed_out - speed_in;
        let bearing_in = half_before.bearing_to(&here);
        let bearing_out = here.bearing_to(&half_after);
        let turn_rate = signed_bearing_delta(bearing_out, bearing_in);
        let (altitude, climb_rate) = match &alt_poly {
            Some(poly) => (poly.value_at(0.0), poly.derivative_at(0.0) * 1000.0),
            None => (0.0, 0.0),
        };

        Some(KineticSnapshot {
            time_ms: query_ms,
            latitude: here.latitude,
            longitude: here.longitude,
            altitude,
            speed,
            course,
            climb_rate,
            acceleration,
            turn_rate,
        })
    }
}
