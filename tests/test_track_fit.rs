use assert_approx_eq::assert_approx_eq;
use metrum::errors::MetrumError;
use metrum::geometry::{normalize_longitude, GeoPoint};
use metrum::track_fit::{LocalPolyFit, TrackSample};

const WINDOW_MS: i64 = 10_000;

/// Samples along the equator moving east at `step_deg` degrees per second,
/// starting at `start_lon`, one sample per second.
fn eastbound_track(start_lon: f64, step_deg: f64, count: usize) -> Vec<TrackSample> {
    (0..count)
        .map(|i| {
            TrackSample::new(
                i as i64 * 1000,
                0.0,
                normalize_longitude(start_lon + step_deg * i as f64),
            )
        })
        .collect()
}

#[test]
fn test_straight_track_speed_and_course() {
    let samples = eastbound_track(-75.0, 0.01, 5);
    let smoother = LocalPolyFit::new(WINDOW_MS).unwrap();
    let snapshot = smoother.interpolate(&samples, 2000).expect("fit succeeds");

    assert_approx_eq!(snapshot.latitude, 0.0, 1e-9);
    assert_approx_eq!(snapshot.longitude, -74.98, 1e-6);
    assert_approx_eq!(snapshot.course, 90.0, 1e-6);

    let expected_speed = GeoPoint::new(0.0, -74.99).distance_to(&GeoPoint::new(0.0, -74.97)) / 2.0;
    assert!(
        (snapshot.speed - expected_speed).abs() / expected_speed < 0.01,
        "speed {} differs from expected {}",
        snapshot.speed,
        expected_speed
    );
    assert_approx_eq!(snapshot.acceleration, 0.0, 1.0);
    assert_approx_eq!(snapshot.turn_rate, 0.0, 1e-6);
}

#[test]
fn test_dateline_crossing_track() {
    // Longitudes 179.8 .. -179.8 moving east across the antimeridian.
    let samples = eastbound_track(179.8, 0.1, 5);
    let smoother = LocalPolyFit::new(WINDOW_MS).unwrap();
    let snapshot = smoother.interpolate(&samples, 2000).expect("fit succeeds");

    assert!(
        (snapshot.longitude.abs() - 180.0).abs() < 1e-4,
        "longitude {} should sit on the antimeridian",
        snapshot.longitude
    );
    assert_approx_eq!(snapshot.latitude, 0.0, 1e-9);
    assert!(
        (snapshot.course - 90.0).abs() < 1.0,
        "course {} should be due east",
        snapshot.course
    );

    let expected_speed = GeoPoint::new(0.0, 179.9).distance_to(&GeoPoint::new(0.0, -179.9)) / 2.0;
    assert!(
        (snapshot.speed - expected_speed).abs() / expected_speed < 0.01,
        "speed {} differs from expected {}",
        snapshot.speed,
        expected_speed
    );
}

#[test]
fn test_dateline_result_matches_translated_geometry() {
    // The same motion translated by 180 degrees never crosses the seam; the
    // two snapshots must agree modulo the translation.
    let crossing = eastbound_track(179.8, 0.1, 5);
    let translated = eastbound_track(-0.2, 0.1, 5);
    let smoother = LocalPolyFit::new(WINDOW_MS).unwrap();

    let on_seam = smoother.interpolate(&crossing, 2000).expect("fit succeeds");
    let control = smoother
        .interpolate(&translated, 2000)
        .expect("fit succeeds");

    assert!(
        (normalize_longitude(on_seam.longitude - 180.0) - control.longitude).abs() < 1e-5,
        "translated longitudes diverged: {} vs {}",
        on_seam.longitude,
        control.longitude
    );
    assert_approx_eq!(on_seam.latitude, control.latitude, 1e-5);
    assert_approx_eq!(on_seam.course, control.course, 1e-5);
    assert!((on_seam.speed - control.speed).abs() <= control.speed * 1e-5);
}

#[test]
fn test_no_extrapolation_outside_sampled_interval() {
    let samples = eastbound_track(-75.0, 0.01, 5);
    let smoother = LocalPolyFit::new(WINDOW_MS).unwrap();

    // Both query times fall inside the window but outside the sampled span.
    assert!(smoother.interpolate(&samples, 4500).is_none());
    assert!(smoother.interpolate(&samples, -100).is_none());

    // The boundary timestamps themselves are legal query times.
    assert!(smoother.interpolate(&samples, 0).is_some());
    assert!(smoother.interpolate(&samples, 4000).is_some());
}

#[test]
fn test_too_few_distinct_timestamps_refused() {
    let smoother = LocalPolyFit::new(WINDOW_MS).unwrap();

    let two = eastbound_track(-75.0, 0.01, 2);
    assert!(smoother.interpolate(&two, 500).is_none());

    // Five samples sharing one timestamp count once toward the minimum and
    // must be refused, not crash.
    let stacked: Vec<TrackSample> = (0..5)
        .map(|i| TrackSample::new(1000, 0.0, -75.0 + 0.001 * i as f64))
        .collect();
    assert!(smoother.interpolate(&stacked, 1000).is_none());
}

#[test]
fn test_required_points_raises_the_bar() {
    let samples = eastbound_track(-75.0, 0.01, 4);
    let default_smoother = LocalPolyFit::new(WINDOW_MS).unwrap();
    assert!(default_smoother.interpolate(&samples, 2000).is_some());

    let strict = LocalPolyFit::new(WINDOW_MS)
        .unwrap()
        .required_points(5)
        .unwrap();
    assert!(strict.interpolate(&samples, 2000).is_none());
    assert!(strict
        .interpolate(&eastbound_track(-75.0, 0.01, 5), 2000)
        .is_some());
}

#[test]
fn test_configuration_validation() {
    assert!(matches!(
        LocalPolyFit::new(0).unwrap_err(),
        MetrumError::InvalidWindow { window_ms: 0 }
    ));
    assert!(matches!(
        LocalPolyFit::new(-5000).unwrap_err(),
        MetrumError::InvalidWindow { .. }
    ));
    assert!(matches!(
        LocalPolyFit::new(WINDOW_MS).unwrap().required_points(0),
        Err(MetrumError::InvalidRequiredPoints { required: 0 })
    ));
}

#[test]
fn test_altitude_and_climb_rate() {
    // Climbing at 5 m/s from 100 m while drifting east.
    let samples: Vec<TrackSample> = (0..5)
        .map(|i| {
            TrackSample::with_altitude(
                i as i64 * 1000,
                0.0,
                -75.0 + 0.01 * i as f64,
                100.0 + 5.0 * i as f64,
            )
        })
        .collect();
    let smoother = LocalPolyFit::new(WINDOW_MS).unwrap();
    let snapshot = smoother.interpolate(&samples, 2000).expect("fit succeeds");

    assert_approx_eq!(snapshot.altitude, 110.0, 1e-6);
    assert_approx_eq!(snapshot.climb_rate, 5.0, 1e-6);
}

#[test]
fn test_ignore_altitude_forces_zero() {
    let samples: Vec<TrackSample> = (0..5)
        .map(|i| {
            TrackSample::with_altitude(i as i64 * 1000, 0.0, -75.0 + 0.01 * i as f64, 3000.0)
        })
        .collect();
    let smoother = LocalPolyFit::new(WINDOW_MS).unwrap().ignore_altitude();
    let snapshot = smoother.interpolate(&samples, 2000).expect("fit succeeds");

    assert_eq!(snapshot.altitude, 0.0);
    assert_eq!(snapshot.climb_rate, 0.0);
}

#[test]
fn test_acceleration_on_accelerating_track() {
    // Longitude follows 0.001 t + 0.0005 t^2 degrees (t in seconds around
    // the query), so the along-track speed grows linearly.
    let samples: Vec<TrackSample> = (0..5)
        .map(|i| {
            let t = i as f64 - 2.0;
            TrackSample::new(i as i64 * 1000, 0.0, 0.001 * t + 0.0005 * t * t)
        })
        .collect();
    let smoother = LocalPolyFit::new(WINDOW_MS).unwrap();
    let snapshot = smoother.interpolate(&samples, 2000).expect("fit succeeds");

    // The quadratic fit reproduces the motion exactly, so the finite
    // differences match the analytic positions.
    let position = |t: f64| GeoPoint::new(0.0, 0.001 * t + 0.0005 * t * t);
    let expected_speed_in = position(-1.0).distance_to(&position(0.0));
    let expected_speed_out = position(0.0).distance_to(&position(1.0));
    assert_approx_eq!(
        snapshot.acceleration,
        expected_speed_out - expected_speed_in,
        1e-6
    );
    assert!(snapshot.acceleration > 0.0);
}

#[test]
fn test_turn_rate_on_curving_track() {
    // Northward curvature on an eastbound track: the incoming bearing
    // exceeds the outgoing one, so the turn rate is positive.
    let lat = |t: f64| 0.0005 * t * t;
    let lon = |t: f64| 0.001 * t;
    let samples: Vec<TrackSample> = (0..5)
        .map(|i| {
            let t = i as f64 - 2.0;
            TrackSample::new(i as i64 * 1000, lat(t), lon(t))
        })
        .collect();
    let smoother = LocalPolyFit::new(WINDOW_MS).unwrap();
    let snapshot = smoother.interpolate(&samples, 2000).expect("fit succeeds");

    let here = GeoPoint::new(lat(0.0), lon(0.0));
    let before = GeoPoint::new(lat(-0.5), lon(-0.5));
    let after = GeoPoint::new(lat(0.5), lon(0.5));
    let expected = metrum::geometry::signed_bearing_delta(
        here.bearing_to(&after),
        before.bearing_to(&here),
    );
    assert_approx_eq!(snapshot.turn_rate, expected, 1e-6);
    assert!(snapshot.turn_rate > 0.0);
}

#[test]
fn test_window_excludes_far_samples() {
    let mut samples = eastbound_track(-75.0, 0.01, 5);
    // A wild sample far outside the window must not disturb the fit.
    samples.push(TrackSample::new(100_000, 55.0, 30.0));
    let smoother = LocalPolyFit::new(WINDOW_MS).unwrap();

    let with_outlier = smoother.interpolate(&samples, 2000).expect("fit succeeds");
    let without = smoother
        .interpolate(&samples[..5], 2000)
        .expect("fit succeeds");
    assert_eq!(with_outlier, without);
}
