use metrum::track_fit::{LocalPolyFit, TrackSample};

fn main() {
    // A noisy eastbound track across the antimeridian, one sample per second
    let longitudes = [179.8, 179.9, 180.0, -179.9, -179.8];
    let samples: Vec<TrackSample> = longitudes
        .iter()
        .enumerate()
        .map(|(i, &lon)| TrackSample::with_altitude(i as i64 * 1000, 0.0, lon, 10_000.0))
        .collect();

    let smoother = LocalPolyFit::new(10_000).unwrap();
    match smoother.interpolate(&samples, 2000) {
        Some(snapshot) => {
            println!("snapshot at t=2000ms:");
            println!("  position:  ({:.5}, {:.5})", snapshot.latitude, snapshot.longitude);
            println!("  altitude:  {:.1} m", snapshot.altitude);
            println!("  speed:     {:.1} m/s", snapshot.speed);
            println!("  course:    {:.1} deg", snapshot.course);
            println!("  turn rate: {:.3} deg/s", snapshot.turn_rate);
        }
        None => println!("not enough data inside the window"),
    }

    // Queries outside the sampled interval are refused, never extrapolated
    assert!(smoother.interpolate(&samples, 10_000).is_none());
}
