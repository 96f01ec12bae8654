use crate::core::{Route, Waypoint};
use rand::Rng;
use std::f64::consts::PI;

/// Metres per degree of latitude
const METRES_PER_DEGREE: f64 = 111_111.0;

/// Random points scattered around `center` at distances between `min_radius`
/// and `max_radius` metres, simulating GPS drift while stationary
pub fn generate_dwell_points<R: Rng>(
    center: Waypoint,
    count: usize,
    min_radius: f64,
    max_radius: f64,
    rng: &mut R,
) -> Route {
    let cos_lat = center.lat.to_radians().cos();

    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..2.0 * PI);
            let distance = if max_radius > min_radius {
                rng.gen_range(min_radius..=max_radius)
            } else {
                min_radius
            };

            let delta_lat = distance * angle.sin() / METRES_PER_DEGREE;
            let delta_lon = if cos_lat.abs() > f64::EPSILON {
                distance * angle.cos() / (METRES_PER_DEGREE * cos_lat)
            } else {
                0.0
            };

            Waypoint {
                lat: (center.lat + delta_lat).clamp(-90.0, 90.0),
                lon: (center.lon + delta_lon).clamp(-180.0, 180.0),
            }
        })
        .collect()
}
