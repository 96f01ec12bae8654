use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::ConfigError;

/// A single (latitude, longitude) sample along a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
}

impl Waypoint {
    /// Create a waypoint, rejecting coordinates outside the valid ranges
    pub fn new(lat: f64, lon: f64) -> Result<Self, ConfigError> {
        if Self::in_range(lat, lon) {
            Ok(Self { lat, lon })
        } else {
            Err(ConfigError::OutOfRange { lat, lon })
        }
    }

    /// Check latitude in [-90, 90] and longitude in [-180, 180]
    pub fn in_range(lat: f64, lon: f64) -> bool {
        lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon)
    }
}

impl FromStr for Waypoint {
    type Err = ConfigError;

    /// Parse `"lat,lon"`, tolerating whitespace around either value
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::Malformed { input: s.to_string() };

        let mut parts = s.split(',');
        let (lat, lon) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lon), None) => (lat, lon),
            _ => return Err(malformed()),
        };

        let lat = lat.trim().parse::<f64>().map_err(|_| malformed())?;
        let lon = lon.trim().parse::<f64>().map_err(|_| malformed())?;

        Waypoint::new(lat, lon)
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

/// An ordered sequence of waypoints
pub type Route = Vec<Waypoint>;

/// A route ready for playback: the travel segment followed by an optional
/// dwell segment starting at `dwell_start`
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    pub waypoints: Route,
    pub dwell_start: Option<usize>,
}

impl PlannedRoute {
    /// A route with no dwell phase
    pub fn travel_only(waypoints: Route) -> Self {
        Self {
            waypoints,
            dwell_start: None,
        }
    }

    /// Append `dwell` after `travel` and mark where dwelling begins
    pub fn with_dwell(mut travel: Route, dwell: Route) -> Self {
        let dwell_start = travel.len();
        travel.extend(dwell);
        Self {
            waypoints: travel,
            dwell_start: Some(dwell_start),
        }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_waypoint() {
        let wp: Waypoint = "37.7749,-122.4194".parse().unwrap();
        assert_eq!(wp, Waypoint { lat: 37.7749, lon: -122.4194 });

        let wp: Waypoint = " 1.5 , 2.5 ".parse().unwrap();
        assert_eq!(wp, Waypoint { lat: 1.5, lon: 2.5 });
    }

    #[test]
    fn test_parse_waypoint_rejects_bad_input() {
        assert!(matches!("abc".parse::<Waypoint>(), Err(ConfigError::Malformed { .. })));
        assert!(matches!("1,2,3".parse::<Waypoint>(), Err(ConfigError::Malformed { .. })));
        assert!(matches!("1;2".parse::<Waypoint>(), Err(ConfigError::Malformed { .. })));
        assert_eq!(
            "91,0".parse::<Waypoint>(),
            Err(ConfigError::OutOfRange { lat: 91.0, lon: 0.0 })
        );
        assert!("0,-180.5".parse::<Waypoint>().is_err());
        assert!("NaN,0".parse::<Waypoint>().is_err());
    }

    #[test]
    fn test_display_uses_five_decimals() {
        let wp = Waypoint::new(37.7749, -122.4194).unwrap();
        assert_eq!(wp.to_string(), "37.77490, -122.41940");
    }

    #[test]
    fn test_planned_route_with_dwell() {
        let travel = vec![
            Waypoint::new(0.0, 0.0).unwrap(),
            Waypoint::new(1.0, 1.0).unwrap(),
        ];
        let dwell = vec![Waypoint::new(1.0, 1.0).unwrap(); 3];

        let planned = PlannedRoute::with_dwell(travel.clone(), dwell);
        assert_eq!(planned.len(), 5);
        assert_eq!(planned.dwell_start, Some(2));
        assert_eq!(&planned.waypoints[..2], travel.as_slice());
    }

    #[test]
    fn test_travel_only_has_no_dwell() {
        let planned = PlannedRoute::travel_only(vec![Waypoint::new(5.0, 5.0).unwrap()]);
        assert_eq!(planned.dwell_start, None);
        assert_eq!(planned.len(), 1);
    }
}
