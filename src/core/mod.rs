pub mod error;
pub mod waypoint;

pub use error::ConfigError;
pub use waypoint::{PlannedRoute, Route, Waypoint};
