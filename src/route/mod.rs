pub mod dwell;
pub mod error;
pub mod geocode;
pub mod osrm;

pub use dwell::generate_dwell_points;
pub use error::RouteError;
pub use geocode::{Geocoder, DEFAULT_NOMINATIM_URL};
pub use osrm::{OsrmClient, TravelMode, DEFAULT_OSRM_URL};
