//! Geo Module
//!
//! Great-circle distance math. Geocoding itself is delegated to an external
//! mapping provider; only the pure distance calculation lives here.

pub mod distance;


pub use distance::{distance_km, Point};
