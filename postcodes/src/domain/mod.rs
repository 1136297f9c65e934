//! Domain types for postcode lookups.
//!
//! Every type here normalizes or validates at construction time and compares
//! by value, so the coordinator can use them directly as cache keys.

mod geo;
mod numeric;
mod postcode;

pub use geo::{Distance, GeoPoint, IllegalDistance, IllegalPoint};
pub use numeric::{InvalidNumber, NumericArg};
pub use postcode::Postcode;
