//! Geographic point and search radius types.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Error returned when a latitude/longitude pair is out of range.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("illegal point ({lat}, {lng}): latitude must be within ±90 and longitude within ±180")]
pub struct IllegalPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Error returned when a search radius is negative.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("illegal distance {distance}: must not be negative")]
pub struct IllegalDistance {
    pub distance: f64,
}

/// Bit pattern used for equality and hashing. `-0.0` folds onto `0.0` so
/// that numerically equal values share a key.
fn key_bits(value: f64) -> u64 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

/// A validated latitude/longitude pair in decimal degrees.
///
/// Latitude is within `[-90, 90]` and longitude within `[-180, 180]`.
/// Equality is numeric, so a point can serve as a cache key.
///
/// # Examples
///
/// ```
/// use postcodes::domain::GeoPoint;
///
/// let p = GeoPoint::new(51.5, -0.12).unwrap();
/// assert_eq!(p.lat(), 51.5);
///
/// assert!(GeoPoint::new(-91.0, 0.0).is_err());
/// assert!(GeoPoint::new(0.0, 180.1).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Validate a latitude/longitude pair. NaN is never in range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, IllegalPoint> {
        if !(lat.abs() <= 90.0) || !(lng.abs() <= 180.0) {
            return Err(IllegalPoint { lat, lng });
        }
        Ok(GeoPoint { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        key_bits(self.lat) == key_bits(other.lat) && key_bits(self.lng) == key_bits(other.lng)
    }
}

impl Eq for GeoPoint {}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        key_bits(self.lat).hash(state);
        key_bits(self.lng).hash(state);
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// A validated, non-negative search radius in miles.
#[derive(Debug, Clone, Copy)]
pub struct Distance(f64);

impl Distance {
    /// Validate a radius. Negative and NaN values are rejected.
    pub fn new(miles: f64) -> Result<Self, IllegalDistance> {
        if !(miles >= 0.0) {
            return Err(IllegalDistance { distance: miles });
        }
        Ok(Distance(miles))
    }

    pub fn miles(&self) -> f64 {
        self.0
    }
}

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        key_bits(self.0) == key_bits(other.0)
    }
}

impl Eq for Distance {}

impl Hash for Distance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        key_bits(self.0).hash(state);
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn accepts_boundaries() {
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(GeoPoint::new(-91.0, 181.0).is_err());
        assert!(GeoPoint::new(90.1, -180.1).is_err());
        assert!(GeoPoint::new(90.1, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.1).is_err());
    }

    #[test]
    fn rejects_nan() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::NAN).is_err());
        assert!(GeoPoint::new(f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn illegal_point_carries_inputs() {
        let err = GeoPoint::new(-91.0, 12.5).unwrap_err();
        assert_eq!(err, IllegalPoint { lat: -91.0, lng: 12.5 });
        assert!(err.to_string().contains("(-91, 12.5)"));
    }

    #[test]
    fn distance_rejects_negative() {
        assert!(Distance::new(0.0).is_ok());
        assert!(Distance::new(12.32).is_ok());
        assert_eq!(
            Distance::new(-11.0).unwrap_err(),
            IllegalDistance { distance: -11.0 }
        );
        assert!(Distance::new(f64::NAN).is_err());
        assert!(Distance::new(f64::NEG_INFINITY).is_err());
        assert!(Distance::new(f64::INFINITY).is_ok());
    }

    #[test]
    fn negative_zero_is_same_key() {
        let a = GeoPoint::new(0.0, -0.0).unwrap();
        let b = GeoPoint::new(-0.0, 0.0).unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));

        assert_eq!(Distance::new(-0.0).unwrap(), Distance::new(0.0).unwrap());
    }

    #[test]
    fn display_uses_plain_decimals() {
        assert_eq!(GeoPoint::new(1.1, -2.2).unwrap().to_string(), "1.1,-2.2");
        assert_eq!(GeoPoint::new(1.0, 2.0).unwrap().to_string(), "1,2");
        assert_eq!(Distance::new(1.0).unwrap().to_string(), "1");
        assert_eq!(Distance::new(12.32).unwrap().to_string(), "12.32");
    }
}
