//! Transport layer for the postcode web service.
//!
//! Each [`Transport`] method turns one validated, normalized query into one
//! request and a decoded [`Lookup`]. Transports hold no lookup state; caching
//! lives in [`crate::coordinator`].
//!
//! Endpoints:
//! - `/postcode/{postcode}.json`
//! - `/latlng/{lat},{lng}.json`
//! - `/distance.php?postcode={postcode}&distance={d}&format=json`
//! - `/distance.php?lat={lat}&lng={lng}&distance={d}&format=json`

mod client;
mod convert;
mod error;
mod mock;
mod types;
mod urls;

use std::future::Future;

use crate::domain::{Distance, GeoPoint, Postcode};

pub use client::{ClientConfig, DEFAULT_BASE_URL, PostcodeClient};
pub use error::TransportError;
pub use mock::MockTransport;
pub use types::{Lookup, PostcodeData};

/// The four queries the postcode service answers.
///
/// Implementations must not do any work until the returned future is first
/// polled: the coordinator builds the future before it knows whether the
/// cache already holds an answer.
pub trait Transport: Send + Sync {
    /// Metadata for one postcode, or `NotFound`.
    fn fetch_by_postcode(
        &self,
        postcode: &Postcode,
    ) -> impl Future<Output = Result<Lookup, TransportError>> + Send;

    /// The postcode nearest to a point.
    fn fetch_nearest(
        &self,
        point: &GeoPoint,
    ) -> impl Future<Output = Result<Lookup, TransportError>> + Send;

    /// All postcodes within `distance` miles of a postcode, or `NotFound`.
    fn fetch_by_postcode_radius(
        &self,
        postcode: &Postcode,
        distance: Distance,
    ) -> impl Future<Output = Result<Lookup, TransportError>> + Send;

    /// All postcodes within `distance` miles of a point.
    fn fetch_by_geo_radius(
        &self,
        point: &GeoPoint,
        distance: Distance,
    ) -> impl Future<Output = Result<Lookup, TransportError>> + Send;
}
