//! The memoizing lookup coordinator.

use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use tracing::debug;

use crate::domain::{Distance, GeoPoint, NumericArg, Postcode};
use crate::transport::{ClientConfig, Lookup, PostcodeClient, Transport, TransportError};

use super::error::LookupError;

/// Cached lookup result. Hits hand out the same `Arc`.
type Entry = Arc<Lookup>;

/// Postcode lookups with a per-instance cache.
///
/// Each operation parses and validates its arguments, derives a normalized
/// key, and only calls the transport on a cache miss or when `skip_cache` is
/// set. A bypass always fetches and overwrites the stored entry.
///
/// Postcode data does not change, so entries never expire. Each operation
/// has its own cache, so keys from different operations cannot collide.
/// Concurrent misses for the same key share a single transport call, and
/// failed calls are never cached.
///
/// Calls for the same key within one operation are serialized. A bypass that
/// arrives while a miss is fetching waits for it, then fetches again, so
/// the stored entry is always the result of the most recently started
/// successful fetch.
pub struct PostCoder<T> {
    transport: T,
    postcodes: Cache<Postcode, Entry>,
    nearest: Cache<GeoPoint, Entry>,
    postcode_radius: Cache<(Postcode, Distance), Entry>,
    geo_radius: Cache<(GeoPoint, Distance), Entry>,
}

fn parse(field: &'static str, arg: NumericArg) -> Result<f64, LookupError> {
    arg.parse()
        .map_err(|source| LookupError::InvalidArgument { field, source })
}

/// Serve `key` from `cache`, running `fetch` on a miss or bypass.
///
/// `fetch` is only polled when the transport is actually needed. Both paths
/// run under the cache's per-key compute lock, so calls for one key are
/// serialized in arrival order: a miss queued behind another miss finds the
/// stored entry, and a bypass queued behind a miss fetches after it and
/// writes last.
async fn memoize<K>(
    op: &'static str,
    cache: &Cache<K, Entry>,
    key: K,
    skip_cache: bool,
    fetch: impl Future<Output = Result<Lookup, TransportError>>,
) -> Result<Entry, LookupError>
where
    K: Hash + Eq + fmt::Debug + Send + Sync + 'static,
{
    let result = cache
        .entry(key)
        .and_try_compute_with(|cached| async move {
            match cached {
                Some(_) if !skip_cache => Ok(Op::Nop),
                _ => fetch.await.map(|lookup| Op::Put(Arc::new(lookup))),
            }
        })
        .await?;

    match result {
        CompResult::Unchanged(entry) => {
            debug!(op, key = ?entry.key(), "cache hit");
            Ok(entry.into_value())
        }
        CompResult::Inserted(entry) => {
            debug!(op, key = ?entry.key(), "cache miss");
            Ok(entry.into_value())
        }
        CompResult::ReplacedWith(entry) => {
            debug!(op, key = ?entry.key(), "cache bypass");
            Ok(entry.into_value())
        }
        // The closure only ever keeps an existing entry or puts a new one.
        CompResult::Removed(_) | CompResult::StillNone(_) => {
            unreachable!("memoize never removes entries")
        }
    }
}

fn unbounded<K, V>() -> Cache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    Cache::builder().build()
}

impl<T: Transport> PostCoder<T> {
    /// Create a coordinator with empty caches.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            postcodes: unbounded(),
            nearest: unbounded(),
            postcode_radius: unbounded(),
            geo_radius: unbounded(),
        }
    }

    /// Look up a postcode. Case and spaces are ignored.
    ///
    /// Returns [`Lookup::NotFound`] when the service has no such postcode.
    pub async fn get(&self, postcode: &str, skip_cache: bool) -> Result<Entry, LookupError> {
        let postcode = Postcode::normalize(postcode);
        let fetch = self.transport.fetch_by_postcode(&postcode);
        memoize("get", &self.postcodes, postcode.clone(), skip_cache, fetch).await
    }

    /// Find the postcode nearest to a point.
    ///
    /// # Errors
    /// `InvalidArgument` if `lat` or `lng` is not a number, `IllegalPoint`
    /// if `|lat| > 90` or `|lng| > 180`.
    pub async fn get_nearest(
        &self,
        lat: impl Into<NumericArg>,
        lng: impl Into<NumericArg>,
        skip_cache: bool,
    ) -> Result<Entry, LookupError> {
        let lat = parse("lat", lat.into())?;
        let lng = parse("lng", lng.into())?;
        let point = GeoPoint::new(lat, lng)?;

        let fetch = self.transport.fetch_nearest(&point);
        memoize("get_nearest", &self.nearest, point, skip_cache, fetch).await
    }

    /// All postcodes within `distance` miles of a postcode.
    ///
    /// The distance is checked before anything else, so a negative distance
    /// is reported whatever the postcode.
    ///
    /// # Errors
    /// `InvalidArgument` if `distance` is not a number, `IllegalDistance` if
    /// it is negative.
    pub async fn get_from_postcode(
        &self,
        postcode: &str,
        distance: impl Into<NumericArg>,
        skip_cache: bool,
    ) -> Result<Entry, LookupError> {
        let distance = Distance::new(parse("distance", distance.into())?)?;
        let postcode = Postcode::normalize(postcode);

        let fetch = self
            .transport
            .fetch_by_postcode_radius(&postcode, distance);
        memoize(
            "get_from_postcode",
            &self.postcode_radius,
            (postcode.clone(), distance),
            skip_cache,
            fetch,
        )
        .await
    }

    /// All postcodes within `distance` miles of a point.
    ///
    /// # Errors
    /// `InvalidArgument` if any argument is not a number, then
    /// `IllegalDistance` for a negative distance, then `IllegalPoint` for an
    /// out-of-range point.
    pub async fn get_from_geo(
        &self,
        lat: impl Into<NumericArg>,
        lng: impl Into<NumericArg>,
        distance: impl Into<NumericArg>,
        skip_cache: bool,
    ) -> Result<Entry, LookupError> {
        let lat = parse("lat", lat.into())?;
        let lng = parse("lng", lng.into())?;
        let distance = parse("distance", distance.into())?;

        let distance = Distance::new(distance)?;
        let point = GeoPoint::new(lat, lng)?;

        let fetch = self.transport.fetch_by_geo_radius(&point, distance);
        memoize(
            "get_from_geo",
            &self.geo_radius,
            (point, distance),
            skip_cache,
            fetch,
        )
        .await
    }

    /// Access the underlying transport for uncached requests.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of cached entries across all operations.
    pub async fn entry_count(&self) -> u64 {
        self.postcodes.run_pending_tasks().await;
        self.nearest.run_pending_tasks().await;
        self.postcode_radius.run_pending_tasks().await;
        self.geo_radius.run_pending_tasks().await;

        self.postcodes.entry_count()
            + self.nearest.entry_count()
            + self.postcode_radius.entry_count()
            + self.geo_radius.entry_count()
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        self.postcodes.invalidate_all();
        self.nearest.invalidate_all();
        self.postcode_radius.invalidate_all();
        self.geo_radius.invalidate_all();
    }
}

impl PostCoder<PostcodeClient> {
    /// Create a coordinator backed by the HTTP client.
    pub fn from_config(config: ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::new(PostcodeClient::new(config)?))
    }
}
