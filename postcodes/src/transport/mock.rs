//! Mock transport for development and tests without network access.
//!
//! Serves postcode records from JSON fixture files.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{Distance, GeoPoint, Postcode};

use super::Transport;
use super::convert::{decode_list, decode_single};
use super::error::TransportError;
use super::types::{Lookup, PostcodeData};

/// Fixture answering nearest-point lookups.
const NEAREST_FIXTURE: &str = "_nearest";

/// Fixture answering radius lookups.
const RADIUS_FIXTURE: &str = "_radius";

/// Transport that serves data from a directory of JSON files.
///
/// Layout:
/// - `{postcode}.json`: one record per postcode; the file stem is
///   normalized, so `SW1A 1AA.json` and `sw1a1aa.json` are equivalent.
/// - `_nearest.json` (optional): the record returned for every nearest
///   lookup.
/// - `_radius.json` (optional): the list returned for every radius lookup.
///
/// Unknown postcodes are `NotFound`, as a 404 from the real service would be.
#[derive(Debug, Clone)]
pub struct MockTransport {
    postcodes: HashMap<Postcode, PostcodeData>,
    nearest: Option<PostcodeData>,
    radius: Vec<PostcodeData>,
}

fn fixture_error(message: String) -> TransportError {
    TransportError::Fixture { message }
}

impl MockTransport {
    /// Load all fixtures from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, TransportError> {
        let data_dir = data_dir.as_ref();
        let mut postcodes = HashMap::new();
        let mut nearest = None;
        let mut radius = Vec::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            fixture_error(format!("failed to read fixture directory {data_dir:?}: {e}"))
        })?;

        for entry in entries {
            let entry =
                entry.map_err(|e| fixture_error(format!("failed to read directory entry: {e}")))?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| fixture_error(format!("invalid filename: {path:?}")))?;

            let body = std::fs::read_to_string(&path)
                .map_err(|e| fixture_error(format!("failed to read {path:?}: {e}")))?;

            let invalid = |e: TransportError| fixture_error(format!("invalid fixture {path:?}: {e}"));

            match stem {
                NEAREST_FIXTURE => {
                    if let Lookup::Found(data) = decode_single(&body).map_err(invalid)? {
                        nearest = Some(data);
                    }
                }
                RADIUS_FIXTURE => {
                    if let Lookup::ListFound(items) = decode_list(&body).map_err(invalid)? {
                        radius = items;
                    }
                }
                _ => {
                    if let Lookup::Found(data) = decode_single(&body).map_err(invalid)? {
                        postcodes.insert(Postcode::normalize(stem), data);
                    }
                }
            }
        }

        if postcodes.is_empty() && nearest.is_none() && radius.is_empty() {
            return Err(fixture_error(format!(
                "no fixture files found in {data_dir:?}"
            )));
        }

        Ok(Self {
            postcodes,
            nearest,
            radius,
        })
    }

    /// Postcodes with a fixture record.
    pub fn available_postcodes(&self) -> Vec<&Postcode> {
        self.postcodes.keys().collect()
    }
}

impl Transport for MockTransport {
    async fn fetch_by_postcode(&self, postcode: &Postcode) -> Result<Lookup, TransportError> {
        Ok(self
            .postcodes
            .get(postcode)
            .cloned()
            .map_or(Lookup::NotFound, Lookup::Found))
    }

    async fn fetch_nearest(&self, _point: &GeoPoint) -> Result<Lookup, TransportError> {
        Ok(self
            .nearest
            .clone()
            .map_or(Lookup::NotFound, Lookup::Found))
    }

    async fn fetch_by_postcode_radius(
        &self,
        postcode: &Postcode,
        _distance: Distance,
    ) -> Result<Lookup, TransportError> {
        if !self.postcodes.contains_key(postcode) {
            return Ok(Lookup::NotFound);
        }
        Ok(Lookup::ListFound(self.radius.clone()))
    }

    async fn fetch_by_geo_radius(
        &self,
        _point: &GeoPoint,
        _distance: Distance,
    ) -> Result<Lookup, TransportError> {
        Ok(Lookup::ListFound(self.radius.clone()))
    }
}
