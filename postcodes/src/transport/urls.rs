//! Request URL construction.
//!
//! Paths are appended to the configured base URL, so a base with a path
//! prefix (e.g. behind a proxy) keeps that prefix.

use reqwest::Url;

use crate::domain::{Distance, GeoPoint, Postcode};

use super::error::TransportError;

/// Append path segments to `base`. Each segment is percent-encoded.
fn with_segments(base: &Url, segments: &[&str]) -> Result<Url, TransportError> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| TransportError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// `/distance.php?{params}&distance={d}&format=json`
fn radius_url(
    base: &Url,
    params: &[(&str, String)],
    distance: Distance,
) -> Result<Url, TransportError> {
    let mut url = with_segments(base, &["distance.php"])?;
    url.query_pairs_mut()
        .extend_pairs(params)
        .append_pair("distance", &distance.to_string())
        .append_pair("format", "json");
    Ok(url)
}

/// `/postcode/{postcode}.json`
pub(crate) fn postcode_url(base: &Url, postcode: &Postcode) -> Result<Url, TransportError> {
    let file = format!("{postcode}.json");
    with_segments(base, &["postcode", file.as_str()])
}

/// `/latlng/{lat},{lng}.json`
pub(crate) fn nearest_url(base: &Url, point: &GeoPoint) -> Result<Url, TransportError> {
    let file = format!("{point}.json");
    with_segments(base, &["latlng", file.as_str()])
}

pub(crate) fn postcode_radius_url(
    base: &Url,
    postcode: &Postcode,
    distance: Distance,
) -> Result<Url, TransportError> {
    radius_url(base, &[("postcode", postcode.to_string())], distance)
}

pub(crate) fn geo_radius_url(
    base: &Url,
    point: &GeoPoint,
    distance: Distance,
) -> Result<Url, TransportError> {
    radius_url(
        base,
        &[
            ("lat", point.lat().to_string()),
            ("lng", point.lng().to_string()),
        ],
        distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://www.uk-postcodes.com/").unwrap()
    }

    #[test]
    fn postcode_lookup() {
        let url = postcode_url(&base(), &Postcode::normalize("foo")).unwrap();
        assert_eq!(url.as_str(), "http://www.uk-postcodes.com/postcode/foo.json");
    }

    #[test]
    fn postcode_is_space_stripped_and_escaped() {
        let url = postcode_url(&base(), &Postcode::normalize("W1 1")).unwrap();
        assert_eq!(url.as_str(), "http://www.uk-postcodes.com/postcode/w11.json");

        let url = postcode_url(&base(), &Postcode::normalize("a/b#c")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://www.uk-postcodes.com/postcode/a%2Fb%23c.json"
        );

        let url = postcode_url(&base(), &Postcode::normalize("EC1A\t1BB")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://www.uk-postcodes.com/postcode/ec1a%091bb.json"
        );
    }

    #[test]
    fn nearest_lookup() {
        let point = GeoPoint::new(1.1, -2.2).unwrap();
        let url = nearest_url(&base(), &point).unwrap();
        assert_eq!(url.as_str(), "http://www.uk-postcodes.com/latlng/1.1,-2.2.json");
    }

    #[test]
    fn radius_from_postcode() {
        let url = postcode_radius_url(
            &base(),
            &Postcode::normalize("W1 1"),
            Distance::new(1.0).unwrap(),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://www.uk-postcodes.com/distance.php?postcode=w11&distance=1&format=json"
        );
    }

    #[test]
    fn radius_from_geo() {
        let point = GeoPoint::new(1.0, 2.0).unwrap();
        let url = geo_radius_url(&base(), &point, Distance::new(1.0).unwrap()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://www.uk-postcodes.com/distance.php?lat=1&lng=2&distance=1&format=json"
        );
    }

    #[test]
    fn fractional_and_negative_numbers() {
        let point = GeoPoint::new(-30.5, 20.25).unwrap();
        let url = geo_radius_url(&base(), &point, Distance::new(12.32).unwrap()).unwrap();
        assert_eq!(
            url.query(),
            Some("lat=-30.5&lng=20.25&distance=12.32&format=json")
        );
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let base = Url::parse("http://localhost:8080/api").unwrap();
        let url = postcode_url(&base, &Postcode::normalize("M1 1AE")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/postcode/m11ae.json");

        let base = Url::parse("http://localhost:8080/api/").unwrap();
        let url = postcode_url(&base, &Postcode::normalize("M1 1AE")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/postcode/m11ae.json");
    }

    #[test]
    fn cannot_be_a_base() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        let result = postcode_url(&base, &Postcode::normalize("M1 1AE"));
        assert!(matches!(result, Err(TransportError::InvalidBaseUrl(_))));
    }
}
