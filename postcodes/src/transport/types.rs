//! Lookup result types.

use serde::Serialize;
use serde_json::{Map, Value};

/// Postcode metadata as returned by the service.
///
/// Fields are defined by the remote service and passed through untouched.
pub type PostcodeData = Map<String, Value>;

/// Outcome of a lookup.
///
/// Serializes as the underlying JSON: an object, an array of objects, or
/// `null` for `NotFound`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lookup {
    /// A single postcode record.
    Found(PostcodeData),
    /// Every postcode within a radius.
    ListFound(Vec<PostcodeData>),
    /// The service has no data for the query.
    NotFound,
}

impl Lookup {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    /// The single record, if this is `Found`.
    pub fn as_found(&self) -> Option<&PostcodeData> {
        match self {
            Lookup::Found(data) => Some(data),
            _ => None,
        }
    }

    /// The records, if this is `ListFound`.
    pub fn as_list(&self) -> Option<&[PostcodeData]> {
        match self {
            Lookup::ListFound(items) => Some(items),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(postcode: &str) -> PostcodeData {
        match json!({ "postcode": postcode }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn accessors() {
        let found = Lookup::Found(record("SW1A 1AA"));
        assert!(found.as_found().is_some());
        assert!(found.as_list().is_none());
        assert!(!found.is_not_found());

        let list = Lookup::ListFound(vec![record("W1 1AA"), record("W1 1AB")]);
        assert_eq!(list.as_list().map(<[_]>::len), Some(2));
        assert!(list.as_found().is_none());

        assert!(Lookup::NotFound.is_not_found());
        assert!(Lookup::NotFound.as_found().is_none());
    }

    #[test]
    fn serializes_as_plain_json() {
        let found = Lookup::Found(record("SW1A 1AA"));
        assert_eq!(
            serde_json::to_value(&found).unwrap(),
            json!({ "postcode": "SW1A 1AA" })
        );

        let list = Lookup::ListFound(vec![record("W1 1AA")]);
        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            json!([{ "postcode": "W1 1AA" }])
        );

        assert_eq!(serde_json::to_value(&Lookup::NotFound).unwrap(), Value::Null);
    }
}
