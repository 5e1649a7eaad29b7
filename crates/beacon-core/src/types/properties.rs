//! Event property payloads.
//!
//! Tracking events carry an arbitrary structured payload supplied by the
//! client script. It is modeled as an ordered string-keyed map of JSON values
//! and stored as its canonical JSON text; reads parse the text back
//! symmetrically.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::result::AppResult;

/// Ordered key/value payload attached to a tracked event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(pub Map<String, Value>);

impl Properties {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize to the canonical JSON text stored in the events table.
    pub fn to_json_text(&self) -> AppResult<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Parse the stored JSON text back into a property map.
    ///
    /// Empty text (events tracked without properties) parses to an empty map.
    pub fn from_json_text(text: &str) -> AppResult<Self> {
        if text.is_empty() {
            return Ok(Self::new());
        }
        Ok(Self(serde_json::from_str(text)?))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_through_json_text() {
        let props: Properties = [
            ("element_tag", json!("BUTTON")),
            ("element_id", json!("signup")),
            ("nested", json!({"a": 1, "b": [true, null]})),
        ]
        .into_iter()
        .collect();

        let text = props.to_json_text().unwrap();
        let parsed = Properties::from_json_text(&text).unwrap();
        assert_eq!(parsed, props);
    }

    #[test]
    fn preserves_insertion_order() {
        let props: Properties = [("z", json!(1)), ("a", json!(2)), ("m", json!(3))]
            .into_iter()
            .collect();

        let text = props.to_json_text().unwrap();
        assert_eq!(text, r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn empty_text_parses_to_empty_map() {
        let props = Properties::from_json_text("").unwrap();
        assert!(props.is_empty());
    }
}
