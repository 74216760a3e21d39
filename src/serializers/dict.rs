//! Pass-through serializer for raw JSON objects.

use serde_json::{Map, Value};

use crate::serializers::errors::json_kind;
use crate::serializers::{Serializer, SerializerError};

/// Serializer that keeps payloads as plain JSON objects.
///
/// Useful for calling a resource API without defining a model type.
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::serializers::{DictSerializer, Serializer};
/// use serde_json::json;
///
/// let serializer = DictSerializer;
/// let data = serializer.load(json!({"hello": true})).unwrap();
/// assert_eq!(serializer.dump(&data).unwrap(), data);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DictSerializer;

impl Serializer<Map<String, Value>> for DictSerializer {
    fn load(&self, data: Value) -> Result<Map<String, Value>, SerializerError> {
        match data {
            Value::Object(map) => Ok(map),
            other => Err(SerializerError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    fn dump(&self, obj: &Map<String, Value>) -> Result<Map<String, Value>, SerializerError> {
        Ok(obj.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_passes_objects_through() {
        let loaded = DictSerializer.load(json!({"a": 1, "b": null})).unwrap();
        assert_eq!(loaded.get("a"), Some(&json!(1)));
        assert_eq!(loaded.get("b"), Some(&Value::Null));
    }

    #[test]
    fn test_load_rejects_non_objects() {
        assert!(matches!(
            DictSerializer.load(json!("text")),
            Err(SerializerError::NotAnObject { found: "a string" })
        ));
        assert!(matches!(
            DictSerializer.loads("[1]"),
            Err(SerializerError::NotAnObject { found: "an array" })
        ));
    }

    #[test]
    fn test_dumps_produces_json_text() {
        let data = DictSerializer.loads(r#"{"x": [1, 2]}"#).unwrap();
        assert_eq!(DictSerializer.dumps(&data).unwrap(), r#"{"x":[1,2]}"#);
    }
}
