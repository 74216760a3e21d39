//! Conversion between JSON payloads and resource values.
//!
//! Every resource API is parameterized by a [`Serializer`] that loads items
//! from response JSON and dumps values into request bodies.
//!
//! - [`ModelSerializer`]: for serde models; drops `null` fields by default
//!   and supports include/exclude field filters
//! - [`DictSerializer`]: keeps payloads as raw JSON objects

mod dict;
mod errors;
mod model;

pub use dict::DictSerializer;
pub use errors::SerializerError;
pub use model::{DumpOptions, ModelSerializer};

use serde_json::{Map, Value};

/// Loads values of type `T` from JSON and dumps them back.
///
/// Implementations must be shareable across tasks, as one serializer is
/// used by every request a resource API prepares.
pub trait Serializer<T>: Send + Sync {
    /// Builds a value from a parsed JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError`] if the payload does not match `T`.
    fn load(&self, data: Value) -> Result<T, SerializerError>;

    /// Builds a value from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError`] if the text is not valid JSON or does
    /// not match `T`.
    fn loads(&self, data: &str) -> Result<T, SerializerError> {
        let value: Value = serde_json::from_str(data)?;
        self.load(value)
    }

    /// Converts a value to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError`] if the value cannot be represented as a
    /// JSON object.
    fn dump(&self, obj: &T) -> Result<Map<String, Value>, SerializerError>;

    /// Converts a value to JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError`] if the value cannot be dumped.
    fn dumps(&self, obj: &T) -> Result<String, SerializerError> {
        Ok(serde_json::to_string(&self.dump(obj)?)?)
    }
}
