//! Serializer for serde-backed resource models.

use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::serializers::errors::json_kind;
use crate::serializers::{Serializer, SerializerError};

/// Options controlling how a model is dumped to JSON.
///
/// Unset fields fall back to the serializer's own defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// Keep fields whose value is `null`.
    pub dump_null: Option<bool>,
    /// Only keep these top-level fields.
    pub include: Option<BTreeSet<String>>,
    /// Drop these top-level fields.
    pub exclude: Option<BTreeSet<String>>,
}

impl DumpOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether `null` fields are kept.
    #[must_use]
    pub const fn dump_null(mut self, dump_null: bool) -> Self {
        self.dump_null = Some(dump_null);
        self
    }

    /// Restricts the dump to the given top-level fields.
    #[must_use]
    pub fn include<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Removes the given top-level fields from the dump.
    #[must_use]
    pub fn exclude<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    fn or(&self, defaults: &Self) -> Self {
        Self {
            dump_null: self.dump_null.or(defaults.dump_null),
            include: self.include.clone().or_else(|| defaults.include.clone()),
            exclude: self.exclude.clone().or_else(|| defaults.exclude.clone()),
        }
    }
}

/// Serializer for any model implementing serde's `Serialize` and
/// `Deserialize`.
///
/// Field names on the wire (usually camelCase) come from the model's serde
/// attributes. By default `null` values are dropped from dumps, at every
/// nesting level, so partial models only send the fields they set.
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::serializers::{ModelSerializer, Serializer};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct Person {
///     resource_name: Option<String>,
///     display_name: Option<String>,
/// }
///
/// let serializer = ModelSerializer::<Person>::new();
/// let person = Person { resource_name: None, display_name: Some("Ada".into()) };
/// assert_eq!(serializer.dumps(&person).unwrap(), r#"{"displayName":"Ada"}"#);
/// ```
pub struct ModelSerializer<T> {
    defaults: DumpOptions,
    _model: PhantomData<fn() -> T>,
}

impl<T> ModelSerializer<T> {
    /// Creates a serializer that drops `null` fields and keeps all others.
    #[must_use]
    pub fn new() -> Self {
        Self {
            defaults: DumpOptions::new().dump_null(false),
            _model: PhantomData,
        }
    }

    /// Sets whether `null` fields are kept by default.
    #[must_use]
    pub const fn dump_null(mut self, dump_null: bool) -> Self {
        self.defaults.dump_null = Some(dump_null);
        self
    }

    /// Restricts dumps to the given top-level fields by default.
    #[must_use]
    pub fn include<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaults = self.defaults.include(fields);
        self
    }

    /// Removes the given top-level fields from dumps by default.
    #[must_use]
    pub fn exclude<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaults = self.defaults.exclude(fields);
        self
    }

    /// Returns the default dump options.
    #[must_use]
    pub const fn defaults(&self) -> &DumpOptions {
        &self.defaults
    }
}

impl<T: Serialize> ModelSerializer<T> {
    /// Dumps `obj`, letting `options` override the serializer defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError::NotAnObject`] if the model does not
    /// serialize to a JSON object.
    pub fn dump_with(&self, obj: &T, options: &DumpOptions) -> Result<Map<String, Value>, SerializerError> {
        let options = options.or(&self.defaults);

        let mut map = match serde_json::to_value(obj)? {
            Value::Object(map) => map,
            other => {
                return Err(SerializerError::NotAnObject {
                    found: json_kind(&other),
                })
            }
        };

        if !options.dump_null.unwrap_or(false) {
            strip_nulls(&mut map);
        }
        if let Some(include) = &options.include {
            map.retain(|key, _| include.contains(key));
        }
        if let Some(exclude) = &options.exclude {
            map.retain(|key, _| !exclude.contains(key));
        }

        Ok(map)
    }
}

impl<T> Default for ModelSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ModelSerializer<T> {
    fn clone(&self) -> Self {
        Self {
            defaults: self.defaults.clone(),
            _model: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ModelSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSerializer")
            .field("model", &std::any::type_name::<T>())
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl<T> Serializer<T> for ModelSerializer<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self, data: Value) -> Result<T, SerializerError> {
        Ok(serde_json::from_value(data)?)
    }

    fn dump(&self, obj: &T) -> Result<Map<String, Value>, SerializerError> {
        self.dump_with(obj, &DumpOptions::default())
    }
}

fn strip_nulls(map: &mut Map<String, Value>) {
    map.retain(|_, value| !value.is_null());
    for value in map.values_mut() {
        strip_nulls_in(value);
    }
}

fn strip_nulls_in(value: &mut Value) {
    match value {
        Value::Object(map) => strip_nulls(map),
        Value::Array(items) => items.iter_mut().for_each(strip_nulls_in),
        _ => {}
    }
}
