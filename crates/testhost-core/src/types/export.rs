//! Dynamic values exposed by candidate modules.
//!
//! A candidate module is opaque to the host until it is inspected, so its
//! exports are modeled as a small dynamic value tree. Functions are
//! first-class so that hooks and factories can live next to plain data.

use std::collections::BTreeMap;

use super::callable::Callable;

/// Property map of an [`Export::Object`].
pub type ExportMap = BTreeMap<String, Export>;

/// A dynamically typed exported value.
#[derive(Debug, Clone, PartialEq)]
pub enum Export {
    /// Absent or null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(String),
    /// A zero-argument function.
    Function(Callable),
    /// An ordered sequence.
    Array(Vec<Export>),
    /// A property map.
    Object(ExportMap),
}

impl Export {
    /// Builds an object from `(key, value)` pairs.
    pub fn object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Export>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds an array from values.
    pub fn array<V: Into<Export>>(items: impl IntoIterator<Item = V>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Returns `false` for null, `false`, zero, NaN and the empty string.
    ///
    /// Empty arrays and objects are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Function(_) | Self::Array(_) | Self::Object(_) => true,
        }
    }

    /// Looks up a property. Non-objects have no properties.
    pub fn get(&self, key: &str) -> Option<&Export> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Returns the function if this value is one.
    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Returns whether this value is a property map.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Short type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Function(_) => "function",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

impl From<Callable> for Export {
    fn from(f: Callable) -> Self {
        Self::Function(f)
    }
}

impl From<bool> for Export {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Export {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Export {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Export {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Export>> for Export {
    fn from(items: Vec<Export>) -> Self {
        Self::Array(items)
    }
}

impl From<ExportMap> for Export {
    fn from(map: ExportMap) -> Self {
        Self::Object(map)
    }
}

impl From<serde_json::Value> for Export {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Export::Null.is_truthy());
        assert!(!Export::Bool(false).is_truthy());
        assert!(!Export::Number(0.0).is_truthy());
        assert!(!Export::Number(f64::NAN).is_truthy());
        assert!(!Export::from("").is_truthy());

        assert!(Export::Bool(true).is_truthy());
        assert!(Export::Number(-1.0).is_truthy());
        assert!(Export::from("x").is_truthy());
        assert!(Export::Array(Vec::new()).is_truthy());
        assert!(Export::Object(ExportMap::new()).is_truthy());
        assert!(Export::from(Callable::noop()).is_truthy());
    }

    #[test]
    fn test_get_only_on_objects() {
        let obj = Export::object([("answer", 42.0)]);
        assert_eq!(obj.get("answer"), Some(&Export::Number(42.0)));
        assert_eq!(obj.get("missing"), None);
        assert_eq!(Export::from("answer").get("answer"), None);
        assert_eq!(Export::from(Callable::noop()).get("answer"), None);
    }

    #[test]
    fn test_from_json() {
        let value = serde_json::json!({
            "name": "fixtures",
            "tags": ["a", "b"],
            "enabled": true,
            "retries": 3,
            "extra": null
        });

        let export = Export::from(value);
        assert!(export.is_object());
        assert_eq!(export.get("name"), Some(&Export::from("fixtures")));
        assert_eq!(
            export.get("tags"),
            Some(&Export::array(["a", "b"]))
        );
        assert_eq!(export.get("retries"), Some(&Export::Number(3.0)));
        assert_eq!(export.get("extra"), Some(&Export::Null));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Export::Null.type_name(), "null");
        assert_eq!(Export::array(Vec::<Export>::new()).type_name(), "array");
        assert_eq!(Export::from(Callable::noop()).type_name(), "function");
    }
}
