// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use serde::ser::{Error as _, Serialize, Serializer};

use crate::convert;
use crate::encode::Encoder;
use crate::error::Result;

/// Numbers are kept as arbitrary-precision decimals so that `replicas: 3`
/// stays exactly 3 and never drifts through a binary float.
pub type Number = BigDecimal;

/// Ordered `key -> value` association. Keys stay in the order they were
/// encountered, which is also the order they are written back in.
pub type Mapping = IndexMap<String, Value>;

/// The structured value a manifest decodes into.
///
/// Equality between two mappings ignores key order; equality between two
/// numbers ignores their scale (`3` equals `3.0`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// Looks up `key` if this value is a mapping.
    ///
    /// ```
    /// let v = yaml_manifest::decode_one("apiVersion: v1\nkind: Pod\nmetadata: {}")?;
    /// assert_eq!(v.get("kind").and_then(|k| k.as_str()), Some("Pod"));
    /// assert!(v.get("spec").is_none());
    /// # Ok::<(), yaml_manifest::Error>(())
    /// ```
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Mapping(m) => m.get_mut(key),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Short name of the active variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    /// Writes the value as a single YAML document, whatever its root.
    ///
    /// ```
    /// let v: yaml_manifest::Value = [("replicas", 3)].into_iter().collect();
    /// assert_eq!(v.to_yaml()?, "replicas: 3\n");
    /// # Ok::<(), yaml_manifest::Error>(())
    /// ```
    pub fn to_yaml(&self) -> Result<String> {
        Encoder::new().allow_non_mapping(true).encode(self)
    }

    /// The manifest's `apiVersion`, if it is a string.
    pub fn api_version(&self) -> Option<&str> {
        self.get("apiVersion").and_then(Value::as_str)
    }

    /// The manifest's `kind`, if it is a string.
    pub fn manifest_kind(&self) -> Option<&str> {
        self.get("kind").and_then(Value::as_str)
    }

    /// The manifest's `metadata.name`, if it is a string.
    ///
    /// ```
    /// let yaml = "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: settings\n";
    /// let v = yaml_manifest::decode_one(yaml)?;
    /// assert_eq!(v.name(), Some("settings"));
    /// # Ok::<(), yaml_manifest::Error>(())
    /// ```
    pub fn name(&self) -> Option<&str> {
        self.get("metadata")
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Sequence(v)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => convert::native_number(n)
                .map_err(S::Error::custom)?
                .serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(s) => serializer.collect_seq(s),
            Value::Mapping(m) => serializer.collect_map(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::{assert_eq, assert_ne};
    use std::str::FromStr;

    fn pod() -> Value {
        Value::from_iter([
            ("apiVersion", Value::from("v1")),
            ("kind", Value::from("Pod")),
            ("metadata", Value::from_iter([("name", "web")])),
        ])
    }

    #[test]
    fn accessors() {
        let v = pod();
        assert_eq!(v.api_version(), Some("v1"));
        assert_eq!(v.manifest_kind(), Some("Pod"));
        assert_eq!(v.name(), Some("web"));
        assert_eq!(v.type_name(), "mapping");
        assert!(v.get("spec").is_none());
        assert!(Value::from(3).get("kind").is_none());
    }

    #[test]
    fn number_equality_ignores_scale() {
        let three = Value::from(3);
        let three_point_o = Value::Number(Number::from_str("3.0").unwrap());
        assert_eq!(three, three_point_o);
        assert_ne!(three, Value::Number(Number::from_str("3.0000001").unwrap()));
    }

    #[test]
    fn mapping_equality_ignores_order() {
        let a = Value::from_iter([("a", 1), ("b", 2)]);
        let b = Value::from_iter([("b", 2), ("a", 1)]);
        assert_eq!(a, b);
        let keys: Vec<_> = a.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn serialize_to_json() {
        let mut v = pod();
        v.as_mapping_mut()
            .unwrap()
            .insert("ratio".into(), Value::Number(Number::from_str("0.25").unwrap()));
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(
            json,
            r#"{"apiVersion":"v1","kind":"Pod","metadata":{"name":"web"},"ratio":0.25}"#
        );
    }

    #[test]
    fn to_yaml() {
        assert_eq!(Value::from_iter([("replicas", 3)]).to_yaml().unwrap(), "replicas: 3\n");
        assert_eq!(Value::from("plain").to_yaml().unwrap(), "plain\n");
    }

    #[test]
    fn to_yaml_reports_unencodable_numbers() {
        let v = Value::from_iter([("huge", Number::from_str("1e400").unwrap())]);
        let err = v.to_yaml().unwrap_err();
        assert_eq!(err.to_string(), "number 1e400 has no YAML representation");
        assert!(serde_json::to_string(&v).is_err());
    }
}
