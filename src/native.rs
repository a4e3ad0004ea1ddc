// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsing one YAML document into `serde_yaml`'s value graph.
//!
//! `serde_yaml::Value` rejects integers wider than 64 bits and repeated
//! mapping keys, so documents go through a visitor of our own instead.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};

use crate::error::Error;

/// Marks an integer too wide for `serde_yaml::Number`. The tagged value is
/// the integer's decimal digits.
pub(crate) const WIDE_INTEGER_TAG: &str = "!yaml_manifest/wide-integer";

/// Digits of an integer wrapped by the parser under [`WIDE_INTEGER_TAG`].
pub(crate) fn wide_integer_digits(tagged: &TaggedValue) -> Option<&str> {
    if tagged.tag == Tag::new(WIDE_INTEGER_TAG) {
        tagged.value.as_str()
    } else {
        None
    }
}

/// Parses the first document of `text`, with merge keys (`<<`) applied.
///
/// Text holding no document at all (blank, comments only) gives `Null`.
pub(crate) fn parse_document(text: &str) -> crate::error::Result<Value> {
    let mut native = match serde_yaml::Deserializer::from_str(text).next() {
        Some(document) => Native::deserialize(document).map_err(Error::Parse)?.0,
        None => Value::Null,
    };
    native.apply_merge().map_err(Error::Parse)?;
    Ok(native)
}

struct Native(Value);

impl<'de> Deserialize<'de> for Native {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NativeVisitor).map(Native)
    }
}

fn wide_integer(digits: String) -> Value {
    Value::Tagged(Box::new(TaggedValue {
        tag: Tag::new(WIDE_INTEGER_TAG),
        value: Value::String(digits),
    }))
}

struct NativeVisitor;

impl<'de> Visitor<'de> for NativeVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<Value, E> {
        Ok(Value::Number(i.into()))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<Value, E> {
        Ok(Value::Number(u.into()))
    }

    fn visit_i128<E: de::Error>(self, i: i128) -> Result<Value, E> {
        Ok(wide_integer(i.to_string()))
    }

    fn visit_u128<E: de::Error>(self, u: u128) -> Result<Value, E> {
        Ok(wide_integer(u.to_string()))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<Value, E> {
        Ok(Value::Number(f.into()))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_owned()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Native::deserialize(deserializer).map(|n| n.0)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(Native(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut mapping = Mapping::new();
        while let Some((Native(key), Native(value))) = map.next_entry()? {
            // A repeated key replaces the earlier value, keeping its position.
            mapping.insert(key, value);
        }
        Ok(Value::Mapping(mapping))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Value, A::Error> {
        let (tag, contents): (String, _) = data.variant()?;
        let tag = Tag::new(tag);
        if tag == Tag::new(WIDE_INTEGER_TAG) {
            return Err(de::Error::custom(format_args!("tag {tag} is reserved")));
        }
        let Native(value) = contents.newtype_variant()?;
        Ok(Value::Tagged(Box::new(TaggedValue { tag, value })))
    }
}
