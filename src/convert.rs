// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion between `serde_yaml`'s value graph and [`Value`].
//!
//! This is the only place that dispatches on the parser's native types.

use std::str::FromStr;

use num_traits::{ToPrimitive, Zero};

use crate::error::{Error, Result};
use crate::native::wide_integer_digits;
use crate::value::{Mapping, Number, Value};

/// Default nesting cap; matches the recursion limit `serde_yaml` enforces
/// while parsing.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Whole numbers with more digits than this cannot fit 64 bits.
const MAX_INTEGER_DIGITS: i64 = 20;

/// Converts a parsed `serde_yaml::Value` into a [`Value`].
///
/// Fails with `DepthLimit` if sequences and mappings nest deeper than
/// `max_depth`, and with `TypeConversion` on tags, non-finite floats and
/// collection-typed mapping keys.
///
/// # Example
///
/// ```
/// let native: serde_yaml::Value = serde_yaml::from_str("replicas: 3")?;
/// let v = yaml_manifest::convert::from_native(&native, 16)?;
/// assert_eq!(v.get("replicas"), Some(&yaml_manifest::Value::from(3)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn from_native(value: &serde_yaml::Value, max_depth: usize) -> Result<Value> {
    native_to_value(value, 0, max_depth)
}

fn native_to_value(value: &serde_yaml::Value, depth: usize, max_depth: usize) -> Result<Value> {
    use serde_yaml::Value as Native;

    match value {
        Native::Null => Ok(Value::Null),
        Native::Bool(b) => Ok(Value::Bool(*b)),
        Native::String(s) => Ok(Value::String(s.clone())),
        Native::Number(n) => Ok(Value::Number(native_to_number(n)?)),
        Native::Mapping(m) => {
            check_depth(depth, max_depth)?;
            let mut mapping = Mapping::with_capacity(m.len());
            for (k, v) in m.iter() {
                let key = key_to_string(k)?;
                let value = native_to_value(v, depth + 1, max_depth)?;
                // Keys that stringify identically: the later one wins.
                mapping.insert(key, value);
            }
            Ok(Value::Mapping(mapping))
        }
        Native::Sequence(s) => {
            check_depth(depth, max_depth)?;
            s.iter()
                .map(|v| native_to_value(v, depth + 1, max_depth))
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence)
        }
        Native::Tagged(t) => match wide_integer_digits(t) {
            Some(digits) => Number::from_str(digits)
                .map(Value::Number)
                .map_err(|e| Error::TypeConversion {
                    type_name: "integer".into(),
                    detail: e.to_string(),
                }),
            None => Err(Error::TypeConversion {
                type_name: "tagged value".into(),
                detail: format!("unsupported tag {}", t.tag),
            }),
        },
    }
}

fn check_depth(depth: usize, max_depth: usize) -> Result<()> {
    if depth >= max_depth {
        Err(Error::DepthLimit { limit: max_depth })
    } else {
        Ok(())
    }
}

fn native_to_number(n: &serde_yaml::Number) -> Result<Number> {
    if let Some(i) = n.as_i64() {
        return Ok(Number::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Number::from(u));
    }
    match n.as_f64() {
        // Going through the shortest round-trip text keeps `0.1` as 0.1
        // instead of its binary expansion.
        Some(f) if f.is_finite() => {
            Number::from_str(&f.to_string()).map_err(|e| Error::TypeConversion {
                type_name: "float".into(),
                detail: e.to_string(),
            })
        }
        _ => Err(Error::TypeConversion {
            type_name: "float".into(),
            detail: format!("{n} is not a finite number"),
        }),
    }
}

fn key_to_string(key: &serde_yaml::Value) -> Result<String> {
    use serde_yaml::Value as Native;

    match key {
        Native::String(s) => Ok(s.clone()),
        Native::Number(n) => Ok(n.to_string()),
        Native::Bool(b) => Ok(b.to_string()),
        Native::Null => Ok("null".to_owned()),
        Native::Tagged(t) => wide_integer_digits(t)
            .map(str::to_owned)
            .ok_or_else(|| unusable_key(key)),
        Native::Sequence(_) | Native::Mapping(_) => Err(unusable_key(key)),
    }
}

fn unusable_key(key: &serde_yaml::Value) -> Error {
    Error::TypeConversion {
        type_name: "mapping key".into(),
        detail: format!("{key:?} cannot be used as a string key"),
    }
}

/// Converts a [`Value`] back into a `serde_yaml::Value`, ready to be
/// serialized.
///
/// Mapping keys keep their recorded order. Numbers become integers when
/// they are whole and fit 64 bits, floats otherwise.
pub fn to_native(value: &Value) -> Result<serde_yaml::Value> {
    use serde_yaml::Value as Native;

    Ok(match value {
        Value::Null => Native::Null,
        Value::Bool(b) => Native::Bool(*b),
        Value::Number(n) => Native::Number(native_number(n)?),
        Value::String(s) => Native::String(s.clone()),
        Value::Sequence(s) => {
            Native::Sequence(s.iter().map(to_native).collect::<Result<Vec<_>>>()?)
        }
        Value::Mapping(m) => {
            let mut mapping = serde_yaml::Mapping::with_capacity(m.len());
            for (k, v) in m {
                mapping.insert(Native::String(k.clone()), to_native(v)?);
            }
            Native::Mapping(mapping)
        }
    })
}

pub(crate) fn native_number(n: &Number) -> Result<serde_yaml::Number> {
    let (mantissa, scale) = n.as_bigint_and_exponent();
    if mantissa.is_zero() {
        return Ok(0.into());
    }
    // Only expand to an integer when the result is at most 20 digits long;
    // `1e50000000` must not allocate fifty million of them.
    let integer_digits = (n.digits() as i64).saturating_sub(scale);
    if (1..=MAX_INTEGER_DIGITS).contains(&integer_digits) && n.with_scale(0) == *n {
        if let Some(i) = n.to_i64() {
            return Ok(i.into());
        }
        if let Some(u) = n.to_u64() {
            return Ok(u.into());
        }
    }
    // The standard float parser rounds correctly, `BigDecimal::to_f64` does not.
    let text = format!("{mantissa}e{}", -i128::from(scale));
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() && f != 0.0 => Ok(f.into()),
        _ => Err(Error::UnrepresentableNumber(text)),
    }
}
