// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::{Error, Result};
use crate::value::Value;

/// Keys every manifest must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 3] = ["apiVersion", "kind", "metadata"];

/// Checks that `value` is shaped like a Kubernetes object.
///
/// Only the presence of the keys is checked, not what they hold. The first
/// missing key, in [`REQUIRED_FIELDS`] order, is reported.
///
/// # Example
///
/// ```
/// use yaml_manifest::{validate, Value};
///
/// let v: Value = [("apiVersion", "v1"), ("metadata", "x")].into_iter().collect();
/// let err = validate(&v).unwrap_err();
/// assert_eq!(err.to_string(), "manifest is missing required field `kind`");
/// ```
pub fn validate(value: &Value) -> Result<()> {
    let mapping = value.as_mapping().ok_or(Error::NotAMapping {
        found: value.type_name(),
    })?;
    match REQUIRED_FIELDS.iter().find(|field| !mapping.contains_key(**field)) {
        Some(field) => Err(Error::MissingField { field: *field }),
        None => Ok(()),
    }
}
