// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use log::trace;

use crate::convert;
use crate::error::{Error, Result};
use crate::value::Value;

/// Line written between two documents of a stream.
pub const SEPARATOR: &str = "---\n";

/// What can be handed to [`Encoder::encode`]: a single manifest or an
/// ordered list of manifests.
#[derive(Debug, Clone, Copy)]
pub enum Manifests<'a> {
    One(&'a Value),
    Many(&'a [Value]),
}

impl<'a> From<&'a Value> for Manifests<'a> {
    fn from(v: &'a Value) -> Self {
        Manifests::One(v)
    }
}

impl<'a> From<&'a [Value]> for Manifests<'a> {
    fn from(v: &'a [Value]) -> Self {
        Manifests::Many(v)
    }
}

impl<'a> From<&'a Vec<Value>> for Manifests<'a> {
    fn from(v: &'a Vec<Value>) -> Self {
        Manifests::Many(v)
    }
}

impl<'a, const N: usize> From<&'a [Value; N]> for Manifests<'a> {
    fn from(v: &'a [Value; N]) -> Self {
        Manifests::Many(v)
    }
}

/// Options for writing manifests back to YAML.
///
/// Output is deterministic: mapping keys come out in the order they were
/// decoded or inserted in.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    allow_non_mapping: bool,
}

impl Encoder {
    /// Creates an encoder with default options
    pub fn new() -> Self {
        Encoder {
            allow_non_mapping: false,
        }
    }

    /// Accept documents whose root is not a mapping (a bare string, a list…).
    /// Default: `false`, since manifests are always mappings.
    pub fn allow_non_mapping(mut self, allow: bool) -> Self {
        self.allow_non_mapping = allow;
        self
    }

    /// Serializes one manifest, or a list of manifests as a multi-document
    /// stream.
    ///
    /// A single manifest is written without any separator. A list is written
    /// with `---` between consecutive documents; an empty list gives an empty
    /// string.
    ///
    /// # Example
    ///
    /// ```
    /// use yaml_manifest::{Encoder, Value};
    ///
    /// let a: Value = [("kind", "A")].into_iter().collect();
    /// let b: Value = [("kind", "B")].into_iter().collect();
    ///
    /// assert_eq!(Encoder::new().encode(&a)?, "kind: A\n");
    /// assert_eq!(Encoder::new().encode(&[a, b])?, "kind: A\n---\nkind: B\n");
    /// # Ok::<(), yaml_manifest::Error>(())
    /// ```
    pub fn encode<'a>(&self, manifests: impl Into<Manifests<'a>>) -> Result<String> {
        match manifests.into() {
            Manifests::One(value) => self.encode_document(0, value),
            Manifests::Many(values) => {
                let documents = values
                    .iter()
                    .enumerate()
                    .map(|(index, value)| self.encode_document(index, value))
                    .collect::<Result<Vec<_>>>()?;
                let mut out = documents.join(SEPARATOR);
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }

    fn encode_document(&self, index: usize, value: &Value) -> Result<String> {
        if !self.allow_non_mapping && !value.is_mapping() {
            return Err(Error::NonMappingDocument {
                index,
                found: value.type_name(),
            });
        }
        trace!("encoding document {index}");
        let native = convert::to_native(value)?;
        serde_yaml::to_string(&native).map_err(Error::Serialize)
    }
}
