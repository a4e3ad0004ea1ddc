// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Coarse classification of an [`Error`], stable across releases.
///
/// Callers bridging to another diagnostic format should match on this rather
/// than on the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not well-formed YAML, or nests too deeply.
    Parse,
    /// A parsed value has no structured counterpart.
    TypeConversion,
    /// A document is not a manifest.
    Validation,
    /// A value cannot be written out as a YAML document.
    Serialization,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid YAML: {0}")]
    Parse(#[source] serde_yaml::Error),
    #[error("document nests deeper than {limit} levels")]
    DepthLimit { limit: usize },
    #[error("cannot convert {type_name} into a structured value: {detail}")]
    TypeConversion { type_name: String, detail: String },
    #[error("manifest is missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("manifest must be a mapping, found {found}")]
    NotAMapping { found: &'static str },
    #[error("impossible to serialize YAML: {0}")]
    Serialize(#[source] serde_yaml::Error),
    #[error("document {index} must be a mapping, found {found}")]
    NonMappingDocument { index: usize, found: &'static str },
    #[error("number {0} has no YAML representation")]
    UnrepresentableNumber(String),
}

impl Error {
    /// Returns which of the four error families this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(_) | Error::DepthLimit { .. } => ErrorKind::Parse,
            Error::TypeConversion { .. } => ErrorKind::TypeConversion,
            Error::MissingField { .. } | Error::NotAMapping { .. } => ErrorKind::Validation,
            Error::Serialize(_)
            | Error::NonMappingDocument { .. }
            | Error::UnrepresentableNumber(_) => ErrorKind::Serialization,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
