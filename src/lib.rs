// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.


//! Decode and encode Kubernetes-style YAML manifests.
//!
//! Manifests are read into [`Value`], a closed value model where numbers are
//! arbitrary-precision decimals and mappings keep their key order, and can be
//! written back to YAML deterministically.
//!
//! # Decoding
//!
//! A single manifest:
//!
//! ```
//! let yaml = r#"
//! apiVersion: v1
//! kind: ConfigMap
//! metadata:
//!     name: settings
//! data:
//!     ratio: "0.25"
//! "#;
//! let manifest = yaml_manifest::decode_one(yaml)?;
//! assert_eq!(manifest.manifest_kind(), Some("ConfigMap"));
//! # Ok::<(), yaml_manifest::Error>(())
//! ```
//!
//! A stream of manifests, where documents that are not manifests are skipped
//! and reported:
//!
//! ```
//! let yaml = r#"
//! apiVersion: v1
//! kind: Namespace
//! metadata:
//!     name: prod
//! ---
//! just: a note
//! "#;
//! let decoded = yaml_manifest::decode_multi(yaml)?;
//! assert_eq!(decoded.manifests.len(), 1);
//! assert_eq!(decoded.warnings.len(), 1);
//! # Ok::<(), yaml_manifest::Error>(())
//! ```
//!
//! # Encoding
//!
//! ```
//! let manifests = yaml_manifest::decode_multi(
//!     "apiVersion: v1\nkind: A\nmetadata: {}\n---\napiVersion: v1\nkind: B\nmetadata: {}\n",
//! )?
//! .manifests;
//! let yaml = yaml_manifest::encode(&manifests)?;
//! assert_eq!(yaml_manifest::decode_multi(&yaml)?.manifests, manifests);
//! # Ok::<(), yaml_manifest::Error>(())
//! ```


pub mod convert;
mod decode;
mod encode;
mod error;
mod native;
mod split;
mod validate;
mod value;

pub use decode::{Decoded, Decoder, Warning};
pub use encode::{Encoder, Manifests};
pub use error::{Error, ErrorKind, Result};
pub use split::split_documents;
pub use validate::{validate, REQUIRED_FIELDS};
pub use value::{Mapping, Number, Value};

/// Decodes the first document of `text` as a manifest, with default options.
///
/// See [`Decoder::decode_one`].
pub fn decode_one(text: &str) -> Result<Value> {
    Decoder::new().decode_one(text)
}

/// Decodes every manifest of a multi-document stream, with default options.
///
/// See [`Decoder::decode_multi`].
pub fn decode_multi(text: &str) -> Result<Decoded> {
    Decoder::new().decode_multi(text)
}

/// Encodes one manifest or a list of manifests, with default options.
///
/// See [`Encoder::encode`].
pub fn encode<'a>(manifests: impl Into<Manifests<'a>>) -> Result<String> {
    Encoder::new().encode(manifests)
}
