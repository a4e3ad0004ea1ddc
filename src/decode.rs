// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use log::{debug, trace, warn};

use crate::convert::{self, DEFAULT_MAX_DEPTH};
use crate::error::{Error, Result};
use crate::native;
use crate::split::split_documents;
use crate::validate::validate;
use crate::value::Value;

/// A document `decode_multi` skipped because it is not a manifest.
#[derive(Debug)]
pub struct Warning {
    /// Position of the document in the stream, blank documents excluded.
    pub index: usize,
    /// Why the document was rejected; always a validation error.
    pub error: Error,
}

/// What `decode_multi` returns: the manifests, in stream order, and the
/// documents that were skipped.
#[derive(Debug, Default)]
pub struct Decoded {
    pub manifests: Vec<Value>,
    pub warnings: Vec<Warning>,
}

impl Decoded {
    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.manifests.len()
    }
}

/// Options for decoding manifests.
///
/// # Example
///
/// ```
/// let decoded = yaml_manifest::Decoder::new()
///     .max_depth(32)
///     .decode_multi("apiVersion: v1\nkind: Namespace\nmetadata:\n  name: prod\n")?;
/// assert_eq!(decoded.len(), 1);
/// # Ok::<(), yaml_manifest::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Decoder {
    max_depth: usize,
    strict: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Creates a decoder with default options
    pub fn new() -> Self {
        Decoder {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }

    /// Maximum nesting of sequences and mappings in a document. Deeper
    /// documents fail with a parse-kind error. Default: 128.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// With `true`, `decode_multi` fails on the first document that is not a
    /// manifest instead of skipping it. Default: `false`.
    ///
    /// # Example
    ///
    /// ```
    /// let yaml = "kind: Orphan\n---\napiVersion: v1\nkind: Pod\nmetadata: {}\n";
    /// assert_eq!(yaml_manifest::Decoder::new().decode_multi(yaml)?.len(), 1);
    /// assert!(yaml_manifest::Decoder::new().strict(true).decode_multi(yaml).is_err());
    /// # Ok::<(), yaml_manifest::Error>(())
    /// ```
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parses the first YAML document of `text` and checks it is a manifest.
    ///
    /// Any document after the first is ignored.
    ///
    /// # Example
    ///
    /// ```
    /// let yaml = "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\nspec:\n  replicas: 3\n";
    /// let v = yaml_manifest::Decoder::new().decode_one(yaml)?;
    /// let replicas = v.get("spec").and_then(|s| s.get("replicas"));
    /// assert_eq!(replicas, Some(&yaml_manifest::Value::from(3)));
    /// # Ok::<(), yaml_manifest::Error>(())
    /// ```
    pub fn decode_one(&self, text: &str) -> Result<Value> {
        let value = self.parse(text)?;
        validate(&value)?;
        Ok(value)
    }

    /// Splits `text` into documents and decodes each of them.
    ///
    /// Documents that are not well-formed YAML make the whole call fail.
    /// Documents that parse but are not manifests are skipped and reported in
    /// [`Decoded::warnings`], unless the decoder is strict.
    pub fn decode_multi(&self, text: &str) -> Result<Decoded> {
        let documents = split_documents(text);
        debug!("manifest stream holds {} documents", documents.len());

        let mut decoded = Decoded::default();
        for (index, document) in documents.into_iter().enumerate() {
            trace!("decoding document {index}");
            let value = self.parse(&document)?;
            match validate(&value) {
                Ok(()) => decoded.manifests.push(value),
                Err(error) if !self.strict => {
                    warn!("skipping document {index}: {error}");
                    decoded.warnings.push(Warning { index, error });
                }
                Err(error) => return Err(error),
            }
        }
        Ok(decoded)
    }

    fn parse(&self, text: &str) -> Result<Value> {
        let native = native::parse_document(text)?;
        convert::from_native(&native, self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::value::Number;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    const DEPLOYMENT: &str = indoc! {"
        apiVersion: apps/v1
        kind: Deployment
        metadata:
          name: web
          labels:
            app: web
        spec:
          replicas: 3
          template:
            spec:
              containers:
                - name: web
                  image: nginx:1.25
                  resources:
                    limits:
                      cpu: \"0.25\"
                      memory: 128Mi
    "};

    #[test]
    fn decode_one_deployment() {
        let v = Decoder::new().decode_one(DEPLOYMENT).unwrap();
        assert_eq!(v.api_version(), Some("apps/v1"));
        assert_eq!(v.manifest_kind(), Some("Deployment"));
        assert_eq!(v.name(), Some("web"));

        let spec = v.get("spec").unwrap();
        assert_eq!(spec.get("replicas"), Some(&Value::from(3)));

        let containers = spec
            .get("template")
            .and_then(|t| t.get("spec"))
            .and_then(|s| s.get("containers"))
            .and_then(Value::as_sequence)
            .unwrap();
        let container = &containers[0];
        let limits = container.get("resources").unwrap().get("limits").unwrap();
        assert_eq!(limits.get("cpu"), Some(&Value::from("0.25")));
        assert_eq!(limits.get("memory"), Some(&Value::from("128Mi")));
    }

    #[test]
    fn decode_one_only_reads_first_document() {
        let yaml = indoc! {"
            apiVersion: v1
            kind: A
            metadata: {}
            ---
            apiVersion: v1
            kind: B
            metadata: {}
        "};
        let v = Decoder::new().decode_one(yaml).unwrap();
        assert_eq!(v.manifest_kind(), Some("A"));
    }

    #[test]
    fn decode_one_errors() {
        let err = Decoder::new().decode_one("kind: [unclosed").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = Decoder::new().decode_one("apiVersion: v1\nkind: Pod\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "manifest is missing required field `metadata`");

        let err = Decoder::new().decode_one("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = Decoder::new().decode_one("- just\n- a list\n").unwrap_err();
        assert_eq!(err.to_string(), "manifest must be a mapping, found sequence");
    }

    #[test]
    fn decode_one_depth() {
        let err = Decoder::new()
            .max_depth(2)
            .decode_one(DEPLOYMENT)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn decode_multi_skips_non_manifests() {
        let yaml = indoc! {"
            apiVersion: v1
            kind: A
            metadata: {}
            ---
            kind: orphan
            ---
            # only a comment
            ---
            apiVersion: v1
            kind: B
            metadata: {}
        "};
        let decoded = Decoder::new().decode_multi(yaml).unwrap();
        let kinds: Vec<_> = decoded.manifests.iter().map(|m| m.manifest_kind().unwrap()).collect();
        assert_eq!(kinds, vec!["A", "B"]);

        let skipped: Vec<_> = decoded.warnings.iter().map(|w| w.index).collect();
        assert_eq!(skipped, vec![1, 2]);
        assert!(decoded
            .warnings
            .iter()
            .all(|w| w.error.kind() == ErrorKind::Validation));
    }

    #[test]
    fn decode_multi_parse_errors_are_fatal() {
        let yaml = indoc! {"
            apiVersion: v1
            kind: A
            metadata: {}
            ---
            kind: [unclosed
        "};
        let err = Decoder::new().decode_multi(yaml).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn decode_multi_conversion_errors_are_fatal() {
        let yaml = "apiVersion: v1\nkind: A\nmetadata: !Tagged {}\n";
        let err = Decoder::new().decode_multi(yaml).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeConversion);
    }

    #[test]
    fn decode_multi_strict() {
        let err = Decoder::new()
            .strict(true)
            .decode_multi("apiVersion: v1\nmetadata: {}\n")
            .unwrap_err();
        assert_eq!(err.to_string(), "manifest is missing required field `kind`");
    }

    #[test]
    fn wide_integers_do_not_abort_the_stream() {
        let yaml = indoc! {"
            apiVersion: v1
            kind: A
            metadata: {}
            spec:
              total: 123456789012345678901234567890
            ---
            apiVersion: v1
            kind: B
            metadata: {}
        "};
        let decoded = Decoder::new().decode_multi(yaml).unwrap();
        assert_eq!(decoded.len(), 2);
        let total = decoded.manifests[0].get("spec").and_then(|s| s.get("total"));
        let expected = Number::from_str("123456789012345678901234567890").unwrap();
        assert_eq!(total.and_then(Value::as_number), Some(&expected));
    }

    #[test]
    fn merge_keys_are_applied() {
        let yaml = indoc! {"
            apiVersion: v1
            kind: ConfigMap
            metadata: &m {a: 1}
            base: {<<: *m, b: 2}
        "};
        let v = Decoder::new().decode_one(yaml).unwrap();
        let base = v.get("base").and_then(Value::as_mapping).unwrap();
        assert!(!base.contains_key("<<"));
        assert_eq!(base.get("a"), Some(&Value::from(1)));
        assert_eq!(base.get("b"), Some(&Value::from(2)));
    }

    #[test]
    fn repeated_keys_keep_the_last_value() {
        let v = Decoder::new()
            .decode_one("apiVersion: v1\nkind: A\nmetadata: {}\nkind: B\n")
            .unwrap();
        assert_eq!(v.manifest_kind(), Some("B"));
        let keys: Vec<_> = v.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["apiVersion", "kind", "metadata"]);
    }

    #[test]
    fn directives_stay_with_their_document() {
        let yaml = "%YAML 1.2\n---\napiVersion: v1\nkind: A\nmetadata: {}\n";
        let decoded = Decoder::new().decode_multi(yaml).unwrap();
        assert_eq!(decoded.len(), 1);
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn decode_multi_empty() {
        assert!(Decoder::new().decode_multi("").unwrap().is_empty());
        let decoded = Decoder::new().decode_multi("---\n---\n").unwrap();
        assert!(decoded.is_empty());
        assert!(decoded.warnings.is_empty());
    }
}
