// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// A line holding exactly `---`, optionally followed by blanks.
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^---[ \t]*\r?$").unwrap());

/// Splits a multi-document YAML stream into its documents.
///
/// Documents are trimmed; blank ones (leading or trailing separators, empty
/// documents between two separators) are dropped. A `---` that does not
/// start its own line does not split. Directive lines (`%YAML`, `%TAG`)
/// before a separator are kept at the head of the document that follows.
///
/// # Example
///
/// ```
/// let docs = yaml_manifest::split_documents("---\na: 1\n---\n\n---\nb: foo---bar\n");
/// assert_eq!(docs, vec!["a: 1", "b: foo---bar"]);
///
/// let docs = yaml_manifest::split_documents("%YAML 1.2\n---\na: 1\n");
/// assert_eq!(docs, vec!["%YAML 1.2\n---\na: 1"]);
/// ```
pub fn split_documents(text: &str) -> Vec<Cow<'_, str>> {
    let mut documents = Vec::new();
    let mut directives = None;
    for doc in SEPARATOR.split(text).map(str::trim).filter(|doc| !doc.is_empty()) {
        if is_directives(doc) {
            directives = Some(doc);
            continue;
        }
        match directives.take() {
            Some(directives) => documents.push(Cow::Owned(format!("{directives}\n---\n{doc}"))),
            None => documents.push(Cow::Borrowed(doc)),
        }
    }
    documents
}

/// True when every non-comment line of `doc` is a directive.
fn is_directives(doc: &str) -> bool {
    let mut found = false;
    for line in doc.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !line.starts_with('%') {
            return false;
        }
        found = true;
    }
    found
}
