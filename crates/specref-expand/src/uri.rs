// Dweve Specref - OpenAPI Document Model and Reference Resolution
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Canonical reference URIs.
//!
//! Every reference is turned into an absolute document URL plus a parsed
//! pointer before it is looked up. File paths become `file://` URLs, relative
//! references are joined against the URL of the document that contains them,
//! and dot segments are removed, so two spellings of the same target always
//! compare equal.

use specref_core::{Pointer, Reference, SpecError, SpecResult};
use std::fmt;
use std::path::Path;
use url::Url;

/// Turn a base location (URL or file path) into an absolute URL.
///
/// Relative paths are resolved against the current working directory.
pub fn base_url(location: &str) -> SpecResult<Url> {
    // Single-letter schemes are Windows drive letters, not URLs
    if let Ok(url) = Url::parse(location) {
        if url.scheme().len() > 1 {
            return Ok(url);
        }
    }

    let path = Path::new(location);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| {
                SpecError::invalid_reference(format!(
                    "cannot resolve relative path '{}': {}",
                    location, e
                ))
            })?
            .join(path)
    };

    let url = Url::from_file_path(&absolute).map_err(|_| {
        SpecError::invalid_reference(format!("cannot convert path '{}' to a URL", location))
    })?;
    // Reparse so `.` and `..` segments are normalized
    Url::parse(url.as_str())
        .map_err(|e| SpecError::invalid_reference(format!("invalid location '{}': {}", location, e)))
}

/// Resolve a (possibly relative) document reference against `base`.
pub fn join(base: &Url, reference: &str) -> SpecResult<Url> {
    base.join(reference).map_err(|e| {
        SpecError::invalid_reference(format!("cannot resolve '{}': {}", reference, e))
            .with_uri(base.as_str())
    })
}

/// The document identity of a URL: the URL without its fragment.
pub fn document_url(url: &Url) -> Url {
    let mut document = url.clone();
    document.set_fragment(None);
    document
}

/// A reference in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalRef {
    /// Absolute URL of the target document, without fragment.
    pub document: Url,
    /// Pointer into the target document.
    pub pointer: Pointer,
}

impl CanonicalRef {
    /// Canonicalize `reference` as found in the document at `base`.
    pub fn of(reference: &Reference, base: &Url) -> SpecResult<Self> {
        let document = if reference.is_local() {
            document_url(base)
        } else {
            document_url(&join(base, reference.document())?)
        };
        let pointer = match reference.fragment() {
            Some(fragment) => Pointer::from_fragment(fragment).map_err(|e| {
                e.with_uri(document.as_str())
                    .with_context(format!("in $ref '{}'", reference.target()))
            })?,
            None => Pointer::root(),
        };
        Ok(Self { document, pointer })
    }

    /// A `$ref` string valid from within the document at `root`.
    ///
    /// Targets inside `root` become fragment-only references; other
    /// documents are written relative to `root` where possible.
    pub fn relative_to(&self, root: &Url) -> String {
        let root = document_url(root);
        if self.document == root {
            return self.pointer.to_fragment();
        }
        let document = root
            .make_relative(&self.document)
            .filter(|relative| !relative.is_empty())
            .unwrap_or_else(|| self.document.to_string());
        if self.pointer.is_root() {
            document
        } else {
            format!("{}{}", document, self.pointer.to_fragment())
        }
    }
}

impl fmt::Display for CanonicalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.document, self.pointer.to_fragment())
    }
}
