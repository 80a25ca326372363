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

//! # Specref - OpenAPI document model and reference resolution
//!
//! Specref parses OpenAPI 3 and Swagger 2.0 documents (JSON or YAML) into a
//! typed node tree, resolves JSON pointers against it and expands `$ref`
//! references across documents without looping on recursive schemas.
//!
//! ## Quick Start
//!
//! ```rust
//! use specref::{expand, resolve_pointer, ExpandOptions, LoadPolicy, RootContainers};
//! use specref::json::{from_json, FromJsonConfig};
//!
//! let json = r##"{
//!     "openapi": "3.0.3",
//!     "paths": {"/pets": {"get": {"responses": {"200": {"$ref": "#/components/responses/Pets"}}}}},
//!     "components": {"responses": {"Pets": {"description": "pets"}}}
//! }"##;
//! let mut doc = from_json(json, &FromJsonConfig::default()).unwrap();
//! let containers = RootContainers::detect(&doc);
//!
//! let options = ExpandOptions::builder().destructive(true).policy(LoadPolicy::Offline).build();
//! expand(&mut doc, "/specs/petstore.json", &containers, &options).unwrap();
//!
//! let ok = resolve_pointer(&doc, "/paths/~1pets/get/responses/200/description").unwrap();
//! assert_eq!(ok.as_str(), Some("pets"));
//! ```
//!
//! ## Modules
//!
//! - [`json`]: JSON conversion
//! - [`yaml`]: YAML conversion
//! - [`loader`]: resource loaders and load policies
//! - [`uri`]: canonical reference URIs
//! - [`traverse`]: tree visitors

// Re-export core types
pub use specref_core::{
    // Pointers
    escape_token,
    lookup,
    resolve,
    resolve_mut,
    resolve_pointer,
    unescape_token,
    // Shapes
    AttributeGroup,
    // Containers
    Collection,
    CollectionKind,
    FieldSpec,
    // Model
    Fields,
    // Limits
    Limits,
    Lookup,
    Node,
    NodeKind,
    ObjectNode,
    Pointer,
    Reference,
    RootContainers,
    Scalar,
    Shape,
    // Errors
    SpecError,
    SpecErrorKind,
    SpecResult,
    SpecVersion,
};

// Re-export expansion
pub use specref_expand::{
    expand, prefetch, CacheStatistics, Cancellation, CanonicalRef, ExpandOptions,
    ExpandOptionsBuilder, ExpandStats, Expanded, LoadPolicy, ReferenceCache, ResourceLoader,
    Scope,
};

// Error handling extensions
mod error_ext;
pub use error_ext::SpecResultExt;

pub mod traverse {
    //! Tree visitors
    pub use specref_core::traverse::*;
}

pub mod json {
    //! JSON conversion utilities
    pub use specref_json::{
        from_json, from_json_value, from_json_value_with_shape, to_json, to_json_value,
        FromJsonConfig, FromJsonConfigBuilder, JsonError, ToJsonConfig,
    };
}

pub mod yaml {
    //! YAML conversion utilities
    pub use specref_yaml::{
        from_yaml, from_yaml_value, to_yaml, to_yaml_value, FromYamlConfig,
        FromYamlConfigBuilder, YamlError,
    };
}

pub mod loader {
    //! Resource loaders
    #[cfg(feature = "remote")]
    pub use specref_expand::loader::{HttpLoader, HttpLoaderConfig};
    pub use specref_expand::loader::{
        parse_document, DefaultLoader, DocumentFormat, FsLoader, LoadPolicy, MemoryLoader,
        PolicyLoader, ResourceLoader, RetryLoader,
    };
}

pub mod uri {
    //! Canonical reference URIs
    pub use specref_expand::uri::{base_url, document_url, join, CanonicalRef};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Convenience functions at crate root

/// Load a document from a file path or URL.
///
/// The document is fetched through the loader configured in `options`
/// (by default the file system, plus HTTP with the `remote` feature),
/// subject to the configured load policy and cancellation token.
///
/// # Examples
///
/// ```rust,no_run
/// use specref::{load_document, ExpandOptions};
///
/// let doc = load_document("specs/petstore.yaml", &ExpandOptions::default()).unwrap();
/// ```
pub fn load_document(path_or_url: &str, options: &ExpandOptions) -> SpecResult<Node> {
    let uri = uri::base_url(path_or_url)?;
    options
        .effective_loader()
        .load(&uri, &options.cancellation)
        .map_err(|e| e.or_uri(uri.as_str()))
}

/// Load a document and expand it.
///
/// The root-container layout is detected from the document. The scope,
/// limits and loader settings of `options` apply; the expanded scope is
/// written into the loaded document, which is returned with the statistics.
pub fn expand_document(path_or_url: &str, options: &ExpandOptions) -> SpecResult<(Node, ExpandStats)> {
    let mut doc = load_document(path_or_url, options)?;
    let containers = RootContainers::detect(&doc);
    let options = ExpandOptions {
        destructive: true,
        ..options.clone()
    };
    let expanded = expand(&mut doc, path_or_url, &containers, &options)?;
    Ok((doc, expanded.stats))
}
