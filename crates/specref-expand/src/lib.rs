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

//! Specref Expand
//!
//! Cycle-safe `$ref` resolution and expansion for OpenAPI and Swagger
//! documents.
//!
//! # Overview
//!
//! [`expand`] walks a node tree (or a scoped part of it) and replaces every
//! reference with an expanded copy of its target. Targets may live in the
//! same document or in external JSON/YAML documents, which are fetched
//! through a pluggable [`ResourceLoader`] and kept in a [`ReferenceCache`].
//!
//! A reference whose target is already being expanded further up is kept
//! unexpanded, so recursive schemas produce a finite tree. References kept
//! this way are rewritten relative to the root document when they came from
//! an external one.
//!
//! # Example
//!
//! ```rust
//! use specref_core::RootContainers;
//! use specref_expand::{expand, ExpandOptions, LoadPolicy};
//! use specref_json::{from_json, FromJsonConfig};
//!
//! let json = r##"{
//!     "openapi": "3.0.3",
//!     "paths": {},
//!     "components": {"schemas": {
//!         "Pet": {"type": "object", "properties": {"tag": {"$ref": "#/components/schemas/Tag"}}},
//!         "Tag": {"type": "string"}
//!     }}
//! }"##;
//! let mut tree = from_json(json, &FromJsonConfig::default()).unwrap();
//! let containers = RootContainers::detect(&tree);
//! let options = ExpandOptions::builder().policy(LoadPolicy::Offline).build();
//!
//! let expanded = expand(&mut tree, "/specs/petstore.json", &containers, &options).unwrap();
//! assert_eq!(expanded.stats.references_expanded, 1);
//! ```

mod cache;
mod cancel;
mod context;
mod expander;
pub mod loader;
mod options;
mod prefetch;
pub mod uri;

pub use cache::{CacheStatistics, ReferenceCache};
pub use cancel::Cancellation;
pub use expander::expand;
pub use loader::{
    DefaultLoader, DocumentFormat, FsLoader, LoadPolicy, MemoryLoader, PolicyLoader,
    ResourceLoader, RetryLoader,
};
#[cfg(feature = "remote")]
pub use loader::{HttpLoader, HttpLoaderConfig};
pub use options::{ExpandOptions, ExpandOptionsBuilder, ExpandStats, Expanded, Scope};
pub use prefetch::prefetch;
pub use uri::CanonicalRef;
