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

//! Core document model for OpenAPI reference resolution.
//!
//! This crate provides the pieces the expansion engine is built on:
//!
//! - [`Node`]: the generic tree of references, objects, arrays and scalars
//! - [`Shape`]: wire-name tables composed from attribute groups
//! - [`Pointer`]: JSON pointer parsing, escaping and fragment encoding
//! - [`resolve`]/[`lookup`]: pure pointer resolution against a tree
//! - [`RootContainers`]: where reusable definitions live per spec version
//! - [`traverse`]: visitor-based tree walking

mod container;
mod error;
mod limits;
mod node;
mod pointer;
mod resolve;
mod shape;
pub mod traverse;

pub use container::{Collection, CollectionKind, RootContainers, SpecVersion};
pub use error::{SpecError, SpecErrorKind, SpecResult};
pub use limits::{
    Limits, DEFAULT_MAX_DEPTH, DEFAULT_MAX_DOCUMENTS, DEFAULT_MAX_DOCUMENT_SIZE,
    DEFAULT_MAX_REFERENCE_HOPS,
};
pub use node::{is_extension_key, Fields, Node, NodeKind, ObjectNode, Reference, Scalar, EXTENSION_PREFIX, REF_KEY};
pub use pointer::{escape_token, unescape_token, Pointer};
pub use resolve::{lookup, resolve, resolve_mut, resolve_pointer, Lookup};
pub use shape::{AttributeGroup, FieldSpec, Shape};
pub use traverse::{traverse, NodeVisitor, ReferenceCollector, StatsCollector, VisitorContext};
