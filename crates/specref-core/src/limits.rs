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

//! Resource limits for loading and expansion.

/// Default maximum nesting of expanded references.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default maximum number of external documents per cache.
pub const DEFAULT_MAX_DOCUMENTS: usize = 1000;

/// Default maximum size of a single loaded document (64 MB).
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 64 * 1024 * 1024;

/// Default maximum number of references chased to resolve one pointer.
pub const DEFAULT_MAX_REFERENCE_HOPS: usize = 64;

/// Configurable limits for reference expansion.
///
/// These bound the work a hostile or broken document set can cause: deep
/// chains of non-cyclic references, huge fan-out to external documents, or
/// oversized payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum depth of nested reference expansion (default: 512).
    pub max_depth: usize,
    /// Maximum number of documents held in one cache (default: 1000).
    pub max_documents: usize,
    /// Maximum document size in bytes (default: 64MB).
    pub max_document_size: usize,
    /// Maximum references followed while resolving a single pointer (default: 64).
    ///
    /// Only pointers that pass through other references count hops, e.g.
    /// `#/components/schemas/Alias/properties/id` where `Alias` is itself a
    /// `$ref`.
    pub max_reference_hops: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_documents: DEFAULT_MAX_DOCUMENTS,
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            max_reference_hops: DEFAULT_MAX_REFERENCE_HOPS,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            max_documents: usize::MAX,
            max_document_size: usize::MAX,
            max_reference_hops: usize::MAX,
        }
    }
}
