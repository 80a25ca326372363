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

//! Expansion options

use crate::cache::ReferenceCache;
use crate::cancel::Cancellation;
use crate::loader::{DefaultLoader, LoadPolicy, PolicyLoader, ResourceLoader};
use serde::Serialize;
use specref_core::{CollectionKind, Limits, Node, Pointer, RootContainers, SpecResult};
use std::fmt;
use std::sync::Arc;

/// Which part of the document to expand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    /// The whole document.
    #[default]
    Document,
    /// The subtree at a pointer.
    Pointer(Pointer),
    /// One entry of a reusable-definition collection.
    Component { kind: CollectionKind, name: String },
}

impl Scope {
    /// The pointer of the scoped subtree.
    pub fn pointer(&self, containers: &RootContainers) -> SpecResult<Pointer> {
        match self {
            Self::Document => Ok(Pointer::root()),
            Self::Pointer(pointer) => Ok(pointer.clone()),
            Self::Component { kind, name } => containers.pointer_for(*kind, name),
        }
    }
}

/// Options for [`expand`](crate::expand).
#[derive(Clone, Default)]
pub struct ExpandOptions {
    /// Replace the scoped subtree of the input instead of returning a copy.
    pub destructive: bool,
    /// Part of the document to expand.
    pub scope: Scope,
    /// Loader for external documents (default: [`DefaultLoader`]).
    pub loader: Option<Arc<dyn ResourceLoader>>,
    /// Shared cache; a fresh cache is used per call when unset.
    pub cache: Option<ReferenceCache>,
    /// Which documents may be fetched.
    pub policy: LoadPolicy,
    /// Resource limits.
    pub limits: Limits,
    /// Cancellation token checked before loads and resolutions.
    pub cancellation: Cancellation,
    /// Load every referenced external document in parallel before expanding.
    pub prefetch: bool,
}

impl fmt::Debug for ExpandOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandOptions")
            .field("destructive", &self.destructive)
            .field("scope", &self.scope)
            .field("loader", &self.loader.as_ref().map(|_| "<custom>"))
            .field("cache", &self.cache)
            .field("policy", &self.policy)
            .field("limits", &self.limits)
            .field("cancellation", &self.cancellation)
            .field("prefetch", &self.prefetch)
            .finish()
    }
}

impl ExpandOptions {
    /// Creates a new builder for `ExpandOptions`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use specref_core::CollectionKind;
    /// use specref_expand::{ExpandOptions, LoadPolicy, Scope};
    ///
    /// let options = ExpandOptions::builder()
    ///     .scope(Scope::Component { kind: CollectionKind::Schemas, name: "Pet".into() })
    ///     .policy(LoadPolicy::LocalOnly)
    ///     .build();
    /// assert!(!options.destructive);
    /// ```
    pub fn builder() -> ExpandOptionsBuilder {
        ExpandOptionsBuilder::default()
    }

    /// The loader an expansion actually uses: the configured one (or the
    /// default) behind the configured policy.
    pub fn effective_loader(&self) -> Arc<dyn ResourceLoader> {
        let inner: Arc<dyn ResourceLoader> = match &self.loader {
            Some(loader) => Arc::clone(loader),
            None => Arc::new(DefaultLoader::new(self.limits.max_document_size)),
        };
        Arc::new(PolicyLoader::new(inner, self.policy))
    }
}

/// Builder for `ExpandOptions`.
#[derive(Default)]
pub struct ExpandOptionsBuilder {
    options: ExpandOptions,
}

impl ExpandOptionsBuilder {
    /// Update the input in place.
    pub fn destructive(mut self, destructive: bool) -> Self {
        self.options.destructive = destructive;
        self
    }

    /// Sets the scope.
    pub fn scope(mut self, scope: Scope) -> Self {
        self.options.scope = scope;
        self
    }

    /// Sets the loader.
    pub fn loader(mut self, loader: Arc<dyn ResourceLoader>) -> Self {
        self.options.loader = Some(loader);
        self
    }

    /// Sets a shared cache.
    pub fn cache(mut self, cache: ReferenceCache) -> Self {
        self.options.cache = Some(cache);
        self
    }

    /// Sets the load policy.
    pub fn policy(mut self, policy: LoadPolicy) -> Self {
        self.options.policy = policy;
        self
    }

    /// Sets the limits.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.options.limits = limits;
        self
    }

    /// Sets the cancellation token.
    pub fn cancellation(mut self, cancellation: Cancellation) -> Self {
        self.options.cancellation = cancellation;
        self
    }

    /// Enables or disables parallel prefetching.
    pub fn prefetch(mut self, prefetch: bool) -> Self {
        self.options.prefetch = prefetch;
        self
    }

    /// Builds the options.
    pub fn build(self) -> ExpandOptions {
        self.options
    }
}

/// Counters reported by an expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExpandStats {
    /// References replaced by their targets.
    pub references_expanded: usize,
    /// References kept because they close a cycle.
    pub cycles_preserved: usize,
    /// External documents fetched through the loader.
    pub documents_loaded: usize,
}

/// Result of an expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct Expanded {
    /// The expanded subtree, or `None` when the input was updated in place.
    pub tree: Option<Node>,
    /// Counters for this call.
    pub stats: ExpandStats,
}
