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

//! Per-call resolution state
//!
//! A [`ResolutionContext`] lives for exactly one expansion. It owns the
//! resolution stack used for cycle detection and borrows everything else:
//! the root tree, the shared cache and the loader.

use crate::cache::ReferenceCache;
use crate::cancel::Cancellation;
use crate::loader::ResourceLoader;
use crate::options::ExpandStats;
use crate::uri::CanonicalRef;
use specref_core::{lookup, Limits, Lookup, Node, Pointer, Reference, SpecError, SpecResult};
use std::sync::Arc;
use tracing::trace;
use url::Url;

/// A location being expanded.
#[derive(Debug, Clone)]
struct Frame {
    document: Url,
    location: Pointer,
}

/// A document the context can read from.
pub(crate) enum DocHandle<'a> {
    Root(&'a Node),
    Cached(Arc<Node>),
}

impl DocHandle<'_> {
    pub(crate) fn node(&self) -> &Node {
        match self {
            Self::Root(node) => *node,
            Self::Cached(node) => node.as_ref(),
        }
    }
}

/// What a reference resolved to.
pub(crate) enum Resolution<'a> {
    /// The target is being expanded further up the stack.
    Cycle(CanonicalRef),
    /// The target exists; `canonical.pointer` addresses it directly inside
    /// `document` without crossing another reference.
    Target {
        canonical: CanonicalRef,
        document: DocHandle<'a>,
    },
}

pub(crate) struct ResolutionContext<'a> {
    root: &'a Node,
    base: Url,
    cache: &'a ReferenceCache,
    loader: &'a dyn ResourceLoader,
    limits: &'a Limits,
    cancel: &'a Cancellation,
    stack: Vec<Frame>,
    pub(crate) stats: ExpandStats,
}

impl<'a> ResolutionContext<'a> {
    pub(crate) fn new(
        root: &'a Node,
        base: Url,
        cache: &'a ReferenceCache,
        loader: &'a dyn ResourceLoader,
        limits: &'a Limits,
        cancel: &'a Cancellation,
        start: Pointer,
    ) -> Self {
        let stack = vec![Frame {
            document: base.clone(),
            location: start,
        }];
        Self {
            root,
            base,
            cache,
            loader,
            limits,
            cancel,
            stack,
            stats: ExpandStats::default(),
        }
    }

    pub(crate) fn base(&self) -> &Url {
        &self.base
    }

    /// Document containing the node currently being expanded.
    pub(crate) fn current_document(&self) -> &Url {
        match self.stack.last() {
            Some(frame) => &frame.document,
            None => &self.base,
        }
    }

    /// Location currently being expanded.
    pub(crate) fn current_location(&self) -> Pointer {
        self.stack
            .last()
            .map(|frame| frame.location.clone())
            .unwrap_or_default()
    }

    pub(crate) fn enter(&mut self, token: &str) {
        if let Some(frame) = self.stack.last_mut() {
            frame.location.push(token);
        }
    }

    pub(crate) fn leave(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.location.pop();
        }
    }

    /// Start expanding a reference target.
    pub(crate) fn push(&mut self, target: &CanonicalRef) -> SpecResult<()> {
        if self.stack.len() > self.limits.max_depth {
            return Err(SpecError::limit(format!(
                "reference nesting exceeds maximum depth of {}",
                self.limits.max_depth
            ))
            .with_uri(target.document.as_str())
            .with_pointer(target.pointer.to_string()));
        }
        self.stack.push(Frame {
            document: target.document.clone(),
            location: target.pointer.clone(),
        });
        Ok(())
    }

    pub(crate) fn pop(&mut self) {
        self.stack.pop();
    }

    /// Whether `target` equals or contains a location currently being expanded.
    fn is_on_stack(&self, target: &CanonicalRef) -> bool {
        self.stack
            .iter()
            .any(|frame| frame.document == target.document && frame.location.starts_with(&target.pointer))
    }

    /// Fetch a document by canonical URL.
    pub(crate) fn document(&mut self, uri: &Url) -> SpecResult<DocHandle<'a>> {
        if *uri == self.base {
            return Ok(DocHandle::Root(self.root));
        }
        let (document, loaded) =
            self.cache
                .get_or_load(uri, self.loader, self.cancel, self.limits.max_documents)?;
        if loaded {
            self.stats.documents_loaded += 1;
        }
        Ok(DocHandle::Cached(document))
    }

    /// Resolve `reference`, found in the document at `containing`.
    ///
    /// Pointers that pass through other references are followed hop by hop,
    /// so the returned pointer always addresses the target directly.
    pub(crate) fn resolve_reference(
        &mut self,
        reference: &Reference,
        containing: &Url,
    ) -> SpecResult<Resolution<'a>> {
        let mut canonical = CanonicalRef::of(reference, containing)?;
        let mut hops = 0;
        loop {
            self.cancel.check(canonical.document.as_str())?;
            if self.is_on_stack(&canonical) {
                trace!("Cycle at {}", canonical);
                return Ok(Resolution::Cycle(canonical));
            }

            let document = self.document(&canonical.document)?;
            let next = match lookup(document.node(), &canonical.pointer)
                .map_err(|e| e.or_uri(canonical.document.as_str()))?
            {
                Lookup::Found(_) => None,
                Lookup::Indirect {
                    reference: inner,
                    consumed,
                } => {
                    let via = CanonicalRef::of(inner, &canonical.document)?;
                    Some(CanonicalRef {
                        document: via.document,
                        pointer: via.pointer.join(&canonical.pointer.suffix(consumed)),
                    })
                }
            };

            match next {
                None => return Ok(Resolution::Target { canonical, document }),
                Some(next) => {
                    hops += 1;
                    if hops > self.limits.max_reference_hops {
                        return Err(SpecError::limit(format!(
                            "more than {} references crossed while resolving '{}'",
                            self.limits.max_reference_hops,
                            reference.target()
                        ))
                        .with_uri(containing.as_str()));
                    }
                    trace!("{} crosses a reference, continuing at {}", canonical, next);
                    canonical = next;
                }
            }
        }
    }
}
