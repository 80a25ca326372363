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

//! Parallel prefetching of external documents
//!
//! Walks a tree, collects every external document it references
//! transitively and loads them level by level on the rayon pool. Loads run
//! outside the cache lock; results are inserted once a level completes, so a
//! following expansion never blocks on the loader.

use crate::cache::ReferenceCache;
use crate::cancel::Cancellation;
use crate::loader::ResourceLoader;
use crate::uri::{document_url, join};
use rayon::prelude::*;
use specref_core::{traverse, Limits, Node, ReferenceCollector, SpecError, SpecResult};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Load every external document reachable from `tree` into `cache`.
///
/// Returns the number of documents fetched through `loader`. Documents
/// already cached are not fetched again but their references are followed.
pub fn prefetch(
    tree: &Node,
    base: &Url,
    loader: &dyn ResourceLoader,
    cache: &ReferenceCache,
    limits: &Limits,
    cancel: &Cancellation,
) -> SpecResult<usize> {
    let base = document_url(base);
    let mut seen = HashSet::new();
    seen.insert(base.clone());
    let mut frontier = Vec::new();
    collect_documents(tree, &base, &mut seen, &mut frontier)?;

    let mut loaded = 0;
    while !frontier.is_empty() {
        cancel.check(base.as_str())?;
        let (cached, missing): (Vec<Url>, Vec<Url>) =
            frontier.into_iter().partition(|uri| cache.contains(uri));

        if cache.len() + missing.len() > limits.max_documents {
            return Err(SpecError::limit(format!(
                "prefetch would exceed the limit of {} documents",
                limits.max_documents
            ))
            .with_uri(base.as_str()));
        }

        debug!("Prefetching {} documents ({} already cached)", missing.len(), cached.len());
        let results: Vec<(Url, SpecResult<Node>)> = missing
            .into_par_iter()
            .map(|uri| {
                let result = loader.load(&uri, cancel).map_err(|e| e.or_uri(uri.as_str()));
                (uri, result)
            })
            .collect();

        let mut next = Vec::new();
        for (uri, result) in results {
            let document = result?;
            collect_documents(&document, &uri, &mut seen, &mut next)?;
            cache.insert_loaded(uri, document);
            loaded += 1;
        }
        for uri in cached {
            if let Some(document) = cache.peek(&uri) {
                collect_documents(&document, &uri, &mut seen, &mut next)?;
            }
        }
        frontier = next;
    }
    Ok(loaded)
}

/// Push the not-yet-seen documents referenced from `document` onto `out`.
fn collect_documents(
    document: &Node,
    uri: &Url,
    seen: &mut HashSet<Url>,
    out: &mut Vec<Url>,
) -> SpecResult<()> {
    let mut collector = ReferenceCollector::default();
    if let Err(never) = traverse(document, &mut collector) {
        match never {}
    }
    for target in collector.external_documents() {
        let target = document_url(&join(uri, target)?);
        if seen.insert(target.clone()) {
            out.push(target);
        }
    }
    Ok(())
}
