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

//! Document cache shared across expansions
//!
//! Loaded documents are stored once per canonical document URL. A cache may
//! be handed to several expansion calls, including concurrent ones, so the
//! same external file is loaded at most once for all of them.
//!
//! # Thread Safety
//!
//! All state sits behind a single `parking_lot::Mutex`. Loads run while the
//! lock is held, which serializes them but guarantees that two callers
//! asking for the same document never both hit the loader. The prefetcher
//! avoids that serialization by loading in parallel and inserting afterwards.

use crate::cancel::Cancellation;
use crate::loader::ResourceLoader;
use parking_lot::Mutex;
use serde::Serialize;
use specref_core::{Node, SpecError, SpecResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};
use url::Url;

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStatistics {
    /// Number of lookups answered from the cache
    pub hits: u64,
    /// Number of lookups that missed
    pub misses: u64,
    /// Number of documents fetched through a loader
    pub loads: u64,
    /// Current number of cached documents
    pub size: usize,
}

impl CacheStatistics {
    /// Calculate cache hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Calculate cache miss rate (0.0 to 1.0)
    pub fn miss_rate(&self) -> f64 {
        1.0 - self.hit_rate()
    }
}

/// Thread-safe document cache.
///
/// Cloning the cache yields another handle to the same storage.
///
/// # Examples
///
/// ```rust
/// use specref_core::Node;
/// use specref_expand::ReferenceCache;
/// use url::Url;
///
/// let cache = ReferenceCache::new();
/// let uri = Url::parse("https://example.com/pet.json").unwrap();
/// cache.insert(uri.clone(), Node::string("pet"));
///
/// assert!(cache.get(&uri).is_some());
/// println!("Hit rate: {:.2}%", cache.statistics().hit_rate() * 100.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReferenceCache {
    inner: Arc<Mutex<CacheInner>>,
}

#[derive(Debug, Default)]
struct CacheInner {
    documents: HashMap<Url, Arc<Node>>,
    stats: CacheStatistics,
}

impl CacheInner {
    fn store(&mut self, uri: Url, document: Arc<Node>) {
        self.documents.insert(uri, document);
        self.stats.size = self.documents.len();
    }
}

impl ReferenceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a document, counting a hit or a miss.
    pub fn get(&self, uri: &Url) -> Option<Arc<Node>> {
        let mut inner = self.inner.lock();
        match inner.documents.get(uri).cloned() {
            Some(document) => {
                inner.stats.hits += 1;
                Some(document)
            }
            None => {
                inner.stats.misses += 1;
                None
            }
        }
    }

    /// Look up a document without touching the statistics.
    pub fn peek(&self, uri: &Url) -> Option<Arc<Node>> {
        self.inner.lock().documents.get(uri).cloned()
    }

    /// Whether a document is cached.
    pub fn contains(&self, uri: &Url) -> bool {
        self.inner.lock().documents.contains_key(uri)
    }

    /// Seed the cache with a document, replacing any previous entry.
    pub fn insert(&self, uri: Url, document: Node) {
        self.inner.lock().store(uri, Arc::new(document));
    }

    /// Store a document fetched outside the cache, counting it as a load.
    pub(crate) fn insert_loaded(&self, uri: Url, document: Node) {
        let mut inner = self.inner.lock();
        inner.stats.loads += 1;
        inner.store(uri, Arc::new(document));
    }

    /// Return the cached document or load it through `loader`.
    ///
    /// The second element is `true` when the loader was called. A load that
    /// would grow the cache past `max_documents` fails with a `Limit` error.
    pub fn get_or_load(
        &self,
        uri: &Url,
        loader: &dyn ResourceLoader,
        cancel: &Cancellation,
        max_documents: usize,
    ) -> SpecResult<(Arc<Node>, bool)> {
        let mut inner = self.inner.lock();
        if let Some(document) = inner.documents.get(uri).cloned() {
            inner.stats.hits += 1;
            trace!("Cache hit for {}", uri);
            return Ok((document, false));
        }
        inner.stats.misses += 1;

        if inner.documents.len() >= max_documents {
            return Err(SpecError::limit(format!(
                "loading would exceed the limit of {} documents",
                max_documents
            ))
            .with_uri(uri.as_str()));
        }

        cancel.check(uri.as_str())?;
        debug!("Cache miss for {}, loading", uri);
        let document = Arc::new(loader.load(uri, cancel).map_err(|e| e.or_uri(uri.as_str()))?);
        inner.stats.loads += 1;
        inner.store(uri.clone(), Arc::clone(&document));
        Ok((document, true))
    }

    /// Current statistics.
    pub fn statistics(&self) -> CacheStatistics {
        self.inner.lock().stats.clone()
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.inner.lock().documents.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().documents.is_empty()
    }

    /// Drop all documents and reset the statistics.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.documents.clear();
        inner.stats = CacheStatistics::default();
    }
}
