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

//! In-memory loader for offline use and tests

use super::ResourceLoader;
use crate::cancel::Cancellation;
use crate::uri::document_url;
use parking_lot::Mutex;
use specref_core::{Node, SpecError, SpecResult};
use std::collections::HashMap;
use tracing::trace;
use url::Url;

/// Serves pre-registered documents and counts how often each was requested.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    documents: HashMap<String, Node>,
    calls: Mutex<HashMap<String, usize>>,
}

fn key(uri: &str) -> String {
    match Url::parse(uri) {
        Ok(url) => document_url(&url).to_string(),
        Err(_) => uri.to_string(),
    }
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_document(mut self, uri: &str, document: Node) -> Self {
        self.insert(uri, document);
        self
    }

    /// Register `document` under `uri` (normalized, fragment dropped).
    pub fn insert(&mut self, uri: &str, document: Node) {
        self.documents.insert(key(uri), document);
    }

    /// Number of times `uri` was requested.
    pub fn calls(&self, uri: &str) -> usize {
        self.calls.lock().get(&key(uri)).copied().unwrap_or(0)
    }

    /// Number of requests across all URIs.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

impl ResourceLoader for MemoryLoader {
    fn load(&self, uri: &Url, cancel: &Cancellation) -> SpecResult<Node> {
        cancel.check(uri.as_str())?;
        let key = key(uri.as_str());
        *self.calls.lock().entry(key.clone()).or_insert(0) += 1;
        trace!("Memory load {}", key);
        self.documents
            .get(&key)
            .cloned()
            .ok_or_else(|| SpecError::load("document not registered").with_uri(uri.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specref_core::SpecErrorKind;

    #[test]
    fn test_serves_registered_document() {
        let loader = MemoryLoader::new().with_document("https://example.com/a.json", Node::from(1));
        let uri = Url::parse("https://example.com/a.json").unwrap();
        assert_eq!(loader.load(&uri, &Cancellation::new()).unwrap(), Node::from(1));
        assert_eq!(loader.calls("https://example.com/a.json"), 1);
    }

    #[test]
    fn test_keys_are_normalized() {
        let loader = MemoryLoader::new().with_document("https://example.com/x/../a.json#/ignored", Node::from(1));
        let uri = Url::parse("https://example.com/a.json").unwrap();
        assert!(loader.load(&uri, &Cancellation::new()).is_ok());
    }

    #[test]
    fn test_missing_document_counts_and_fails() {
        let loader = MemoryLoader::new();
        let uri = Url::parse("https://example.com/missing.json").unwrap();
        let err = loader.load(&uri, &Cancellation::new()).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::Load);
        assert_eq!(loader.total_calls(), 1);
    }
}
