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

//! Resource loading
//!
//! The loader is the only boundary where expansion touches the outside world.
//! Implementations turn a canonical document URL into a parsed node tree;
//! they never see fragments, and "this document" references never reach
//! them.

mod fs;
#[cfg(feature = "remote")]
mod http;
mod memory;
mod policy;
mod retry;

pub use fs::FsLoader;
#[cfg(feature = "remote")]
pub use http::{HttpLoader, HttpLoaderConfig};
pub use memory::MemoryLoader;
pub use policy::{LoadPolicy, PolicyLoader};
pub use retry::RetryLoader;

use crate::cancel::Cancellation;
use specref_core::{Node, SpecError, SpecResult, DEFAULT_MAX_DOCUMENT_SIZE};
use specref_json::FromJsonConfig;
use specref_yaml::FromYamlConfig;
use std::sync::Arc;
use url::Url;

/// Loads documents by canonical URL.
///
/// Implementations must be thread-safe; the prefetcher calls them from a
/// rayon pool.
pub trait ResourceLoader: Send + Sync {
    /// Load and parse the document at `uri`.
    ///
    /// Failures must be reported as errors with a load kind, never as an
    /// empty document.
    fn load(&self, uri: &Url, cancel: &Cancellation) -> SpecResult<Node>;
}

impl<T: ResourceLoader + ?Sized> ResourceLoader for Arc<T> {
    fn load(&self, uri: &Url, cancel: &Cancellation) -> SpecResult<Node> {
        (**self).load(uri, cancel)
    }
}

impl<T: ResourceLoader + ?Sized> ResourceLoader for Box<T> {
    fn load(&self, uri: &Url, cancel: &Cancellation) -> SpecResult<Node> {
        (**self).load(uri, cancel)
    }
}

/// Document text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Format implied by a path or URL path extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = path.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Guess the format from content: JSON documents start with `{` or `[`.
    pub fn sniff(content: &str) -> Self {
        match content.trim_start().as_bytes().first() {
            Some(b'{') | Some(b'[') => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Extension first, content second.
    pub fn detect(path: &str, content: &str) -> Self {
        Self::from_path(path).unwrap_or_else(|| Self::sniff(content))
    }
}

/// Parse document text with size and depth limits applied.
pub fn parse_document(
    content: &str,
    format: DocumentFormat,
    max_document_size: usize,
) -> SpecResult<Node> {
    if content.len() > max_document_size {
        return Err(SpecError::limit(format!(
            "document of {} bytes exceeds limit of {} bytes",
            content.len(),
            max_document_size
        )));
    }
    match format {
        DocumentFormat::Json => {
            let config = FromJsonConfig::builder()
                .max_document_size(max_document_size)
                .build();
            Ok(specref_json::from_json(content, &config)?)
        }
        DocumentFormat::Yaml => {
            let config = FromYamlConfig::builder()
                .max_document_size(max_document_size)
                .build();
            Ok(specref_yaml::from_yaml(content, &config)?)
        }
    }
}

/// The loader used when the caller does not supply one.
///
/// `file:` URLs are read from disk. `http:` and `https:` URLs are fetched
/// when the `remote` feature is enabled and refused otherwise.
#[derive(Debug)]
pub struct DefaultLoader {
    fs: FsLoader,
    // A client that failed to build is reported on the first remote load
    #[cfg(feature = "remote")]
    http: SpecResult<HttpLoader>,
}

impl Default for DefaultLoader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DOCUMENT_SIZE)
    }
}

impl DefaultLoader {
    /// Create a default loader with the given document size limit.
    pub fn new(max_document_size: usize) -> Self {
        Self {
            fs: FsLoader::new().max_document_size(max_document_size),
            #[cfg(feature = "remote")]
            http: HttpLoader::new(HttpLoaderConfig {
                max_document_size,
                ..HttpLoaderConfig::default()
            }),
        }
    }
}

impl ResourceLoader for DefaultLoader {
    fn load(&self, uri: &Url, cancel: &Cancellation) -> SpecResult<Node> {
        match uri.scheme() {
            "file" => self.fs.load(uri, cancel),
            #[cfg(feature = "remote")]
            "http" | "https" => match &self.http {
                Ok(http) => http.load(uri, cancel),
                Err(e) => Err(e.clone().or_uri(uri.as_str())),
            },
            scheme => Err(SpecError::load_forbidden(format!(
                "no loader available for scheme '{}'",
                scheme
            ))
            .with_uri(uri.as_str())),
        }
    }
}
