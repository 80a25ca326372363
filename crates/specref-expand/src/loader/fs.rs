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

//! Local file loader

use super::{parse_document, DocumentFormat, ResourceLoader};
use crate::cancel::Cancellation;
use specref_core::{Node, SpecError, SpecResult, DEFAULT_MAX_DOCUMENT_SIZE};
use tracing::debug;
use url::Url;

/// Reads `file:` URLs from the local filesystem.
///
/// JSON or YAML is picked by file extension, falling back to content
/// sniffing for extensionless files.
#[derive(Debug, Clone)]
pub struct FsLoader {
    max_document_size: usize,
}

impl Default for FsLoader {
    fn default() -> Self {
        Self {
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
        }
    }
}

impl FsLoader {
    /// Create a loader with the default size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum file size in bytes.
    pub fn max_document_size(mut self, size: usize) -> Self {
        self.max_document_size = size;
        self
    }
}

impl ResourceLoader for FsLoader {
    fn load(&self, uri: &Url, cancel: &Cancellation) -> SpecResult<Node> {
        cancel.check(uri.as_str())?;
        if uri.scheme() != "file" {
            return Err(SpecError::load_forbidden(format!(
                "file loader cannot fetch '{}' URLs",
                uri.scheme()
            ))
            .with_uri(uri.as_str()));
        }
        let path = uri.to_file_path().map_err(|_| {
            SpecError::load("URL does not name a local file").with_uri(uri.as_str())
        })?;

        let metadata = std::fs::metadata(&path)
            .map_err(|e| SpecError::load(e.to_string()).with_uri(uri.as_str()))?;
        if metadata.len() > self.max_document_size as u64 {
            return Err(SpecError::limit(format!(
                "file of {} bytes exceeds limit of {} bytes",
                metadata.len(),
                self.max_document_size
            ))
            .with_uri(uri.as_str()));
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| SpecError::load(e.to_string()).with_uri(uri.as_str()))?;
        let format = DocumentFormat::detect(uri.path(), &content);
        debug!("Loaded {} ({} bytes, {:?})", uri, content.len(), format);

        parse_document(&content, format, self.max_document_size).map_err(|e| e.or_uri(uri.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specref_core::SpecErrorKind;
    use std::io::Write;

    fn file_url(path: &std::path::Path) -> Url {
        Url::from_file_path(path).unwrap()
    }

    #[test]
    fn test_load_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("a.json");
        let yaml = dir.path().join("a.yaml");
        std::fs::write(&json, r#"{"type": "string"}"#).unwrap();
        std::fs::write(&yaml, "type: string\n").unwrap();

        let loader = FsLoader::new();
        let a = loader.load(&file_url(&json), &Cancellation::new()).unwrap();
        let b = loader.load(&file_url(&yaml), &Cancellation::new()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_extensionless_file_is_sniffed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"a\": [1, 2]}}").unwrap();
        let node = FsLoader::new()
            .load(&file_url(file.path()), &Cancellation::new())
            .unwrap();
        assert_eq!(node.get("a").and_then(Node::as_array).map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let uri = file_url(&dir.path().join("missing.json"));
        let err = FsLoader::new().load(&uri, &Cancellation::new()).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::Load);
        assert_eq!(err.uri.as_deref(), Some(uri.as_str()));
    }

    #[test]
    fn test_parse_error_carries_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{").unwrap();
        let uri = file_url(&path);
        let err = FsLoader::new().load(&uri, &Cancellation::new()).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::Load);
        assert_eq!(err.uri.as_deref(), Some(uri.as_str()));
    }

    #[test]
    fn test_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.json");
        std::fs::write(&path, r#"{"description": "0123456789"}"#).unwrap();
        let err = FsLoader::new()
            .max_document_size(8)
            .load(&file_url(&path), &Cancellation::new())
            .unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::Limit);
    }

    #[test]
    fn test_http_url_forbidden() {
        let uri = Url::parse("https://example.com/a.json").unwrap();
        let err = FsLoader::new().load(&uri, &Cancellation::new()).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::LoadForbidden);
    }

    #[test]
    fn test_cancelled_before_read() {
        let token = Cancellation::new();
        token.cancel();
        let uri = Url::parse("file:///does/not/matter.json").unwrap();
        let err = FsLoader::new().load(&uri, &token).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::Cancelled);
    }
}
