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

//! HTTP loader (feature `remote`)

use super::{parse_document, DocumentFormat, ResourceLoader};
use crate::cancel::Cancellation;
use specref_core::{Node, SpecError, SpecResult, DEFAULT_MAX_DOCUMENT_SIZE};
use std::io::Read;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`HttpLoader`].
#[derive(Debug, Clone)]
pub struct HttpLoaderConfig {
    /// Per-request timeout (default: 30s). Capped by the cancellation deadline.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Maximum response body size in bytes (default: 64MB).
    pub max_document_size: usize,
}

impl Default for HttpLoaderConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("specref/", env!("CARGO_PKG_VERSION")).to_string(),
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
        }
    }
}

/// Fetches `http:` and `https:` URLs with a blocking client.
#[derive(Debug)]
pub struct HttpLoader {
    client: reqwest::blocking::Client,
    config: HttpLoaderConfig,
}

impl HttpLoader {
    /// Create a loader with the given configuration.
    ///
    /// Fails with a `Load` error when the HTTP client cannot be built, e.g.
    /// when the TLS backend fails to initialize.
    pub fn new(config: HttpLoaderConfig) -> SpecResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SpecError::load(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &HttpLoaderConfig {
        &self.config
    }
}

impl ResourceLoader for HttpLoader {
    fn load(&self, uri: &Url, cancel: &Cancellation) -> SpecResult<Node> {
        cancel.check(uri.as_str())?;
        if !matches!(uri.scheme(), "http" | "https") {
            return Err(SpecError::load_forbidden(format!(
                "HTTP loader cannot fetch '{}' URLs",
                uri.scheme()
            ))
            .with_uri(uri.as_str()));
        }

        let timeout = match cancel.remaining() {
            Some(remaining) => remaining.min(self.config.timeout),
            None => self.config.timeout,
        };
        let load_error = |e: reqwest::Error| SpecError::load(e.to_string()).with_uri(uri.as_str());

        debug!("Fetching {} (timeout {:?})", uri, timeout);
        let response = self
            .client
            .get(uri.clone())
            .timeout(timeout)
            .send()
            .map_err(load_error)?
            .error_for_status()
            .map_err(load_error)?;

        if let Some(length) = response.content_length() {
            if length > self.config.max_document_size as u64 {
                return Err(SpecError::limit(format!(
                    "response of {} bytes exceeds limit of {} bytes",
                    length, self.config.max_document_size
                ))
                .with_uri(uri.as_str()));
            }
        }
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"));
        let body = read_body(response, self.config.max_document_size)
            .map_err(|e| e.or_uri(uri.as_str()))?;
        cancel.check(uri.as_str())?;

        let format = match DocumentFormat::from_path(uri.path()) {
            Some(format) => format,
            None if is_json => DocumentFormat::Json,
            None => DocumentFormat::sniff(&body),
        };
        debug!("Fetched {} ({} bytes, {:?})", uri, body.len(), format);
        parse_document(&body, format, self.config.max_document_size).map_err(|e| e.or_uri(uri.as_str()))
    }
}

/// Read at most `limit` bytes of a response body.
///
/// Chunked responses carry no `Content-Length`, so the limit is enforced
/// while reading.
fn read_body(reader: impl Read, limit: usize) -> SpecResult<String> {
    let mut body = Vec::new();
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut body)?;
    if body.len() > limit {
        return Err(SpecError::limit(format!(
            "response body exceeds limit of {} bytes",
            limit
        )));
    }
    String::from_utf8(body).map_err(|e| SpecError::load(format!("response is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use specref_core::SpecErrorKind;

    fn loader() -> HttpLoader {
        HttpLoader::new(HttpLoaderConfig::default()).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = HttpLoaderConfig::default();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.user_agent.starts_with("specref/"));
    }

    #[test]
    fn test_file_url_forbidden() {
        let uri = Url::parse("file:///a.json").unwrap();
        let err = loader().load(&uri, &Cancellation::new()).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::LoadForbidden);
    }

    #[test]
    fn test_new_keeps_user_agent() {
        let config = HttpLoaderConfig {
            user_agent: "api-tools/2.1".to_string(),
            ..HttpLoaderConfig::default()
        };
        let loader = HttpLoader::new(config).unwrap();
        assert_eq!(loader.config().user_agent, "api-tools/2.1");
    }

    // ==================== Body limit tests ====================

    #[test]
    fn test_read_body_within_limit() {
        let body = read_body(&b"{\"openapi\": \"3.0.3\"}"[..], 64).unwrap();
        assert_eq!(body, "{\"openapi\": \"3.0.3\"}");
    }

    #[test]
    fn test_read_body_exactly_at_limit() {
        assert_eq!(read_body(&b"abcd"[..], 4).unwrap(), "abcd");
    }

    #[test]
    fn test_read_body_over_limit_without_length() {
        // A reader of unknown length, as a chunked response is
        let chunked = std::io::repeat(b' ').take(10_000);
        let err = read_body(chunked, 1024).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::Limit);
    }

    #[test]
    fn test_read_body_invalid_utf8() {
        let err = read_body(&[0xff, 0xfe][..], 16).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::Load);
    }

    #[test]
    fn test_cancelled_before_request() {
        let token = Cancellation::new();
        token.cancel();
        let uri = Url::parse("https://example.com/a.json").unwrap();
        let err = loader().load(&uri, &token).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::Cancelled);
    }
}
