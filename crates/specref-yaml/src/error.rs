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

//! Error types for YAML conversion operations.

use specref_core::SpecError;
use specref_json::JsonError;
use thiserror::Error;

/// Errors that can occur during YAML conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum YamlError {
    /// YAML parsing failed
    #[error("YAML parse error: {0}")]
    ParseError(String),

    /// Mapping key that cannot be represented as a string
    #[error("Non-string keys not supported, found {key_type} at path {path}")]
    NonStringKey { key_type: String, path: String },

    /// Maximum nesting depth exceeded
    #[error("Maximum nesting depth of {max_depth} exceeded")]
    MaxDepthExceeded { max_depth: usize },

    /// Document too large
    #[error("Document size {size} bytes exceeds maximum of {max_size} bytes")]
    DocumentTooLarge { size: usize, max_size: usize },

    /// Generic conversion error
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Serialization failed
    #[error("YAML serialization error: {0}")]
    Serialize(String),
}

impl From<serde_yaml::Error> for YamlError {
    fn from(err: serde_yaml::Error) -> Self {
        YamlError::ParseError(err.to_string())
    }
}

impl From<JsonError> for YamlError {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::MaxDepthExceeded(max_depth) => YamlError::MaxDepthExceeded { max_depth },
            other => YamlError::Conversion(other.to_string()),
        }
    }
}

impl From<YamlError> for SpecError {
    fn from(err: YamlError) -> Self {
        SpecError::load(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = YamlError::ParseError("invalid syntax".to_string());
        assert_eq!(err.to_string(), "YAML parse error: invalid syntax");
    }

    #[test]
    fn test_non_string_key_display() {
        let err = YamlError::NonStringKey {
            key_type: "sequence".to_string(),
            path: "paths".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Non-string keys not supported, found sequence at path paths"
        );
    }

    #[test]
    fn test_from_json_depth_error() {
        let err: YamlError = JsonError::MaxDepthExceeded(5).into();
        assert_eq!(err, YamlError::MaxDepthExceeded { max_depth: 5 });
    }

    #[test]
    fn test_into_spec_error() {
        let err: SpecError = YamlError::DocumentTooLarge { size: 10, max_size: 5 }.into();
        assert!(err.is_load_error());
        assert!(err.message.contains("10 bytes"));
    }
}
