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

//! JSON to node tree conversion

use crate::infer::Slot;
use serde_json::{Map, Number, Value as JsonValue};
use specref_core::{Fields, Node, ObjectNode, Reference, Scalar, Shape, SpecError, REF_KEY};
use thiserror::Error;

/// Default maximum nesting depth of the input.
pub const DEFAULT_MAX_DEPTH: usize = 1_000;

/// Default maximum input size in bytes (64 MB).
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 64 * 1024 * 1024;

/// Errors that can occur during JSON conversion
#[derive(Debug, Error, Clone, PartialEq)]
pub enum JsonError {
    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    Parse(String),

    /// Maximum nesting depth exceeded
    #[error("Maximum nesting depth ({0}) exceeded")]
    MaxDepthExceeded(usize),

    /// Input larger than the configured limit
    #[error("Document of {size} bytes exceeds the limit of {limit} bytes")]
    DocumentTooLarge { size: usize, limit: usize },

    /// Serialization failed
    #[error("JSON serialization error: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for JsonError {
    fn from(err: serde_json::Error) -> Self {
        JsonError::Parse(err.to_string())
    }
}

impl From<JsonError> for SpecError {
    fn from(err: JsonError) -> Self {
        SpecError::load(err.to_string())
    }
}

/// Configuration for JSON import
///
/// # Examples
///
/// ```text
/// use specref_json::FromJsonConfig;
///
/// let config = FromJsonConfig::builder()
///     .max_depth(200)
///     .infer_shapes(false)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct FromJsonConfig {
    /// Maximum nesting depth (default: 1,000).
    ///
    /// Set to `None` to disable (not recommended for untrusted input).
    pub max_depth: Option<usize>,

    /// Maximum input size in bytes (default: 64 MB).
    ///
    /// Only checked when converting from text.
    pub max_document_size: Option<usize>,

    /// Assign shapes to objects by their position (default: true).
    ///
    /// When disabled every object is `Generic`.
    pub infer_shapes: bool,
}

impl Default for FromJsonConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_document_size: Some(DEFAULT_MAX_DOCUMENT_SIZE),
            infer_shapes: true,
        }
    }
}

impl FromJsonConfig {
    /// Create a new builder for configuring JSON import
    pub fn builder() -> FromJsonConfigBuilder {
        FromJsonConfigBuilder::default()
    }
}

/// Builder for `FromJsonConfig`
#[derive(Debug, Clone, Default)]
pub struct FromJsonConfigBuilder {
    config: FromJsonConfig,
}

impl FromJsonConfigBuilder {
    /// Set the maximum nesting depth
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.config.max_depth = Some(limit);
        self
    }

    /// Set the maximum input size in bytes
    pub fn max_document_size(mut self, limit: usize) -> Self {
        self.config.max_document_size = Some(limit);
        self
    }

    /// Enable or disable positional shape inference
    pub fn infer_shapes(mut self, enabled: bool) -> Self {
        self.config.infer_shapes = enabled;
        self
    }

    /// Disable all limits (use with caution - only for trusted input)
    pub fn unlimited(mut self) -> Self {
        self.config.max_depth = None;
        self.config.max_document_size = None;
        self
    }

    /// Build the configuration
    pub fn build(self) -> FromJsonConfig {
        self.config
    }
}

/// Parse a JSON document into a node tree.
///
/// # Examples
///
/// ```text
/// use specref_json::{from_json, FromJsonConfig};
///
/// let json = r#"{"openapi": "3.0.3", "paths": {}}"#;
/// let tree = from_json(json, &FromJsonConfig::default()).unwrap();
/// ```
pub fn from_json(json: &str, config: &FromJsonConfig) -> Result<Node, JsonError> {
    if let Some(limit) = config.max_document_size {
        if json.len() > limit {
            return Err(JsonError::DocumentTooLarge {
                size: json.len(),
                limit,
            });
        }
    }
    let value: JsonValue = serde_json::from_str(json)?;
    from_json_value(&value, config)
}

/// Convert a parsed JSON value into a node tree, treating it as a document
/// root.
pub fn from_json_value(value: &JsonValue, config: &FromJsonConfig) -> Result<Node, JsonError> {
    node_from_value(value, Slot::Root, config, 0)
}

/// Convert a JSON value known to be an object of `shape`.
///
/// Used for fragments that are not whole documents.
pub fn from_json_value_with_shape(
    value: &JsonValue,
    shape: Shape,
    config: &FromJsonConfig,
) -> Result<Node, JsonError> {
    node_from_value(value, Slot::Value(shape), config, 0)
}

fn node_from_value(
    value: &JsonValue,
    slot: Slot,
    config: &FromJsonConfig,
    depth: usize,
) -> Result<Node, JsonError> {
    if let Some(max_depth) = config.max_depth {
        if depth > max_depth {
            return Err(JsonError::MaxDepthExceeded(max_depth));
        }
    }

    match value {
        JsonValue::Null => Ok(Node::Scalar(Scalar::Null)),
        JsonValue::Bool(b) => Ok(Node::Scalar(Scalar::Bool(*b))),
        JsonValue::Number(n) => Ok(Node::Scalar(number_to_scalar(n))),
        JsonValue::String(s) => Ok(Node::Scalar(Scalar::String(s.clone()))),
        JsonValue::Array(items) => {
            let mut nodes = Vec::with_capacity(items.len());
            for item in items {
                nodes.push(node_from_value(item, slot.item(), config, depth + 1)?);
            }
            Ok(Node::Array(nodes))
        }
        JsonValue::Object(map) => object_from_map(map, slot, config, depth),
    }
}

fn object_from_map(
    map: &Map<String, JsonValue>,
    slot: Slot,
    config: &FromJsonConfig,
    depth: usize,
) -> Result<Node, JsonError> {
    // Example payloads may contain `$ref` keys of their own
    let target = map.get(REF_KEY).filter(|_| slot != Slot::Literal);
    if let Some(JsonValue::String(target)) = target {
        let mut siblings = Fields::new();
        for (key, value) in map.iter().filter(|(k, _)| k.as_str() != REF_KEY) {
            siblings.insert(key.clone(), node_from_value(value, Slot::Any, config, depth + 1)?);
        }
        return Ok(Node::Reference(
            Reference::new(target.clone()).with_siblings(siblings),
        ));
    }

    let shape = if config.infer_shapes { slot.shape() } else { Shape::Generic };
    let mut object = ObjectNode::new(shape);
    for (key, value) in map {
        let child = node_from_value(value, slot.member(key), config, depth + 1)?;
        object.insert_wire(key.clone(), child);
    }
    Ok(Node::Object(object))
}

fn number_to_scalar(n: &Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Integer(i)
    } else {
        Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}
