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

//! YAML to node tree conversion
//!
//! YAML is first normalized into a JSON value and then handed to the JSON
//! adapter, so both formats produce identical trees for identical content.

use crate::error::YamlError;
use serde_json::{Map, Number, Value as JsonValue};
use serde_yaml::Value as YamlValue;
use specref_core::Node;
use specref_json::FromJsonConfig;

/// Default maximum document size (64 MB).
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 64 * 1024 * 1024;

/// Default maximum nesting depth.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 1_000;

/// Configuration for YAML import.
#[derive(Debug, Clone)]
pub struct FromYamlConfig {
    /// Maximum allowed document size in bytes (default: 64 MB)
    pub max_document_size: usize,
    /// Maximum allowed nesting depth (default: 1,000 levels)
    pub max_nesting_depth: usize,
    /// Assign shapes to objects by their position (default: true)
    pub infer_shapes: bool,
}

impl Default for FromYamlConfig {
    fn default() -> Self {
        Self {
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            infer_shapes: true,
        }
    }
}

impl FromYamlConfig {
    /// Creates a new builder for `FromYamlConfig`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use specref_yaml::FromYamlConfig;
    ///
    /// let config = FromYamlConfig::builder()
    ///     .max_document_size(1024 * 1024)
    ///     .max_nesting_depth(64)
    ///     .build();
    /// ```
    pub fn builder() -> FromYamlConfigBuilder {
        FromYamlConfigBuilder::new()
    }

    fn json_config(&self) -> FromJsonConfig {
        FromJsonConfig::builder()
            .max_depth(self.max_nesting_depth)
            .infer_shapes(self.infer_shapes)
            .build()
    }
}

/// Builder for `FromYamlConfig`.
#[derive(Debug, Clone)]
pub struct FromYamlConfigBuilder {
    max_document_size: usize,
    max_nesting_depth: usize,
    infer_shapes: bool,
}

impl FromYamlConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            infer_shapes: true,
        }
    }

    /// Sets the maximum document size in bytes.
    pub fn max_document_size(mut self, size: usize) -> Self {
        self.max_document_size = size;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Enables or disables positional shape inference.
    pub fn infer_shapes(mut self, enabled: bool) -> Self {
        self.infer_shapes = enabled;
        self
    }

    /// Removes all limits (only for trusted input).
    pub fn unlimited(mut self) -> Self {
        self.max_document_size = usize::MAX;
        self.max_nesting_depth = usize::MAX;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> FromYamlConfig {
        FromYamlConfig {
            max_document_size: self.max_document_size,
            max_nesting_depth: self.max_nesting_depth,
            infer_shapes: self.infer_shapes,
        }
    }
}

impl Default for FromYamlConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a YAML document into a node tree.
///
/// # Examples
///
/// ```rust
/// use specref_yaml::{from_yaml, FromYamlConfig};
///
/// let yaml = "openapi: 3.0.3\npaths: {}\n";
/// let tree = from_yaml(yaml, &FromYamlConfig::default()).unwrap();
/// assert_eq!(tree.get("openapi").and_then(|n| n.as_str()), Some("3.0.3"));
/// ```
pub fn from_yaml(yaml: &str, config: &FromYamlConfig) -> Result<Node, YamlError> {
    if yaml.len() > config.max_document_size {
        return Err(YamlError::DocumentTooLarge {
            size: yaml.len(),
            max_size: config.max_document_size,
        });
    }
    let value: YamlValue = serde_yaml::from_str(yaml)?;
    from_yaml_value(&value, config)
}

/// Convert a parsed YAML value into a node tree.
pub fn from_yaml_value(value: &YamlValue, config: &FromYamlConfig) -> Result<Node, YamlError> {
    let json = yaml_to_json(value, "", config, 0)?;
    Ok(specref_json::from_json_value(&json, &config.json_config())?)
}

fn yaml_to_json(
    value: &YamlValue,
    path: &str,
    config: &FromYamlConfig,
    depth: usize,
) -> Result<JsonValue, YamlError> {
    if depth > config.max_nesting_depth {
        return Err(YamlError::MaxDepthExceeded {
            max_depth: config.max_nesting_depth,
        });
    }

    match value {
        YamlValue::Null => Ok(JsonValue::Null),
        YamlValue::Bool(b) => Ok(JsonValue::Bool(*b)),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(JsonValue::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(JsonValue::Number(u.into()))
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                Number::from_f64(f).map(JsonValue::Number).ok_or_else(|| {
                    YamlError::Conversion(format!("non-finite number {} at path {}", n, path))
                })
            }
        }
        YamlValue::String(s) => Ok(JsonValue::String(s.clone())),
        YamlValue::Sequence(seq) => {
            let mut items = Vec::with_capacity(seq.len());
            for (i, item) in seq.iter().enumerate() {
                items.push(yaml_to_json(item, &format!("{}/{}", path, i), config, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        YamlValue::Mapping(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, item) in map {
                let key = key_to_string(key, path)?;
                let child_path = format!("{}/{}", path, key);
                out.insert(key, yaml_to_json(item, &child_path, config, depth + 1)?);
            }
            Ok(JsonValue::Object(out))
        }
        // Tags carry no meaning for API documents
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value, path, config, depth),
    }
}

/// Mapping keys become strings. Numeric and boolean keys (`200:` under
/// `responses`) are written in their canonical text form.
fn key_to_string(key: &YamlValue, path: &str) -> Result<String, YamlError> {
    match key {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Tagged(tagged) => key_to_string(&tagged.value, path),
        other => Err(YamlError::NonStringKey {
            key_type: yaml_type_name(other).to_string(),
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
        }),
    }
}

fn yaml_type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "bool",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specref_core::{resolve_pointer, Scalar, Shape};

    fn parse(yaml: &str) -> Node {
        from_yaml(yaml, &FromYamlConfig::default()).unwrap()
    }

    // ==================== Basic conversion tests ====================

    #[test]
    fn test_scalars() {
        let tree = parse("a: 1\nb: 2.5\nc: true\nd: ~\ne: text\n");
        assert_eq!(tree.get("a"), Some(&Node::from(1)));
        assert_eq!(tree.get("b"), Some(&Node::Scalar(Scalar::Float(2.5))));
        assert_eq!(tree.get("c"), Some(&Node::from(true)));
        assert_eq!(tree.get("d"), Some(&Node::null()));
        assert_eq!(tree.get("e"), Some(&Node::string("text")));
    }

    #[test]
    fn test_numeric_keys_stringified() {
        let yaml = "paths:\n  /pets:\n    get:\n      responses:\n        200:\n          description: ok\n";
        let tree = parse(yaml);
        let ok = resolve_pointer(&tree, "/paths/~1pets/get/responses/200").unwrap();
        assert_eq!(ok.as_object().unwrap().shape, Shape::Response);
    }

    #[test]
    fn test_ref_becomes_reference() {
        let tree = parse("schema:\n  $ref: '#/components/schemas/Pet'\n");
        let r = tree.get("schema").and_then(Node::as_reference).unwrap();
        assert_eq!(r.target(), "#/components/schemas/Pet");
    }

    #[test]
    fn test_anchors_and_aliases() {
        let yaml = "base: &b\n  type: string\ncopy: *b\n";
        let tree = parse(yaml);
        assert_eq!(tree.get("base"), tree.get("copy"));
    }

    // ==================== Error tests ====================

    #[test]
    fn test_sequence_key_rejected() {
        let err = from_yaml("? [a, b]\n: 1\n", &FromYamlConfig::default()).unwrap_err();
        assert!(matches!(err, YamlError::NonStringKey { ref key_type, .. } if key_type == "sequence"));
    }

    #[test]
    fn test_document_too_large() {
        let config = FromYamlConfig::builder().max_document_size(3).build();
        let err = from_yaml("a: 1\n", &config).unwrap_err();
        assert_eq!(err, YamlError::DocumentTooLarge { size: 5, max_size: 3 });
    }

    #[test]
    fn test_max_depth() {
        let config = FromYamlConfig::builder().max_nesting_depth(1).build();
        let err = from_yaml("a:\n  b:\n    c: 1\n", &config).unwrap_err();
        assert_eq!(err, YamlError::MaxDepthExceeded { max_depth: 1 });
    }

    #[test]
    fn test_parse_error() {
        let err = from_yaml("a: [unclosed\n", &FromYamlConfig::default()).unwrap_err();
        assert!(matches!(err, YamlError::ParseError(_)));
    }
}
