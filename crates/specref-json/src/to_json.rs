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

//! Node tree to JSON conversion

use crate::from_json::JsonError;
use serde_json::{Map, Number, Value as JsonValue};
use specref_core::{Node, ObjectNode, Reference, Scalar, REF_KEY};

/// Configuration for JSON output
#[derive(Debug, Clone)]
pub struct ToJsonConfig {
    /// Pretty-print the output (default: true)
    pub pretty: bool,
}

impl Default for ToJsonConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Convert a node tree to a JSON string
pub fn to_json(node: &Node, config: &ToJsonConfig) -> Result<String, JsonError> {
    let value = to_json_value(node);
    let result = if config.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    result.map_err(|e| JsonError::Serialize(e.to_string()))
}

/// Convert a node tree to a `serde_json::Value`
///
/// Object keys are written under their wire names, structural fields first.
/// References become `{"$ref": ...}` objects followed by their siblings.
pub fn to_json_value(node: &Node) -> JsonValue {
    match node {
        Node::Reference(reference) => reference_to_json(reference),
        Node::Object(object) => object_to_json(object),
        Node::Array(items) => JsonValue::Array(items.iter().map(to_json_value).collect()),
        Node::Scalar(scalar) => scalar_to_json(scalar),
    }
}

fn reference_to_json(reference: &Reference) -> JsonValue {
    let mut map = Map::with_capacity(reference.siblings().len() + 1);
    map.insert(REF_KEY.to_string(), JsonValue::String(reference.target().to_string()));
    for (key, value) in reference.siblings() {
        map.insert(key.clone(), to_json_value(value));
    }
    JsonValue::Object(map)
}

fn object_to_json(object: &ObjectNode) -> JsonValue {
    let mut map = Map::with_capacity(object.len());
    for (key, value) in object.iter() {
        map.insert(key.to_string(), to_json_value(value));
    }
    JsonValue::Object(map)
}

fn scalar_to_json(scalar: &Scalar) -> JsonValue {
    match scalar {
        Scalar::Null => JsonValue::Null,
        Scalar::Bool(b) => JsonValue::Bool(*b),
        Scalar::Integer(n) => JsonValue::Number(Number::from(*n)),
        Scalar::Float(f) => Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Scalar::String(s) => JsonValue::String(s.clone()),
    }
}
