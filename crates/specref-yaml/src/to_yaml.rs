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

//! Node tree to YAML conversion

use crate::error::YamlError;
use serde_yaml::Value as YamlValue;
use specref_core::Node;

/// Convert a node tree to a YAML string.
///
/// Key order follows the tree, structural fields before extensions.
pub fn to_yaml(node: &Node) -> Result<String, YamlError> {
    let json = specref_json::to_json_value(node);
    serde_yaml::to_string(&json).map_err(|e| YamlError::Serialize(e.to_string()))
}

/// Convert a node tree to a `serde_yaml::Value`.
pub fn to_yaml_value(node: &Node) -> Result<YamlValue, YamlError> {
    let json = specref_json::to_json_value(node);
    serde_yaml::to_value(&json).map_err(|e| YamlError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_yaml, FromYamlConfig};

    #[test]
    fn test_reference_written_as_ref_mapping() {
        let yaml = to_yaml(&Node::reference("#/definitions/Pet")).unwrap();
        assert!(yaml.starts_with("$ref:"));
        assert!(yaml.contains("#/definitions/Pet"));
    }

    #[test]
    fn test_roundtrip_keeps_tree() {
        let source = "openapi: 3.0.3\ncomponents:\n  schemas:\n    Pet:\n      type: object\n      x-tag: pet\n";
        let tree = from_yaml(source, &FromYamlConfig::default()).unwrap();
        let back = from_yaml(&to_yaml(&tree).unwrap(), &FromYamlConfig::default()).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn test_to_yaml_value_mapping() {
        let value = to_yaml_value(&Node::from(3)).unwrap();
        assert_eq!(value, YamlValue::Number(3.into()));
    }
}
