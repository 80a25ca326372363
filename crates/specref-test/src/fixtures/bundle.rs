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

//! Multi-document bundle.
//!
//! `api.json` references `other.json` three times and a YAML model in a
//! subdirectory, which references back into `other.json`.

use specref_core::Node;
use specref_json::{from_json, FromJsonConfig};
use specref_yaml::{from_yaml, FromYamlConfig};
use std::io;
use std::path::{Path, PathBuf};

/// Relative path of the bundle's root document.
pub const BUNDLE_ROOT: &str = "api.json";

/// `(relative path, content)` of every bundle document.
pub const BUNDLE: &[(&str, &str)] = &[
    (
        "api.json",
        r##"{
  "openapi": "3.0.3",
  "paths": {
    "/pets": {
      "get": {
        "responses": {
          "200": {
            "description": "ok",
            "content": {"application/json": {"schema": {"$ref": "models/pet.yaml#/Pet"}}}
          },
          "404": {
            "description": "missing",
            "content": {"application/json": {"schema": {"$ref": "other.json#/components/schemas/Error"}}}
          },
          "500": {
            "description": "failed",
            "content": {"application/json": {"schema": {"$ref": "other.json#/components/schemas/Error"}}}
          }
        }
      }
    }
  },
  "components": {"schemas": {
    "Problem": {"$ref": "other.json#/components/schemas/Error"}
  }}
}"##,
    ),
    (
        "other.json",
        r##"{
  "components": {"schemas": {
    "Error": {
      "type": "object",
      "properties": {"code": {"type": "integer"}, "message": {"type": "string"}}
    }
  }}
}"##,
    ),
    (
        "models/pet.yaml",
        "Pet:\n  type: object\n  properties:\n    name:\n      type: string\n    error:\n      $ref: '../other.json#/components/schemas/Error'\n",
    ),
];

/// Parse every bundle document, keyed by `base` joined with its path.
///
/// `base` must end with `/`, e.g. `file:///bundle/`.
pub fn bundle_documents(base: &str) -> Vec<(String, Node)> {
    BUNDLE
        .iter()
        .map(|(path, content)| {
            let node = if path.ends_with(".yaml") {
                from_yaml(content, &FromYamlConfig::default()).expect("fixture is valid YAML")
            } else {
                from_json(content, &FromJsonConfig::default()).expect("fixture is valid JSON")
            };
            (format!("{}{}", base, path), node)
        })
        .collect()
}

/// Write the bundle under `dir` and return the path of its root document.
pub fn write_bundle(dir: &Path) -> io::Result<PathBuf> {
    for (path, content) in BUNDLE {
        let target = dir.join(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(target, content)?;
    }
    Ok(dir.join(BUNDLE_ROOT))
}
