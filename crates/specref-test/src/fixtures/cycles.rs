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

//! Recursive schema sets.

use super::parse;
use specref_core::Node;

/// `Node.properties.next` points back at `Node`.
pub fn self_referencing() -> Node {
    parse(
        r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {"schemas": {
    "Node": {
      "type": "object",
      "properties": {
        "value": {"type": "string"},
        "next": {"$ref": "#/components/schemas/Node"}
      }
    }
  }}
}"##,
    )
}

/// `A.properties.b` -> `B`, `B.properties.a` -> `A`.
pub fn cyclic_pair() -> Node {
    parse(
        r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {"schemas": {
    "A": {"type": "object", "properties": {"b": {"$ref": "#/components/schemas/B"}}},
    "B": {"type": "object", "properties": {"a": {"$ref": "#/components/schemas/A"}}}
  }}
}"##,
    )
}

/// `A` -> `B` -> `C` -> `A`, each through `properties`.
pub fn cyclic_chain() -> Node {
    parse(
        r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {"schemas": {
    "A": {"type": "object", "properties": {"b": {"$ref": "#/components/schemas/B"}}},
    "B": {"type": "object", "properties": {"c": {"$ref": "#/components/schemas/C"}}},
    "C": {"type": "object", "properties": {"a": {"$ref": "#/components/schemas/A"}}}
  }}
}"##,
    )
}
