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

//! Complete documents.

use super::parse;
use specref_core::Node;

/// OpenAPI 3 petstore source.
pub const PETSTORE_V3: &str = r##"{
  "openapi": "3.0.3",
  "info": {"title": "Petstore", "version": "1.0.0"},
  "paths": {
    "/pets": {
      "get": {
        "operationId": "listPets",
        "parameters": [{"$ref": "#/components/parameters/limit"}],
        "responses": {
          "200": {
            "description": "A list of pets",
            "content": {
              "application/json": {
                "schema": {"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}
              }
            }
          },
          "default": {"$ref": "#/components/responses/Error"}
        }
      }
    },
    "/pets/{petId}": {
      "parameters": [{"name": "petId", "in": "path", "required": true, "schema": {"type": "string"}}],
      "get": {
        "operationId": "showPet",
        "responses": {
          "200": {
            "description": "A pet",
            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}}
          }
        }
      }
    }
  },
  "components": {
    "schemas": {
      "Pet": {
        "type": "object",
        "required": ["id", "name"],
        "x-entity": "pet",
        "properties": {
          "id": {"type": "integer", "format": "int64"},
          "name": {"type": "string", "maxLength": 64},
          "tag": {"$ref": "#/components/schemas/Tag"}
        }
      },
      "Tag": {"type": "string", "enum": ["cat", "dog"]},
      "Error": {
        "type": "object",
        "properties": {"code": {"type": "integer"}, "message": {"type": "string"}}
      }
    },
    "parameters": {
      "limit": {"name": "limit", "in": "query", "schema": {"type": "integer", "maximum": 100}}
    },
    "responses": {
      "Error": {
        "description": "Unexpected error",
        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Error"}}}
      }
    }
  }
}"##;

/// Swagger 2.0 petstore source.
pub const PETSTORE_V2: &str = r##"{
  "swagger": "2.0",
  "info": {"title": "Petstore", "version": "1.0.0"},
  "paths": {
    "/pets": {
      "get": {
        "parameters": [{"$ref": "#/parameters/limit"}],
        "responses": {
          "200": {"description": "ok", "schema": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}},
          "default": {"$ref": "#/responses/Error"}
        }
      }
    }
  },
  "definitions": {
    "Pet": {
      "type": "object",
      "properties": {"id": {"type": "integer"}, "name": {"type": "string"}}
    },
    "Error": {"type": "object", "properties": {"message": {"type": "string"}}}
  },
  "parameters": {
    "limit": {"name": "limit", "in": "query", "type": "integer", "maximum": 100}
  },
  "responses": {
    "Error": {"description": "Unexpected error", "schema": {"$ref": "#/definitions/Error"}}
  }
}"##;

/// OpenAPI 3 petstore with paths, parameters, responses and schemas.
///
/// References: 6 (`limit`, `Pet` twice, `Tag`, `responses/Error`,
/// `schemas/Error`).
pub fn petstore_v3() -> Node {
    parse(PETSTORE_V3)
}

/// Swagger 2.0 petstore using `definitions`, `parameters` and `responses`.
pub fn petstore_v2() -> Node {
    parse(PETSTORE_V2)
}

/// A root array of two objects with a `name` field.
pub fn array_of_objects() -> Node {
    parse(r#"[{"name": "first", "id": 1}, {"name": "second", "id": 2}]"#)
}
