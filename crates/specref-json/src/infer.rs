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

//! Positional shape inference.
//!
//! JSON carries no type information, so the shape of an object is decided by
//! where it sits: entries of `components/schemas` are schemas, the `schema`
//! of a parameter is a schema, entries of an operation's `parameters` array
//! are parameters, and so on. Anything not covered stays `Generic`.

use specref_core::{is_extension_key, CollectionKind, Shape};

/// What a position in the document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The document root.
    Root,
    /// The OpenAPI 3 `components` object.
    Components,
    /// A single object of the given shape.
    Value(Shape),
    /// A name-keyed map whose entries have the given shape.
    Map(Shape),
    /// An array whose items have the given shape.
    List(Shape),
    /// A name-keyed map of example objects.
    Examples,
    /// An example object; its `value` is a literal.
    Example,
    /// A literal value (`example`, `default`, `enum`, ...). A `$ref` key
    /// below it is data, not a reference.
    Literal,
    /// Unknown territory; everything below is generic.
    Any,
}

impl Slot {
    /// Shape of an object found in this slot.
    pub fn shape(self) -> Shape {
        match self {
            Slot::Value(shape) => shape,
            _ => Shape::Generic,
        }
    }

    /// Slot of the member `key` of an object in this slot.
    pub fn member(self, key: &str) -> Slot {
        if self == Slot::Literal {
            return Slot::Literal;
        }
        if is_extension_key(key) {
            return Slot::Any;
        }
        match self {
            Slot::Root => root_member(key),
            Slot::Components => match CollectionKind::from_name(key) {
                Some(CollectionKind::Examples) => Slot::Examples,
                Some(kind) => Slot::Map(kind.shape()),
                None => Slot::Any,
            },
            Slot::Map(shape) => Slot::Value(shape),
            Slot::Value(shape) => shape_member(shape, key),
            Slot::Examples => Slot::Example,
            Slot::Example if key == "value" => Slot::Literal,
            Slot::Example | Slot::List(_) | Slot::Any | Slot::Literal => Slot::Any,
        }
    }

    /// Slot of an item of an array in this slot.
    pub fn item(self) -> Slot {
        match self {
            Slot::List(shape) => Slot::Value(shape),
            Slot::Literal => Slot::Literal,
            _ => Slot::Any,
        }
    }
}

fn root_member(key: &str) -> Slot {
    match key {
        "components" => Slot::Components,
        "paths" | "webhooks" => Slot::Map(Shape::PathItem),
        // Swagger 2.0 flat collections
        "definitions" => Slot::Map(Shape::Schema),
        "parameters" => Slot::Map(Shape::Parameter),
        "responses" => Slot::Map(Shape::Response),
        _ => Slot::Any,
    }
}

fn shape_member(shape: Shape, key: &str) -> Slot {
    match (shape, key) {
        (
            Shape::Schema | Shape::Parameter | Shape::Header | Shape::Items | Shape::MediaType,
            "example" | "default" | "enum" | "const",
        ) => Slot::Literal,
        // Swagger 2.0 response examples are keyed by MIME type
        (Shape::Schema | Shape::Response, "examples") => Slot::Literal,
        (Shape::Parameter | Shape::Header | Shape::MediaType, "examples") => Slot::Examples,

        (Shape::Schema, "items" | "additionalProperties" | "not") => Slot::Value(Shape::Schema),
        (Shape::Schema, "properties" | "patternProperties") => Slot::Map(Shape::Schema),
        (Shape::Schema, "allOf" | "anyOf" | "oneOf") => Slot::List(Shape::Schema),

        (Shape::Parameter | Shape::Header, "schema") => Slot::Value(Shape::Schema),
        (Shape::Parameter | Shape::Header | Shape::Items, "items") => Slot::Value(Shape::Items),
        (Shape::Parameter | Shape::Header, "content") => Slot::Map(Shape::MediaType),

        (Shape::Response, "schema") => Slot::Value(Shape::Schema),
        (Shape::Response, "headers") => Slot::Map(Shape::Header),
        (Shape::Response | Shape::RequestBody, "content") => Slot::Map(Shape::MediaType),

        (Shape::MediaType, "schema") => Slot::Value(Shape::Schema),

        (Shape::Operation, "parameters") => Slot::List(Shape::Parameter),
        (Shape::Operation, "responses") => Slot::Map(Shape::Response),
        (Shape::Operation, "requestBody") => Slot::Value(Shape::RequestBody),

        (Shape::PathItem, "parameters") => Slot::List(Shape::Parameter),
        (Shape::PathItem, "get" | "put" | "post" | "delete" | "options" | "head" | "patch" | "trace") => {
            Slot::Value(Shape::Operation)
        }
        _ => Slot::Any,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(path: &[&str]) -> Slot {
        path.iter().fold(Slot::Root, |slot, key| match *key {
            "[]" => slot.item(),
            key => slot.member(key),
        })
    }

    #[test]
    fn test_components_entries() {
        assert_eq!(walk(&["components", "schemas", "Pet"]), Slot::Value(Shape::Schema));
        assert_eq!(walk(&["components", "parameters", "limit"]), Slot::Value(Shape::Parameter));
        assert_eq!(walk(&["components", "responses", "NotFound"]), Slot::Value(Shape::Response));
        assert_eq!(walk(&["components", "headers", "X-Rate"]), Slot::Value(Shape::Header));
        assert_eq!(walk(&["components", "examples", "e"]), Slot::Example);
    }

    #[test]
    fn test_swagger_collections() {
        assert_eq!(walk(&["definitions", "Pet"]), Slot::Value(Shape::Schema));
        assert_eq!(walk(&["parameters", "limit"]), Slot::Value(Shape::Parameter));
    }

    #[test]
    fn test_nested_schemas() {
        assert_eq!(
            walk(&["components", "schemas", "Pet", "properties", "tags", "items"]),
            Slot::Value(Shape::Schema)
        );
        assert_eq!(
            walk(&["components", "schemas", "Pet", "allOf", "[]"]),
            Slot::Value(Shape::Schema)
        );
    }

    #[test]
    fn test_operations() {
        let op = ["paths", "/pets", "get"];
        assert_eq!(walk(&op), Slot::Value(Shape::Operation));
        assert_eq!(walk(&[&op[..], &["parameters", "[]"][..]].concat()), Slot::Value(Shape::Parameter));
        assert_eq!(
            walk(&[&op[..], &["responses", "200", "content", "application/json", "schema"][..]].concat()),
            Slot::Value(Shape::Schema)
        );
        assert_eq!(
            walk(&[&op[..], &["responses", "200", "headers", "X-Rate"][..]].concat()),
            Slot::Value(Shape::Header)
        );
    }

    #[test]
    fn test_literal_positions() {
        let pet = ["components", "schemas", "Pet"];
        assert_eq!(walk(&[&pet[..], &["example"][..]].concat()), Slot::Literal);
        assert_eq!(walk(&[&pet[..], &["default", "nested"][..]].concat()), Slot::Literal);
        assert_eq!(walk(&[&pet[..], &["enum", "[]"][..]].concat()), Slot::Literal);
        assert_eq!(walk(&[&pet[..], &["properties", "id", "const"][..]].concat()), Slot::Literal);
        assert_eq!(walk(&["components", "examples", "e", "value", "x-any"]), Slot::Literal);
        assert_eq!(walk(&["components", "examples", "e", "summary"]), Slot::Any);
        assert_eq!(
            walk(&["paths", "/pets", "get", "responses", "200", "examples", "application/json"]),
            Slot::Literal
        );
    }

    #[test]
    fn test_media_type_examples() {
        let media = ["components", "responses", "Ok", "content", "application/json"];
        assert_eq!(walk(&[&media[..], &["examples", "cat"][..]].concat()), Slot::Example);
        assert_eq!(walk(&[&media[..], &["examples", "cat", "value"][..]].concat()), Slot::Literal);
        assert_eq!(walk(&[&media[..], &["example"][..]].concat()), Slot::Literal);
    }

    #[test]
    fn test_extensions_are_generic() {
        assert_eq!(walk(&["components", "schemas", "Pet", "x-meta"]), Slot::Any);
        assert_eq!(walk(&["paths", "x-internal"]), Slot::Any);
        assert_eq!(Slot::Any.member("schema"), Slot::Any);
        assert_eq!(Slot::Any.item(), Slot::Any);
    }
}
