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

//! Node shapes and their wire-name tables.
//!
//! An object node is composed of named attribute groups rather than a single
//! flat struct. A parameter, for instance, carries common validations
//! (`maximum`, `pattern`, ...), simple-schema attributes (`type`, `format`,
//! ...) and parameter properties (`name`, `in`, ...) side by side with its
//! vendor extensions. Structural fields are stored under their attribute
//! name; the tables here translate between that name and the wire name used
//! in documents and JSON pointers.

use std::fmt;

/// The attribute group a structural field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeGroup {
    /// Constraints shared by schemas, parameters, headers and items.
    Validations,
    /// Type information shared by non-body parameters, headers and items.
    SimpleSchema,
    /// Fields specific to the shape.
    Properties,
}

/// A structural field: wire name, attribute name, and owning group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name as it appears on the wire and in pointers.
    pub wire: &'static str,
    /// Internal attribute name.
    pub attribute: &'static str,
    /// Group the field belongs to.
    pub group: AttributeGroup,
}

const fn field(wire: &'static str, attribute: &'static str, group: AttributeGroup) -> FieldSpec {
    FieldSpec {
        wire,
        attribute,
        group,
    }
}

use AttributeGroup::{Properties as P, SimpleSchema as S, Validations as V};

const VALIDATIONS: &[FieldSpec] = &[
    field("maximum", "maximum", V),
    field("exclusiveMaximum", "exclusive_maximum", V),
    field("minimum", "minimum", V),
    field("exclusiveMinimum", "exclusive_minimum", V),
    field("maxLength", "max_length", V),
    field("minLength", "min_length", V),
    field("pattern", "pattern", V),
    field("maxItems", "max_items", V),
    field("minItems", "min_items", V),
    field("uniqueItems", "unique_items", V),
    field("multipleOf", "multiple_of", V),
    field("enum", "enum_values", V),
];

const SIMPLE_SCHEMA: &[FieldSpec] = &[
    field("type", "type_name", S),
    field("nullable", "nullable", S),
    field("format", "format", S),
    field("items", "items", S),
    field("collectionFormat", "collection_format", S),
    field("default", "default_value", S),
    field("example", "example", S),
];

const PARAMETER_PROPS: &[FieldSpec] = &[
    field("name", "name", P),
    field("in", "location", P),
    field("description", "description", P),
    field("required", "required", P),
    field("deprecated", "deprecated", P),
    field("allowEmptyValue", "allow_empty_value", P),
    field("style", "style", P),
    field("explode", "explode", P),
    field("allowReserved", "allow_reserved", P),
    field("schema", "schema", P),
    field("examples", "examples", P),
    field("content", "content", P),
];

const HEADER_PROPS: &[FieldSpec] = &[
    field("description", "description", P),
    field("required", "required", P),
    field("deprecated", "deprecated", P),
    field("style", "style", P),
    field("explode", "explode", P),
    field("schema", "schema", P),
    field("examples", "examples", P),
    field("content", "content", P),
];

const SCHEMA_PROPS: &[FieldSpec] = &[
    field("title", "title", P),
    field("description", "description", P),
    field("required", "required", P),
    field("properties", "properties", P),
    field("patternProperties", "pattern_properties", P),
    field("additionalProperties", "additional_properties", P),
    field("maxProperties", "max_properties", P),
    field("minProperties", "min_properties", P),
    field("allOf", "all_of", P),
    field("anyOf", "any_of", P),
    field("oneOf", "one_of", P),
    field("not", "not", P),
    field("const", "const_value", P),
    field("discriminator", "discriminator", P),
    field("readOnly", "read_only", P),
    field("writeOnly", "write_only", P),
    field("xml", "xml", P),
    field("externalDocs", "external_docs", P),
    field("deprecated", "deprecated", P),
];

const RESPONSE_PROPS: &[FieldSpec] = &[
    field("description", "description", P),
    field("headers", "headers", P),
    field("content", "content", P),
    field("links", "links", P),
    field("schema", "schema", P),
    field("examples", "examples", P),
];

const REQUEST_BODY_PROPS: &[FieldSpec] = &[
    field("description", "description", P),
    field("content", "content", P),
    field("required", "required", P),
];

const MEDIA_TYPE_PROPS: &[FieldSpec] = &[
    field("schema", "schema", P),
    field("example", "example", P),
    field("examples", "examples", P),
    field("encoding", "encoding", P),
];

const OPERATION_PROPS: &[FieldSpec] = &[
    field("tags", "tags", P),
    field("summary", "summary", P),
    field("description", "description", P),
    field("externalDocs", "external_docs", P),
    field("operationId", "operation_id", P),
    field("parameters", "parameters", P),
    field("requestBody", "request_body", P),
    field("responses", "responses", P),
    field("callbacks", "callbacks", P),
    field("deprecated", "deprecated", P),
    field("security", "security", P),
    field("servers", "servers", P),
];

const PATH_ITEM_PROPS: &[FieldSpec] = &[
    field("summary", "summary", P),
    field("description", "description", P),
    field("get", "get", P),
    field("put", "put", P),
    field("post", "post", P),
    field("delete", "delete", P),
    field("options", "options", P),
    field("head", "head", P),
    field("patch", "patch", P),
    field("trace", "trace", P),
    field("servers", "servers", P),
    field("parameters", "parameters", P),
];

/// The concrete shape an object node represents.
///
/// `Generic` objects (the document root, name-keyed maps, anything the
/// adapters cannot place) have no table: every key is its own attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    #[default]
    Generic,
    Schema,
    Parameter,
    Header,
    Items,
    Response,
    RequestBody,
    MediaType,
    Operation,
    PathItem,
}

impl Shape {
    /// Attribute groups in lookup order.
    pub fn groups(self) -> &'static [&'static [FieldSpec]] {
        match self {
            Self::Generic => &[],
            Self::Schema => &[VALIDATIONS, SIMPLE_SCHEMA, SCHEMA_PROPS],
            Self::Parameter => &[VALIDATIONS, SIMPLE_SCHEMA, PARAMETER_PROPS],
            Self::Header => &[VALIDATIONS, SIMPLE_SCHEMA, HEADER_PROPS],
            Self::Items => &[VALIDATIONS, SIMPLE_SCHEMA],
            Self::Response => &[RESPONSE_PROPS],
            Self::RequestBody => &[REQUEST_BODY_PROPS],
            Self::MediaType => &[MEDIA_TYPE_PROPS],
            Self::Operation => &[OPERATION_PROPS],
            Self::PathItem => &[PATH_ITEM_PROPS],
        }
    }

    /// Whether this shape has a fixed field table.
    pub fn is_typed(self) -> bool {
        self != Self::Generic
    }

    /// Look up a structural field by wire name.
    ///
    /// The first group that declares the name wins, so a name shared by two
    /// groups resolves to the earlier one.
    pub fn field_by_wire(self, wire: &str) -> Option<&'static FieldSpec> {
        self.groups()
            .iter()
            .flat_map(|group| group.iter())
            .find(|spec| spec.wire == wire)
    }

    /// Look up a structural field by attribute name.
    pub fn field_by_attribute(self, attribute: &str) -> Option<&'static FieldSpec> {
        self.groups()
            .iter()
            .flat_map(|group| group.iter())
            .find(|spec| spec.attribute == attribute)
    }

    /// Translate a wire name into the attribute name it is stored under.
    ///
    /// Returns `None` when a typed shape does not declare the name.
    pub fn attribute_name<'a>(self, wire: &'a str) -> Option<&'a str> {
        if !self.is_typed() {
            return Some(wire);
        }
        self.field_by_wire(wire).map(|spec| spec.attribute)
    }

    /// Translate an attribute name back to its wire name.
    pub fn wire_name<'a>(self, attribute: &'a str) -> &'a str {
        match self.field_by_attribute(attribute) {
            Some(spec) => spec.wire,
            None => attribute,
        }
    }

    /// Group of an attribute, if the shape declares it.
    pub fn group_of(self, attribute: &str) -> Option<AttributeGroup> {
        self.field_by_attribute(attribute).map(|spec| spec.group)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generic => "object",
            Self::Schema => "schema",
            Self::Parameter => "parameter",
            Self::Header => "header",
            Self::Items => "items",
            Self::Response => "response",
            Self::RequestBody => "request body",
            Self::MediaType => "media type",
            Self::Operation => "operation",
            Self::PathItem => "path item",
        };
        f.write_str(name)
    }
}
