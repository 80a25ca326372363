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

//! Root containers of reusable definitions.
//!
//! Swagger 2.0 keeps reusable definitions in flat top-level maps
//! (`definitions`, `parameters`, ...) while OpenAPI 3 nests them under
//! `components`. [`RootContainers`] maps each [`CollectionKind`] to the
//! pointer prefix of its map so the rest of the engine never has to know
//! which layout a document uses.

use crate::error::{SpecError, SpecErrorKind, SpecResult};
use crate::node::{Node, ObjectNode};
use crate::pointer::Pointer;
use crate::resolve::resolve;
use crate::shape::Shape;
use std::fmt;

/// A collection of reusable definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Schemas,
    Parameters,
    Responses,
    SecuritySchemes,
    RequestBodies,
    Headers,
    Examples,
    Links,
    Callbacks,
    PathItems,
}

impl CollectionKind {
    /// Every collection kind, in OpenAPI 3 `components` order.
    pub const ALL: [CollectionKind; 10] = [
        Self::Schemas,
        Self::Parameters,
        Self::Responses,
        Self::SecuritySchemes,
        Self::RequestBodies,
        Self::Headers,
        Self::Examples,
        Self::Links,
        Self::Callbacks,
        Self::PathItems,
    ];

    /// The OpenAPI 3 `components` key of this collection.
    pub fn name(self) -> &'static str {
        match self {
            Self::Schemas => "schemas",
            Self::Parameters => "parameters",
            Self::Responses => "responses",
            Self::SecuritySchemes => "securitySchemes",
            Self::RequestBodies => "requestBodies",
            Self::Headers => "headers",
            Self::Examples => "examples",
            Self::Links => "links",
            Self::Callbacks => "callbacks",
            Self::PathItems => "pathItems",
        }
    }

    /// Shape of the entries stored in this collection.
    pub fn shape(self) -> Shape {
        match self {
            Self::Schemas => Shape::Schema,
            Self::Parameters => Shape::Parameter,
            Self::Responses => Shape::Response,
            Self::RequestBodies => Shape::RequestBody,
            Self::Headers => Shape::Header,
            Self::PathItems => Shape::PathItem,
            Self::SecuritySchemes | Self::Examples | Self::Links | Self::Callbacks => Shape::Generic,
        }
    }

    /// Parse a `components` key.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Specification layout version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecVersion {
    Swagger2,
    OpenApi3,
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Swagger2 => write!(f, "Swagger 2.0"),
            Self::OpenApi3 => write!(f, "OpenAPI 3"),
        }
    }
}

/// Immutable mapping from collection kind to pointer prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootContainers {
    version: SpecVersion,
    prefixes: Vec<(CollectionKind, Pointer)>,
}

impl RootContainers {
    /// The OpenAPI 3 layout: every collection under `components`.
    pub fn openapi3() -> Self {
        let prefixes = CollectionKind::ALL
            .into_iter()
            .map(|kind| (kind, Pointer::from_tokens(["components", kind.name()])))
            .collect();
        Self {
            version: SpecVersion::OpenApi3,
            prefixes,
        }
    }

    /// The Swagger 2.0 layout: four flat top-level maps.
    pub fn swagger2() -> Self {
        let prefixes = [
            (CollectionKind::Schemas, "definitions"),
            (CollectionKind::Parameters, "parameters"),
            (CollectionKind::Responses, "responses"),
            (CollectionKind::SecuritySchemes, "securityDefinitions"),
        ]
        .into_iter()
        .map(|(kind, key)| (kind, Pointer::from_tokens([key])))
        .collect();
        Self {
            version: SpecVersion::Swagger2,
            prefixes,
        }
    }

    /// The layout for `version`.
    pub fn for_version(version: SpecVersion) -> Self {
        match version {
            SpecVersion::Swagger2 => Self::swagger2(),
            SpecVersion::OpenApi3 => Self::openapi3(),
        }
    }

    /// Pick the layout from the document's version field.
    ///
    /// A root `swagger` field selects Swagger 2.0; anything else is treated
    /// as OpenAPI 3.
    pub fn detect(root: &Node) -> Self {
        let version = match root.as_object() {
            Some(obj) if obj.get("openapi").is_some() => SpecVersion::OpenApi3,
            Some(obj) if obj.get("swagger").is_some() => SpecVersion::Swagger2,
            _ => SpecVersion::OpenApi3,
        };
        Self::for_version(version)
    }

    pub fn version(&self) -> SpecVersion {
        self.version
    }

    /// Collection kinds available in this layout.
    pub fn kinds(&self) -> impl Iterator<Item = CollectionKind> + '_ {
        self.prefixes.iter().map(|(kind, _)| *kind)
    }

    /// Pointer prefix of a collection, if the layout has it.
    pub fn prefix(&self, kind: CollectionKind) -> Option<&Pointer> {
        self.prefixes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, prefix)| prefix)
    }

    fn require_prefix(&self, kind: CollectionKind) -> SpecResult<&Pointer> {
        self.prefix(kind).ok_or_else(|| {
            SpecError::not_found(format!(
                "{} has no '{}' collection",
                self.version, kind
            ))
        })
    }

    /// Pointer to the entry `name` of a collection.
    pub fn pointer_for(&self, kind: CollectionKind, name: &str) -> SpecResult<Pointer> {
        Ok(self.require_prefix(kind)?.child(name))
    }

    /// `$ref` string for the entry `name` of a collection.
    pub fn reference_for(&self, kind: CollectionKind, name: &str) -> SpecResult<String> {
        Ok(self.pointer_for(kind, name)?.to_fragment())
    }

    /// Find which collection entry a pointer addresses.
    ///
    /// Returns the collection and the entry name when `pointer` is the entry
    /// itself or lies inside it.
    pub fn classify<'p>(&self, pointer: &'p Pointer) -> Option<(CollectionKind, &'p str)> {
        self.prefixes.iter().find_map(|(kind, prefix)| {
            if pointer.len() > prefix.len() && pointer.starts_with(prefix) {
                Some((*kind, pointer.tokens()[prefix.len()].as_str()))
            } else {
                None
            }
        })
    }

    /// View over a collection of `root`.
    ///
    /// A missing collection map is an empty collection.
    pub fn collection<'a>(&self, root: &'a Node, kind: CollectionKind) -> SpecResult<Collection<'a>> {
        let prefix = self.require_prefix(kind)?.clone();
        let map = match resolve(root, &prefix) {
            Ok(Node::Object(obj)) => Some(obj),
            Ok(other) => {
                return Err(SpecError::type_mismatch(format!(
                    "collection '{}' is a {}, not an object",
                    kind,
                    other.kind()
                ))
                .with_pointer(prefix.to_string()))
            }
            Err(e) if e.kind == SpecErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };
        Ok(Collection { kind, prefix, map })
    }
}

impl Default for RootContainers {
    fn default() -> Self {
        Self::openapi3()
    }
}

/// Read-only view over one collection of reusable definitions.
#[derive(Debug, Clone)]
pub struct Collection<'a> {
    kind: CollectionKind,
    prefix: Pointer,
    map: Option<&'a ObjectNode>,
}

impl<'a> Collection<'a> {
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn prefix(&self) -> &Pointer {
        &self.prefix
    }

    /// Look up an entry by name.
    pub fn lookup(&self, name: &str) -> SpecResult<&'a Node> {
        self.map.and_then(|map| map.get(name)).ok_or_else(|| {
            SpecError::not_found(format!("no {} entry named '{}'", self.kind, name))
                .with_pointer(self.prefix.child(name).to_string())
        })
    }

    /// Entry names in document order.
    pub fn names(&self) -> Vec<&'a str> {
        match self.map {
            Some(map) => map.keys().collect(),
            None => Vec::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.map_or(false, |map| map.get(name).is_some())
    }

    pub fn len(&self) -> usize {
        self.map.map_or(0, ObjectNode::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn openapi_doc() -> Node {
        let schemas = ObjectNode::new(Shape::Generic)
            .with("Pet", ObjectNode::new(Shape::Schema).with("type", Node::string("object")).into())
            .with("Error", ObjectNode::new(Shape::Schema).into());
        let components = ObjectNode::new(Shape::Generic).with("schemas", schemas.into());
        ObjectNode::new(Shape::Generic)
            .with("openapi", Node::string("3.0.3"))
            .with("components", components.into())
            .into()
    }

    fn swagger_doc() -> Node {
        let definitions = ObjectNode::new(Shape::Generic).with("Pet", ObjectNode::new(Shape::Schema).into());
        ObjectNode::new(Shape::Generic)
            .with("swagger", Node::string("2.0"))
            .with("definitions", definitions.into())
            .into()
    }

    // ==================== Mapping tests ====================

    #[test]
    fn test_openapi3_prefixes() {
        let c = RootContainers::openapi3();
        assert_eq!(c.prefix(CollectionKind::Schemas).unwrap().to_string(), "/components/schemas");
        assert_eq!(c.prefix(CollectionKind::PathItems).unwrap().to_string(), "/components/pathItems");
        assert_eq!(c.kinds().count(), 10);
    }

    #[test]
    fn test_swagger2_prefixes() {
        let c = RootContainers::swagger2();
        assert_eq!(c.prefix(CollectionKind::Schemas).unwrap().to_string(), "/definitions");
        assert_eq!(
            c.prefix(CollectionKind::SecuritySchemes).unwrap().to_string(),
            "/securityDefinitions"
        );
        assert!(c.prefix(CollectionKind::RequestBodies).is_none());
    }

    #[test]
    fn test_reference_for() {
        assert_eq!(
            RootContainers::openapi3().reference_for(CollectionKind::Schemas, "Pet").unwrap(),
            "#/components/schemas/Pet"
        );
        assert_eq!(
            RootContainers::swagger2().reference_for(CollectionKind::Schemas, "Pet").unwrap(),
            "#/definitions/Pet"
        );
    }

    #[test]
    fn test_pointer_for_missing_collection() {
        let err = RootContainers::swagger2()
            .pointer_for(CollectionKind::Links, "x")
            .unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::NotFound);
    }

    #[test]
    fn test_classify() {
        let c = RootContainers::openapi3();
        let p = Pointer::parse("/components/schemas/Pet/properties/name").unwrap();
        assert_eq!(c.classify(&p), Some((CollectionKind::Schemas, "Pet")));
        assert_eq!(c.classify(&Pointer::parse("/components/schemas").unwrap()), None);
        assert_eq!(c.classify(&Pointer::parse("/paths/~1pets").unwrap()), None);
    }

    #[test]
    fn test_detect() {
        assert_eq!(RootContainers::detect(&openapi_doc()).version(), SpecVersion::OpenApi3);
        assert_eq!(RootContainers::detect(&swagger_doc()).version(), SpecVersion::Swagger2);
        assert_eq!(RootContainers::detect(&Node::null()).version(), SpecVersion::OpenApi3);
    }

    #[test]
    fn test_collection_kind_from_name() {
        assert_eq!(CollectionKind::from_name("requestBodies"), Some(CollectionKind::RequestBodies));
        assert_eq!(CollectionKind::from_name("definitions"), None);
    }

    // ==================== Collection tests ====================

    #[test]
    fn test_collection_lookup() {
        let doc = openapi_doc();
        let schemas = RootContainers::openapi3()
            .collection(&doc, CollectionKind::Schemas)
            .unwrap();
        let pet = schemas.lookup("Pet").unwrap();
        assert_eq!(pet.get("type").and_then(Node::as_str), Some("object"));
        assert_eq!(schemas.names(), vec!["Pet", "Error"]);
        assert!(schemas.contains("Error"));
        assert_eq!(schemas.len(), 2);
    }

    #[test]
    fn test_collection_lookup_missing() {
        let doc = openapi_doc();
        let schemas = RootContainers::openapi3()
            .collection(&doc, CollectionKind::Schemas)
            .unwrap();
        let err = schemas.lookup("Dog").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::NotFound);
        assert_eq!(err.pointer.as_deref(), Some("/components/schemas/Dog"));
    }

    #[test]
    fn test_absent_collection_is_empty() {
        let doc = openapi_doc();
        let params = RootContainers::openapi3()
            .collection(&doc, CollectionKind::Parameters)
            .unwrap();
        assert!(params.is_empty());
        assert!(params.names().is_empty());
    }

    #[test]
    fn test_swagger_collection() {
        let doc = swagger_doc();
        let defs = RootContainers::swagger2()
            .collection(&doc, CollectionKind::Schemas)
            .unwrap();
        assert!(defs.lookup("Pet").is_ok());
    }

    #[test]
    fn test_collection_not_an_object() {
        let doc: Node = ObjectNode::new(Shape::Generic)
            .with("definitions", Node::string("oops"))
            .into();
        let err = RootContainers::swagger2()
            .collection(&doc, CollectionKind::Schemas)
            .unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::TypeMismatch);
    }
}
