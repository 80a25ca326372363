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

//! The generic document tree.
//!
//! Every addressable unit of a specification is a [`Node`]: a reference, an
//! object, an array or a scalar. Objects keep their vendor extensions apart
//! from their structural fields, and structural fields are stored under the
//! attribute names of the object's [`Shape`].

use crate::shape::Shape;
use indexmap::IndexMap;
use std::fmt;

/// Ordered field map used for extensions, structural fields and siblings.
pub type Fields = IndexMap<String, Node>;

/// Prefix that marks a vendor extension key.
pub const EXTENSION_PREFIX: &str = "x-";

/// The key that marks a reference object.
pub const REF_KEY: &str = "$ref";

/// Whether a key is a vendor extension key.
pub fn is_extension_key(key: &str) -> bool {
    key.starts_with(EXTENSION_PREFIX)
}

/// The kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Reference,
    Object,
    Array,
    Scalar,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => write!(f, "reference"),
            Self::Object => write!(f, "object"),
            Self::Array => write!(f, "array"),
            Self::Scalar => write!(f, "scalar"),
        }
    }
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Get a short description of the value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }

    /// Try to get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A `$ref` node.
///
/// Siblings are the other keys that appeared next to `$ref` in the source
/// document. They are kept so the tree can be written back unchanged, but the
/// reference wins on expansion and the siblings are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    target: String,
    siblings: Fields,
}

impl Reference {
    /// Create a reference to `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            siblings: Fields::new(),
        }
    }

    /// Attach sibling fields.
    pub fn with_siblings(mut self, siblings: Fields) -> Self {
        self.siblings = siblings;
        self
    }

    /// The raw `$ref` value.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Document part of the target (empty for "this document").
    pub fn document(&self) -> &str {
        match self.target.find('#') {
            Some(pos) => &self.target[..pos],
            None => &self.target,
        }
    }

    /// Fragment part of the target, without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.target.find('#').map(|pos| &self.target[pos + 1..])
    }

    /// Whether the target points into the containing document.
    pub fn is_local(&self) -> bool {
        self.document().is_empty()
    }

    /// Sibling fields that appeared next to `$ref`.
    pub fn siblings(&self) -> &Fields {
        &self.siblings
    }
}

/// An object node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectNode {
    /// Shape that decides how wire names map to attributes.
    pub shape: Shape,
    /// Vendor extensions and keys the shape does not declare, by wire name.
    pub extensions: Fields,
    /// Structural fields, by attribute name.
    pub fields: Fields,
}

impl ObjectNode {
    /// Create an empty object of the given shape.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            extensions: Fields::new(),
            fields: Fields::new(),
        }
    }

    /// Insert a field by its wire name.
    ///
    /// `x-` keys always land in the extensions. For typed shapes, wire names
    /// missing from the shape's table land there as well.
    pub fn insert_wire(&mut self, key: impl Into<String>, value: Node) -> Option<Node> {
        let key = key.into();
        if is_extension_key(&key) {
            return self.extensions.insert(key, value);
        }
        match self.shape.attribute_name(&key) {
            Some(attribute) => {
                let attribute = attribute.to_string();
                self.fields.insert(attribute, value)
            }
            None => self.extensions.insert(key, value),
        }
    }

    /// Builder-style [`insert_wire`](Self::insert_wire).
    pub fn with(mut self, key: impl Into<String>, value: Node) -> Self {
        self.insert_wire(key, value);
        self
    }

    /// Look up a field by wire name: extensions first, then structural fields.
    pub fn get(&self, wire: &str) -> Option<&Node> {
        if let Some(node) = self.extensions.get(wire) {
            return Some(node);
        }
        let attribute = self.shape.attribute_name(wire)?;
        self.fields.get(attribute)
    }

    /// Mutable lookup by wire name, in the same order as [`get`](Self::get).
    pub fn get_mut(&mut self, wire: &str) -> Option<&mut Node> {
        if self.extensions.contains_key(wire) {
            return self.extensions.get_mut(wire);
        }
        let attribute = self.shape.attribute_name(wire)?;
        self.fields.get_mut(attribute)
    }

    /// Look up a structural field by attribute name.
    pub fn attribute(&self, attribute: &str) -> Option<&Node> {
        self.fields.get(attribute)
    }

    /// Iterate over all fields by wire name: structural fields, then extensions.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        let shape = self.shape;
        self.fields
            .iter()
            .map(move |(attr, node)| (shape.wire_name(attr.as_str()), node))
            .chain(self.extensions.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Iterate over every key as it would appear on the wire.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    /// Total number of fields.
    pub fn len(&self) -> usize {
        self.fields.len() + self.extensions.len()
    }

    /// Check if the object has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.extensions.is_empty()
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Reference(Reference),
    Object(ObjectNode),
    Array(Vec<Node>),
    Scalar(Scalar),
}

impl Node {
    /// Create a reference node.
    pub fn reference(target: impl Into<String>) -> Self {
        Self::Reference(Reference::new(target))
    }

    /// Create an empty object node.
    pub fn object(shape: Shape) -> Self {
        Self::Object(ObjectNode::new(shape))
    }

    /// Create a string scalar.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(value.into()))
    }

    /// Create a null scalar.
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Get the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Reference(_) => NodeKind::Reference,
            Self::Object(_) => NodeKind::Object,
            Self::Array(_) => NodeKind::Array,
            Self::Scalar(_) => NodeKind::Scalar,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectNode> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the node as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Look up a child of an object node by wire name.
    pub fn get(&self, wire: &str) -> Option<&Node> {
        self.as_object().and_then(|o| o.get(wire))
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<ObjectNode> for Node {
    fn from(value: ObjectNode) -> Self {
        Self::Object(value)
    }
}

impl From<Reference> for Node {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Integer(value))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Self::Array(value)
    }
}
