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

//! Node tree traversal.
//!
//! The visitor pattern separates the recursive walk from what is done at each
//! node. Implement [`NodeVisitor`] and hand it to [`traverse`]; the context
//! passed to every callback carries the current depth and the pointer of the
//! visited node, with object keys given as wire names.
//!
//! # Example
//!
//! ```text
//! use specref_core::traverse::{traverse, ReferenceCollector};
//!
//! let mut refs = ReferenceCollector::default();
//! traverse(&tree, &mut refs)?;
//! for (pointer, target) in &refs.references {
//!     println!("{} -> {}", pointer, target);
//! }
//! ```

use crate::node::{Node, ObjectNode, Reference, Scalar};
use crate::pointer::Pointer;

/// Context provided to visitors during traversal.
#[derive(Debug, Clone, Default)]
pub struct VisitorContext {
    /// Current nesting depth (0 = root).
    pub depth: usize,
    /// Pointer from the root to the current node.
    pub path: Pointer,
}

impl VisitorContext {
    /// Create a new context for the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child context with incremented depth.
    pub fn child(&self, token: impl Into<String>) -> Self {
        Self {
            depth: self.depth + 1,
            path: self.path.child(token),
        }
    }
}

/// Trait for visiting the nodes of a tree.
///
/// All methods except [`visit_scalar`](Self::visit_scalar) have empty
/// default implementations.
pub trait NodeVisitor {
    /// Error type returned by visitor methods.
    type Error;

    /// Called when visiting a reference. References are leaves.
    fn visit_reference(
        &mut self,
        _reference: &Reference,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when visiting a scalar value.
    fn visit_scalar(&mut self, value: &Scalar, ctx: &VisitorContext) -> Result<(), Self::Error>;

    /// Called at the start of an object (before visiting children).
    fn begin_object(&mut self, _object: &ObjectNode, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called at the end of an object (after visiting children).
    fn end_object(&mut self, _object: &ObjectNode, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called at the start of an array (before visiting items).
    fn begin_array(&mut self, _items: &[Node], _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called at the end of an array (after visiting items).
    fn end_array(&mut self, _items: &[Node], _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Traverse a tree, calling visitor methods for each node.
pub fn traverse<V: NodeVisitor>(root: &Node, visitor: &mut V) -> Result<(), V::Error> {
    traverse_node(root, visitor, &VisitorContext::new())
}

fn traverse_node<V: NodeVisitor>(
    node: &Node,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> Result<(), V::Error> {
    match node {
        Node::Reference(reference) => visitor.visit_reference(reference, ctx)?,
        Node::Scalar(value) => visitor.visit_scalar(value, ctx)?,
        Node::Object(object) => {
            visitor.begin_object(object, ctx)?;
            for (key, child) in object.iter() {
                traverse_node(child, visitor, &ctx.child(key))?;
            }
            visitor.end_object(object, ctx)?;
        }
        Node::Array(items) => {
            visitor.begin_array(items, ctx)?;
            for (index, child) in items.iter().enumerate() {
                traverse_node(child, visitor, &ctx.child(index.to_string()))?;
            }
            visitor.end_array(items, ctx)?;
        }
    }
    Ok(())
}

/// Statistics collector visitor for testing and analysis.
#[derive(Debug, Default)]
pub struct StatsCollector {
    /// Number of references visited.
    pub reference_count: usize,
    /// Number of scalars visited.
    pub scalar_count: usize,
    /// Number of objects visited.
    pub object_count: usize,
    /// Number of arrays visited.
    pub array_count: usize,
    /// Maximum depth reached.
    pub max_depth: usize,
}

impl NodeVisitor for StatsCollector {
    type Error = std::convert::Infallible;

    fn visit_reference(&mut self, _reference: &Reference, ctx: &VisitorContext) -> Result<(), Self::Error> {
        self.reference_count += 1;
        self.max_depth = self.max_depth.max(ctx.depth);
        Ok(())
    }

    fn visit_scalar(&mut self, _value: &Scalar, ctx: &VisitorContext) -> Result<(), Self::Error> {
        self.scalar_count += 1;
        self.max_depth = self.max_depth.max(ctx.depth);
        Ok(())
    }

    fn begin_object(&mut self, _object: &ObjectNode, ctx: &VisitorContext) -> Result<(), Self::Error> {
        self.object_count += 1;
        self.max_depth = self.max_depth.max(ctx.depth);
        Ok(())
    }

    fn begin_array(&mut self, _items: &[Node], ctx: &VisitorContext) -> Result<(), Self::Error> {
        self.array_count += 1;
        self.max_depth = self.max_depth.max(ctx.depth);
        Ok(())
    }
}

/// Collects every reference with the pointer it was found at.
#[derive(Debug, Default)]
pub struct ReferenceCollector {
    /// `(location, $ref target)` pairs in document order.
    pub references: Vec<(Pointer, String)>,
}

impl ReferenceCollector {
    /// Distinct document parts of external references, in first-seen order.
    pub fn external_documents(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for (_, target) in &self.references {
            let end = target.find('#').unwrap_or(target.len());
            let document = &target[..end];
            if !document.is_empty() && !seen.contains(&document) {
                seen.push(document);
            }
        }
        seen
    }
}

impl NodeVisitor for ReferenceCollector {
    type Error = std::convert::Infallible;

    fn visit_reference(&mut self, reference: &Reference, ctx: &VisitorContext) -> Result<(), Self::Error> {
        self.references
            .push((ctx.path.clone(), reference.target().to_string()));
        Ok(())
    }

    fn visit_scalar(&mut self, _value: &Scalar, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }
}
