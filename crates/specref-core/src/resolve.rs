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

//! Pointer resolution against a node tree.
//!
//! For each token the resolver looks at the current node:
//!
//! - **Object**: extension fields first, then structural fields by wire name
//! - **Array**: the token must be a non-negative decimal index
//! - **Scalar**: resolution cannot continue
//! - **Reference**: the pure resolver stops and reports the reference together
//!   with the number of tokens consumed so far
//!
//! Resolution never mutates the tree.

use crate::error::{SpecError, SpecResult};
use crate::node::{Node, Reference};
use crate::pointer::Pointer;

/// Outcome of a pointer lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// The pointer addressed this node.
    Found(&'a Node),
    /// The path crosses a reference after `consumed` tokens.
    ///
    /// The caller must resolve `reference` and continue with the remaining
    /// tokens against its target.
    Indirect {
        reference: &'a Reference,
        consumed: usize,
    },
}

/// Parse an array index token.
///
/// Only plain decimal digits are accepted; a leading zero is rejected unless
/// the token is `0` itself. Indices too large for `usize` are simply absent.
fn parse_index(token: &str, at: &Pointer) -> SpecResult<Option<usize>> {
    let valid = !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'));
    if !valid {
        return Err(SpecError::invalid_pointer(format!(
            "'{}' is not a valid array index",
            token
        ))
        .with_pointer(at.to_string()));
    }
    Ok(token.parse::<usize>().ok())
}

/// Resolve `pointer` against `root`, stopping at references.
pub fn lookup<'a>(root: &'a Node, pointer: &Pointer) -> SpecResult<Lookup<'a>> {
    let mut current = root;
    for (i, token) in pointer.tokens().iter().enumerate() {
        let at = || pointer.prefix(i + 1);
        current = match current {
            Node::Reference(reference) => {
                return Ok(Lookup::Indirect {
                    reference,
                    consumed: i,
                })
            }
            Node::Object(obj) => obj.get(token).ok_or_else(|| {
                SpecError::not_found(format!("no member '{}'", token)).with_pointer(at().to_string())
            })?,
            Node::Array(items) => {
                let index = parse_index(token, &at())?;
                index.and_then(|idx| items.get(idx)).ok_or_else(|| {
                    SpecError::not_found(format!(
                        "index {} out of range for array of length {}",
                        token,
                        items.len()
                    ))
                    .with_pointer(at().to_string())
                })?
            }
            Node::Scalar(scalar) => {
                return Err(SpecError::type_mismatch(format!(
                    "cannot resolve '{}' inside a {} value",
                    token,
                    scalar.type_name()
                ))
                .with_pointer(at().to_string()))
            }
        };
    }
    Ok(Lookup::Found(current))
}

/// Resolve `pointer` against `root`.
///
/// A path that crosses a reference is reported as `NotFound`; use
/// [`lookup`] to handle that case.
pub fn resolve<'a>(root: &'a Node, pointer: &Pointer) -> SpecResult<&'a Node> {
    match lookup(root, pointer)? {
        Lookup::Found(node) => Ok(node),
        Lookup::Indirect {
            reference,
            consumed,
        } => Err(SpecError::not_found(format!(
            "path crosses reference '{}'",
            reference.target()
        ))
        .with_pointer(pointer.prefix(consumed).to_string())),
    }
}

/// Parse `pointer` and resolve it against `root`.
pub fn resolve_pointer<'a>(root: &'a Node, pointer: &str) -> SpecResult<&'a Node> {
    resolve(root, &Pointer::parse(pointer)?)
}

/// Mutable variant of [`resolve`].
pub fn resolve_mut<'a>(root: &'a mut Node, pointer: &Pointer) -> SpecResult<&'a mut Node> {
    let mut current = root;
    for (i, token) in pointer.tokens().iter().enumerate() {
        let at = || pointer.prefix(i + 1);
        current = match current {
            Node::Reference(reference) => {
                return Err(SpecError::not_found(format!(
                    "path crosses reference '{}'",
                    reference.target()
                ))
                .with_pointer(pointer.prefix(i).to_string()))
            }
            Node::Object(obj) => obj.get_mut(token).ok_or_else(|| {
                SpecError::not_found(format!("no member '{}'", token)).with_pointer(at().to_string())
            })?,
            Node::Array(items) => {
                let len = items.len();
                let index = parse_index(token, &at())?;
                index.and_then(|idx| items.get_mut(idx)).ok_or_else(|| {
                    SpecError::not_found(format!(
                        "index {} out of range for array of length {}",
                        token, len
                    ))
                    .with_pointer(at().to_string())
                })?
            }
            Node::Scalar(scalar) => {
                return Err(SpecError::type_mismatch(format!(
                    "cannot resolve '{}' inside a {} value",
                    token,
                    scalar.type_name()
                ))
                .with_pointer(at().to_string()))
            }
        };
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpecErrorKind;
    use crate::node::ObjectNode;
    use crate::shape::Shape;

    fn pets() -> Node {
        Node::Array(vec![
            ObjectNode::new(Shape::Generic).with("name", Node::string("rex")).into(),
            ObjectNode::new(Shape::Generic).with("name", Node::string("tom")).into(),
        ])
    }

    fn document() -> Node {
        let param = ObjectNode::new(Shape::Parameter)
            .with("name", Node::string("limit"))
            .with("in", Node::string("query"))
            .with("x-rate", Node::from(10));
        let parameters = ObjectNode::new(Shape::Generic).with("limit", param.into());
        let components = ObjectNode::new(Shape::Generic)
            .with("parameters", parameters.into())
            .with("alias", Node::reference("#/components/parameters/limit"));
        ObjectNode::new(Shape::Generic)
            .with("components", components.into())
            .with("pets", pets())
            .with("title", Node::string("API"))
            .into()
    }

    // ==================== Successful resolution tests ====================

    #[test]
    fn test_resolve_root() {
        let doc = document();
        assert_eq!(resolve_pointer(&doc, "").unwrap(), &doc);
        assert_eq!(resolve_pointer(&doc, "#").unwrap(), &doc);
    }

    #[test]
    fn test_resolve_structural_by_wire_name() {
        let doc = document();
        let node = resolve_pointer(&doc, "#/components/parameters/limit/in").unwrap();
        assert_eq!(node.as_str(), Some("query"));
    }

    #[test]
    fn test_resolve_extension() {
        let doc = document();
        let node = resolve_pointer(&doc, "/components/parameters/limit/x-rate").unwrap();
        assert_eq!(node, &Node::from(10));
    }

    #[test]
    fn test_resolve_array_index() {
        let doc = pets();
        assert_eq!(resolve_pointer(&doc, "/0/name").unwrap().as_str(), Some("rex"));
        assert_eq!(resolve_pointer(&doc, "/1/name").unwrap().as_str(), Some("tom"));
    }

    // ==================== Error tests ====================

    #[test]
    fn test_array_index_out_of_range() {
        let err = resolve_pointer(&pets(), "/5/name").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::NotFound);
        assert_eq!(err.pointer.as_deref(), Some("/5"));
    }

    #[test]
    fn test_array_index_not_numeric() {
        for token in ["/abc", "/-", "/01", "/+1", "/-1", "/"] {
            let err = resolve_pointer(&pets(), token).unwrap_err();
            assert_eq!(err.kind, SpecErrorKind::InvalidPointer, "token {}", token);
        }
    }

    #[test]
    fn test_huge_index_is_not_found() {
        let err = resolve_pointer(&pets(), "/99999999999999999999999").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::NotFound);
    }

    #[test]
    fn test_missing_member() {
        let err = resolve_pointer(&document(), "/components/schemas").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::NotFound);
        assert_eq!(err.pointer.as_deref(), Some("/components/schemas"));
    }

    #[test]
    fn test_unknown_wire_name_on_typed_shape() {
        let err = resolve_pointer(&document(), "/components/parameters/limit/minimumm").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::NotFound);
    }

    #[test]
    fn test_past_scalar() {
        let err = resolve_pointer(&document(), "/title/x").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::TypeMismatch);
    }

    #[test]
    fn test_invalid_pointer_syntax() {
        let err = resolve_pointer(&document(), "components").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::InvalidPointer);
    }

    // ==================== Reference crossing tests ====================

    #[test]
    fn test_lookup_reports_indirect() {
        let doc = document();
        let pointer = Pointer::parse("/components/alias/name").unwrap();
        match lookup(&doc, &pointer).unwrap() {
            Lookup::Indirect {
                reference,
                consumed,
            } => {
                assert_eq!(reference.target(), "#/components/parameters/limit");
                assert_eq!(consumed, 2);
            }
            other => panic!("expected indirect lookup, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_ending_on_reference_is_found() {
        let doc = document();
        let pointer = Pointer::parse("/components/alias").unwrap();
        assert!(matches!(lookup(&doc, &pointer).unwrap(), Lookup::Found(Node::Reference(_))));
    }

    #[test]
    fn test_resolve_crossing_reference_is_not_found() {
        let err = resolve_pointer(&document(), "/components/alias/name").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::NotFound);
        assert_eq!(err.pointer.as_deref(), Some("/components/alias"));
    }

    // ==================== Mutable resolution tests ====================

    #[test]
    fn test_resolve_mut() {
        let mut doc = document();
        let pointer = Pointer::parse("/pets/1/name").unwrap();
        *resolve_mut(&mut doc, &pointer).unwrap() = Node::string("felix");
        assert_eq!(resolve(&doc, &pointer).unwrap().as_str(), Some("felix"));
    }

    #[test]
    fn test_resolve_mut_errors_match() {
        let mut doc = document();
        let pointer = Pointer::parse("/pets/7").unwrap();
        assert_eq!(
            resolve_mut(&mut doc, &pointer).unwrap_err().kind,
            SpecErrorKind::NotFound
        );
    }
}
