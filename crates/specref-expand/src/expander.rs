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

//! Reference expansion
//!
//! The expander copies the scoped subtree, replacing every reference by an
//! expanded copy of its target. References that would re-enter a target
//! still being expanded are kept, which makes cyclic schemas finite.

use crate::cache::ReferenceCache;
use crate::context::{Resolution, ResolutionContext};
use crate::options::{ExpandOptions, ExpandStats, Expanded};
use crate::prefetch::prefetch;
use crate::uri::{base_url, document_url};
use specref_core::{
    resolve, resolve_mut, Node, ObjectNode, Reference, RootContainers, SpecError, SpecResult,
};
use tracing::{debug, trace};

/// Expand references in `tree`.
///
/// `base_uri` is the URL or file path of `tree`; relative references are
/// resolved against it. The scope in `options` selects the subtree to
/// expand, using `containers` for component scopes.
///
/// In non-destructive mode the expanded subtree is returned and `tree` is
/// left untouched. In destructive mode the subtree is replaced inside `tree`
/// and [`Expanded::tree`] is `None`. Either way an error leaves `tree`
/// unchanged.
///
/// # Examples
///
/// ```rust
/// use specref_core::{Node, ObjectNode, RootContainers, Shape};
/// use specref_expand::{expand, ExpandOptions};
///
/// let mut tree: Node = ObjectNode::new(Shape::Generic)
///     .with("a", Node::reference("#/b"))
///     .with("b", Node::string("value"))
///     .into();
///
/// let expanded = expand(&mut tree, "/specs/api.json", &RootContainers::default(), &ExpandOptions::default()).unwrap();
/// let copy = expanded.tree.unwrap();
/// assert_eq!(copy.get("a"), Some(&Node::string("value")));
/// assert_eq!(expanded.stats.references_expanded, 1);
/// ```
pub fn expand(
    tree: &mut Node,
    base_uri: &str,
    containers: &RootContainers,
    options: &ExpandOptions,
) -> SpecResult<Expanded> {
    let base = document_url(&base_url(base_uri)?);
    let start = options.scope.pointer(containers)?;
    let loader = options.effective_loader();
    let cache = options.cache.clone().unwrap_or_else(ReferenceCache::new);
    debug!("Expanding {} at '{}'", base, start);

    let mut prefetched = 0;
    if options.prefetch {
        prefetched = prefetch(
            tree,
            &base,
            loader.as_ref(),
            &cache,
            &options.limits,
            &options.cancellation,
        )?;
    }

    let (expanded, mut stats) = {
        let root: &Node = tree;
        let scoped = resolve(root, &start).map_err(|e| e.or_uri(base.as_str()))?;
        let mut ctx = ResolutionContext::new(
            root,
            base.clone(),
            &cache,
            loader.as_ref(),
            &options.limits,
            &options.cancellation,
            start.clone(),
        );
        let expanded = expand_node(&mut ctx, scoped)?;
        (expanded, ctx.stats)
    };
    stats.documents_loaded += prefetched;
    debug!(
        "Expanded {}: {} references, {} cycles kept, {} documents loaded",
        base, stats.references_expanded, stats.cycles_preserved, stats.documents_loaded
    );

    if options.destructive {
        *resolve_mut(tree, &start)? = expanded;
        Ok(Expanded { tree: None, stats })
    } else {
        Ok(Expanded {
            tree: Some(expanded),
            stats,
        })
    }
}

/// Expand a copy of `node`, which sits at the current location of `ctx`.
fn expand_node(ctx: &mut ResolutionContext<'_>, node: &Node) -> SpecResult<Node> {
    match node {
        Node::Scalar(_) => Ok(node.clone()),
        Node::Reference(reference) => expand_reference(ctx, reference),
        Node::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                ctx.enter(&index.to_string());
                let expanded = expand_node(ctx, item);
                ctx.leave();
                out.push(expanded?);
            }
            Ok(Node::Array(out))
        }
        Node::Object(object) => {
            let mut out = ObjectNode::new(object.shape);
            for (attribute, child) in &object.fields {
                ctx.enter(object.shape.wire_name(attribute));
                let expanded = expand_node(ctx, child);
                ctx.leave();
                out.fields.insert(attribute.clone(), expanded?);
            }
            for (key, child) in &object.extensions {
                ctx.enter(key);
                let expanded = expand_node(ctx, child);
                ctx.leave();
                out.extensions.insert(key.clone(), expanded?);
            }
            Ok(Node::Object(out))
        }
    }
}

fn expand_reference(ctx: &mut ResolutionContext<'_>, reference: &Reference) -> SpecResult<Node> {
    let containing = ctx.current_document().clone();
    let resolution = ctx
        .resolve_reference(reference, &containing)
        .map_err(|e| locate(e, ctx, reference))?;

    match resolution {
        Resolution::Cycle(canonical) => {
            ctx.stats.cycles_preserved += 1;
            debug!(
                "Keeping cyclic reference '{}' at {}{}",
                reference.target(),
                containing,
                ctx.current_location().to_fragment()
            );
            if containing == *ctx.base() {
                return Ok(Node::Reference(reference.clone()));
            }
            // Rewrite so the reference stays valid from the root document
            let rebased = Reference::new(canonical.relative_to(ctx.base()))
                .with_siblings(reference.siblings().clone());
            Ok(Node::Reference(rebased))
        }
        Resolution::Target {
            canonical,
            document,
        } => {
            let target = resolve(document.node(), &canonical.pointer)
                .map_err(|e| e.or_uri(canonical.document.as_str()))?;
            trace!("Expanding '{}' -> {}", reference.target(), canonical);
            ctx.push(&canonical)?;
            let expanded = expand_node(ctx, target);
            ctx.pop();
            let expanded = expanded?;
            ctx.stats.references_expanded += 1;
            Ok(expanded)
        }
    }
}

/// Attach the referencing location to errors that lack context.
fn locate(error: SpecError, ctx: &ResolutionContext<'_>, reference: &Reference) -> SpecError {
    if error.context.is_some() {
        return error;
    }
    let context = format!(
        "while expanding '{}' at {}{}",
        reference.target(),
        ctx.current_document(),
        ctx.current_location().to_fragment()
    );
    error.with_context(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{LoadPolicy, MemoryLoader};
    use crate::options::Scope;
    use specref_core::{resolve_pointer, CollectionKind, Limits, Shape, SpecErrorKind};
    use std::sync::Arc;

    const BASE: &str = "file:///specs/api.json";

    fn schema(fields: Vec<(&str, Node)>) -> Node {
        let mut object = ObjectNode::new(Shape::Schema);
        for (key, value) in fields {
            object.insert_wire(key, value);
        }
        Node::Object(object)
    }

    fn generic(fields: Vec<(&str, Node)>) -> Node {
        let mut object = ObjectNode::new(Shape::Generic);
        for (key, value) in fields {
            object.insert_wire(key, value);
        }
        Node::Object(object)
    }

    fn document(schemas: Vec<(&str, Node)>) -> Node {
        generic(vec![
            ("openapi", Node::string("3.0.3")),
            ("components", generic(vec![("schemas", generic(schemas))])),
        ])
    }

    fn run(tree: &mut Node, options: &ExpandOptions) -> SpecResult<Expanded> {
        expand(tree, BASE, &RootContainers::openapi3(), options)
    }

    // ==================== Basic expansion tests ====================

    #[test]
    fn test_scalars_and_plain_objects_unchanged() {
        let mut tree = document(vec![("Id", schema(vec![("type", Node::string("integer"))]))]);
        let original = tree.clone();
        let expanded = run(&mut tree, &ExpandOptions::default()).unwrap();
        assert_eq!(expanded.tree, Some(original.clone()));
        assert_eq!(tree, original);
        assert_eq!(expanded.stats, ExpandStats::default());
    }

    #[test]
    fn test_reference_to_reference_is_chased() {
        let mut tree = document(vec![
            ("A", Node::reference("#/components/schemas/B")),
            ("B", Node::reference("#/components/schemas/C")),
            ("C", schema(vec![("type", Node::string("string"))])),
        ]);
        let out = run(&mut tree, &ExpandOptions::default()).unwrap();
        let out = out.tree.unwrap();
        let a = resolve_pointer(&out, "/components/schemas/A").unwrap();
        assert_eq!(a.get("type"), Some(&Node::string("string")));
    }

    #[test]
    fn test_siblings_are_discarded() {
        let mut siblings = specref_core::Fields::new();
        siblings.insert("description".to_string(), Node::string("ignored"));
        let with_siblings = Node::Reference(Reference::new("#/components/schemas/B").with_siblings(siblings));
        let mut tree = document(vec![
            ("A", with_siblings),
            ("B", schema(vec![("type", Node::string("string"))])),
        ]);
        let out = run(&mut tree, &ExpandOptions::default()).unwrap().tree.unwrap();
        let a = resolve_pointer(&out, "/components/schemas/A").unwrap();
        assert_eq!(a.get("description"), None);
    }

    #[test]
    fn test_array_items_expanded_in_order() {
        let mut tree = generic(vec![
            ("list", Node::Array(vec![Node::reference("#/b"), Node::from(1), Node::reference("#/a")])),
            ("a", Node::string("A")),
            ("b", Node::string("B")),
        ]);
        let out = run(&mut tree, &ExpandOptions::default()).unwrap().tree.unwrap();
        assert_eq!(
            out.get("list"),
            Some(&Node::Array(vec![Node::string("B"), Node::from(1), Node::string("A")]))
        );
    }

    // ==================== Cycle tests ====================

    #[test]
    fn test_self_reference_kept() {
        let mut tree = document(vec![(
            "Node",
            schema(vec![(
                "properties",
                generic(vec![("next", Node::reference("#/components/schemas/Node"))]),
            )]),
        )]);
        let out = run(&mut tree, &ExpandOptions::default()).unwrap();
        assert_eq!(out.stats.cycles_preserved, 1);
        assert_eq!(out.tree.unwrap(), tree);
    }

    #[test]
    fn test_mutual_cycle_scoped() {
        let mut tree = document(vec![
            ("A", schema(vec![("properties", generic(vec![("b", Node::reference("#/components/schemas/B"))]))])),
            ("B", schema(vec![("properties", generic(vec![("a", Node::reference("#/components/schemas/A"))]))])),
        ]);
        let options = ExpandOptions::builder()
            .scope(Scope::Component {
                kind: CollectionKind::Schemas,
                name: "A".to_string(),
            })
            .build();
        let out = run(&mut tree, &options).unwrap();
        let a = out.tree.unwrap();
        let inner = resolve_pointer(&a, "/properties/b/properties/a").unwrap();
        assert_eq!(inner, &Node::reference("#/components/schemas/A"));
        assert_eq!(out.stats.references_expanded, 1);
        assert_eq!(out.stats.cycles_preserved, 1);
    }

    // ==================== Destructive mode tests ====================

    #[test]
    fn test_destructive_replaces_scope_only() {
        let mut tree = document(vec![
            ("A", Node::reference("#/components/schemas/C")),
            ("B", Node::reference("#/components/schemas/C")),
            ("C", schema(vec![("type", Node::string("string"))])),
        ]);
        let options = ExpandOptions::builder()
            .destructive(true)
            .scope(Scope::Pointer(specref_core::Pointer::parse("/components/schemas/A").unwrap()))
            .build();
        let out = run(&mut tree, &options).unwrap();
        assert!(out.tree.is_none());
        assert!(!resolve_pointer(&tree, "/components/schemas/A").unwrap().is_reference());
        assert!(resolve_pointer(&tree, "/components/schemas/B").unwrap().is_reference());
    }

    #[test]
    fn test_error_leaves_destructive_input_untouched() {
        let mut tree = document(vec![
            ("A", Node::reference("#/components/schemas/C")),
            ("B", Node::reference("#/components/schemas/Missing")),
            ("C", schema(vec![("type", Node::string("string"))])),
        ]);
        let original = tree.clone();
        let options = ExpandOptions::builder().destructive(true).build();
        let err = run(&mut tree, &options).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::NotFound);
        assert!(err.context.as_deref().is_some_and(|c| c.contains("/components/schemas/B")));
        assert_eq!(tree, original);
    }

    // ==================== External document tests ====================

    #[test]
    fn test_external_cycle_is_rebased() {
        // api.json#/components/schemas/A -> models/b.json#/B -> ../api.json#/components/schemas/A
        let b = generic(vec![(
            "B",
            schema(vec![(
                "properties",
                generic(vec![("a", Node::reference("../api.json#/components/schemas/A"))]),
            )]),
        )]);
        let loader = MemoryLoader::new().with_document("file:///specs/models/b.json", b);
        let mut tree = document(vec![("A", Node::reference("models/b.json#/B"))]);
        let options = ExpandOptions::builder().loader(Arc::new(loader)).build();
        let out = run(&mut tree, &options).unwrap().tree.unwrap();
        let inner = resolve_pointer(&out, "/components/schemas/A/properties/a").unwrap();
        assert_eq!(inner, &Node::reference("#/components/schemas/A"));
    }

    #[test]
    fn test_offline_policy_refuses_external() {
        let mut tree = document(vec![("A", Node::reference("models/b.json#/B"))]);
        let options = ExpandOptions::builder().policy(LoadPolicy::Offline).build();
        let err = run(&mut tree, &options).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::LoadForbidden);
        assert_eq!(err.uri.as_deref(), Some("file:///specs/models/b.json"));
    }

    // ==================== Limit tests ====================

    #[test]
    fn test_max_depth() {
        let mut tree = document(vec![
            ("A", Node::reference("#/components/schemas/B")),
            ("B", Node::reference("#/components/schemas/C")),
            ("C", Node::string("leaf")),
        ]);
        let limits = Limits {
            max_depth: 1,
            ..Limits::default()
        };
        let options = ExpandOptions::builder().limits(limits).build();
        let err = run(&mut tree, &options).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::Limit);
    }

    #[test]
    fn test_cancelled_before_start() {
        let mut tree = document(vec![("A", Node::reference("#/components/schemas/B")), ("B", Node::from(1))]);
        let options = ExpandOptions::default();
        options.cancellation.cancel();
        let err = run(&mut tree, &options).unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::Cancelled);
    }
}
