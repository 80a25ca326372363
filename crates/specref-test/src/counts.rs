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

//! Fixture counting utilities.
//!
//! Functions for counting nodes and references in test fixtures for verification.

use specref_core::{traverse, Node, StatsCollector};

fn stats(node: &Node) -> StatsCollector {
    let mut stats = StatsCollector::default();
    let _ = traverse(node, &mut stats);
    stats
}

/// Count every node in a tree (objects, arrays, scalars and references).
pub fn count_nodes(node: &Node) -> usize {
    let stats = stats(node);
    stats.object_count + stats.array_count + stats.scalar_count + stats.reference_count
}

/// Count the references left in a tree.
pub fn count_references(node: &Node) -> usize {
    stats(node).reference_count
}
