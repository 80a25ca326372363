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

//! Shared test fixtures and utilities for specref.
//!
//! Canonical OpenAPI 3 and Swagger 2 documents, cyclic schema sets and a
//! small multi-document bundle, usable both in memory and written to disk.
//!
//! # Quick Start
//!
//! ```rust
//! use specref_test::{count_references, fixtures};
//!
//! let doc = fixtures::petstore_v3();
//! assert!(count_references(&doc) > 0);
//!
//! for (name, fixture_fn) in fixtures::all() {
//!     let _ = (name, fixture_fn());
//! }
//! ```

use specref_core::Node;

/// Type alias for a list of fixture functions (name, generator).
pub type FixtureList = Vec<(&'static str, fn() -> Node)>;

/// Canonical test fixtures.
pub mod fixtures;

/// Fixture counting utilities.
pub mod counts;

pub use counts::{count_nodes, count_references};
pub use fixtures::*;
