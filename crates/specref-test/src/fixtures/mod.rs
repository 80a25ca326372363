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

//! Canonical test fixtures.
//!
//! - **documents**: complete OpenAPI 3 and Swagger 2 petstores, plain arrays
//! - **cycles**: self, mutual and three-way recursive schemas
//! - **bundle**: a root document with external JSON and YAML documents

mod bundle;
mod cycles;
mod documents;

pub use bundle::*;
pub use cycles::*;
pub use documents::*;

use crate::FixtureList;
use specref_core::Node;
use specref_json::{from_json, FromJsonConfig};

/// Parse fixture JSON.
pub(crate) fn parse(json: &str) -> Node {
    from_json(json, &FromJsonConfig::default()).expect("fixture is valid JSON")
}

/// Returns all fixture functions for iteration.
pub fn all() -> FixtureList {
    vec![
        ("petstore_v3", petstore_v3),
        ("petstore_v2", petstore_v2),
        ("array_of_objects", array_of_objects),
        ("self_referencing", self_referencing),
        ("cyclic_pair", cyclic_pair),
        ("cyclic_chain", cyclic_chain),
    ]
}
