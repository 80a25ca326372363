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

//! Specref JSON Conversion
//!
//! Converts JSON documents into the generic node tree and back.
//!
//! - `$ref` objects become [`Reference`](specref_core::Reference) nodes,
//!   keeping their siblings
//! - object shapes are inferred from their position in the document
//! - key order is preserved in both directions
//!
//! # Examples
//!
//! ```rust
//! use specref_json::{from_json, to_json_value, FromJsonConfig};
//!
//! let json = r#"{"openapi": "3.0.3", "components": {"schemas": {"Pet": {"type": "object"}}}}"#;
//! let tree = from_json(json, &FromJsonConfig::default()).unwrap();
//! let value = to_json_value(&tree);
//! assert_eq!(value["components"]["schemas"]["Pet"]["type"], "object");
//! ```

mod from_json;
pub mod infer;
mod to_json;

pub use from_json::{
    from_json, from_json_value, from_json_value_with_shape, FromJsonConfig, FromJsonConfigBuilder,
    JsonError, DEFAULT_MAX_DEPTH, DEFAULT_MAX_DOCUMENT_SIZE,
};
pub use to_json::{to_json, to_json_value, ToJsonConfig};
