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

//! Specref YAML Conversion
//!
//! Converts YAML documents into the generic node tree and back. YAML input
//! is normalized to JSON first, so numeric keys such as `200:` under
//! `responses` become string keys and anchors/aliases are expanded.

mod error;
mod from_yaml;
mod to_yaml;

pub use error::YamlError;
pub use from_yaml::{
    from_yaml, from_yaml_value, FromYamlConfig, FromYamlConfigBuilder, DEFAULT_MAX_DOCUMENT_SIZE,
    DEFAULT_MAX_NESTING_DEPTH,
};
pub use to_yaml::{to_yaml, to_yaml_value};
