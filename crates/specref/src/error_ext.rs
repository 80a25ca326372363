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

//! Error context helpers for improved ergonomics.
//!
//! This module provides an extension trait for results whose error converts
//! into [`SpecError`], so context can be attached as errors propagate.
//!
//! # Examples
//!
//! ```rust
//! use specref::{resolve_pointer, Node, SpecResultExt};
//!
//! fn title(doc: &Node) -> specref::SpecResult<&Node> {
//!     resolve_pointer(doc, "/info/title").context("while reading the API title")
//! }
//! ```
//!
//! Foreign errors are converted on the way:
//!
//! ```rust
//! use specref::SpecResultExt;
//!
//! fn read(path: &str) -> specref::SpecResult<String> {
//!     std::fs::read_to_string(path).with_context(|| format!("reading {}", path))
//! }
//! ```

use crate::SpecError;
use std::fmt;

/// Extension trait for adding context to results.
///
/// Implemented for every `Result<T, E>` whose error converts into
/// [`SpecError`]: `SpecError` itself, `std::io::Error`, `JsonError` and
/// `YamlError`.
pub trait SpecResultExt<T> {
    /// Add context to an error.
    ///
    /// Context is prepended to any existing context, separated by `"; "`.
    fn context<C>(self, context: C) -> Result<T, SpecError>
    where
        C: fmt::Display;

    /// Add context computed only on the error path.
    fn with_context<C, F>(self, f: F) -> Result<T, SpecError>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> SpecResultExt<T> for Result<T, E>
where
    E: Into<SpecError>,
{
    fn context<C>(self, context: C) -> Result<T, SpecError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context_to_error(e.into(), context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, SpecError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context_to_error(e.into(), f().to_string()))
    }
}

/// Prepend `new_context` to the context chain of `error`.
fn add_context_to_error(mut error: SpecError, new_context: String) -> SpecError {
    if new_context.is_empty() {
        return error;
    }

    error.context = Some(match error.context {
        Some(existing) => format!("{}; {}", new_context, existing),
        None => new_context,
    });

    error
}
