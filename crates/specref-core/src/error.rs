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

//! Error types for pointer resolution, document loading and expansion.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecErrorKind {
    /// Malformed pointer syntax, or a non-index token applied to an array.
    InvalidPointer,
    /// Well-formed path whose target does not exist.
    NotFound,
    /// Path continues past a scalar value.
    TypeMismatch,
    /// A `$ref` value that is not a valid URI reference.
    InvalidReference,
    /// I/O, HTTP or parse failure while loading a document.
    Load,
    /// The configured loader refused to fetch the document.
    LoadForbidden,
    /// The caller cancelled the operation or its deadline passed.
    Cancelled,
    /// A configured resource limit was exceeded.
    Limit,
}

impl fmt::Display for SpecErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPointer => write!(f, "InvalidPointerError"),
            Self::NotFound => write!(f, "NotFoundError"),
            Self::TypeMismatch => write!(f, "TypeMismatchError"),
            Self::InvalidReference => write!(f, "ReferenceError"),
            Self::Load => write!(f, "LoadError"),
            Self::LoadForbidden => write!(f, "LoadForbiddenError"),
            Self::Cancelled => write!(f, "CancelledError"),
            Self::Limit => write!(f, "LimitError"),
        }
    }
}

fn location(uri: &Option<String>, pointer: &Option<String>) -> String {
    match (uri, pointer) {
        (Some(uri), Some(pointer)) => format!(" at {}#{}", uri, pointer),
        (Some(uri), None) => format!(" at {}", uri),
        (None, Some(pointer)) => format!(" at #{}", pointer),
        (None, None) => String::new(),
    }
}

fn suffix(context: &Option<String>) -> String {
    match context {
        Some(context) => format!(" ({})", context),
        None => String::new(),
    }
}

/// An error raised while resolving or expanding references.
///
/// Errors carry the URI and pointer of the offending reference whenever they
/// are known, so a failure can be located without re-running the expansion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}: {message}{}", location(.uri, .pointer), suffix(.context))]
pub struct SpecError {
    /// The kind of error.
    pub kind: SpecErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Document URI the error refers to.
    pub uri: Option<String>,
    /// JSON pointer (escaped form) the error refers to.
    pub pointer: Option<String>,
    /// Additional context (e.g., "while expanding #/paths/~1pets").
    pub context: Option<String>,
}

impl SpecError {
    /// Create a new error.
    pub fn new(kind: SpecErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            uri: None,
            pointer: None,
            context: None,
        }
    }

    /// Attach the document URI.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Attach the document URI unless one is already set.
    ///
    /// Errors bubbling out of nested documents keep the innermost URI.
    pub fn or_uri(mut self, uri: impl Into<String>) -> Self {
        if self.uri.is_none() {
            self.uri = Some(uri.into());
        }
        self
    }

    /// Attach the pointer.
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Whether this error originated at the resource-loading boundary.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self.kind,
            SpecErrorKind::Load | SpecErrorKind::LoadForbidden | SpecErrorKind::Cancelled
        )
    }

    // Convenience constructors for each error kind
    pub fn invalid_pointer(message: impl Into<String>) -> Self {
        Self::new(SpecErrorKind::InvalidPointer, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(SpecErrorKind::NotFound, message)
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(SpecErrorKind::TypeMismatch, message)
    }

    pub fn invalid_reference(message: impl Into<String>) -> Self {
        Self::new(SpecErrorKind::InvalidReference, message)
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::new(SpecErrorKind::Load, message)
    }

    pub fn load_forbidden(message: impl Into<String>) -> Self {
        Self::new(SpecErrorKind::LoadForbidden, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(SpecErrorKind::Cancelled, message)
    }

    pub fn limit(message: impl Into<String>) -> Self {
        Self::new(SpecErrorKind::Limit, message)
    }
}

impl From<std::io::Error> for SpecError {
    fn from(err: std::io::Error) -> Self {
        SpecError::load(err.to_string())
    }
}

/// Result type for specref operations.
pub type SpecResult<T> = Result<T, SpecError>;
