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

//! JSON pointer parsing and escaping.
//!
//! Pointers are stored as unescaped tokens. The escaped form (`~0`, `~1`) is
//! produced by [`Display`](std::fmt::Display); the fragment form additionally
//! percent-encodes characters that may not appear in a URI fragment.

use crate::error::{SpecError, SpecResult};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Characters percent-encoded when a pointer is written as a URI fragment.
const FRAGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Escape a single reference token (`~` → `~0`, `/` → `~1`).
pub fn escape_token(token: &str) -> Cow<'_, str> {
    if token.contains(['~', '/']) {
        Cow::Owned(token.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(token)
    }
}

/// Unescape a single reference token.
///
/// Any `~` not followed by `0` or `1` is an error.
pub fn unescape_token(token: &str) -> SpecResult<String> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            Some(other) => {
                return Err(SpecError::invalid_pointer(format!(
                    "invalid escape sequence '~{}' in token '{}'",
                    other, token
                )))
            }
            None => {
                return Err(SpecError::invalid_pointer(format!(
                    "dangling '~' at end of token '{}'",
                    token
                )))
            }
        }
    }
    Ok(out)
}

/// A parsed JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Pointer {
    tokens: Vec<String>,
}

impl Pointer {
    /// The empty pointer, addressing the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a pointer string.
    ///
    /// Accepts both the plain form (`/a/b`) and the fragment form (`#/a/b`).
    /// The fragment form is percent-decoded before tokenizing. `""` and `"#"`
    /// are the root pointer.
    pub fn parse(input: &str) -> SpecResult<Self> {
        match input.strip_prefix('#') {
            Some(fragment) => Self::from_fragment(fragment),
            None => Self::parse_escaped(input),
        }
    }

    /// Parse a URI fragment (without the leading `#`).
    pub fn from_fragment(fragment: &str) -> SpecResult<Self> {
        let decoded = percent_decode_str(fragment).decode_utf8().map_err(|_| {
            SpecError::invalid_pointer(format!(
                "fragment '{}' is not valid UTF-8 after percent-decoding",
                fragment
            ))
        })?;
        Self::parse_escaped(&decoded)
    }

    fn parse_escaped(input: &str) -> SpecResult<Self> {
        if input.is_empty() {
            return Ok(Self::root());
        }
        let rest = input.strip_prefix('/').ok_or_else(|| {
            SpecError::invalid_pointer(format!("pointer '{}' must start with '/'", input))
        })?;
        let tokens = rest
            .split('/')
            .map(unescape_token)
            .collect::<SpecResult<Vec<_>>>()?;
        Ok(Self { tokens })
    }

    /// Build a pointer from unescaped tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// The unescaped tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.tokens.pop()
    }

    /// A new pointer one level deeper.
    pub fn child(&self, token: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.push(token);
        child
    }

    /// The parent pointer, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            tokens: self.tokens[..self.tokens.len() - 1].to_vec(),
        })
    }

    /// The last token, or `None` for the root.
    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    /// Whether `prefix` equals this pointer or is one of its ancestors.
    pub fn starts_with(&self, prefix: &Pointer) -> bool {
        self.tokens.starts_with(&prefix.tokens)
    }

    /// Append all tokens of `other`.
    pub fn join(&self, other: &Pointer) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.extend(other.tokens.iter().cloned());
        Self { tokens }
    }

    /// The first `len` tokens.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            tokens: self.tokens[..len.min(self.tokens.len())].to_vec(),
        }
    }

    /// Tokens after the first `len`.
    pub fn suffix(&self, len: usize) -> Self {
        Self {
            tokens: self.tokens[len.min(self.tokens.len())..].to_vec(),
        }
    }

    /// The fragment form, including the leading `#`.
    pub fn to_fragment(&self) -> String {
        format!("#{}", utf8_percent_encode(&self.to_string(), FRAGMENT))
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape_token(token))?;
        }
        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpecErrorKind;
    use proptest::prelude::*;

    // ==================== Parsing tests ====================

    #[test]
    fn test_parse_root_forms() {
        assert!(Pointer::parse("").unwrap().is_root());
        assert!(Pointer::parse("#").unwrap().is_root());
    }

    #[test]
    fn test_parse_simple() {
        let p = Pointer::parse("/components/schemas/Pet").unwrap();
        assert_eq!(p.tokens(), &["components", "schemas", "Pet"]);
    }

    #[test]
    fn test_parse_fragment_form() {
        let p = Pointer::parse("#/definitions/Pet").unwrap();
        assert_eq!(p.tokens(), &["definitions", "Pet"]);
    }

    #[test]
    fn test_parse_escapes() {
        let p = Pointer::parse("/paths/~1pets~1{id}/a~0b").unwrap();
        assert_eq!(p.tokens(), &["paths", "/pets/{id}", "a~b"]);
    }

    #[test]
    fn test_parse_escape_order() {
        // "~01" is "~" followed by "1", never "/"
        let p = Pointer::parse("/~01").unwrap();
        assert_eq!(p.tokens(), &["~1"]);
    }

    #[test]
    fn test_parse_percent_decoding_in_fragment() {
        let p = Pointer::parse("#/paths/~1my%20pets").unwrap();
        assert_eq!(p.tokens(), &["paths", "/my pets"]);
    }

    #[test]
    fn test_plain_form_not_percent_decoded() {
        let p = Pointer::parse("/a%20b").unwrap();
        assert_eq!(p.tokens(), &["a%20b"]);
    }

    #[test]
    fn test_empty_and_dash_tokens_literal() {
        let p = Pointer::parse("//-").unwrap();
        assert_eq!(p.tokens(), &["", "-"]);
    }

    #[test]
    fn test_parse_missing_slash() {
        let err = Pointer::parse("components/schemas").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::InvalidPointer);
        let err = Pointer::parse("#components").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::InvalidPointer);
    }

    #[test]
    fn test_parse_bad_escape() {
        assert_eq!(
            Pointer::parse("/a~2b").unwrap_err().kind,
            SpecErrorKind::InvalidPointer
        );
        assert_eq!(
            Pointer::parse("/a~").unwrap_err().kind,
            SpecErrorKind::InvalidPointer
        );
    }

    // ==================== Manipulation tests ====================

    #[test]
    fn test_child_and_parent() {
        let p = Pointer::root().child("a").child("b");
        assert_eq!(p.to_string(), "/a/b");
        assert_eq!(p.parent().unwrap().to_string(), "/a");
        assert!(Pointer::root().parent().is_none());
    }

    #[test]
    fn test_starts_with() {
        let p = Pointer::parse("/a/b/c").unwrap();
        assert!(p.starts_with(&Pointer::root()));
        assert!(p.starts_with(&Pointer::parse("/a/b").unwrap()));
        assert!(p.starts_with(&p));
        assert!(!p.starts_with(&Pointer::parse("/a/bc").unwrap()));
        assert!(!Pointer::parse("/a").unwrap().starts_with(&p));
    }

    #[test]
    fn test_prefix_and_suffix() {
        let p = Pointer::parse("/a/b/c").unwrap();
        assert_eq!(p.prefix(1).to_string(), "/a");
        assert_eq!(p.suffix(1).to_string(), "/b/c");
        assert_eq!(p.prefix(1).join(&p.suffix(1)), p);
    }

    #[test]
    fn test_to_fragment() {
        let p = Pointer::from_tokens(["paths", "/my pets"]);
        assert_eq!(p.to_fragment(), "#/paths/~1my%20pets");
        assert_eq!(Pointer::root().to_fragment(), "#");
    }

    // ==================== Property tests ====================

    proptest! {
        #[test]
        fn prop_escape_unescape(token in ".*") {
            let escaped = escape_token(&token);
            prop_assert_eq!(unescape_token(&escaped).unwrap(), token);
        }

        #[test]
        fn prop_display_parses_back(tokens in proptest::collection::vec(".*", 0..6)) {
            let p = Pointer::from_tokens(tokens);
            prop_assert_eq!(Pointer::parse(&p.to_string()).unwrap(), p);
        }

        #[test]
        fn prop_fragment_parses_back(tokens in proptest::collection::vec(".*", 0..6)) {
            let p = Pointer::from_tokens(tokens);
            prop_assert_eq!(Pointer::parse(&p.to_fragment()).unwrap(), p);
        }
    }
}
