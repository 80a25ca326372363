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

//! Load policies

use super::ResourceLoader;
use crate::cancel::Cancellation;
use specref_core::{Node, SpecError, SpecResult};
use tracing::debug;
use url::Url;

/// Which documents a loader may fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Any scheme the wrapped loader supports.
    #[default]
    Any,
    /// Only `file:` URLs.
    LocalOnly,
    /// Nothing; every external reference fails.
    Offline,
}

impl LoadPolicy {
    /// Alias of [`LoadPolicy::LocalOnly`].
    pub const NO_REMOTE: LoadPolicy = LoadPolicy::LocalOnly;

    /// Whether the policy permits fetching `uri`.
    pub fn allows(self, uri: &Url) -> bool {
        match self {
            Self::Any => true,
            Self::LocalOnly => uri.scheme() == "file",
            Self::Offline => false,
        }
    }
}

/// Applies a [`LoadPolicy`] in front of another loader.
#[derive(Debug)]
pub struct PolicyLoader<L> {
    inner: L,
    policy: LoadPolicy,
}

impl<L: ResourceLoader> PolicyLoader<L> {
    /// Wrap `inner` with `policy`.
    pub fn new(inner: L, policy: LoadPolicy) -> Self {
        Self { inner, policy }
    }

    /// The enforced policy.
    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }
}

impl<L: ResourceLoader> ResourceLoader for PolicyLoader<L> {
    fn load(&self, uri: &Url, cancel: &Cancellation) -> SpecResult<Node> {
        if !self.policy.allows(uri) {
            debug!("Policy {:?} refused {}", self.policy, uri);
            return Err(SpecError::load_forbidden(format!(
                "load policy {:?} does not allow this document",
                self.policy
            ))
            .with_uri(uri.as_str()));
        }
        self.inner.load(uri, cancel)
    }
}
