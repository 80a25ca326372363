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

//! Retrying loader

use super::ResourceLoader;
use crate::cancel::Cancellation;
use specref_core::{Node, SpecErrorKind, SpecResult};
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Retries transient `Load` failures of another loader.
///
/// `LoadForbidden`, `Cancelled` and limit errors are returned immediately.
#[derive(Debug)]
pub struct RetryLoader<L> {
    inner: L,
    retries: usize,
    backoff: Duration,
}

impl<L: ResourceLoader> RetryLoader<L> {
    /// Retry up to `retries` times with no delay.
    pub fn new(inner: L, retries: usize) -> Self {
        Self {
            inner,
            retries,
            backoff: Duration::ZERO,
        }
    }

    /// Sleep `backoff * attempt` between attempts.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

impl<L: ResourceLoader> ResourceLoader for RetryLoader<L> {
    fn load(&self, uri: &Url, cancel: &Cancellation) -> SpecResult<Node> {
        let mut attempt = 0;
        loop {
            match self.inner.load(uri, cancel) {
                Err(e) if e.kind == SpecErrorKind::Load && attempt < self.retries => {
                    attempt += 1;
                    warn!("Load of {} failed (attempt {} of {}): {}", uri, attempt, self.retries + 1, e);
                    if !self.backoff.is_zero() {
                        std::thread::sleep(self.backoff * attempt as u32);
                    }
                    cancel.check(uri.as_str())?;
                }
                result => return result,
            }
        }
    }
}
