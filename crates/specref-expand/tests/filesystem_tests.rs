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

//! Expansion of multi-file documents on disk.

use specref_core::{resolve_pointer, Node, RootContainers, SpecErrorKind};
use specref_expand::{expand, uri::base_url, Cancellation, ExpandOptions, FsLoader, LoadPolicy, ResourceLoader};
use specref_test::{count_references, write_bundle};
use std::path::Path;

fn load_root(path: &Path) -> Node {
    let uri = base_url(path.to_str().unwrap()).unwrap();
    FsLoader::new().load(&uri, &Cancellation::new()).unwrap()
}

fn expand_file(path: &Path, options: &ExpandOptions) -> specref_core::SpecResult<Node> {
    let mut root = load_root(path);
    let containers = RootContainers::detect(&root);
    let out = expand(&mut root, path.to_str().unwrap(), &containers, options)?;
    Ok(out.tree.unwrap())
}

#[test]
fn test_bundle_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let root = write_bundle(dir.path()).unwrap();
    let out = expand_file(&root, &ExpandOptions::default()).unwrap();

    assert_eq!(count_references(&out), 0);
    let name = resolve_pointer(
        &out,
        "/paths/~1pets/get/responses/200/content/application~1json/schema/properties/name/type",
    )
    .unwrap();
    assert_eq!(name, &Node::string("string"));
}

#[test]
fn test_paths_with_spaces_and_parentheses() {
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path().join("Program Files (x86)").join("AppName");
    let root = write_bundle(&app).unwrap();
    let out = expand_file(&root, &ExpandOptions::default()).unwrap();

    let error = resolve_pointer(
        &out,
        "/paths/~1pets/get/responses/200/content/application~1json/schema/properties/error/properties/message/type",
    )
    .unwrap();
    assert_eq!(error, &Node::string("string"));
}

#[test]
fn test_local_only_allows_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = write_bundle(dir.path()).unwrap();
    let options = ExpandOptions::builder().policy(LoadPolicy::LocalOnly).build();
    assert!(expand_file(&root, &options).is_ok());
}

#[test]
fn test_missing_external_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = write_bundle(dir.path()).unwrap();
    std::fs::remove_file(dir.path().join("other.json")).unwrap();

    let err = expand_file(&root, &ExpandOptions::default()).unwrap_err();
    assert_eq!(err.kind, SpecErrorKind::Load);
    assert!(err.uri.as_deref().is_some_and(|uri| uri.ends_with("/other.json")));
}
