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

//! Expansion benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use specref_core::{Node, ObjectNode, RootContainers, Shape};
use specref_expand::{expand, ExpandOptions, LoadPolicy};
use specref_test::{cyclic_chain, petstore_v3};

/// A schema collection where every schema references the next `fan_out`.
fn wide_document(schemas: usize, fan_out: usize) -> Node {
    let mut collection = ObjectNode::new(Shape::Generic);
    for i in 0..schemas {
        let mut properties = ObjectNode::new(Shape::Generic);
        for j in 1..=fan_out {
            let target = (i + j) % schemas;
            properties.insert_wire(
                format!("p{}", j),
                Node::reference(format!("#/components/schemas/S{}", target)),
            );
        }
        collection.insert_wire(
            format!("S{}", i),
            ObjectNode::new(Shape::Schema)
                .with("type", Node::string("object"))
                .with("properties", properties.into())
                .into(),
        );
    }
    ObjectNode::new(Shape::Generic)
        .with("openapi", Node::string("3.0.3"))
        .with(
            "components",
            ObjectNode::new(Shape::Generic)
                .with("schemas", collection.into())
                .into(),
        )
        .into()
}

fn bench_fixtures(c: &mut Criterion) {
    let options = ExpandOptions::builder().policy(LoadPolicy::Offline).build();
    let containers = RootContainers::openapi3();
    let mut group = c.benchmark_group("fixtures");
    for (name, doc) in [("petstore_v3", petstore_v3()), ("cyclic_chain", cyclic_chain())] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut tree = doc.clone();
                expand(black_box(&mut tree), "/bench/api.json", &containers, &options)
            })
        });
    }
    group.finish();
}

fn bench_fan_out(c: &mut Criterion) {
    let options = ExpandOptions::builder().policy(LoadPolicy::Offline).build();
    let containers = RootContainers::openapi3();
    let mut group = c.benchmark_group("fan_out");
    for schemas in [4usize, 6, 8] {
        let doc = wide_document(schemas, 2);
        group.bench_with_input(BenchmarkId::from_parameter(schemas), &doc, |b, doc| {
            b.iter(|| {
                let mut tree = doc.clone();
                expand(black_box(&mut tree), "/bench/api.json", &containers, &options)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fixtures, bench_fan_out);
criterion_main!(benches);
