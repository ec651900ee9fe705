// SPDX-License-Identifier: Apache-2.0

//! Sampler microbenchmarks.
//!
//! The hash and selection run inside the external compiler-integration step
//! for every type and member of the program being built, so their cost has
//! to stay negligible next to the build itself.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use weavebench_core::{
    name_hash, select_targets, MemberKind, MemberSymbol, SamplingConfig, Stride, SymbolManifest,
    TypeSymbol,
};

fn synthetic_manifest(types: usize, members_per_type: usize) -> SymbolManifest {
    let types = (0..types)
        .map(|t| TypeSymbol {
            name: format!("Shop.Module{}.Service{t}", t % 17),
            members: (0..members_per_type)
                .map(|m| MemberSymbol {
                    name: format!("Shop.Module{}.Service{t}.Operation{m}", t % 17),
                    kind: MemberKind::Method,
                    accessors: Vec::new(),
                })
                .collect(),
        })
        .collect();

    SymbolManifest { types }
}

fn bench_name_hash(c: &mut Criterion) {
    let names: Vec<String> = (0..1024)
        .map(|i| format!("Shop.Catalog.ProductService{i}.GetById{i}"))
        .collect();

    c.bench_function("sampler_name_hash", |b| {
        let mut idx = 0;
        b.iter(|| {
            idx = (idx + 1) % names.len();
            black_box(name_hash(&names[idx]))
        });
    });
}

fn bench_stride_includes(c: &mut Criterion) {
    let stride = Stride::from_percentage(10).unwrap();

    c.bench_function("sampler_stride_includes", |b| {
        b.iter(|| black_box(stride.includes(black_box("Shop.Orders.OrderService.Submit"))));
    });
}

fn bench_select_targets(c: &mut Criterion) {
    let manifest = synthetic_manifest(500, 20);
    let config = SamplingConfig::from_percentages(10, 50).unwrap();

    c.bench_function("selection_500_types_20_members", |b| {
        b.iter(|| select_targets(black_box(&manifest), black_box(&config)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_name_hash,
    bench_stride_includes,
    bench_select_targets
);
criterion_main!(benches);
