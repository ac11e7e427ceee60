use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mirror::{Filter, Mirror, TypeComparison};
use mirror_runtime::{core_class_ids::*, ClassBuilder, MethodDef, Param, Runtime};
use mirror_sdk::{ClassId, Modifiers};

fn wide_class(runtime: &Runtime, methods: usize) -> ClassId {
    let types = [INT, STRING, LONG, NUMBER, INTEGER];
    let mut builder = ClassBuilder::class("bench.Wide");
    for i in 0..methods {
        let method = MethodDef::new(&format!("method{}", i), types[i % types.len()], Modifiers::PUBLIC)
            .param(Param::new("a", types[(i + 1) % types.len()]))
            .param(Param::new("b", types[(i + 2) % types.len()]));
        builder = builder.method(method);
    }
    runtime.define(builder).unwrap()
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [16usize, 128] {
        let runtime = Runtime::new();
        let class = wide_class(&runtime, size);
        let mirror = Mirror::new(&runtime);
        let subject = mirror.class(class).unwrap();

        let empty = Filter::for_methods();
        group.bench_with_input(BenchmarkId::new("empty", size), &empty, |b, filter| {
            b.iter(|| subject.methods().filter(|m| filter.test(black_box(m))).count());
        });

        let mut by_name = Filter::for_methods();
        by_name.with_name(format!("method{}", size / 2));
        group.bench_with_input(BenchmarkId::new("name", size), &by_name, |b, filter| {
            b.iter(|| subject.method(|m| filter.test(black_box(m))));
        });

        let mut by_signature = Filter::for_methods();
        by_signature.with_parameters(&[INTEGER, LONG]);
        group.bench_with_input(
            BenchmarkId::new("signature_assignability", size),
            &by_signature,
            |b, filter| {
                b.iter(|| subject.methods().filter(|m| filter.test(black_box(m))).count());
            },
        );

        let mut strict = by_signature.copy();
        strict.compare_types_by(TypeComparison::Equality).of_type(NUMBER);
        group.bench_with_input(
            BenchmarkId::new("signature_and_type_equality", size),
            &strict,
            |b, filter| {
                b.iter(|| subject.methods().filter(|m| filter.test(black_box(m))).count());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
