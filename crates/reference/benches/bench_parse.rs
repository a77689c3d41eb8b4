//! Benchmark for instruction extraction and reference assembly.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use opref_reference::{assemble, parse_instructions, CostEntry, CostTable, NameAliases};

fn test_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("opref_reference");

    let source = include_str!("../tests/testdata/fuel_asm.txt").repeat(32);
    let costs: CostTable = parse_instructions(&source)
        .map(|record| (record.name.to_lowercase(), CostEntry::Number(2)))
        .collect();
    let aliases = NameAliases::default();

    group.sample_size(100);
    group.bench_function(BenchmarkId::from_parameter("parse"), |b| {
        b.iter(|| parse_instructions(&source).count());
    });
    group.bench_function(BenchmarkId::from_parameter("assemble"), |b| {
        b.iter(|| {
            let records: Vec<_> = parse_instructions(&source).collect();
            assemble(&records, &aliases, &costs)
        });
    });

    group.finish();
}

criterion_group!(benches, test_parse);
criterion_main!(benches);
