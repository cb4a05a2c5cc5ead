//! Classification throughput on a synthetic cluster dump

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orthoage::*;

fn synthetic_dump(rows: usize) -> String {
    let fragments = ["ENSMODG", "ENSMUSG", "ENSRNOG", "ENSMMUG", "ENSG"];
    (0..rows)
        .map(|row| {
            let tokens: Vec<String> = fragments
                .iter()
                .enumerate()
                .filter(|(i, _)| (row >> i) & 1 == 1)
                .map(|(_, fragment)| format!("{fragment}{row:011}"))
                .collect();
            format!("{}\n", tokens.join("\t"))
        })
        .collect()
}

fn benchmark_classification(c: &mut Criterion) {
    let dump = synthetic_dump(10_000);
    let table = SpeciesTable::ensembl();

    c.bench_function("classify_rows=10000", |b| {
        b.iter(|| {
            let clusters = read_clusters(Cursor::new(dump.as_bytes()), &table).unwrap();
            black_box(classify_clusters(&clusters));
        });
    });
}

criterion_group!(benches, benchmark_classification);
criterion_main!(benches);
