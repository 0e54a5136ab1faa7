use criterion::{Criterion, criterion_group, criterion_main};
use steem_serialization::{Read, VarUint64, Write};
use std::hint::black_box;

fn read_u64s(value: &[u8]) {
    let mut pos = 0;
    let _ = Vec::<u64>::read(value, &mut pos);
}

fn read_varints(value: &[u8]) {
    let mut pos = 0;
    let _ = Vec::<VarUint64>::read(value, &mut pos);
}

fn criterion_benchmark(c: &mut Criterion) {
    let fixed: Vec<u64> = (0..100000).map(|v| v + 1000).collect();
    let fixed = fixed.pack().unwrap();
    c.bench_function("read 100k u64", |b| b.iter(|| read_u64s(black_box(&fixed))));

    let varints: Vec<VarUint64> = (0..100000u64).map(|v| VarUint64(v << 20)).collect();
    let varints = varints.pack().unwrap();
    c.bench_function("read 100k varuint64", |b| {
        b.iter(|| read_varints(black_box(&varints)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
