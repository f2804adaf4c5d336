//! Criterion micro-benchmarks for RecordList open, add, and read paths.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rtcmem_bench::full_list;
use rtcmem_list::{crc, OnFull, RecordList};
use rtcmem_store::{ArrayCells, WordStore};
use rtcmem_test_utils::Reading;

/// Benchmark: Open a full list, which recomputes the region checksum.
fn bench_open_full(c: &mut Criterion) {
    let mut cells = full_list();
    c.bench_function("list_open_full", |b| {
        b.iter(|| {
            let list: RecordList<Reading, _> =
                RecordList::open(WordStore::new(&mut cells).unwrap()).unwrap();
            black_box(list.len());
        });
    });
}

/// Benchmark: Append with eviction on a full list (shift + store + seal).
fn bench_add_evicting(c: &mut Criterion) {
    let mut cells = full_list();
    let mut list: RecordList<Reading, _> =
        RecordList::open(WordStore::new(&mut cells).unwrap()).unwrap();
    let mut n = 42u32;
    c.bench_function("list_add_evicting", |b| {
        b.iter(|| {
            list.add(&Reading::numbered(n), OnFull::EvictOldest).unwrap();
            n = n.wrapping_add(1);
        });
    });
}

/// Benchmark: Append to an empty list, clearing once it fills.
fn bench_add_until_full(c: &mut Criterion) {
    let mut cells = ArrayCells::new();
    let mut list: RecordList<Reading, _> =
        RecordList::open(WordStore::new(&mut cells).unwrap()).unwrap();
    c.bench_function("list_add_append", |b| {
        b.iter(|| {
            if list.is_full() {
                list.clear().unwrap();
            }
            list.push(&Reading::numbered(black_box(1))).unwrap();
        });
    });
}

/// Benchmark: Iterate and decode every record of a full list.
fn bench_iter_full(c: &mut Criterion) {
    let mut cells = full_list();
    let list: RecordList<Reading, _> =
        RecordList::open(WordStore::new(&mut cells).unwrap()).unwrap();
    c.bench_function("list_iter_full", |b| {
        b.iter(|| black_box(list.iter().map(|r| r.seq).sum::<u32>()));
    });
}

/// Benchmark: Table-driven vs bitwise CRC over 510 bytes.
fn bench_crc(c: &mut Criterion) {
    let bytes = [0x3Cu8; 510];
    c.bench_function("crc16_table_510", |b| {
        b.iter(|| {
            black_box(
                bytes
                    .iter()
                    .fold(crc::CRC16_INIT, |acc, &byte| crc::crc16_update(acc, byte)),
            )
        });
    });
    c.bench_function("crc16_bitwise_510", |b| {
        b.iter(|| {
            black_box(
                bytes
                    .iter()
                    .fold(crc::CRC16_INIT, |acc, &byte| crc::crc16_update_bitwise(acc, byte)),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_open_full,
    bench_add_evicting,
    bench_add_until_full,
    bench_iter_full,
    bench_crc
);
criterion_main!(benches);
