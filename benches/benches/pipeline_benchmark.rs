//! Benchmarks for the CPU-bound pipeline stages: URL generation and record decoding.
//!
//! Run with: `cargo bench --package beacon-bench`

use beacon_bench::{FIXTURE_START, fixture_range, fixture_record};
use beacon_fetch::{decode_record, url};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn url_generation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_urls");

    for (name, minutes) in [("1-hour", 60), ("1-day", 1_440), ("1-week", 10_080)] {
        let range = fixture_range(minutes);
        group.throughput(Throughput::Elements(minutes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &range, |b, range| {
            b.iter(|| {
                url::generate_urls_with_base(url::BASE_URL, *range)
                    .map(|u| black_box(u).len())
                    .sum::<usize>()
            });
        });
    }

    group.finish();
}

fn decode_benchmark(c: &mut Criterion) {
    let xml = fixture_record(FIXTURE_START);

    let mut group = c.benchmark_group("decode_record");
    group.throughput(Throughput::Bytes(xml.len() as u64));
    group.bench_function("record", |b| {
        b.iter(|| decode_record(black_box(&xml)).map(|r| r.len()));
    });
    group.finish();
}

criterion_group!(benches, url_generation_benchmark, decode_benchmark);
criterion_main!(benches);
