//! Benchmarks for benchkv codec and scan operations

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use benchkv::record::{deserialize, serialize, FieldFilter, Record};
use benchkv::{Config, EngineContext, KvAdapter, MemoryEngine, WorkloadAdapter};

fn workload_record(field_count: usize, field_length: usize) -> Record {
    (0..field_count)
        .map(|f| {
            let fill = b'a' + (f % 26) as u8;
            (format!("field{}", f), Bytes::from(vec![fill; field_length]))
        })
        .collect()
}

fn codec_benchmarks(c: &mut Criterion) {
    let record = workload_record(10, 100);
    let blob = serialize(&record);
    let projection = FieldFilter::only(["field0"]);

    c.bench_function("serialize_10x100", |b| {
        b.iter(|| serialize(black_box(&record)))
    });

    c.bench_function("deserialize_all_10x100", |b| {
        b.iter(|| deserialize(black_box(&blob), &FieldFilter::All).unwrap())
    });

    c.bench_function("deserialize_projection_10x100", |b| {
        b.iter(|| deserialize(black_box(&blob), &projection).unwrap())
    });
}

fn scan_benchmarks(c: &mut Criterion) {
    let ctx = EngineContext::new(MemoryEngine::new(), Config::default()).unwrap();
    let mut adapter = KvAdapter::attach(&ctx).unwrap();

    let record = workload_record(10, 100);
    for i in 0..10_000 {
        adapter.insert(&format!("user{}", i), &record).unwrap();
    }

    c.bench_function("scan_100_of_10k", |b| {
        b.iter(|| {
            adapter
                .scan(black_box("user1000"), 100, &FieldFilter::All)
                .unwrap()
        })
    });

    c.bench_function("read_point_of_10k", |b| {
        b.iter(|| adapter.read(black_box("user5000"), &FieldFilter::All).unwrap())
    });
}

criterion_group!(benches, codec_benchmarks, scan_benchmarks);
criterion_main!(benches);
