use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use recordio_decoder::{RecordDecoder, RecordReader};
use recordio_encoder::RecordEncoder;
use recordio_tests::fixture::{events_stream, split_by_sizes};

fn bench_decode_events(c: &mut Criterion) {
    let stream = events_stream();

    c.bench_function("decode_events_one_shot", |b| {
        b.iter(|| RecordDecoder::decode(&stream).unwrap());
    });
}

fn bench_reader_chunk_sizes(c: &mut Criterion) {
    let stream = events_stream();
    let mut group = c.benchmark_group("reader_chunk_size");
    group.throughput(Throughput::Bytes(stream.len() as u64));

    for size in [1, 16, 100, 1024, 8192] {
        let chunks = split_by_sizes(&stream, &[size]);
        group.bench_with_input(BenchmarkId::new("consume", size), &chunks, |b, chunks| {
            b.iter(|| {
                let mut reader = RecordReader::new();
                let mut count = 0usize;
                for chunk in chunks {
                    count += reader.consume_with(chunk, drop).unwrap();
                }
                reader.finish().unwrap();
                count
            });
        });
    }

    group.finish();
}

fn bench_large_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("reader_large_records");

    for size_kb in [1, 64, 1024] {
        let payload = vec![b'x'; size_kb * 1024];
        let stream = RecordEncoder::new()
            .add_record(&payload)
            .add_record(&payload)
            .encode()
            .unwrap();
        let chunks = split_by_sizes(&stream, &[8192]);

        group.throughput(Throughput::Bytes(stream.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("consume", format!("{size_kb}kb")),
            &chunks,
            |b, chunks| {
                b.iter(|| {
                    let mut reader = RecordReader::new();
                    let mut records = Vec::new();
                    for chunk in chunks {
                        records.extend(reader.consume(chunk).unwrap());
                    }
                    records
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_events,
    bench_reader_chunk_sizes,
    bench_large_records
);
criterion_main!(benches);
