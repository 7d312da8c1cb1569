//! Pipeline throughput benchmark against the fake engine

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use cadenza_codec::{DecoderSession, EncoderSession};
use cadenza_core::CodecConfig;
use cadenza_pipeline::{run_decode, run_encode, NullObserver};
use cadenza_test::{sine_pcm, FakeEngine};

fn bench_encode(c: &mut Criterion) {
    let engine = FakeEngine::new();
    let config = CodecConfig::default();
    let pcm = sine_pcm(480 * 1000, 48_000, 440.0, 0.5);

    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Bytes(pcm.len() as u64));
    group.bench_function("1000_frames", |b| {
        b.iter(|| {
            let mut session = EncoderSession::open(&engine, &config).unwrap();
            let mut sink = Vec::with_capacity(1000 * 120);
            run_encode(&mut pcm.as_slice(), &mut sink, &mut session, &mut NullObserver).unwrap()
        })
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let engine = FakeEngine::new();
    let config = CodecConfig::default();
    let compressed = vec![0x5Au8; 120 * 1000];

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(compressed.len() as u64));
    group.bench_function("1000_frames", |b| {
        b.iter(|| {
            let mut session = DecoderSession::open(&engine, &config).unwrap();
            let mut sink = Vec::with_capacity(1000 * 960);
            run_decode(
                &mut compressed.as_slice(),
                &mut sink,
                &mut session,
                &mut NullObserver,
            )
            .unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
