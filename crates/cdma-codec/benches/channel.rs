use std::hint::black_box;

use cdma_codec::{Channel, CodecConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn loaded_channel(code_length: usize, message_len: usize) -> Channel {
    let mut channel = Channel::new(&CodecConfig::with_code_length(code_length)).unwrap();
    for i in 0..code_length {
        let message: String = (0..message_len)
            .map(|j| char::from(b'a' + ((i + j) % 26) as u8))
            .collect();
        channel.register(message).unwrap();
    }
    channel
}

fn bench_send(c: &mut Criterion) {
    let mut group = c.benchmark_group("send");
    for code_length in [8, 32, 128] {
        let channel = loaded_channel(code_length, 64);
        group.throughput(Throughput::Elements((code_length * 64) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(code_length),
            &channel,
            |b, channel| b.iter(|| black_box(channel.transmitter().send().unwrap())),
        );
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_many");
    for code_length in [8, 32, 128] {
        let channel = loaded_channel(code_length, 64);
        let stream = channel.transmitter().send().unwrap();
        group.throughput(Throughput::Elements((code_length * 64) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(code_length),
            &stream,
            |b, stream| {
                b.iter(|| {
                    black_box(
                        channel
                            .receiver()
                            .decode_many(stream, code_length)
                            .unwrap(),
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_send, bench_decode);
criterion_main!(benches);
