//! Criterion benchmarks for zenpixlet decoding performance.
//!
//! Run with: cargo bench --bench decode_benchmark
//! Run with native: RUSTFLAGS="-C target-cpu=native" cargo bench --bench decode_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use zenpixlet::PixletDecoder;

fn pack_bits(bits: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; bits.len().div_ceil(8)];
    for (i, &b) in bits.iter().enumerate() {
        out[i / 8] |= b << (7 - (i % 8));
    }
    out
}

fn push_value_bits(bits: &mut Vec<u8>, value: usize, n: usize) {
    for k in (0..n).rev() {
        bits.push(((value >> k) & 1) as u8);
    }
}

fn zero_low_stream(size: usize) -> Vec<u8> {
    if size == 0 {
        return Vec::new();
    }
    let mut bits = vec![0u8];
    if size > 1 {
        bits.extend([1; 8]);
        push_value_bits(&mut bits, size - 1, 16);
    }
    pack_bits(&bits)
}

fn zero_high_stream(size: usize) -> Vec<u8> {
    if size == 0 {
        return Vec::new();
    }
    let mut bits = vec![0u8];
    if size > 1 {
        let rlen = size - 1;
        if rlen <= 503 {
            let cnt1 = rlen / 63;
            let v = rlen - 63 * cnt1 + 1;
            bits.extend(std::iter::repeat(1).take(cnt1));
            bits.push(0);
            if v >= 2 {
                push_value_bits(&mut bits, v, 6);
            } else {
                bits.extend([0; 5]);
            }
        } else {
            bits.extend([1; 8]);
            bits.push(1);
            push_value_bits(&mut bits, rlen - 504, 16);
        }
    }
    pack_bits(&bits)
}

/// A well-formed packet with a DC seed and all-zero detail bands.
fn build_packet(width: u32, height: u32) -> Vec<u8> {
    let aligned_w = ((width as usize) + 31) & !31;
    let aligned_h = ((height as usize) + 31) & !31;

    let mut p = Vec::new();
    p.extend_from_slice(&[0; 4]);
    p.extend_from_slice(&1u32.to_le_bytes());
    p.extend_from_slice(&[0; 4]);
    p.extend_from_slice(&1u32.to_be_bytes());
    p.extend_from_slice(&[0; 4]);
    p.extend_from_slice(&width.to_be_bytes());
    p.extend_from_slice(&height.to_be_bytes());
    p.extend_from_slice(&4u32.to_be_bytes());
    p.extend_from_slice(&8u32.to_be_bytes());
    p.extend_from_slice(&[0; 8]);

    for plane in 0..3 {
        let shift = usize::from(plane > 0);
        let (pw, ph) = (aligned_w >> shift, aligned_h >> shift);

        for _ in 0..4 {
            p.extend_from_slice(&707_000i32.to_be_bytes());
            p.extend_from_slice(&707_000i32.to_be_bytes());
        }
        p.extend_from_slice(&[0; 4]);
        p.extend_from_slice(&100i16.to_be_bytes());

        let (bw, bh) = (pw >> 4, ph >> 4);
        p.extend_from_slice(&zero_low_stream(bw - 1));
        p.extend_from_slice(&zero_low_stream(bh - 1));
        p.extend_from_slice(&zero_low_stream((bw - 1) * (bh - 1)));

        for band in 0..12 {
            let scale = 4 - band / 3;
            let size = (pw >> scale) * (ph >> scale);
            p.extend_from_slice(&1i32.to_be_bytes());
            p.extend_from_slice(&2i32.to_be_bytes());
            p.extend_from_slice(&1i32.to_be_bytes());
            p.extend_from_slice(&1i32.to_be_bytes());
            p.extend_from_slice(&0xDEAD_BEEFu32.to_be_bytes());
            p.extend_from_slice(&zero_high_stream(size));
        }
    }

    let total = p.len() as u32;
    p[..4].copy_from_slice(&total.to_be_bytes());
    p
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    // Sizes are chosen so the largest detail band still fits a single
    // 16-bit zero run (w * h / 4 <= 65536).
    for (name, w, h) in [("qcif_176x144", 176u32, 144u32), ("sq_512x512", 512, 512)] {
        let packet = build_packet(w, h);
        let pixels = u64::from(w) * u64::from(h);
        group.throughput(Throughput::Elements(pixels));

        let mut decoder = PixletDecoder::new();
        group.bench_with_input(BenchmarkId::new("frame", name), &packet, |b, packet| {
            b.iter(|| {
                let frame = decoder.decode_frame(black_box(packet)).unwrap();
                black_box(frame.y[0]);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
