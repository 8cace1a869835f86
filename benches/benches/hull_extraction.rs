// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use footlight_raster::{
    MemoryPixelSource, PixelBuffer, PixelPoint, Texture, TextureCache, TextureHandle,
    extract_hull_points, hull_contains,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// Buffer where roughly `percent` of the pixels are opaque.
fn gen_sparse(side: u32, percent: u64, seed: u64) -> PixelBuffer {
    let mut rng = Rng::new(seed);
    let mut buf = PixelBuffer::transparent(side, side);
    for y in 0..side {
        for x in 0..side {
            if rng.next_u64() % 100 < percent {
                buf.set_pixel(x, y, [255, 255, 255, 255]);
            }
        }
    }
    buf
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_hull_points");
    for &side in &[64_u32, 256, 1024] {
        for &percent in &[10_u64, 90] {
            let buf = gen_sparse(side, percent, 0xCAFE_F00D_DEAD_BEEF);
            group.throughput(Throughput::Elements(u64::from(side * side)));
            group.bench_function(format!("side{side}_opaque{percent}"), |b| {
                b.iter(|| black_box(extract_hull_points(black_box(&buf))).len());
            });
        }
    }
    group.finish();
}

fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull_contains");
    let buf = gen_sparse(512, 50, 0xBADC_F00D_1234_5678);
    let hull = extract_hull_points(&buf);
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    let probes: Vec<_> = (0..4096)
        .map(|_| {
            let x = (rng.next_u64() % 512) as i32;
            let y = (rng.next_u64() % 512) as i32;
            PixelPoint::new(x, y)
        })
        .collect();
    group.throughput(Throughput::Elements(probes.len() as u64));
    group.bench_function("random_probes_512", |b| {
        b.iter(|| {
            probes
                .iter()
                .filter(|&&p| hull_contains(black_box(&hull), p))
                .count()
        });
    });
    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("texture_cache");
    let handle = TextureHandle(1);
    let texture = Texture::new(handle, 256, 256, 1.0);
    let buf = gen_sparse(256, 50, 0xC1A5_7E55_9999_ABCD);
    group.bench_function("first_read_256", |b| {
        b.iter_batched(
            || {
                let mut source = MemoryPixelSource::new();
                source.insert(handle, buf.clone());
                (TextureCache::new(), source)
            },
            |(mut cache, mut source)| black_box(cache.hull_points(&texture, &mut source)).len(),
            BatchSize::SmallInput,
        );
    });
    let mut source = MemoryPixelSource::new();
    source.insert(handle, buf);
    let mut cache = TextureCache::new();
    let _ = cache.hull_points(&texture, &mut source);
    group.bench_function("cached_256", |b| {
        b.iter(|| black_box(cache.hull_points(&texture, &mut source)).len());
    });
    group.finish();
}

criterion_group!(benches, bench_extract, bench_contains, bench_cache);
criterion_main!(benches);
