// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use footlight_raster::{BitmapSkin, PixelBuffer, Texture, TextureHandle};
use footlight_stage::{Costume, SpriteProps, Stage, TargetId};
use kurbo::Point;

/// Stage with one disc sprite at the origin and `n` clones spread on a ring around it.
///
/// `overlap` pulls the ring inward so clones overlap the original's bounds.
fn gen_stage(radius: u32, n: usize, overlap: bool) -> (Stage, TargetId, Vec<TargetId>) {
    let side = radius * 2;
    let r = f64::from(radius);
    let mut buf = PixelBuffer::transparent(side, side);
    for y in 0..side {
        for x in 0..side {
            let dx = f64::from(x) + 0.5 - r;
            let dy = f64::from(y) + 0.5 - r;
            if dx * dx + dy * dy <= r * r {
                buf.set_pixel(x, y, [255, 255, 255, 255]);
            }
        }
    }
    let mut stage = Stage::default();
    let handle = TextureHandle(1);
    stage.source_mut().insert(handle, buf);
    let skin = Arc::new(BitmapSkin::new(Texture::new(handle, side, side, 1.0)));
    let original = stage.insert_sprite(SpriteProps {
        direction: 60.0,
        costume: Some(Costume::new(skin, r, r)),
        ..SpriteProps::default()
    });
    let ring = if overlap { 1.6 * r } else { 2.5 * r };
    let clones = (0..n)
        .filter_map(|i| {
            let id = stage.insert_clone(original)?;
            let a = core::f64::consts::TAU * i as f64 / n as f64;
            stage.set_position(id, Point::new(ring * a.cos(), ring * a.sin()));
            Some(id)
        })
        .collect();
    (stage, original, clones)
}

fn bench_touching(c: &mut Criterion) {
    let mut group = c.benchmark_group("touching_clones");
    for &radius in &[8_u32, 32, 64] {
        for overlap in [false, true] {
            let (mut stage, original, clones) = gen_stage(radius, 16, overlap);
            group.throughput(Throughput::Elements(clones.len() as u64));
            let name = if overlap { "overlap" } else { "apart" };
            group.bench_function(format!("r{radius}_{name}"), |b| {
                b.iter(|| black_box(stage.touching_clones(original, black_box(&clones))));
            });
        }
    }
    group.finish();
}

fn bench_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounds");
    let (mut stage, original, _) = gen_stage(64, 0, false);
    let mut direction = 0.0;
    group.bench_function("fast_r64", |b| {
        b.iter(|| {
            direction += 1.0;
            stage.set_direction(original, direction);
            black_box(stage.fast_bounds(original))
        });
    });
    group.bench_function("exact_r64", |b| {
        b.iter(|| {
            direction += 1.0;
            stage.set_direction(original, direction);
            black_box(stage.exact_bounds(original))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_touching, bench_bounds);
criterion_main!(benches);
