// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared setup for the Footlight demos.

use std::sync::Arc;

use footlight_raster::{BitmapSkin, MemoryPixelSource, PixelBuffer, Texture, TextureHandle};
use footlight_stage::Costume;

/// Fully opaque white.
pub const OPAQUE: [u8; 4] = [255, 255, 255, 255];

/// Install `env_logger`, honouring `RUST_LOG` and defaulting to `info`.
///
/// Run a demo with `RUST_LOG=footlight_stage=trace` to see hull refreshes and touching scans.
pub fn init_logging() {
    let mut builder = env_logger::Builder::new();
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    // Ignore a second initialization from the same process.
    let _ = builder.try_init();
    log::debug!("logging initialized");
}

/// Register `pixels` under `handle` and wrap them in a resolution-1 bitmap costume.
pub fn bitmap_costume(
    source: &mut MemoryPixelSource,
    handle: u32,
    pixels: PixelBuffer,
    center_x: f64,
    center_y: f64,
) -> Costume {
    let texture = Texture::new(
        TextureHandle(handle),
        pixels.width(),
        pixels.height(),
        1.0,
    );
    source.insert(TextureHandle(handle), pixels);
    Costume::new(Arc::new(BitmapSkin::new(texture)), center_x, center_y)
}

/// Opaque disc of the given radius, centered in a `2r × 2r` buffer.
pub fn disc(radius: u32) -> PixelBuffer {
    let side = radius * 2;
    let mut buf = PixelBuffer::transparent(side, side);
    let r = f64::from(radius);
    for y in 0..side {
        for x in 0..side {
            let dx = f64::from(x) + 0.5 - r;
            let dy = f64::from(y) + 0.5 - r;
            if dx * dx + dy * dy <= r * r {
                buf.set_pixel(x, y, OPAQUE);
            }
        }
    }
    buf
}
