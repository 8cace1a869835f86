// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=footlight_raster --heading-base-level=0

//! Footlight Raster: CPU-side texture data for pixel-precise sprite queries.
//!
//! Footlight Raster is the raster half of Footlight's hit testing.
//!
//! - Reads a texture's pixels back from the renderer at most once per texture identity.
//! - Extracts the *hull*: every opaque pixel, sorted by row then column.
//! - Answers "is this pixel opaque" with a binary search over the hull.
//!
//! It does not depend on any geometry crate. Transforms, bounds, and stage coordinates live in
//! `footlight_stage`, which feeds integer texture coordinates here.
//!
//! ## API overview
//!
//! - [`Texture`] and [`TextureHandle`]: the identity of a texture borrowed from the renderer.
//! - [`PixelSource`]: the read-back seam implemented by the rendering backend.
//!   [`MemoryPixelSource`] serves buffers held in memory.
//! - [`Skin`]: produces a costume's texture for a requested scale. [`BitmapSkin`] wraps one bitmap.
//! - [`TextureCache`]: memoized pixels and hull per texture, retired explicitly.
//! - [`extract_hull_points`], [`hull_contains`], [`row_spans`]: hull construction and lookups.
//!
//! ## Hull ordering
//!
//! Hull lists are sorted ascending by `(y, x)`. Every producer in this crate emits points in that
//! order, and [`hull_contains`] depends on it.
//!
//! ## Minimal usage
//!
//! ```
//! use footlight_raster::{
//!     MemoryPixelSource, PixelBuffer, PixelPoint, Texture, TextureCache, TextureHandle,
//!     hull_contains,
//! };
//!
//! // A 3x3 ring: opaque border, transparent center.
//! let mut ring = PixelBuffer::filled(3, 3, [255, 255, 255, 255]);
//! ring.set_pixel(1, 1, [0, 0, 0, 0]);
//!
//! let mut source = MemoryPixelSource::new();
//! source.insert(TextureHandle(1), ring);
//!
//! let texture = Texture::new(TextureHandle(1), 3, 3, 1.0);
//! let mut cache = TextureCache::new();
//! let hull = cache.hull_points(&texture, &mut source);
//!
//! assert_eq!(hull.len(), 8);
//! assert!(hull_contains(&hull, PixelPoint::new(0, 2)));
//! assert!(!hull_contains(&hull, PixelPoint::new(1, 1)));
//!
//! // Asking again is served from the cache.
//! let _ = cache.hull_points(&texture, &mut source);
//! assert_eq!(source.reads(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod buffer;
pub mod cache;
pub mod hull;
pub mod skin;
pub mod source;
pub mod types;

pub use buffer::{BYTES_PER_PIXEL, PixelBuffer, PixelBufferError};
pub use cache::TextureCache;
pub use hull::{ALPHA_THRESHOLD, extract_hull_points, extract_hull_points_raw, hull_contains, row_spans};
pub use skin::{BitmapSkin, Skin};
pub use source::{MemoryPixelSource, PixelSource};
pub use types::{PixelPoint, RowSpan, Texture, TextureHandle};
