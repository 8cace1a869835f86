// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture identity and integer pixel coordinates.

use core::cmp::Ordering;

/// Opaque handle of a texture owned by the rendering backend.
///
/// Two textures are the same identity only if their handles match; a texture
/// re-created with identical dimensions still receives a new handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureHandle(pub u32);

/// A texture borrowed from the rendering backend.
///
/// Immutable once created. `scale` is the ratio between the texture's pixel
/// size and the costume's nominal (unscaled) size: a bitmap uploaded as-is has
/// scale 1, a vector costume rasterized at twice its size has scale 2.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Texture {
    /// Backend handle; the identity of the texture.
    pub handle: TextureHandle,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel size relative to the nominal costume size.
    pub scale: f64,
}

impl Texture {
    /// Create a texture description.
    pub const fn new(handle: TextureHandle, width: u32, height: u32, scale: f64) -> Self {
        Self {
            handle,
            width,
            height,
            scale,
        }
    }

    /// True if the texture has no pixels or an unusable scale.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || !(self.scale.is_finite() && self.scale > 0.0)
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Integer pixel coordinate in texture space (origin top-left, y down).
///
/// Ordered by row first, then column. Hull point lists rely on this ordering
/// for binary search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl PixelPoint {
    /// Create a pixel point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Ord for PixelPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for PixelPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Horizontal run of a hull row: the first and last opaque column of row `y`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowSpan {
    /// Row.
    pub y: i32,
    /// Leftmost opaque column.
    pub x_min: i32,
    /// Rightmost opaque column.
    pub x_max: i32,
}
