// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-texture memo of CPU pixels and hull points.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::fmt;

use crate::buffer::PixelBuffer;
use crate::hull::extract_hull_points;
use crate::source::PixelSource;
use crate::types::{PixelPoint, Texture, TextureHandle};

#[derive(Clone, Debug)]
struct Entry {
    texture: Texture,
    pixels: Option<Arc<PixelBuffer>>,
    hull: Option<Arc<[PixelPoint]>>,
}

impl Entry {
    fn new(texture: Texture) -> Self {
        Self {
            texture,
            pixels: None,
            hull: None,
        }
    }
}

/// CPU-side cache keyed by texture identity.
///
/// Holds at most one pixel buffer and one hull list per live texture. Both are
/// filled lazily on first request and kept until the owner retires the texture
/// with [`TextureCache::remove_texture`]; nothing is evicted implicitly.
///
/// Results are handed out as shared immutable snapshots, so clones of a sprite
/// can alias the same hull without copying it.
#[derive(Default)]
pub struct TextureCache {
    entries: BTreeMap<TextureHandle, Entry>,
}

impl fmt::Debug for TextureCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let with_pixels = self.entries.values().filter(|e| e.pixels.is_some()).count();
        let with_hull = self.entries.values().filter(|e| e.hull.is_some()).count();
        f.debug_struct("TextureCache")
            .field("entries", &self.entries.len())
            .field("with_pixels", &with_pixels)
            .field("with_hull", &with_hull)
            .finish()
    }
}

impl TextureCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, texture: &Texture) -> &mut Entry {
        let entry = self
            .entries
            .entry(texture.handle)
            .or_insert_with(|| Entry::new(*texture));
        if entry.texture != *texture {
            log::warn!(
                "texture {:?} changed from {}x{} to {}x{} without being retired",
                texture.handle,
                entry.texture.width,
                entry.texture.height,
                texture.width,
                texture.height
            );
            *entry = Entry::new(*texture);
        }
        entry
    }

    /// CPU pixels of `texture`, reading them back from `source` on first use.
    ///
    /// Malformed read-back data is logged and replaced by a fully transparent
    /// buffer of the texture's size.
    pub fn pixels<S: PixelSource + ?Sized>(
        &mut self,
        texture: &Texture,
        source: &mut S,
    ) -> Arc<PixelBuffer> {
        let entry = self.entry(texture);
        if let Some(pixels) = &entry.pixels {
            return Arc::clone(pixels);
        }
        let data = source.read_pixels(texture);
        let buffer = if data.is_empty() {
            log::debug!("no pixels available for texture {:?}", texture.handle);
            PixelBuffer::transparent(texture.width, texture.height)
        } else {
            match PixelBuffer::from_rgba(texture.width, texture.height, data) {
                Ok(buffer) => buffer,
                Err(err) => {
                    log::warn!("bad read-back for texture {:?}: {err}", texture.handle);
                    PixelBuffer::transparent(texture.width, texture.height)
                }
            }
        };
        let pixels = Arc::new(buffer);
        entry.pixels = Some(Arc::clone(&pixels));
        pixels
    }

    /// Sorted hull points of `texture`, extracting them on first use.
    pub fn hull_points<S: PixelSource + ?Sized>(
        &mut self,
        texture: &Texture,
        source: &mut S,
    ) -> Arc<[PixelPoint]> {
        if let Some(hull) = self.entry(texture).hull.as_ref() {
            return Arc::clone(hull);
        }
        let pixels = self.pixels(texture, source);
        let hull: Arc<[PixelPoint]> = Arc::from(extract_hull_points(&pixels));
        log::debug!(
            "hull of texture {:?}: {} points",
            texture.handle,
            hull.len()
        );
        self.entry(texture).hull = Some(Arc::clone(&hull));
        hull
    }

    /// Drop everything cached for a retired texture.
    ///
    /// Returns `true` if an entry existed.
    pub fn remove_texture(&mut self, handle: TextureHandle) -> bool {
        self.entries.remove(&handle).is_some()
    }

    /// Whether an entry exists for `handle`.
    pub fn contains(&self, handle: TextureHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    /// Number of cached textures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryPixelSource;
    use alloc::vec;

    fn tex(handle: u32, w: u32, h: u32) -> Texture {
        Texture::new(TextureHandle(handle), w, h, 1.0)
    }

    #[test]
    fn read_back_happens_once_per_texture() {
        let mut source = MemoryPixelSource::new();
        source.insert(TextureHandle(1), PixelBuffer::filled(4, 6, [0, 0, 0, 255]));
        let mut cache = TextureCache::new();
        let t = tex(1, 4, 6);

        let a = cache.hull_points(&t, &mut source);
        let b = cache.hull_points(&t, &mut source);
        let _ = cache.pixels(&t, &mut source);
        assert_eq!(a.len(), 24);
        assert!(Arc::ptr_eq(&a, &b), "hull must be memoized");
        assert_eq!(source.reads(), 1);
    }

    #[test]
    fn remove_texture_forces_new_read() {
        let mut source = MemoryPixelSource::new();
        source.insert(TextureHandle(3), PixelBuffer::filled(2, 2, [1, 1, 1, 1]));
        let mut cache = TextureCache::new();
        let t = tex(3, 2, 2);
        let _ = cache.hull_points(&t, &mut source);
        assert!(cache.contains(TextureHandle(3)));
        assert!(cache.remove_texture(TextureHandle(3)));
        assert!(!cache.remove_texture(TextureHandle(3)));
        assert!(cache.is_empty());
        let _ = cache.hull_points(&t, &mut source);
        assert_eq!(source.reads(), 2);
    }

    #[test]
    fn missing_or_malformed_pixels_are_transparent() {
        let mut source = MemoryPixelSource::new();
        // Stored pixels do not match the texture size.
        source.insert(TextureHandle(5), PixelBuffer::filled(3, 3, [0, 0, 0, 255]));
        let mut cache = TextureCache::new();

        let wrong = tex(5, 4, 4);
        assert!(cache.hull_points(&wrong, &mut source).is_empty());
        let px = cache.pixels(&wrong, &mut source);
        assert_eq!((px.width(), px.height()), (4, 4));

        let unknown = tex(9, 2, 2);
        assert!(cache.hull_points(&unknown, &mut source).is_empty());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reused_handle_with_new_size_is_refetched() {
        let mut source = MemoryPixelSource::new();
        source.insert(TextureHandle(7), PixelBuffer::filled(1, 1, [0, 0, 0, 255]));
        let mut cache = TextureCache::new();
        assert_eq!(cache.hull_points(&tex(7, 1, 1), &mut source).len(), 1);

        source.insert(TextureHandle(7), PixelBuffer::filled(2, 1, [0, 0, 0, 255]));
        let hull = cache.hull_points(&tex(7, 2, 1), &mut source);
        assert_eq!(
            hull.as_ref(),
            &vec![PixelPoint::new(0, 0), PixelPoint::new(1, 0)][..]
        );
        assert_eq!(source.reads(), 2);
    }
}
