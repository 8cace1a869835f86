// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel read-back seam between the cache and the rendering backend.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use crate::buffer::PixelBuffer;
use crate::types::{Texture, TextureHandle};

/// Reads a texture's pixels back to CPU memory.
///
/// Read-back is synchronous and potentially expensive (a GPU round trip), and
/// must run on the thread that owns the rendering context. The
/// [`TextureCache`](crate::TextureCache) calls it at most once per texture
/// identity.
pub trait PixelSource {
    /// Return the texture's pixels as row-major RGBA8 bytes, top row first.
    ///
    /// An empty vector means the pixels are unavailable; the texture is then
    /// treated as fully transparent.
    fn read_pixels(&mut self, texture: &Texture) -> Vec<u8>;
}

impl<S: PixelSource + ?Sized> PixelSource for &mut S {
    fn read_pixels(&mut self, texture: &Texture) -> Vec<u8> {
        (**self).read_pixels(texture)
    }
}

/// Pixel source backed by buffers held in memory.
///
/// Useful for headless rendering and tests; it also counts read-backs so
/// callers can verify memoization.
#[derive(Default)]
pub struct MemoryPixelSource {
    buffers: BTreeMap<TextureHandle, PixelBuffer>,
    reads: usize,
}

impl fmt::Debug for MemoryPixelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryPixelSource")
            .field("textures", &self.buffers.len())
            .field("reads", &self.reads)
            .finish_non_exhaustive()
    }
}

impl MemoryPixelSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the pixels of a texture.
    pub fn insert(&mut self, handle: TextureHandle, buffer: PixelBuffer) {
        self.buffers.insert(handle, buffer);
    }

    /// Forget a texture's pixels.
    pub fn remove(&mut self, handle: TextureHandle) -> Option<PixelBuffer> {
        self.buffers.remove(&handle)
    }

    /// Number of read-backs served so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl PixelSource for MemoryPixelSource {
    fn read_pixels(&mut self, texture: &Texture) -> Vec<u8> {
        self.reads += 1;
        match self.buffers.get(&texture.handle) {
            Some(buf) if buf.width() == texture.width && buf.height() == texture.height => {
                buf.as_bytes().to_vec()
            }
            Some(buf) => {
                log::warn!(
                    "texture {:?} is {}x{} but stored pixels are {}x{}",
                    texture.handle,
                    texture.width,
                    texture.height,
                    buf.width(),
                    buf.height()
                );
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}
