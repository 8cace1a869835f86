// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CPU-side RGBA8 pixel storage read back from a texture.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Errors raised when wrapping raw read-back data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelBufferError {
    /// The byte length does not match `width * height * 4`.
    LengthMismatch {
        /// Expected number of bytes.
        expected: usize,
        /// Number of bytes received.
        actual: usize,
    },
    /// `width * height * 4` does not fit in `usize`.
    TooLarge,
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => {
                write!(f, "pixel data has {actual} bytes, expected {expected}")
            }
            Self::TooLarge => f.write_str("pixel buffer dimensions overflow"),
        }
    }
}

impl core::error::Error for PixelBufferError {}

/// Row-major RGBA8 pixel buffer, top row first.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PixelBufferError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(PixelBufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A fully transparent buffer.
    ///
    /// Dimensions that overflow the address space produce an empty buffer.
    pub fn transparent(width: u32, height: u32) -> Self {
        match byte_len(width, height) {
            Ok(len) => Self {
                width,
                height,
                data: vec![0; len],
            },
            Err(_) => Self {
                width: 0,
                height: 0,
                data: Vec::new(),
            },
        }
    }

    /// A buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut buf = Self::transparent(width, height);
        for px in buf.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&rgba);
        }
        buf
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// RGBA of the pixel at (`x`, `y`), or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        let px = &self.data[i..i + BYTES_PER_PIXEL];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Alpha of the pixel at (`x`, `y`); zero outside the buffer.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.offset(x, y)
            .map(|i| self.data[i + BYTES_PER_PIXEL - 1])
            .unwrap_or(0)
    }

    /// Overwrite a pixel. Writes outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&rgba);
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }
}

fn byte_len(width: u32, height: u32) -> Result<usize, PixelBufferError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or(PixelBufferError::TooLarge)
}
