// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Skins: producers of textures for a costume at a requested scale.

use core::fmt::Debug;

use crate::types::Texture;

/// Source of textures for one costume.
///
/// Renderers ask for two textures per target: one at the on-screen scale
/// (costume size times stage scale) for drawing, and one at the costume size
/// alone for CPU-side hit testing. A bitmap skin returns the same texture for
/// every scale; a vector skin may rasterize a new texture per scale bucket.
pub trait Skin: Debug {
    /// Texture best suited for drawing the costume at `scale`, where `1.0` is
    /// the costume's nominal size.
    ///
    /// `None` means nothing can be drawn (for example, an empty costume).
    fn texture(&self, scale: f64) -> Option<Texture>;
}

/// Skin backed by a single bitmap texture.
#[derive(Clone, Debug)]
pub struct BitmapSkin {
    texture: Texture,
}

impl BitmapSkin {
    /// Wrap a bitmap texture.
    pub fn new(texture: Texture) -> Self {
        Self { texture }
    }
}

impl Skin for BitmapSkin {
    fn texture(&self, _scale: f64) -> Option<Texture> {
        (!self.texture.is_empty()).then_some(self.texture)
    }
}
