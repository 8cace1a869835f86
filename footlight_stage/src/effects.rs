// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graphic effect parameters attached to a target.
//!
//! The shader programs that apply effects live in the renderer. This module only tracks the
//! parameter values and which of them can change a target's silhouette.

use alloc::collections::BTreeMap;

/// A graphic effect kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Effect {
    /// Hue shift.
    Color,
    /// Bulge outward or pinch inward from the center.
    Fisheye,
    /// Swirl around the center.
    Whirl,
    /// Coarsen into blocks.
    Pixelate,
    /// Tile copies of the costume.
    Mosaic,
    /// Lighten or darken.
    Brightness,
    /// Fade toward transparency.
    Ghost,
}

impl Effect {
    /// Every effect, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Color,
        Self::Fisheye,
        Self::Whirl,
        Self::Pixelate,
        Self::Mosaic,
        Self::Brightness,
        Self::Ghost,
    ];

    /// True if the effect moves pixels and can therefore change the silhouette.
    pub fn changes_shape(self) -> bool {
        matches!(
            self,
            Self::Fisheye | Self::Whirl | Self::Pixelate | Self::Mosaic
        )
    }
}

/// Active effect values of one target.
///
/// Zero means "off": setting an effect to zero removes it, so the map only ever holds
/// effects that are actually applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphicEffects {
    values: BTreeMap<Effect, f64>,
}

impl GraphicEffects {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `effect`, zero when unset.
    pub fn get(&self, effect: Effect) -> f64 {
        self.values.get(&effect).copied().unwrap_or(0.0)
    }

    /// Set `effect` to `value`. Returns `true` if the stored value changed.
    pub fn set(&mut self, effect: Effect, value: f64) -> bool {
        if value == 0.0 {
            return self.values.remove(&effect).is_some();
        }
        self.values.insert(effect, value) != Some(value)
    }

    /// Remove every effect. Returns `true` if any was set.
    pub fn clear(&mut self) -> bool {
        let changed = !self.values.is_empty();
        self.values.clear();
        changed
    }

    /// True if any active effect changes the silhouette.
    pub fn any_changes_shape(&self) -> bool {
        self.values.keys().any(|e| e.changes_shape())
    }

    /// Number of active effects.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no effect is active.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Active effects and their values, ordered by effect.
    pub fn iter(&self) -> impl Iterator<Item = (Effect, f64)> + '_ {
        self.values.iter().map(|(e, v)| (*e, *v))
    }
}
