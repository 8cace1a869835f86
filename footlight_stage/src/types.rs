// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the stage: target identifiers, kinds, flags, and sprite properties.

use crate::target::Costume;

/// Identifier for a target on the stage.
///
/// A small, copyable handle consisting of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any `TargetId` that pointed to it is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `TargetId`.
///
/// Stale identifiers never alias a different live target. Every [`Stage`](crate::Stage)
/// mutator treats a stale identifier as a no-op and every query returns `None` or `false`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TargetId(pub(crate) u32, pub(crate) u32);

impl TargetId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// How a sprite's direction is turned into on-screen rotation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RotationStyle {
    /// Rotate freely; direction 90 is upright.
    #[default]
    AllAround,
    /// Never rotate; face left (mirrored) when the direction is negative.
    LeftRight,
    /// Never rotate or mirror.
    DoNotRotate,
}

/// What a target is.
///
/// Only sprites can be cloned or dragged, so those fields live on the sprite variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetKind {
    /// The stage backdrop.
    Stage,
    /// A sprite or a clone of one.
    Sprite {
        /// The original sprite this clone was made from; `None` for originals.
        clone_root: Option<TargetId>,
        /// Whether the user can drag the sprite with the mouse.
        draggable: bool,
    },
}

impl TargetKind {
    /// True for sprites and clones.
    pub fn is_sprite(&self) -> bool {
        matches!(self, Self::Sprite { .. })
    }

    /// True for clones of a sprite.
    pub fn is_clone(&self) -> bool {
        matches!(
            self,
            Self::Sprite {
                clone_root: Some(_),
                ..
            }
        )
    }

    /// True for draggable sprites.
    pub fn is_draggable(&self) -> bool {
        matches!(
            self,
            Self::Sprite {
                draggable: true,
                ..
            }
        )
    }
}

bitflags::bitflags! {
    /// Pending work for a target.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        /// The cached hull no longer matches the silhouette.
        const HULL   = 0b0000_0001;
        /// The target must be repainted at the next [`Stage::commit`](crate::Stage::commit).
        const REDRAW = 0b0000_0010;
    }
}

/// Logical properties of a sprite at insertion time.
#[derive(Clone, Debug)]
pub struct SpriteProps {
    /// Stage x of the rotation center.
    pub x: f64,
    /// Stage y of the rotation center.
    pub y: f64,
    /// Size in percent; `100.0` is the costume's nominal size.
    pub size: f64,
    /// Direction in degrees; `90.0` points right.
    pub direction: f64,
    /// Rotation style.
    pub rotation_style: RotationStyle,
    /// Visibility.
    pub visible: bool,
    /// Paint order; higher is drawn on top.
    pub layer_order: i32,
    /// Whether the user can drag the sprite.
    pub draggable: bool,
    /// Current costume, if any.
    pub costume: Option<Costume>,
}

impl Default for SpriteProps {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            size: 100.0,
            direction: 90.0,
            rotation_style: RotationStyle::AllAround,
            visible: true,
            layer_order: 0,
            draggable: false,
            costume: None,
        }
    }
}
