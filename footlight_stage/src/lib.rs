// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=footlight_stage --heading-base-level=0

//! Footlight Stage: Kurbo-native sprite transforms, bounds, and pixel-precise touching queries.
//!
//! Footlight Stage is the geometry core of a 2D sprite stage.
//!
//! - Turns a sprite's position, size, direction, and rotation style into a placement in stage
//!   space (y up, origin at the center) and in scene space (y down, origin at the top-left).
//! - Computes conservative ("fast") and opaque-pixel ("exact") stage bounds.
//! - Answers whether a stage point lands on an opaque pixel, and whether a sprite touches any
//!   clone in a list, with a bounded integer scan.
//! - Batches property changes into coarse damage with a [`Stage::commit`] step.
//!
//! Pixel data comes from [`footlight_raster`]: each target's *hull* (its opaque pixels) is read
//! back through a [`PixelSource`](footlight_raster::PixelSource) once per texture and shared
//! between clones until they diverge.
//!
//! ## Coordinate spaces
//!
//! - Stage space: `stage_width × stage_height` nominal units centered on the origin, y up.
//! - Scene space: the stage scaled by [`StageConfig::scale`], origin at the top-left, y down.
//! - Texture space: CPU texture pixels, origin at the top-left, y down. Pixel `(i, j)` covers
//!   `[i, i + 1] × [j, j + 1]`.
//!
//! ## API overview
//!
//! - [`Stage`]: container owning every [`RenderedTarget`], the texture cache, and the pixel source.
//! - [`TargetId`]: generational handle of a target. Stale handles are ignored.
//! - [`SpriteProps`] and [`Costume`]: the logical state the runtime sets.
//! - [`StageMapping`] and [`SceneGeometry`]: the two placement pipelines.
//! - [`StageRect`] and [`IntRect`]: stage-space rectangles, continuous and integer.
//! - [`GraphicEffects`]: per-target effect values.
//!
//! Key operations:
//! - [`Stage::fast_bounds`], [`Stage::exact_bounds`], [`Stage::bubble_bounds`]
//! - [`Stage::contains_stage_point`] and [`Stage::contains_local_point`]
//! - [`Stage::touching_clones`] and [`Stage::hit_test`]
//! - [`Stage::start_drag`], [`Stage::drag_to_scene`], [`Stage::stop_drag`]
//!
//! ## Minimal usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use footlight_raster::{BitmapSkin, PixelBuffer, Texture, TextureHandle};
//! use footlight_stage::{Costume, SpriteProps, Stage, StageRect};
//! use kurbo::Point;
//!
//! let mut stage = Stage::default();
//!
//! // A 3x3 opaque square rotating about its top-left corner.
//! let handle = TextureHandle(1);
//! stage
//!     .source_mut()
//!     .insert(handle, PixelBuffer::filled(3, 3, [255, 255, 255, 255]));
//! let skin = Arc::new(BitmapSkin::new(Texture::new(handle, 3, 3, 1.0)));
//!
//! let a = stage.insert_sprite(SpriteProps {
//!     costume: Some(Costume::new(skin, 0.0, 0.0)),
//!     ..SpriteProps::default()
//! });
//! assert_eq!(stage.fast_bounds(a), Some(StageRect::new(0.0, 0.0, 3.0, -3.0)));
//!
//! // A clone sharing one pixel with the original.
//! let b = stage.insert_clone(a).unwrap();
//! stage.set_position(b, Point::new(2.0, -2.0));
//! assert!(stage.touching_clones(a, &[b]));
//!
//! // Both hulls came from a single read-back.
//! assert_eq!(stage.source().reads(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod damage;
pub mod effects;
mod hit;
pub mod rect;
pub mod stage;
pub mod target;
pub mod transform;
pub mod types;

pub use config::StageConfig;
pub use damage::Damage;
pub use effects::{Effect, GraphicEffects};
pub use rect::{IntRect, StageRect};
pub use stage::Stage;
pub use target::{Costume, RenderedTarget};
pub use transform::{
    Orientation, SceneGeometry, StageMapping, TransformOrigin, effective_rotation, transform_point,
};
pub use types::{DirtyFlags, RotationStyle, SpriteProps, TargetId, TargetKind};
