// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate pipeline between texture pixels, stage space, and scene space.
//!
//! Three spaces are involved:
//!
//! - *Texture space*: CPU texture pixels, origin at the top-left, y down.
//! - *Stage space*: origin at the stage center, y up, in stage units.
//! - *Scene space*: what a scene-graph backend draws into, origin at the top-left, y down,
//!   scaled by the stage scale.
//!
//! [`StageMapping`] maps texture space to stage space and backs the bounds queries.
//! [`SceneGeometry`] places a target in scene space and backs point containment.

use kurbo::{Affine, Point, Size, Vec2};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use footlight_raster::Texture;

use crate::config::StageConfig;
use crate::rect::StageRect;
use crate::target::Costume;
use crate::types::RotationStyle;

/// On-screen rotation and mirroring derived from a direction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Orientation {
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    /// Flip horizontally after rotating.
    pub mirror: bool,
}

/// Derive the on-screen orientation of a sprite facing `direction` degrees.
///
/// - [`RotationStyle::AllAround`]: rotate by `direction - 90`, never mirror.
/// - [`RotationStyle::LeftRight`]: never rotate; mirror when `direction < 0`.
/// - [`RotationStyle::DoNotRotate`]: never rotate or mirror.
pub fn effective_rotation(style: RotationStyle, direction: f64) -> Orientation {
    match style {
        RotationStyle::AllAround => Orientation {
            rotation: direction - 90.0,
            mirror: false,
        },
        RotationStyle::LeftRight => Orientation {
            rotation: 0.0,
            mirror: direction < 0.0,
        },
        RotationStyle::DoNotRotate => Orientation::default(),
    }
}

/// Rotate `p` about `origin` by the angle whose sine and cosine are given.
///
/// The result is relative to `origin`. Both points are in a y-up space, so a positive angle
/// turns counterclockwise.
pub fn transform_point(p: Vec2, origin: Vec2, sin: f64, cos: f64) -> Vec2 {
    let d = p - origin;
    Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// Maps CPU texture pixels of one target into stage space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StageMapping {
    /// Stage units per CPU texture pixel.
    pixel_size: f64,
    /// Rotation center relative to the texture's top-left, in stage units, y up.
    center: Vec2,
    sin: f64,
    cos: f64,
    mirror: bool,
    position: Point,
}

impl StageMapping {
    /// Build the mapping for a target drawn with `cpu` at `size` (a factor, `1.0` is nominal).
    ///
    /// Returns `None` when the geometry cannot be resolved: an empty texture or a bitmap
    /// resolution that is zero or not finite.
    pub fn new(
        costume: &Costume,
        cpu: &Texture,
        size: f64,
        orientation: Orientation,
        position: Point,
    ) -> Option<Self> {
        let res = costume.bitmap_resolution;
        if cpu.is_empty() || !res.is_finite() || res <= 0.0 || !size.is_finite() {
            return None;
        }
        let rot = -orientation.rotation.to_radians();
        Some(Self {
            pixel_size: size / cpu.scale / res,
            center: Vec2::new(
                costume.rotation_center_x * size / res,
                -costume.rotation_center_y * size / res,
            ),
            sin: rot.sin(),
            cos: rot.cos(),
            mirror: orientation.mirror,
            position,
        })
    }

    /// Stage point of texture coordinate (`u`, `v`).
    ///
    /// Integer coordinates are pixel corners: pixel `(i, j)` covers `[i, i + 1] × [j, j + 1]`.
    pub fn map(&self, u: f64, v: f64) -> Point {
        let p = Vec2::new(u * self.pixel_size, -v * self.pixel_size);
        let r = transform_point(p, self.center, self.sin, self.cos);
        let x = if self.mirror { -r.x } else { r.x };
        self.position + Vec2::new(x, r.y)
    }

    /// Bounding rectangle of the mapped texture coordinates.
    ///
    /// Returns `None` for an empty iterator.
    pub fn bounds(&self, coords: impl IntoIterator<Item = (f64, f64)>) -> Option<StageRect> {
        coords
            .into_iter()
            .map(|(u, v)| StageRect::at_point(self.map(u, v)))
            .reduce(|a, b| a.union(&b))
    }
}

/// Anchor of the rotation and scale applied to a scene item.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TransformOrigin {
    /// The item's explicit origin point.
    #[default]
    Center,
    /// The item's top-left corner; used when the origin point is exactly zero.
    TopLeft,
}

/// Placement of a target in scene space.
///
/// This is what a scene-graph backend needs to draw the render texture: the item's top-left
/// position and pixel size, a uniform scale, a clockwise rotation, and a horizontal mirror,
/// all anchored at [`origin`](Self::origin).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneGeometry {
    /// Scene position of the item's top-left corner (before transforms).
    pub position: Point,
    /// Item size in render texture pixels.
    pub size: Size,
    /// Transform origin in item-local render pixels: the costume's rotation center.
    pub origin: Point,
    /// How the backend should anchor transforms.
    pub origin_mode: TransformOrigin,
    /// Uniform scale from render pixels to scene pixels.
    pub scale: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    /// Horizontal mirror, applied after rotation.
    pub mirror: bool,
}

impl SceneGeometry {
    /// Place a target whose rotation center sits at stage point `position`.
    ///
    /// `render` is the texture drawn on screen and `size` the costume size factor.
    /// Returns `None` if the stage scale, bitmap resolution, or texture cannot be used.
    pub fn new(
        config: &StageConfig,
        costume: &Costume,
        render: &Texture,
        size: f64,
        orientation: Orientation,
        position: Point,
    ) -> Option<Self> {
        let res = costume.bitmap_resolution;
        if !config.has_valid_scale() || render.is_empty() || !res.is_finite() || res <= 0.0 {
            return None;
        }
        let origin = Point::new(
            costume.rotation_center_x * render.scale,
            costume.rotation_center_y * render.scale,
        );
        let mirror = if orientation.mirror { -1.0 } else { 1.0 };
        let anchor = config.stage_to_scene(position);
        let origin_mode = if origin.x == 0.0 && origin.y == 0.0 {
            TransformOrigin::TopLeft
        } else {
            TransformOrigin::Center
        };
        Some(Self {
            position: Point::new(anchor.x - origin.x * mirror, anchor.y - origin.y),
            size: Size::new(f64::from(render.width), f64::from(render.height)),
            origin,
            origin_mode,
            scale: size * config.scale / render.scale / res,
            rotation: orientation.rotation,
            mirror: orientation.mirror,
        })
    }

    /// Transform from item-local render pixels to scene space.
    pub fn to_scene(&self) -> Affine {
        let mirror = if self.mirror { -1.0 } else { 1.0 };
        let o = self.origin.to_vec2();
        Affine::translate(self.position.to_vec2() + Vec2::new(o.x * mirror, o.y))
            * Affine::scale_non_uniform(self.scale * mirror, self.scale)
            * Affine::rotate(self.rotation.to_radians())
            * Affine::translate(-o)
    }

    /// Map a scene point into item-local render pixels.
    ///
    /// Undoes the translation, mirror, scale, and rotation in that order. Returns `None` when
    /// the item is scaled to nothing.
    pub fn scene_to_local(&self, p: Point) -> Option<Point> {
        if !self.scale.is_finite() || self.scale == 0.0 {
            return None;
        }
        Some(self.to_scene().inverse() * p)
    }
}
