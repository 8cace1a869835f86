// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stage dimensions, render scale, and behavior switches.

use kurbo::Point;

use crate::rect::StageRect;

/// Runtime configuration of a [`Stage`](crate::Stage).
///
/// Stage space has its origin at the stage center with y pointing up. Scene space is what a
/// scene-graph backend draws into: origin at the top-left, y down, scaled by [`scale`](Self::scale).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StageConfig {
    /// Logical stage width.
    pub width: u32,
    /// Logical stage height.
    pub height: u32,
    /// Scene pixels per stage unit.
    pub scale: f64,
    /// Dirty the hull when a shape-changing graphic effect is set or cleared.
    ///
    /// Off by default: the hull is taken from the unaffected costume, so effects never change it.
    pub effects_dirty_hull: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 360,
            scale: 1.0,
            effects_dirty_hull: false,
        }
    }
}

impl StageConfig {
    /// Half the stage width.
    pub fn half_width(&self) -> f64 {
        f64::from(self.width) / 2.0
    }

    /// Half the stage height.
    pub fn half_height(&self) -> f64 {
        f64::from(self.height) / 2.0
    }

    /// True if the scale can be used for geometry.
    pub fn has_valid_scale(&self) -> bool {
        self.scale.is_finite() && self.scale > 0.0
    }

    /// Visible extent of the stage in stage space.
    pub fn bounds(&self) -> StageRect {
        let (hw, hh) = (self.half_width(), self.half_height());
        StageRect::new(-hw, hh, hw, -hh)
    }

    /// Map a stage point to scene space.
    pub fn stage_to_scene(&self, p: Point) -> Point {
        Point::new(
            self.scale * (self.half_width() + p.x),
            self.scale * (self.half_height() - p.y),
        )
    }

    /// Map a scene point to stage space.
    ///
    /// Returns `None` when the scale is zero or not finite.
    pub fn scene_to_stage(&self, p: Point) -> Option<Point> {
        if !self.has_valid_scale() {
            return None;
        }
        Some(Point::new(
            p.x / self.scale - self.half_width(),
            self.half_height() - p.y / self.scale,
        ))
    }
}
