// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel-precise containment and the clone touching scan.

use alloc::sync::Arc;

use footlight_raster::{PixelPoint, hull_contains};
use kurbo::{Affine, Point};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::config::StageConfig;
use crate::rect::{IntRect, StageRect};
use crate::target::RenderedTarget;

/// Point-containment test for one target, frozen at construction.
///
/// Holds everything a query needs (the inverse placement transform, the texture scale ratio,
/// and a shared handle to the hull) so the touching scan can test many points without
/// touching the stage again.
#[derive(Clone, Debug)]
pub(crate) struct HitProbe {
    /// Stage space to item-local render pixels.
    stage_to_local: Affine,
    /// Render texture scale over CPU texture scale.
    ratio: f64,
    width: f64,
    height: f64,
    hull: Arc<[PixelPoint]>,
}

impl HitProbe {
    /// Build a probe from a target whose hull is up to date.
    ///
    /// Returns `None` when the target has no resolvable geometry; such a target contains
    /// no point.
    pub(crate) fn new(target: &RenderedTarget, config: &StageConfig) -> Option<Self> {
        let geometry = target.scene_geometry(config)?;
        let render = target.texture?;
        let cpu = target.cpu_texture.filter(|t| !t.is_empty())?;
        if geometry.scale == 0.0 || !geometry.scale.is_finite() {
            return None;
        }
        let stage_to_scene = Affine::new([
            config.scale,
            0.0,
            0.0,
            -config.scale,
            config.scale * config.half_width(),
            config.scale * config.half_height(),
        ]);
        Some(Self {
            stage_to_local: geometry.to_scene().inverse() * stage_to_scene,
            ratio: render.scale / cpu.scale,
            width: f64::from(cpu.width),
            height: f64::from(cpu.height),
            hull: Arc::clone(&target.hull),
        })
    }

    /// Whether the render-pixel point `local` lands on an opaque CPU pixel.
    ///
    /// The point is scaled to CPU resolution and rounded to the nearest integer point, which
    /// must be listed in the hull. There is no interpolation between pixels.
    pub(crate) fn contains_local(&self, local: Point) -> bool {
        let x = (local.x / self.ratio).round();
        let y = (local.y / self.ratio).round();
        if !(x >= 0.0 && y >= 0.0 && x < self.width && y < self.height) {
            return false;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Bounded by the texture size checked above."
        )]
        let pixel = PixelPoint::new(x as i32, y as i32);
        hull_contains(&self.hull, pixel)
    }

    /// Whether the stage point `p` lands on an opaque pixel.
    pub(crate) fn contains_stage(&self, p: Point) -> bool {
        self.contains_local(self.stage_to_local * p)
    }
}

/// Integer scan area of a target for touching queries: its fast bounds limited to the stage
/// and expanded outward to whole units.
pub(crate) fn touching_bounds(target: &RenderedTarget, config: &StageConfig) -> IntRect {
    target
        .fast_bounds(config)
        .clamp(&config.bounds())
        .snap_to_int()
}

/// Union of the overlaps between `own` and each candidate's bounds.
///
/// Candidates whose bounds miss `own` contribute nothing. `None` means no overlap at all, in
/// which case no pixel needs to be scanned.
pub(crate) fn scan_area(
    own: IntRect,
    candidates: impl IntoIterator<Item = StageRect>,
) -> Option<IntRect> {
    candidates
        .into_iter()
        .filter_map(|r| own.intersect(&r.snap_to_int()))
        .reduce(|a, b| a.union(&b))
}

/// Scan every integer point of `area`, edges included, for a point inside `own` and at least
/// one of `others`.
pub(crate) fn scan_touching(
    own: &HitProbe,
    others: &[HitProbe],
    area: IntRect,
) -> Option<Point> {
    area.points()
        .map(|(x, y)| Point::new(f64::from(x), f64::from(y)))
        .find(|&p| own.contains_stage(p) && others.iter().any(|o| o.contains_stage(p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Costume;
    use crate::types::{SpriteProps, TargetKind};
    use alloc::vec;
    use alloc::vec::Vec;
    use footlight_raster::{BitmapSkin, Skin, Texture, TextureHandle};

    /// Opaque square of `n` pixels with its rotation center at the top-left corner.
    fn square(n: u32, x: f64, y: f64, size: f64, config: &StageConfig) -> RenderedTarget {
        let texture = Texture::new(TextureHandle(n), n, n, 1.0);
        let mut t = RenderedTarget::new(
            TargetKind::Sprite {
                clone_root: None,
                draggable: false,
            },
            SpriteProps {
                x,
                y,
                size,
                costume: Some(Costume::new(Arc::new(BitmapSkin::new(texture)), 0.0, 0.0)),
                ..SpriteProps::default()
            },
        );
        t.update_textures(config.scale);
        let side = i32::try_from(n).unwrap();
        t.hull = (0..side)
            .flat_map(|y| (0..side).map(move |x| PixelPoint::new(x, y)))
            .collect::<Vec<_>>()
            .into();
        t
    }

    #[test]
    fn probe_rounds_to_nearest_point() {
        let config = StageConfig::default();
        let mut t = square(3, 0.0, 0.0, 100.0, &config);
        t.hull = Arc::from(vec![PixelPoint::new(1, 1)]);
        let probe = HitProbe::new(&t, &config).unwrap();
        // Point (1, 1) collects stage x in [0.5, 1.5) and y in (-1.5, -0.5].
        assert!(probe.contains_stage(Point::new(1.0, -1.0)));
        assert!(probe.contains_stage(Point::new(0.6, -0.6)));
        assert!(probe.contains_stage(Point::new(1.49, -1.49)));
        assert!(!probe.contains_stage(Point::new(1.6, -1.6)));
        assert!(!probe.contains_stage(Point::new(1.5, -1.0)));
        assert!(!probe.contains_stage(Point::new(0.4, -1.0)));
        assert!(!probe.contains_stage(Point::new(-0.5, 0.5)));
    }

    #[test]
    fn local_point_rounds_up_into_next_pixel() {
        let config = StageConfig::default();
        let mut t = square(3, 0.0, 0.0, 100.0, &config);
        t.hull = Arc::from(vec![PixelPoint::new(1, 1)]);
        let probe = HitProbe::new(&t, &config).unwrap();
        assert!(probe.contains_local(Point::new(0.6, 0.6)));
        assert!(!probe.contains_local(Point::new(0.4, 0.6)));
        // Rounding past the last column leaves the texture.
        t.hull = Arc::from(vec![PixelPoint::new(2, 0)]);
        let probe = HitProbe::new(&t, &config).unwrap();
        assert!(probe.contains_local(Point::new(2.4, 0.0)));
        assert!(!probe.contains_local(Point::new(2.6, 0.0)));
    }

    #[test]
    fn probe_respects_render_to_cpu_ratio() {
        /// Renders at twice the resolution once the requested scale reaches 2.
        #[derive(Debug)]
        struct Doubled;
        impl Skin for Doubled {
            fn texture(&self, scale: f64) -> Option<Texture> {
                Some(if scale >= 2.0 {
                    Texture::new(TextureHandle(2), 8, 8, 2.0)
                } else {
                    Texture::new(TextureHandle(1), 4, 4, 1.0)
                })
            }
        }

        let config = StageConfig {
            scale: 2.0,
            ..StageConfig::default()
        };
        let mut t = RenderedTarget::new(
            TargetKind::Stage,
            SpriteProps {
                costume: Some(Costume::new(Arc::new(Doubled), 0.0, 0.0)),
                ..SpriteProps::default()
            },
        );
        t.update_textures(config.scale);
        t.hull = Arc::from(vec![PixelPoint::new(3, 0)]);
        let probe = HitProbe::new(&t, &config).unwrap();
        assert_eq!(probe.ratio, 2.0);
        // Render point (6.5, 0.5) is CPU point (3.25, 0.25), which rounds to (3, 0).
        assert!(probe.contains_local(Point::new(6.5, 0.5)));
        assert!(probe.contains_local(Point::new(5.1, 0.0)));
        assert!(!probe.contains_local(Point::new(4.9, 0.0)));
        assert!(!probe.contains_local(Point::new(8.0, 0.0)));
        // Stage point (3, 0) is CPU point (3, 0) for a sprite at the origin.
        assert!(probe.contains_stage(Point::new(3.0, 0.0)));
        assert!(!probe.contains_stage(Point::new(2.4, 0.0)));
    }

    #[test]
    fn overlapping_squares_share_a_boundary_point() {
        let config = StageConfig::default();
        let a = square(3, 0.0, 0.0, 100.0, &config);
        let b = square(3, 2.0, -2.0, 100.0, &config);

        let own = touching_bounds(&a, &config);
        assert_eq!(own, IntRect::new(0, 0, 3, -3));
        let area = scan_area(own, [b.fast_bounds(&config)]).unwrap();
        assert_eq!(area, IntRect::new(2, -2, 3, -3));

        let pa = HitProbe::new(&a, &config).unwrap();
        let pb = HitProbe::new(&b, &config).unwrap();
        // The only shared pixel is A's (2, 2), which is B's (0, 0). Its corner (2, -2) is the
        // top-left edge of the scan area.
        assert_eq!(
            scan_touching(&pa, &[pb], area),
            Some(Point::new(2.0, -2.0))
        );
    }

    #[test]
    fn disjoint_bounds_skip_the_scan() {
        let config = StageConfig::default();
        let a = square(3, 0.0, 0.0, 33.0, &config);
        let b = square(3, 2.0, -2.0, 100.0, &config);
        let own = touching_bounds(&a, &config);
        assert_eq!(own, IntRect::new(0, 0, 1, -1));
        assert_eq!(scan_area(own, [b.fast_bounds(&config)]), None);
    }

    #[test]
    fn scan_area_is_limited_to_the_stage() {
        let config = StageConfig::default();
        let a = square(3, 238.5, 0.0, 100.0, &config);
        assert_eq!(touching_bounds(&a, &config), IntRect::new(238, 0, 240, -3));
        let off = square(3, 300.0, 0.0, 100.0, &config);
        assert_eq!(touching_bounds(&off, &config), IntRect::new(240, 0, 240, -3));
    }

    #[test]
    fn union_covers_every_overlap() {
        let own = IntRect::new(0, 10, 10, 0);
        let area = scan_area(
            own,
            [
                StageRect::new(-5.0, 2.0, 1.0, -5.0),
                StageRect::new(20.0, 30.0, 25.0, 20.0),
                StageRect::new(8.5, 12.0, 12.0, 9.2),
            ],
        )
        .unwrap();
        assert_eq!(area, IntRect::new(0, 10, 10, 0));
    }
}
