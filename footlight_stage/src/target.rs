// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-target render state.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use footlight_raster::{PixelPoint, Skin, Texture, row_spans};
use kurbo::Point;

use crate::config::StageConfig;
use crate::effects::GraphicEffects;
use crate::rect::StageRect;
use crate::transform::{Orientation, SceneGeometry, StageMapping, effective_rotation};
use crate::types::{DirtyFlags, RotationStyle, SpriteProps, TargetKind};

/// The visual asset bound to a target.
///
/// The skin is shared: clones of a sprite hold the same `Arc` as their clone root.
#[derive(Clone, Debug)]
pub struct Costume {
    /// Texture producer for this costume.
    pub skin: Arc<dyn Skin>,
    /// Rotation center x, in costume pixels from the left edge.
    pub rotation_center_x: f64,
    /// Rotation center y, in costume pixels from the top edge.
    pub rotation_center_y: f64,
    /// Costume pixels per nominal unit; `2.0` for double-resolution bitmaps.
    pub bitmap_resolution: f64,
}

impl Costume {
    /// Costume with resolution 1.
    pub fn new(skin: Arc<dyn Skin>, rotation_center_x: f64, rotation_center_y: f64) -> Self {
        Self {
            skin,
            rotation_center_x,
            rotation_center_y,
            bitmap_resolution: 1.0,
        }
    }

    /// True if both describe the same costume: same skin and same metrics.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.skin, &other.skin)
            && self.rotation_center_x == other.rotation_center_x
            && self.rotation_center_y == other.rotation_center_y
            && self.bitmap_resolution == other.bitmap_resolution
    }
}

/// Render state of one target.
///
/// Holds the logical properties the runtime sets, the textures derived from them, and the
/// cached hull. The hull is stored in texture space at CPU resolution and is only meaningful
/// while [`DirtyFlags::HULL`] is clear; [`Stage`](crate::Stage) refreshes it before any query
/// that reads it.
#[derive(Clone)]
pub struct RenderedTarget {
    pub(crate) kind: TargetKind,
    pub(crate) x: f64,
    pub(crate) y: f64,
    /// Size factor; `1.0` is the costume's nominal size.
    pub(crate) size: f64,
    pub(crate) direction: f64,
    pub(crate) rotation_style: RotationStyle,
    pub(crate) orientation: Orientation,
    pub(crate) visible: bool,
    pub(crate) layer_order: i32,
    pub(crate) costume: Option<Costume>,
    pub(crate) texture: Option<Texture>,
    pub(crate) cpu_texture: Option<Texture>,
    pub(crate) effects: GraphicEffects,
    pub(crate) hull: Arc<[PixelPoint]>,
    pub(crate) dirty: DirtyFlags,
    /// Fast bounds reported by the last commit, `None` before the first one.
    pub(crate) committed: Option<StageRect>,
    /// Insertion sequence on the stage; later insertions win layer ties.
    pub(crate) order: u64,
}

impl fmt::Debug for RenderedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedTarget")
            .field("kind", &self.kind)
            .field("position", &(self.x, self.y))
            .field("size", &self.size)
            .field("direction", &self.direction)
            .field("rotation_style", &self.rotation_style)
            .field("visible", &self.visible)
            .field("layer_order", &self.layer_order)
            .field("texture", &self.texture.map(|t| t.handle))
            .field("cpu_texture", &self.cpu_texture.map(|t| t.handle))
            .field("effects", &self.effects.len())
            .field("hull_points", &self.hull.len())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl RenderedTarget {
    pub(crate) fn new(kind: TargetKind, props: SpriteProps) -> Self {
        let mut target = Self {
            kind,
            x: props.x,
            y: props.y,
            size: props.size / 100.0,
            direction: props.direction,
            rotation_style: props.rotation_style,
            orientation: Orientation::default(),
            visible: props.visible,
            layer_order: props.layer_order,
            costume: props.costume,
            texture: None,
            cpu_texture: None,
            effects: GraphicEffects::new(),
            hull: Arc::from(Vec::new()),
            dirty: DirtyFlags::HULL | DirtyFlags::REDRAW,
            committed: None,
            order: 0,
        };
        target.update_orientation();
        target
    }

    /// What the target is.
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Stage position of the rotation center.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size in percent.
    pub fn size(&self) -> f64 {
        self.size * 100.0
    }

    /// Direction in degrees.
    pub fn direction(&self) -> f64 {
        self.direction
    }

    /// Rotation style.
    pub fn rotation_style(&self) -> RotationStyle {
        self.rotation_style
    }

    /// Effective rotation and mirroring.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether the target is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Paint order; higher is drawn on top.
    pub fn layer_order(&self) -> i32 {
        self.layer_order
    }

    /// Current costume.
    pub fn costume(&self) -> Option<&Costume> {
        self.costume.as_ref()
    }

    /// Texture drawn on screen, sized for the stage scale.
    pub fn texture(&self) -> Option<Texture> {
        self.texture
    }

    /// Texture used for CPU-side hit testing, sized for the costume size alone.
    pub fn cpu_texture(&self) -> Option<Texture> {
        self.cpu_texture
    }

    /// Active graphic effects.
    pub fn graphic_effects(&self) -> &GraphicEffects {
        &self.effects
    }

    /// Cached hull in CPU texture pixels.
    ///
    /// Possibly stale; see [`dirty`](Self::dirty).
    pub fn hull_points(&self) -> &[PixelPoint] {
        &self.hull
    }

    /// Pending work flags.
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// True if the cached hull must be recomputed before use.
    pub(crate) fn hull_needed(&self) -> bool {
        self.dirty.contains(DirtyFlags::HULL) || self.hull.is_empty()
    }

    pub(crate) fn update_orientation(&mut self) {
        let orientation = effective_rotation(self.rotation_style, self.direction);
        if orientation != self.orientation {
            self.orientation = orientation;
            self.dirty |= DirtyFlags::REDRAW;
        }
    }

    /// Re-derive both textures from the skin for the current size and stage scale.
    ///
    /// A change of the CPU texture identity dirties the hull.
    pub(crate) fn update_textures(&mut self, stage_scale: f64) {
        let Some(costume) = &self.costume else {
            return;
        };
        let old_cpu = self.cpu_texture.map(|t| t.handle);
        self.texture = costume.skin.texture(self.size * stage_scale);
        self.cpu_texture = costume.skin.texture(self.size);
        let new_cpu = self.cpu_texture.map(|t| t.handle);
        if old_cpu != new_cpu {
            if old_cpu.is_some() {
                log::debug!("cpu texture changed from {old_cpu:?} to {new_cpu:?}");
            }
            self.dirty |= DirtyFlags::HULL;
        }
        self.dirty |= DirtyFlags::REDRAW;
    }

    /// Mapping from CPU texture pixels to stage space, if the geometry resolves.
    pub(crate) fn stage_mapping(&self, config: &StageConfig) -> Option<StageMapping> {
        if !config.has_valid_scale() {
            return None;
        }
        let (Some(costume), Some(_), Some(cpu)) = (&self.costume, self.texture, self.cpu_texture)
        else {
            return None;
        };
        StageMapping::new(costume, &cpu, self.size, self.orientation, self.position())
    }

    /// Scene placement of the render texture, if the geometry resolves.
    pub fn scene_geometry(&self, config: &StageConfig) -> Option<SceneGeometry> {
        let (Some(costume), Some(render), Some(_)) = (&self.costume, self.texture, self.cpu_texture)
        else {
            return None;
        };
        SceneGeometry::new(
            config,
            costume,
            &render,
            self.size,
            self.orientation,
            self.position(),
        )
    }

    /// Bounding box of the four corners of the CPU texture.
    ///
    /// Cheap and never tighter than [`exact_bounds`](Self::exact_bounds). Degenerates to the
    /// position when the geometry cannot be resolved.
    pub fn fast_bounds(&self, config: &StageConfig) -> StageRect {
        let at_position = StageRect::at_point(self.position());
        let (Some(mapping), Some(cpu)) = (self.stage_mapping(config), self.cpu_texture) else {
            return at_position;
        };
        let (w, h) = (f64::from(cpu.width), f64::from(cpu.height));
        mapping
            .bounds([(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)])
            .unwrap_or(at_position)
    }

    /// Bounding box of the cached hull.
    ///
    /// Each hull row contributes the corners of its leftmost and rightmost pixels. The
    /// caller must refresh the hull first. An empty hull yields a zero-area rectangle at the
    /// position.
    pub fn exact_bounds(&self, config: &StageConfig) -> StageRect {
        let at_position = StageRect::at_point(self.position());
        let Some(mapping) = self.stage_mapping(config) else {
            return at_position;
        };
        let corners = row_spans(&self.hull).flat_map(|span| {
            let (l, r) = (f64::from(span.x_min), f64::from(span.x_max) + 1.0);
            let (t, b) = (f64::from(span.y), f64::from(span.y) + 1.0);
            [(l, t), (r, t), (r, b), (l, b)]
        });
        mapping.bounds(corners).unwrap_or(at_position)
    }

    /// The top slice of the exact bounds, at most 8 units tall, for placing speech bubbles.
    pub fn bubble_bounds(&self, config: &StageConfig) -> StageRect {
        const SLICE: f64 = 8.0;
        let mut rect = self.exact_bounds(config);
        if rect.height() > SLICE {
            rect.bottom = rect.top - SLICE;
        }
        rect
    }
}
