// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stage: target storage, property updates, queries, dragging, and damage.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use footlight_raster::{MemoryPixelSource, PixelPoint, PixelSource, TextureCache, TextureHandle};
use kurbo::{Point, Vec2};

use crate::config::StageConfig;
use crate::damage::Damage;
use crate::effects::Effect;
use crate::hit::{HitProbe, scan_area, scan_touching, touching_bounds};
use crate::rect::StageRect;
use crate::target::{Costume, RenderedTarget};
use crate::transform::SceneGeometry;
use crate::types::{DirtyFlags, RotationStyle, SpriteProps, TargetId, TargetKind};

#[derive(Copy, Clone, Debug)]
struct Drag {
    target: TargetId,
    /// Mouse position minus sprite position when the drag started.
    delta: Vec2,
}

/// Owner of every rendered target of one project.
///
/// Queries that read the hull take `&mut self`: they refresh stale hulls on the way, reading
/// pixels back through the [`PixelSource`] at most once per texture.
pub struct Stage<S = MemoryPixelSource> {
    targets: Vec<Option<RenderedTarget>>, // slots
    generations: Vec<u32>,                // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    /// Insertion sequence handed to the next target.
    next_order: u64,
    config: StageConfig,
    cache: TextureCache,
    source: S,
    drag: Option<Drag>,
    /// Fast bounds of targets removed since the last commit.
    removed: Vec<StageRect>,
    empty_hull: Arc<[PixelPoint]>,
}

impl<S> fmt::Debug for Stage<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.targets.len();
        let alive = self.targets.iter().filter(|t| t.is_some()).count();
        f.debug_struct("Stage")
            .field("targets_total", &total)
            .field("targets_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("dragged", &self.drag.map(|d| d.target))
            .finish_non_exhaustive()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(StageConfig::default(), MemoryPixelSource::new())
    }
}

impl<S: PixelSource> Stage<S> {
    /// Create an empty stage reading pixels from `source`.
    pub fn new(config: StageConfig, source: S) -> Self {
        Self {
            targets: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            next_order: 0,
            config,
            cache: TextureCache::new(),
            source,
            drag: None,
            removed: Vec::new(),
            empty_hull: Arc::from(Vec::new()),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// The pixel source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The pixel source, mutably.
    ///
    /// Replacing the pixels of a texture that was already read requires
    /// [`retire_texture`](Self::retire_texture) for the change to be seen.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The texture cache.
    pub fn cache(&self) -> &TextureCache {
        &self.cache
    }

    /// Change the stage scale and re-derive every target's textures.
    pub fn set_scale(&mut self, scale: f64) {
        if scale == self.config.scale {
            return;
        }
        log::debug!("stage scale {} -> {}", self.config.scale, scale);
        self.config.scale = scale;
        for t in self.targets.iter_mut().flatten() {
            t.update_textures(scale);
        }
    }

    /// Choose whether shape-changing graphic effects dirty the hull.
    pub fn set_effects_dirty_hull(&mut self, enabled: bool) {
        self.config.effects_dirty_hull = enabled;
    }

    // --- Storage -------------------------------------------------------------------------

    fn insert_target(&mut self, mut target: RenderedTarget) -> TargetId {
        target.update_textures(self.config.scale);
        target.order = self.next_order;
        self.next_order += 1;
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.targets[idx] = Some(target);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "TargetId uses 32-bit indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.targets.push(Some(target));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "TargetId uses 32-bit indices."
            )]
            ((self.targets.len() - 1) as u32, generation)
        };
        let id = TargetId::new(idx, generation);
        log::debug!("inserted target {id:?}");
        id
    }

    /// Insert the stage backdrop.
    pub fn insert_stage(&mut self, costume: Option<Costume>) -> TargetId {
        self.insert_target(RenderedTarget::new(
            TargetKind::Stage,
            SpriteProps {
                costume,
                ..SpriteProps::default()
            },
        ))
    }

    /// Insert a sprite.
    pub fn insert_sprite(&mut self, props: SpriteProps) -> TargetId {
        let kind = TargetKind::Sprite {
            clone_root: None,
            draggable: props.draggable,
        };
        self.insert_target(RenderedTarget::new(kind, props))
    }

    /// Insert a clone of the sprite `root`.
    ///
    /// The clone starts with a copy of the root's properties and shares its skin and hull
    /// until its own costume or size diverges. Clones of clones refer to the original sprite.
    /// Returns `None` if `root` is stale or is not a sprite.
    pub fn insert_clone(&mut self, root: TargetId) -> Option<TargetId> {
        let source = self.get(root)?;
        let TargetKind::Sprite {
            clone_root,
            draggable,
        } = source.kind
        else {
            return None;
        };
        let mut clone = source.clone();
        clone.kind = TargetKind::Sprite {
            clone_root: Some(clone_root.unwrap_or(root)),
            draggable,
        };
        clone.committed = None;
        clone.dirty |= DirtyFlags::REDRAW;
        Some(self.insert_target(clone))
    }

    /// Remove a target. Ends the drag if the target was being dragged.
    pub fn remove(&mut self, id: TargetId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(bounds) = self.targets[id.idx()].take().and_then(|t| t.committed) {
            self.removed.push(bounds);
        }
        self.free_list.push(id.idx());
        if self.drag.is_some_and(|d| d.target == id) {
            self.drag = None;
        }
        log::debug!("removed target {id:?}");
    }

    /// Returns `true` if `id` refers to a live target.
    pub fn is_alive(&self, id: TargetId) -> bool {
        self.targets.get(id.idx()).is_some_and(|t| t.is_some())
            && self.generations.get(id.idx()) == Some(&id.1)
    }

    /// Access a live target.
    pub fn target(&self, id: TargetId) -> Option<&RenderedTarget> {
        self.get(id)
    }

    /// Identifiers of every live target, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_some())
            .map(|(i, _)| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "TargetId uses 32-bit indices."
                )]
                TargetId::new(i as u32, self.generations[i])
            })
    }

    /// Number of live targets.
    pub fn len(&self) -> usize {
        self.targets.iter().filter(|t| t.is_some()).count()
    }

    /// True if the stage holds no target.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, id: TargetId) -> Option<&RenderedTarget> {
        if !self.is_alive(id) {
            return None;
        }
        self.targets[id.idx()].as_ref()
    }

    fn get_mut(&mut self, id: TargetId) -> Option<&mut RenderedTarget> {
        if !self.is_alive(id) {
            return None;
        }
        self.targets[id.idx()].as_mut()
    }

    // --- Property updates ----------------------------------------------------------------

    /// Show or hide a target. Hiding empties the hull on its next refresh.
    pub fn set_visible(&mut self, id: TargetId, visible: bool) {
        let Some(t) = self.get_mut(id) else { return };
        if t.visible == visible {
            return;
        }
        t.visible = visible;
        t.dirty |= DirtyFlags::HULL | DirtyFlags::REDRAW;
    }

    /// Move a target's rotation center to `position`.
    pub fn set_position(&mut self, id: TargetId, position: Point) {
        let Some(t) = self.get_mut(id) else { return };
        if t.x == position.x && t.y == position.y {
            return;
        }
        t.x = position.x;
        t.y = position.y;
        t.dirty |= DirtyFlags::REDRAW;
    }

    /// Set the stage x of a target.
    pub fn set_x(&mut self, id: TargetId, x: f64) {
        if let Some(t) = self.get(id) {
            let y = t.y;
            self.set_position(id, Point::new(x, y));
        }
    }

    /// Set the stage y of a target.
    pub fn set_y(&mut self, id: TargetId, y: f64) {
        if let Some(t) = self.get(id) {
            let x = t.x;
            self.set_position(id, Point::new(x, y));
        }
    }

    /// Set the size in percent. May switch textures and dirty the hull.
    pub fn set_size(&mut self, id: TargetId, percent: f64) {
        let scale = self.config.scale;
        let Some(t) = self.get_mut(id) else { return };
        let size = percent / 100.0;
        if t.size == size {
            return;
        }
        t.size = size;
        t.update_textures(scale);
    }

    /// Set the direction in degrees.
    pub fn set_direction(&mut self, id: TargetId, direction: f64) {
        let Some(t) = self.get_mut(id) else { return };
        if t.direction == direction {
            return;
        }
        t.direction = direction;
        t.update_orientation();
    }

    /// Set the rotation style.
    pub fn set_rotation_style(&mut self, id: TargetId, style: RotationStyle) {
        let Some(t) = self.get_mut(id) else { return };
        if t.rotation_style == style {
            return;
        }
        t.rotation_style = style;
        t.update_orientation();
    }

    /// Set the paint order.
    pub fn set_layer_order(&mut self, id: TargetId, layer_order: i32) {
        let Some(t) = self.get_mut(id) else { return };
        if t.layer_order == layer_order {
            return;
        }
        t.layer_order = layer_order;
        t.dirty |= DirtyFlags::REDRAW;
    }

    /// Raise a sprite above every other sprite.
    pub fn move_to_front(&mut self, id: TargetId) {
        if !self.get(id).is_some_and(|t| t.kind.is_sprite()) {
            return;
        }
        let top = self
            .ids()
            .filter(|&other| other != id)
            .filter_map(|other| self.get(other))
            .filter(|t| t.kind.is_sprite())
            .map(|t| t.layer_order)
            .max();
        let Some(top) = top else { return };
        if self.get(id).is_some_and(|t| t.layer_order <= top) {
            self.set_layer_order(id, top.saturating_add(1));
        }
    }

    /// Switch a target's costume.
    ///
    /// For a clone this is the point of divergence: it stops sharing its root's costume and,
    /// if the texture changes, its root's hull.
    pub fn set_costume(&mut self, id: TargetId, costume: Costume) {
        let scale = self.config.scale;
        let Some(t) = self.get_mut(id) else { return };
        if t.costume.as_ref().is_some_and(|c| c.same_as(&costume)) {
            return;
        }
        t.costume = Some(costume);
        t.update_textures(scale);
    }

    /// Re-derive a target's textures after its skin produced new ones, and dirty its hull.
    pub fn on_texture_changed(&mut self, id: TargetId) {
        let scale = self.config.scale;
        let Some(t) = self.get_mut(id) else { return };
        t.update_textures(scale);
        t.dirty |= DirtyFlags::HULL;
    }

    /// Mark a target's hull stale. It is recomputed by the next query that needs it.
    pub fn invalidate_hull(&mut self, id: TargetId) {
        if let Some(t) = self.get_mut(id) {
            t.dirty |= DirtyFlags::HULL;
        }
    }

    /// Drop cached data of a texture the renderer retired, and dirty the hulls built from it.
    ///
    /// Returns `true` if the cache held the texture.
    pub fn retire_texture(&mut self, handle: TextureHandle) -> bool {
        for t in self.targets.iter_mut().flatten() {
            if t.cpu_texture.is_some_and(|c| c.handle == handle) {
                t.dirty |= DirtyFlags::HULL;
            }
        }
        self.cache.remove_texture(handle)
    }

    /// Set a graphic effect. Returns `true` if the value changed.
    pub fn set_graphic_effect(&mut self, id: TargetId, effect: Effect, value: f64) -> bool {
        let dirty_hull = self.config.effects_dirty_hull && effect.changes_shape();
        let Some(t) = self.get_mut(id) else {
            return false;
        };
        if !t.effects.set(effect, value) {
            return false;
        }
        t.dirty |= DirtyFlags::REDRAW;
        if dirty_hull {
            t.dirty |= DirtyFlags::HULL;
        }
        true
    }

    /// Clear every graphic effect. Returns `true` if any was set.
    pub fn clear_graphic_effects(&mut self, id: TargetId) -> bool {
        let effects_dirty_hull = self.config.effects_dirty_hull;
        let Some(t) = self.get_mut(id) else {
            return false;
        };
        let changed_shape = t.effects.any_changes_shape();
        if !t.effects.clear() {
            return false;
        }
        t.dirty |= DirtyFlags::REDRAW;
        if effects_dirty_hull && changed_shape {
            t.dirty |= DirtyFlags::HULL;
        }
        true
    }

    /// Allow or forbid dragging a sprite. Forbidding ends an active drag of it.
    pub fn set_draggable(&mut self, id: TargetId, draggable: bool) {
        let Some(t) = self.get_mut(id) else { return };
        if let TargetKind::Sprite { draggable: d, .. } = &mut t.kind {
            *d = draggable;
        }
        if !draggable && self.drag.is_some_and(|d| d.target == id) {
            self.drag = None;
        }
    }

    // --- Hull ----------------------------------------------------------------------------

    /// Recompute a target's hull if it is stale or empty.
    fn refresh_hull(&mut self, id: TargetId) {
        if !self.is_alive(id) {
            return;
        }
        let Some(t) = self.targets[id.idx()].as_mut() else {
            return;
        };
        if !t.hull_needed() {
            return;
        }
        t.dirty.remove(DirtyFlags::HULL);
        t.hull = match t.cpu_texture {
            Some(texture) if t.visible => self.cache.hull_points(&texture, &mut self.source),
            _ => Arc::clone(&self.empty_hull),
        };
        log::trace!("hull of {id:?}: {} points", t.hull.len());
    }

    /// A target's hull, refreshed if needed, in CPU texture pixels.
    pub fn hull_points(&mut self, id: TargetId) -> Option<Arc<[PixelPoint]>> {
        self.refresh_hull(id);
        self.get(id).map(|t| Arc::clone(&t.hull))
    }

    fn probe(&mut self, id: TargetId) -> Option<HitProbe> {
        self.refresh_hull(id);
        HitProbe::new(self.get(id)?, &self.config)
    }

    // --- Queries -------------------------------------------------------------------------

    /// Bounding box of the rotated CPU texture rectangle.
    pub fn fast_bounds(&self, id: TargetId) -> Option<StageRect> {
        self.get(id).map(|t| t.fast_bounds(&self.config))
    }

    /// Bounding box of the opaque pixels.
    pub fn exact_bounds(&mut self, id: TargetId) -> Option<StageRect> {
        self.refresh_hull(id);
        self.get(id).map(|t| t.exact_bounds(&self.config))
    }

    /// Top slice of the exact bounds for speech bubble placement.
    pub fn bubble_bounds(&mut self, id: TargetId) -> Option<StageRect> {
        self.refresh_hull(id);
        self.get(id).map(|t| t.bubble_bounds(&self.config))
    }

    /// Scene placement of a target's render texture.
    pub fn scene_geometry(&self, id: TargetId) -> Option<SceneGeometry> {
        self.get(id)?.scene_geometry(&self.config)
    }

    /// Whether the item-local render-pixel point `local` is opaque.
    pub fn contains_local_point(&mut self, id: TargetId, local: Point) -> bool {
        self.probe(id).is_some_and(|p| p.contains_local(local))
    }

    /// Whether the stage point `p` is opaque in the target.
    pub fn contains_stage_point(&mut self, id: TargetId, p: Point) -> bool {
        self.probe(id).is_some_and(|probe| probe.contains_stage(p))
    }

    /// Whether the target overlaps any of `candidates` on an opaque pixel.
    ///
    /// Only integer stage points inside both the stage and the union of the bounds overlaps
    /// are tested. Stale, hidden, and self references among the candidates are ignored.
    pub fn touching_clones(&mut self, id: TargetId, candidates: &[TargetId]) -> bool {
        let Some(own) = self.probe(id) else {
            return false;
        };
        let Some(own_bounds) = self.get(id).map(|t| touching_bounds(t, &self.config)) else {
            return false;
        };
        let mut probes = Vec::new();
        let mut rects = Vec::new();
        for &c in candidates {
            if c == id || !self.get(c).is_some_and(|t| t.visible) {
                continue;
            }
            let Some(probe) = self.probe(c) else {
                continue;
            };
            if let Some(rect) = self.fast_bounds(c) {
                rects.push(rect);
                probes.push(probe);
            }
        }
        let Some(area) = scan_area(own_bounds, rects) else {
            log::trace!("{id:?}: no candidate bounds overlap");
            return false;
        };
        log::trace!("{id:?}: scanning {} points", area.point_count());
        scan_touching(&own, &probes, area).is_some()
    }

    /// Topmost visible target with an opaque pixel at stage point `p`.
    ///
    /// Sprites are above the stage backdrop; among sprites, the highest layer wins and ties
    /// go to the most recently inserted.
    pub fn hit_test(&mut self, p: Point) -> Option<TargetId> {
        let mut order: Vec<_> = self
            .ids()
            .filter_map(|id| {
                let t = self.get(id)?;
                t.visible
                    .then_some((t.kind.is_sprite(), t.layer_order, t.order, id))
            })
            .collect();
        order.sort_by_key(|&(sprite, layer, seq, _)| (sprite, layer, seq));
        order
            .into_iter()
            .rev()
            .map(|(_, _, _, id)| id)
            .find(|&id| self.contains_stage_point(id, p))
    }

    // --- Dragging ------------------------------------------------------------------------

    /// Start dragging a draggable sprite grabbed at stage point `mouse`.
    ///
    /// Moves the sprite to the front. Returns `false` if another drag is active or the target
    /// cannot be dragged.
    pub fn start_drag(&mut self, id: TargetId, mouse: Point) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(position) = self
            .get(id)
            .filter(|t| t.kind.is_draggable())
            .map(RenderedTarget::position)
        else {
            return false;
        };
        self.drag = Some(Drag {
            target: id,
            delta: mouse - position,
        });
        self.move_to_front(id);
        true
    }

    /// Follow the mouse at scene point `scene` with the dragged sprite.
    ///
    /// Returns the sprite's new stage position, or `None` without an active drag.
    pub fn drag_to_scene(&mut self, scene: Point) -> Option<Point> {
        let drag = self.drag?;
        let position = self.config.scene_to_stage(scene)? - drag.delta;
        self.set_position(drag.target, position);
        Some(position)
    }

    /// End the active drag, returning the sprite that was dragged.
    pub fn stop_drag(&mut self) -> Option<TargetId> {
        self.drag.take().map(|d| d.target)
    }

    /// The sprite being dragged.
    pub fn dragged(&self) -> Option<TargetId> {
        self.drag.map(|d| d.target)
    }

    // --- Damage --------------------------------------------------------------------------

    /// Collect the regions to repaint since the last commit and clear redraw flags.
    pub fn commit(&mut self) -> Damage {
        let mut damage = Damage {
            removed: core::mem::take(&mut self.removed),
            ..Damage::default()
        };
        for t in self.targets.iter_mut().flatten() {
            if !t.dirty.contains(DirtyFlags::REDRAW) {
                continue;
            }
            t.dirty.remove(DirtyFlags::REDRAW);
            let now = t.visible.then(|| t.fast_bounds(&self.config));
            match (t.committed, now) {
                (None, Some(new)) => damage.added.push(new),
                (Some(old), Some(new)) => damage.moved.push((old, new)),
                (Some(old), None) => damage.removed.push(old),
                (None, None) => {}
            }
            t.committed = now;
        }
        damage
    }
}
