// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched redraw regions returned by [`Stage::commit`](crate::Stage::commit).

use alloc::vec::Vec;

use crate::rect::StageRect;

/// Stage-space regions to repaint, in fast-bounds granularity.
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Targets shown for the first time since the last commit.
    pub added: Vec<StageRect>,
    /// Targets removed or hidden since the last commit.
    pub removed: Vec<StageRect>,
    /// Targets that moved or changed appearance: (old, new).
    pub moved: Vec<(StageRect, StageRect)>,
}

impl Damage {
    /// True if nothing needs repainting.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.moved.is_empty()
    }

    /// Union of every damaged region. Returns `None` if empty.
    pub fn union_rect(&self) -> Option<StageRect> {
        let mut it = self
            .added
            .iter()
            .copied()
            .chain(self.removed.iter().copied())
            .chain(self.moved.iter().flat_map(|(a, b)| [*a, *b]));
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(&r)))
    }
}
