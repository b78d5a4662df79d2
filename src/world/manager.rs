//! Layer column management: generation ahead of the camera, culling behind
//! it, and the visible-subset query the rest of the simulation works from.

use std::collections::VecDeque;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::world::layer::{center_y_for, Layer};

/// The ordered, contiguous set of live layers.
///
/// The live window is transient: only the resolved-frontier counter and the
/// destroyed total persist. After a load the window is rebuilt from
/// `current_layer_index` (pure index-derived layers), which reconstructs an
/// equivalent column rather than replaying history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerColumn {
    /// Live layers sorted by index, no gaps. Append at tail, cull at head.
    #[serde(skip)]
    pub layers: VecDeque<Layer>,

    /// Next index to generate at the tail.
    #[serde(skip)]
    next_index: u64,

    /// Highest index ever resolved (all lower indices are destroyed).
    pub current_layer_index: u64,

    /// Total layers destroyed across the run.
    pub total_destroyed: u64,
}

impl Default for LayerColumn {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerColumn {
    pub fn new() -> Self {
        Self {
            layers: VecDeque::new(),
            next_index: 0,
            current_layer_index: 0,
            total_destroyed: 0,
        }
    }

    /// Extends the column so layers exist past `forward_edge_y` (the
    /// camera's bottom visibility edge) by a lookahead margin.
    ///
    /// Generation is capped at [`GEN_BATCH_PER_TICK`] per call to avoid
    /// frame-time spikes from a large backlog. An empty live set is the one
    /// exception: it is refilled immediately with a larger recovery batch so
    /// the simulation never stalls.
    ///
    /// Returns the number of layers generated.
    pub fn ensure_generated(&mut self, forward_edge_y: f64) -> usize {
        let mut generated = 0;

        if self.layers.is_empty() {
            for _ in 0..GEN_EMPTY_RECOVERY_BATCH {
                self.push_next();
                generated += 1;
            }
        }

        let lookahead = GEN_AHEAD_LAYERS as f64 * LAYER_HEIGHT;
        while generated < GEN_BATCH_PER_TICK {
            let tail_bottom = match self.layers.back() {
                Some(layer) => layer.bottom(),
                None => break,
            };
            if tail_bottom >= forward_edge_y + lookahead {
                break;
            }
            self.push_next();
            generated += 1;
        }

        generated
    }

    /// Appends the next layer, stacked directly below the current tail.
    fn push_next(&mut self) {
        let layer = match self.layers.back() {
            Some(prev) => Layer::at(self.next_index, prev.position_y + LAYER_HEIGHT),
            // No tail: derive the position from the index itself
            None => Layer::at(self.next_index, center_y_for(self.next_index)),
        };
        self.layers.push_back(layer);
        self.next_index += 1;
    }

    /// Removes resolved layers from the head of the column.
    ///
    /// A layer leaves only when it is destroyed, its fragment decay has
    /// expired, and its bottom edge lies more than [`CULL_MARGIN`] above
    /// `camera_top`. Destroyed layers still animating fragments are kept
    /// regardless of distance.
    ///
    /// Returns the number of layers culled.
    pub fn cull(&mut self, camera_top: f64) -> usize {
        let mut culled = 0;
        while let Some(head) = self.layers.front() {
            if head.is_removable() && head.bottom() + CULL_MARGIN < camera_top {
                self.layers.pop_front();
                culled += 1;
            } else {
                break;
            }
        }
        culled
    }

    /// The contiguous slice of live layers intersecting the margin-padded
    /// window `[view_top, view_bottom]`. This subset is the only one the
    /// per-frame update/render/collision paths touch: its size is bounded
    /// by the viewport, independent of total historical layer count.
    pub fn visible_range(&self, view_top: f64, view_bottom: f64) -> Range<usize> {
        let lo = view_top - VISIBLE_MARGIN;
        let hi = view_bottom + VISIBLE_MARGIN;

        let start = self
            .layers
            .iter()
            .position(|l| l.bottom() >= lo)
            .unwrap_or(self.layers.len());
        let mut end = start;
        while end < self.layers.len() {
            if self.layers[end].top() > hi {
                break;
            }
            end += 1;
        }
        start..end
    }

    /// Advances fragment decay on every layer that still carries fragments.
    pub fn update_fragments(&mut self, dt: f64) {
        for layer in &mut self.layers {
            if !layer.fragments.is_empty() {
                layer.update_fragments(dt);
            }
        }
    }

    /// Records that `index` was resolved; the frontier counter only ever
    /// moves forward.
    pub fn advance_resolved(&mut self, index: u64) {
        self.current_layer_index = self.current_layer_index.max(index + 1);
        self.total_destroyed += 1;
    }

    /// World-space top of the next non-destroyed layer after
    /// `destroyed_index`, where the drill comes to rest after a break.
    ///
    /// Falls back to the index-derived position when the window holds no
    /// candidate yet (generation catches up on the next tick).
    pub fn rest_top_after(&self, destroyed_index: u64) -> f64 {
        self.layers
            .iter()
            .find(|l| l.index > destroyed_index && !l.destroyed)
            .map(|l| l.top())
            .unwrap_or_else(|| center_y_for(destroyed_index + 1) - LAYER_HEIGHT / 2.0)
    }

    /// Rebuilds the live window after a load: layers regenerate from the
    /// persisted frontier, reproducing equivalent slabs from their indices.
    pub fn rebuild(&mut self) {
        self.layers.clear();
        self.next_index = self.current_layer_index;
        for _ in 0..GEN_EMPTY_RECOVERY_BATCH {
            self.push_next();
        }
    }

    /// Fresh column for a new run (prestige reset).
    pub fn reset(&mut self) {
        self.layers.clear();
        self.next_index = 0;
        self.current_layer_index = 0;
        self.total_destroyed = 0;
    }
}
