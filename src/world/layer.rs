//! A single destructible layer in the column.

use crate::core::constants::*;

/// Hardness tier for a layer index. Steps coarsely every
/// [`HARDNESS_TIER_SIZE`] indices.
pub fn hardness_tier(index: u64) -> u32 {
    (index / HARDNESS_TIER_SIZE) as u32
}

/// Max health for a layer index. Pure function of the index so offline
/// simulation and window reconstruction reproduce the same values.
pub fn max_health_for(index: u64) -> f64 {
    (LAYER_BASE_HEALTH * LAYER_HEALTH_GROWTH.powi(hardness_tier(index) as i32)).round()
}

/// Coin reward for a layer index. Pure function of the index.
pub fn reward_for(index: u64) -> f64 {
    (LAYER_BASE_REWARD * LAYER_REWARD_GROWTH.powi(hardness_tier(index) as i32)).round()
}

/// World-space center y for a layer index. Layers stack contiguously from
/// [`FIRST_LAYER_TOP`], so the center is derivable from the index alone.
pub fn center_y_for(index: u64) -> f64 {
    FIRST_LAYER_TOP + LAYER_HEIGHT / 2.0 + index as f64 * LAYER_HEIGHT
}

/// A chunk of a destroyed layer, alive only while its decay animation runs.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub offset_x: f64,
    pub offset_y: f64,
    pub vx: f64,
    pub vy: f64,
    pub age: f64,
}

impl Fragment {
    pub fn is_alive(&self) -> bool {
        self.age < FRAGMENT_LIFETIME_SECONDS
    }
}

/// A stationary destructible obstacle slab.
///
/// `health` only ever decreases; `destroyed` is terminal. Fragments are
/// transient and non-empty only while the destroy animation is in flight.
#[derive(Debug, Clone)]
pub struct Layer {
    pub index: u64,
    pub position_y: f64,
    pub health: f64,
    pub max_health: f64,
    pub reward: f64,
    pub destroyed: bool,
    pub fragments: Vec<Fragment>,
}

impl Layer {
    /// Creates the layer for `index` at its derived column position.
    pub fn new(index: u64) -> Self {
        Self::at(index, center_y_for(index))
    }

    /// Creates the layer for `index` at an explicit center position. The
    /// manager uses this to stack each new layer below the previous one.
    pub fn at(index: u64, position_y: f64) -> Self {
        let max_health = max_health_for(index);
        Self {
            index,
            position_y,
            health: max_health,
            max_health,
            reward: reward_for(index),
            destroyed: false,
            fragments: Vec::new(),
        }
    }

    pub fn top(&self) -> f64 {
        self.position_y - LAYER_HEIGHT / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.position_y + LAYER_HEIGHT / 2.0
    }

    pub fn hardness_tier(&self) -> u32 {
        hardness_tier(self.index)
    }

    /// Applies damage. Returns true if this call destroyed the layer.
    /// Re-damaging a destroyed layer is a no-op.
    pub fn apply_damage(&mut self, amount: f64) -> bool {
        if self.destroyed || amount <= 0.0 {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        if self.health == 0.0 {
            self.destroy();
            return true;
        }
        false
    }

    /// Marks the layer destroyed and spawns its fragment decay.
    /// Idempotent: a second call has no additional effect.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.health = 0.0;
        for i in 0..FRAGMENTS_PER_LAYER {
            // Spread fragments across the slab, alternating outward velocity
            let t = (i as f64 + 0.5) / FRAGMENTS_PER_LAYER as f64;
            let dir = if i % 2 == 0 { 1.0 } else { -1.0 };
            self.fragments.push(Fragment {
                offset_x: (t - 0.5) * LAYER_WIDTH,
                offset_y: 0.0,
                vx: dir * (20.0 + 40.0 * t),
                vy: -30.0 - 50.0 * t,
                age: 0.0,
            });
        }
    }

    /// Advances fragment decay, dropping expired fragments.
    pub fn update_fragments(&mut self, dt: f64) {
        for f in &mut self.fragments {
            f.age += dt;
            f.offset_x += f.vx * dt;
            f.offset_y += f.vy * dt;
            f.vy += FRAGMENT_GRAVITY * dt;
        }
        self.fragments.retain(|f| f.is_alive());
    }

    /// A destroyed layer may leave the live set only once its fragments
    /// have fully decayed.
    pub fn is_removable(&self) -> bool {
        self.destroyed && self.fragments.is_empty()
    }
}
