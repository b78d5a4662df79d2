//! Ephemeral visual feedback particles.
//!
//! The pool is fire-and-forget: the simulation spawns particles on events
//! (layer debris, coin bursts, boss taps) and the presentation layer reads
//! whatever is alive each frame. Nothing in the core ever depends on a
//! particle's state.

/// Types of feedback particles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Chunk of a broken layer
    Debris,
    /// Impact spark from a drill hit or boss tap
    Spark,
    /// Coin burst on reward
    CoinBurst,
}

/// A single particle. Position and velocity are in world units.
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub age: f64,
    pub lifetime: f64,
    pub size: f64,
    pub color: (u8, u8, u8),
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }

    /// Remaining life as a 0..1 fraction, for presentation fading.
    pub fn life_fraction(&self) -> f64 {
        (1.0 - self.age / self.lifetime).max(0.0)
    }
}

/// Fixed-capacity particle pool. When full, the oldest particle is evicted.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new(crate::core::constants::PARTICLE_POOL_CAPACITY)
    }
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Spawns a particle. Fire-and-forget: no handle is returned.
    pub fn spawn(
        &mut self,
        position: (f64, f64),
        velocity: (f64, f64),
        kind: ParticleKind,
        color: (u8, u8, u8),
        size: f64,
        lifetime: f64,
    ) {
        if self.particles.len() >= self.capacity {
            // Evict the particle closest to expiry
            if let Some(oldest) = self
                .particles
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    (a.lifetime - a.age)
                        .partial_cmp(&(b.lifetime - b.age))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(i, _)| i)
            {
                self.particles.swap_remove(oldest);
            }
        }
        self.particles.push(Particle {
            kind,
            x: position.0,
            y: position.1,
            vx: velocity.0,
            vy: velocity.1,
            age: 0.0,
            lifetime: lifetime.max(0.01),
            size,
            color,
        });
    }

    /// Integrates all particles and drops the expired ones.
    pub fn update(&mut self, dt: f64) {
        for p in &mut self.particles {
            p.age += dt;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            // Debris falls, sparks drift
            if p.kind == ParticleKind::Debris {
                p.vy += crate::core::constants::FRAGMENT_GRAVITY * dt;
            }
        }
        self.particles.retain(|p| p.is_alive());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_one(pool: &mut ParticlePool, lifetime: f64) {
        pool.spawn(
            (0.0, 0.0),
            (10.0, -20.0),
            ParticleKind::Spark,
            (255, 200, 80),
            1.0,
            lifetime,
        );
    }

    #[test]
    fn test_spawn_and_expire() {
        let mut pool = ParticlePool::new(8);
        spawn_one(&mut pool, 0.5);
        assert_eq!(pool.len(), 1);

        pool.update(0.25);
        assert_eq!(pool.len(), 1);

        pool.update(0.3);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_update_moves_particles() {
        let mut pool = ParticlePool::new(8);
        spawn_one(&mut pool, 10.0);

        pool.update(1.0);

        let p = pool.iter().next().unwrap();
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut pool = ParticlePool::new(3);
        spawn_one(&mut pool, 0.1); // closest to expiry
        spawn_one(&mut pool, 5.0);
        spawn_one(&mut pool, 5.0);
        spawn_one(&mut pool, 5.0); // exceeds capacity

        assert_eq!(pool.len(), 3);
        assert!(pool.iter().all(|p| p.lifetime > 1.0));
    }

    #[test]
    fn test_debris_accelerates_downward() {
        let mut pool = ParticlePool::new(8);
        pool.spawn(
            (0.0, 0.0),
            (0.0, 0.0),
            ParticleKind::Debris,
            (150, 110, 70),
            2.0,
            10.0,
        );

        pool.update(0.1);
        let vy_after_one = pool.iter().next().unwrap().vy;
        pool.update(0.1);
        let vy_after_two = pool.iter().next().unwrap().vy;

        assert!(vy_after_one > 0.0);
        assert!(vy_after_two > vy_after_one);
    }
}
