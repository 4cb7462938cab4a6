use glam::Vec3;

/// Seconds a tracer stays visible after a shot.
pub const TRACER_DURATION: f32 = 0.5;
/// Fixed pool size. The pool never allocates after construction.
pub const MAX_TRACERS: usize = 50;

/// One bullet trail. Inactive slots are zeroed and skipped by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tracer {
    pub start: Vec3,
    pub end: Vec3,
    pub time_left: f32,
    pub active: bool,
}

impl Tracer {
    /// Remaining lifetime as a 0..=1 ratio, for alpha fading.
    pub fn fade(&self) -> f32 {
        (self.time_left / TRACER_DURATION).clamp(0.0, 1.0)
    }
}

/// Fixed-capacity tracer pool.
///
/// Spawning scans for the first inactive slot; when every slot is live the
/// new tracer overwrites slot 0 rather than failing or reallocating.
#[derive(Debug, Clone)]
pub struct TracerPool {
    slots: [Tracer; MAX_TRACERS],
}

impl TracerPool {
    pub fn new() -> Self {
        Self {
            slots: [Tracer::default(); MAX_TRACERS],
        }
    }

    /// Activate a tracer from `start` to `end` at full lifetime.
    pub fn spawn(&mut self, start: Vec3, end: Vec3) {
        let tracer = Tracer {
            start,
            end,
            time_left: TRACER_DURATION,
            active: true,
        };
        for slot in self.slots.iter_mut() {
            if !slot.active {
                *slot = tracer;
                return;
            }
        }
        // Pool exhausted: recycle the first slot.
        self.slots[0] = tracer;
    }

    /// Age every live tracer, deactivating the expired ones.
    pub fn update(&mut self, dt: f32) {
        for slot in self.slots.iter_mut() {
            if slot.active {
                slot.time_left -= dt;
                if slot.time_left <= 0.0 {
                    slot.active = false;
                }
            }
        }
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Tracer> {
        self.slots.iter().filter(|t| t.active)
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    /// Raw slot view, stale entries included.
    pub fn slots(&self) -> &[Tracer] {
        &self.slots
    }
}

impl Default for TracerPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn starts_empty() {
        let pool = TracerPool::new();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.slots().len(), MAX_TRACERS);
    }

    #[test]
    fn spawn_fills_first_free_slot() {
        let mut pool = TracerPool::new();
        pool.spawn(Vec3::ZERO, Vec3::X);
        pool.spawn(Vec3::ZERO, Vec3::Y);

        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.slots()[0].end, Vec3::X);
        assert_eq!(pool.slots()[1].end, Vec3::Y);
        assert_eq!(pool.slots()[0].time_left, TRACER_DURATION);
    }

    #[test]
    fn expired_slot_is_reused() {
        let mut pool = TracerPool::new();
        pool.spawn(Vec3::ZERO, Vec3::X);
        pool.update(TRACER_DURATION + 0.01);
        assert_eq!(pool.active_count(), 0);

        pool.spawn(Vec3::ZERO, Vec3::Z);
        assert_eq!(pool.slots()[0].end, Vec3::Z);
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn full_pool_recycles_slot_zero() {
        let mut pool = TracerPool::new();
        for i in 0..MAX_TRACERS {
            pool.spawn(Vec3::ZERO, vec3(i as f32, 0.0, 0.0));
        }
        assert_eq!(pool.active_count(), MAX_TRACERS);

        pool.spawn(Vec3::ZERO, vec3(999.0, 0.0, 0.0));
        assert_eq!(pool.active_count(), MAX_TRACERS);
        assert_eq!(pool.slots()[0].end, vec3(999.0, 0.0, 0.0));
        // Slot 1 kept its original trail.
        assert_eq!(pool.slots()[1].end, vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn fade_tracks_remaining_lifetime() {
        let mut pool = TracerPool::new();
        pool.spawn(Vec3::ZERO, Vec3::X);
        assert!((pool.slots()[0].fade() - 1.0).abs() < 1e-6);

        pool.update(0.25);
        assert!((pool.slots()[0].fade() - 0.5).abs() < 1e-5);

        pool.update(0.3);
        assert!(!pool.slots()[0].active);
        assert_eq!(pool.slots()[0].fade(), 0.0);
    }
}
