use glam::{Vec3, vec3};

use crate::HIT_FLASH_DURATION;
use crate::raycast::Aabb;

/// Collision cylinder radius, also the half-extent of the hit box.
pub const ENEMY_RADIUS: f32 = 0.5;
/// Collision cylinder height above the enemy's base.
pub const ENEMY_HEIGHT: f32 = 2.0;
/// Radius of the circle the enemy patrols.
pub const ORBIT_RADIUS: f32 = 3.0;
/// Angular speed of the patrol in radians per second.
pub const ORBIT_SPEED: f32 = 0.5;
/// Health applied to a fresh enemy.
pub const STARTING_HEALTH: f32 = 100.0;

/// Position on the patrol circle for a given elapsed time.
///
/// The orbit is a pure function of time, so state updates stay
/// deterministic and the path is identical across runs.
pub fn orbit_position(elapsed: f32) -> Vec3 {
    let angle = elapsed * ORBIT_SPEED;
    vec3(angle.cos() * ORBIT_RADIUS, 1.0, angle.sin() * ORBIT_RADIUS)
}

/// The lone enemy: a cylinder that circles the arena center and soaks up
/// damage.
///
/// Death is a query, not a state change; a dead enemy keeps patrolling and
/// keeps its hit box, and callers decide what to do about `is_alive`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub position: Vec3,
    pub health: f32,
    pub hit_timer: f32,
    pub radius: f32,
    pub height: f32,
}

impl Enemy {
    pub fn new() -> Self {
        Self {
            position: vec3(8.0, 1.0, 8.0),
            health: STARTING_HEALTH,
            hit_timer: 0.0,
            radius: ENEMY_RADIUS,
            height: ENEMY_HEIGHT,
        }
    }

    /// Advance the hit flash and move along the patrol circle.
    ///
    /// `elapsed` is the session's total time; the orbit keys off it rather
    /// than integrating velocity, so there is no drift.
    pub fn update(&mut self, dt: f32, elapsed: f32) {
        if self.hit_timer > 0.0 {
            self.hit_timer -= dt;
        }
        self.position = orbit_position(elapsed);
    }

    /// Subtract health and start the hit flash. Health may go negative.
    pub fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
        self.hit_timer = HIT_FLASH_DURATION;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Hit box spanning the feet to the top of the cylinder.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::new(
            self.position - vec3(self.radius, 0.0, self.radius),
            self.position + vec3(self.radius, self.height, self.radius),
        )
    }
}

impl Default for Enemy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_in_far_corner_with_full_health() {
        let e = Enemy::new();
        assert_eq!(e.position, vec3(8.0, 1.0, 8.0));
        assert_eq!(e.health, 100.0);
        assert!(e.is_alive());
    }

    #[test]
    fn orbit_starts_on_positive_x() {
        let p = orbit_position(0.0);
        assert!((p - vec3(3.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn orbit_quarter_turn() {
        // angle = pi/2 after elapsed = pi / ORBIT_SPEED / 2.
        let p = orbit_position(std::f32::consts::PI);
        assert!((p - vec3(0.0, 1.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn update_snaps_to_orbit() {
        let mut e = Enemy::new();
        e.update(0.016, 2.0);
        assert!((e.position - orbit_position(2.0)).length() < 1e-6);
        assert_eq!(e.position.y, 1.0);
    }

    #[test]
    fn damage_reduces_health_and_flashes() {
        let mut e = Enemy::new();
        e.take_damage(25.0);
        assert_eq!(e.health, 75.0);
        assert_eq!(e.hit_timer, HIT_FLASH_DURATION);
    }

    #[test]
    fn flash_expires() {
        let mut e = Enemy::new();
        e.take_damage(25.0);
        e.update(0.3, 0.3);
        assert!(e.hit_timer <= 0.0);
    }

    #[test]
    fn four_hits_kill() {
        let mut e = Enemy::new();
        for _ in 0..4 {
            e.take_damage(25.0);
        }
        assert_eq!(e.health, 0.0);
        assert!(!e.is_alive());
    }

    #[test]
    fn dead_enemy_keeps_patrolling() {
        let mut e = Enemy::new();
        e.take_damage(500.0);
        assert!(!e.is_alive());

        e.update(0.016, 4.0);
        assert!((e.position - orbit_position(4.0)).length() < 1e-6);
    }

    #[test]
    fn bounding_box_hugs_the_cylinder() {
        let e = Enemy::new();
        let b = e.bounding_box();
        assert_eq!(b.min, vec3(7.5, 1.0, 7.5));
        assert_eq!(b.max, vec3(8.5, 3.0, 8.5));
    }
}
