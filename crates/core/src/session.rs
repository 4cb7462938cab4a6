use glam::{Vec3, vec3};
use ironsight_common::Camera;

use crate::enemy::Enemy;
use crate::player::{MAX_PITCH, Player};
use crate::raycast::{self, Ray};
use crate::target::Target;
use crate::tracer::TracerPool;

/// Health removed per landed shot.
pub const DAMAGE_PER_HIT: f32 = 25.0;
/// Tracer length for a shot that hits nothing.
pub const MAX_RANGE: f32 = 100.0;
/// The camera look-at point floats this far ahead of the eye.
pub const AIM_DISTANCE: f32 = 1.0;

/// What a single shot did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotReport {
    /// Index of the flashed target, if a cube was struck.
    pub target: Option<usize>,
    /// Whether the enemy took damage.
    pub enemy_hit: bool,
    /// World point the tracer ends at.
    pub impact: Vec3,
}

/// The whole game in one owned value.
///
/// Everything that changes over a run lives here, and every mutation goes
/// through [`update`](Session::update), [`fire`](Session::fire), or direct
/// component access. Stepping with a fixed `dt` sequence from a fresh
/// session reproduces the same state every time.
///
/// Per-frame flow: mutate `player` from input, call `update(dt)`, then
/// `fire()` for each shot taken this frame.
#[derive(Debug, Clone)]
pub struct Session {
    pub player: Player,
    /// First-person camera, refreshed from the player every update.
    pub camera: Camera,
    /// Static camera for the weapon inspection pane.
    pub weapon_camera: Camera,
    pub targets: Vec<Target>,
    pub tracers: TracerPool,
    pub enemy: Enemy,
    elapsed: f32,
}

impl Session {
    pub fn new() -> Self {
        Self {
            player: Player::new(),
            camera: Camera::default(),
            weapon_camera: Camera::new(vec3(0.0, 0.0, 5.0), Vec3::ZERO, 60.0),
            targets: Target::field(),
            tracers: TracerPool::new(),
            enemy: Enemy::new(),
            elapsed: 0.0,
        }
    }

    /// Total simulated time in seconds. Only `update` advances this.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the simulation one frame.
    ///
    /// Order is fixed: clock, camera, target flashes, tracers, enemy.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        self.refresh_camera();
        for target in &mut self.targets {
            target.tick(dt);
        }
        self.tracers.update(dt);
        self.enemy.update(dt, self.elapsed);
    }

    fn refresh_camera(&mut self) {
        self.camera.position = self.player.eye_position();
        self.camera.target = self.camera.position + self.player.forward() * AIM_DISTANCE;
    }

    /// The hitscan ray: from the camera eye along its look direction.
    pub fn aim_ray(&self) -> Ray {
        Ray::new(self.camera.position, self.camera.direction())
    }

    /// Point the player at a world position and refresh the camera so the
    /// next [`fire`](Session::fire) uses the new aim. Pitch obeys the same
    /// clamp as mouse look.
    pub fn aim_at(&mut self, point: Vec3) {
        let to = point - self.player.eye_position();
        if to.length_squared() < 1e-12 {
            return;
        }
        let dir = to.normalize();
        self.player.yaw = dir.x.atan2(dir.z);
        self.player.pitch = dir.y.clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH);
        self.refresh_camera();
    }

    /// Resolve one shot along the current aim ray.
    ///
    /// Targets and the enemy are tested independently; when both are struck
    /// the enemy's entry point wins as the tracer endpoint. A clean miss
    /// still draws a tracer out to [`MAX_RANGE`].
    pub fn fire(&mut self) -> ShotReport {
        let ray = self.aim_ray();
        let mut impact = ray.at(MAX_RANGE);
        let mut target = None;

        if let Some((index, hit)) = raycast::first_target_hit(&ray, &self.targets) {
            self.targets[index].flash();
            impact = hit.point;
            target = Some(index);
        }

        let mut enemy_hit = false;
        if let Some(hit) = raycast::enemy_hit(&ray, &self.enemy) {
            self.enemy.take_damage(DAMAGE_PER_HIT);
            impact = hit.point;
            enemy_hit = true;
        }

        self.tracers.spawn(ray.origin, impact);
        tracing::debug!(cube = ?target, enemy = enemy_hit, "shot resolved");

        ShotReport {
            target,
            enemy_hit,
            impact,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::orbit_position;
    use crate::player::EYE_HEIGHT;
    use crate::tracer::TRACER_DURATION;
    use ironsight_common::Rgba;

    #[test]
    fn fresh_session_layout() {
        let s = Session::new();
        assert_eq!(s.targets.len(), 5);
        assert_eq!(s.enemy.position, vec3(8.0, 1.0, 8.0));
        assert_eq!(s.elapsed(), 0.0);
        // Cameras start where the original scene placed them.
        assert_eq!(s.camera.position, vec3(0.0, 2.0, 10.0));
        assert_eq!(s.weapon_camera.position, vec3(0.0, 0.0, 5.0));
        assert_eq!(s.weapon_camera.target, Vec3::ZERO);
    }

    #[test]
    fn update_tracks_player_eye() {
        let mut s = Session::new();
        s.update(0.016);
        assert_eq!(s.camera.position, s.player.eye_position());
        let look = s.camera.target - s.camera.position;
        assert!((look.length() - AIM_DISTANCE).abs() < 1e-5);
    }

    #[test]
    fn elapsed_accumulates_and_drives_the_enemy() {
        let mut s = Session::new();
        s.update(0.1);
        s.update(0.1);
        assert!((s.elapsed() - 0.2).abs() < 1e-6);
        assert!((s.enemy.position - orbit_position(0.2)).length() < 1e-6);
    }

    #[test]
    fn fixed_step_runs_are_identical() {
        let mut a = Session::new();
        let mut b = Session::new();
        for _ in 0..120 {
            a.update(1.0 / 60.0);
            b.update(1.0 / 60.0);
        }
        assert_eq!(a.enemy.position, b.enemy.position);
        assert_eq!(a.elapsed(), b.elapsed());
    }

    #[test]
    fn missed_shot_draws_full_range_tracer() {
        let mut s = Session::new();
        // Aim up and away from everything.
        s.aim_at(vec3(0.0, 30.0, 0.0));
        let report = s.fire();

        assert_eq!(report.target, None);
        assert!(!report.enemy_hit);
        let tracer = s.tracers.slots()[0];
        assert!(tracer.active);
        assert!(((tracer.end - tracer.start).length() - MAX_RANGE).abs() < 1e-3);
        assert_eq!(tracer.end, report.impact);
    }

    #[test]
    fn shot_flashes_the_struck_target() {
        let mut s = Session::new();
        let cube = s.targets[0].position;
        s.aim_at(cube);
        let report = s.fire();

        assert_eq!(report.target, Some(0));
        assert!(!report.enemy_hit);
        assert_eq!(s.targets[0].color, Rgba::WHITE);
        assert!(s.targets[0].hit_timer > 0.0);
        // Impact lands on the cube's bounding box, short of its center.
        let eye = s.player.eye_position();
        assert!((report.impact - eye).length() < (cube - eye).length());
    }

    #[test]
    fn shot_damages_the_enemy() {
        let mut s = Session::new();
        let chest = s.enemy.position + vec3(0.0, 1.0, 0.0);
        s.aim_at(chest);
        let report = s.fire();

        assert!(report.enemy_hit);
        assert_eq!(report.target, None);
        assert_eq!(s.enemy.health, 75.0);
        assert_eq!(s.enemy.hit_timer, crate::HIT_FLASH_DURATION);
    }

    #[test]
    fn enemy_entry_point_wins_the_tracer_endpoint() {
        let mut s = Session::new();
        let cube = s.targets[0].position;
        s.aim_at(cube);

        // Park the enemy on the aim ray, well short of the cube.
        let ray = s.aim_ray();
        let block = ray.at(3.0);
        s.enemy.position = block - vec3(0.0, 1.0, 0.0);

        let report = s.fire();
        assert_eq!(report.target, Some(0));
        assert!(report.enemy_hit);
        assert_eq!(s.enemy.health, 75.0);
        assert_eq!(s.targets[0].color, Rgba::WHITE);

        // The tracer stops at the enemy, not the cube behind it.
        let eye = s.player.eye_position();
        assert!((report.impact - eye).length() < 3.1);
        assert_eq!(s.tracers.slots()[0].end, report.impact);
    }

    #[test]
    fn four_landed_shots_kill() {
        let mut s = Session::new();
        for _ in 0..4 {
            let chest = s.enemy.position + vec3(0.0, 1.0, 0.0);
            s.aim_at(chest);
            let report = s.fire();
            assert!(report.enemy_hit);
        }
        assert!(!s.enemy.is_alive());

        // Patrol carries on regardless.
        s.update(0.5);
        assert!((s.enemy.position - orbit_position(0.5)).length() < 1e-6);
    }

    #[test]
    fn aim_at_is_the_inverse_of_forward() {
        let mut s = Session::new();
        let mark = vec3(-4.0, 3.0, -2.0);
        s.aim_at(mark);

        let want = (mark - s.player.eye_position()).normalize();
        assert!((s.player.forward() - want).length() < 1e-5);
    }

    #[test]
    fn flash_and_tracer_decay_through_update() {
        let mut s = Session::new();
        s.aim_at(s.targets[2].position);
        s.fire();

        s.update(0.25);
        // Flash is over, tracer is at half fade.
        assert_eq!(s.targets[2].color, Rgba::YELLOW);
        let tracer = s.tracers.slots()[0];
        assert!(tracer.active);
        assert!((tracer.fade() - 0.5).abs() < 1e-4);

        s.update(TRACER_DURATION);
        assert_eq!(s.tracers.active_count(), 0);
    }

    #[test]
    fn eye_height_flows_into_the_ray_origin() {
        let mut s = Session::new();
        s.update(0.016);
        let ray = s.aim_ray();
        assert_eq!(ray.origin.y, 1.0 + EYE_HEIGHT);
    }
}
