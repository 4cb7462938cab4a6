use glam::{Vec3, vec3};

/// Vertical offset from the player's feet to the camera eye.
pub const EYE_HEIGHT: f32 = 1.7;
/// Movement speed in world units per second.
pub const MOVE_SPEED: f32 = 5.0;
/// Default radians of rotation per pixel of mouse travel.
pub const DEFAULT_SENSITIVITY: f32 = 0.003;
/// Pitch is clamped short of straight up/down so the view basis never
/// degenerates.
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.1;
/// Half-width of the square play area; X and Z are clamped to this.
pub const WORLD_EXTENT: f32 = 10.0;
/// The player walks on a fixed ground plane at this height.
pub const GROUND_Y: f32 = 1.0;

/// First-person player state: a position on the ground plane plus a view
/// orientation in yaw/pitch form.
///
/// Yaw accumulates without wrapping; only pitch is clamped. Walking never
/// changes orientation and looking never changes position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Player {
    /// Spawn at the southern edge of the arena, looking level.
    pub fn new() -> Self {
        Self {
            position: vec3(0.0, GROUND_Y, 10.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Camera position: player position raised by [`EYE_HEIGHT`].
    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::Y * EYE_HEIGHT
    }

    /// Unit view direction derived from yaw and pitch. Yaw 0 looks down +Z.
    pub fn forward(&self) -> Vec3 {
        vec3(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Strafe direction, horizontal regardless of pitch.
    pub fn right(&self) -> Vec3 {
        vec3(-self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// World up. The player never rolls.
    pub fn up(&self) -> Vec3 {
        Vec3::Y
    }

    /// Apply a mouse delta in pixels. Positive `dx` turns left, positive
    /// `dy` looks down; pitch is clamped to [`MAX_PITCH`].
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw -= dx * sensitivity;
        self.pitch -= dy * sensitivity;
        self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Walk along the view basis. `forward_axis` and `strafe_axis` are
    /// typically -1, 0, or 1 from held keys; they are deliberately not
    /// normalized, so holding two keys moves faster on the diagonal.
    ///
    /// The full pitched forward vector is applied and Y is then re-anchored
    /// to [`GROUND_Y`], so looking up or down shortens the horizontal step.
    /// X and Z are clamped to [`WORLD_EXTENT`] afterwards.
    pub fn walk(&mut self, forward_axis: f32, strafe_axis: f32, dt: f32) {
        let step = MOVE_SPEED * dt;
        self.position += self.forward() * (forward_axis * step);
        self.position += self.right() * (strafe_axis * step);

        self.position.y = GROUND_Y;
        self.position.x = self.position.x.clamp(-WORLD_EXTENT, WORLD_EXTENT);
        self.position.z = self.position.z.clamp(-WORLD_EXTENT, WORLD_EXTENT);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
