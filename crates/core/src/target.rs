use glam::{Vec3, vec3};
use ironsight_common::Rgba;

use crate::HIT_FLASH_DURATION;
use crate::raycast::Aabb;

/// Targets are unit cubes; the hit box extends this far from the center on
/// each axis.
pub const TARGET_HALF_EXTENT: f32 = 0.5;

/// A shootable cube with a hit flash.
///
/// `color` is what gets drawn this frame; `base_color` is what it reverts
/// to when the flash expires. Keeping both on the record means a target
/// can never lose its identity to a mid-flash snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub position: Vec3,
    pub color: Rgba,
    pub base_color: Rgba,
    pub hit_timer: f32,
}

impl Target {
    pub fn new(position: Vec3, color: Rgba) -> Self {
        Self {
            position,
            color,
            base_color: color,
            hit_timer: 0.0,
        }
    }

    /// The standard five-cube practice field. Order matters: the hitscan
    /// resolves ties by storage order, and tests pin these slots.
    pub fn field() -> Vec<Target> {
        vec![
            Target::new(vec3(5.0, 0.5, 5.0), Rgba::RED),
            Target::new(vec3(-5.0, 0.5, 5.0), Rgba::BLUE),
            Target::new(vec3(5.0, 0.5, -5.0), Rgba::YELLOW),
            Target::new(vec3(-5.0, 0.5, -5.0), Rgba::PURPLE),
            Target::new(vec3(0.0, 0.5, 10.0), Rgba::ORANGE),
        ]
    }

    /// Turn white and start the flash timer.
    pub fn flash(&mut self) {
        self.color = Rgba::WHITE;
        self.hit_timer = HIT_FLASH_DURATION;
    }

    /// Run the flash timer down; the color reverts the moment it expires.
    pub fn tick(&mut self, dt: f32) {
        if self.hit_timer > 0.0 {
            self.hit_timer -= dt;
            if self.hit_timer <= 0.0 {
                self.color = self.base_color;
            }
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_center_half(self.position, Vec3::splat(TARGET_HALF_EXTENT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_has_five_cubes_in_palette_order() {
        let field = Target::field();
        assert_eq!(field.len(), 5);
        assert_eq!(field[0].color, Rgba::RED);
        assert_eq!(field[1].color, Rgba::BLUE);
        assert_eq!(field[2].color, Rgba::YELLOW);
        assert_eq!(field[3].color, Rgba::PURPLE);
        assert_eq!(field[4].color, Rgba::ORANGE);
        assert_eq!(field[4].position, vec3(0.0, 0.5, 10.0));
    }

    #[test]
    fn flash_turns_white_until_timer_runs_out() {
        let mut t = Target::new(Vec3::ZERO, Rgba::RED);
        t.flash();
        assert_eq!(t.color, Rgba::WHITE);

        t.tick(0.1);
        assert_eq!(t.color, Rgba::WHITE); // still inside the flash window

        t.tick(0.11);
        assert_eq!(t.color, Rgba::RED);
        assert!(t.hit_timer <= 0.0);
    }

    #[test]
    fn reflash_during_flash_restarts_timer() {
        let mut t = Target::new(Vec3::ZERO, Rgba::BLUE);
        t.flash();
        t.tick(0.15);
        t.flash();
        t.tick(0.15);
        // 0.15 into the second flash: still white.
        assert_eq!(t.color, Rgba::WHITE);
    }

    #[test]
    fn tick_is_a_no_op_when_idle() {
        let mut t = Target::new(Vec3::ZERO, Rgba::ORANGE);
        t.tick(1.0);
        assert_eq!(t.color, Rgba::ORANGE);
        assert_eq!(t.hit_timer, 0.0);
    }

    #[test]
    fn bounding_box_is_a_unit_cube() {
        let t = Target::new(vec3(5.0, 0.5, 5.0), Rgba::RED);
        let b = t.bounding_box();
        assert_eq!(b.min, vec3(4.5, 0.0, 4.5));
        assert_eq!(b.max, vec3(5.5, 1.0, 5.5));
    }
}
