use glam::{Mat4, Vec3, vec3};
use ironsight_common::{Camera, Rgba};
use ironsight_core::Session;
use ironsight_core::player::EYE_HEIGHT;
use ironsight_core::target::TARGET_HALF_EXTENT;

/// Grid and wire overlay colors local to composition.
const GRID_GREEN: Rgba = Rgba::new(0, 100, 0, 100);
const ENEMY_WIRE: Rgba = Rgba::new(100, 0, 50, 255);
const PLAYER_TINT: Rgba = Rgba::new(255, 0, 0, 100);
const TRACER_YELLOW: Rgba = Rgba::rgb(255, 255, 0);

/// Ground slab side length.
const GROUND_SIZE: f32 = 20.0;
/// Grid lines sit just above the ground to avoid z-fighting.
const GRID_LIFT: f32 = 0.01;
/// Half the number of grid lines per axis.
const GRID_HALF_COUNT: i32 = 10;
/// Wire ring segment count, matching the cylinder mesh facets.
const RING_SEGMENTS: u32 = 8;
/// The inspection pane draws the weapon at half size.
const WEAPON_SCALE: f32 = 0.5;

/// Which canonical mesh an instance draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Plane,
    Cube,
    Cylinder,
    Weapon,
}

/// One draw of a canonical mesh with a model transform and flat color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshInstance {
    pub kind: MeshKind,
    pub transform: Mat4,
    pub color: Rgba,
}

impl MeshInstance {
    pub fn new(kind: MeshKind, transform: Mat4, color: Rgba) -> Self {
        Self {
            kind,
            transform,
            color,
        }
    }
}

/// A world-space colored line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Rgba,
}

impl LineSegment {
    pub fn new(start: Vec3, end: Vec3, color: Rgba) -> Self {
        Self { start, end, color }
    }
}

/// The weapon inspection pane: its own camera, one instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponPane {
    pub camera: Camera,
    pub instance: MeshInstance,
}

/// Facts the 2D overlay needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudState {
    pub captured: bool,
    pub enemy_health: f32,
    pub fps: f32,
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FramePlan {
    pub clear_color: Rgba,
    pub camera: Camera,
    /// Meshes in paint order; the translucent player box comes last.
    pub instances: Vec<MeshInstance>,
    /// Lines in paint order: grid, wireframes, then tracers.
    pub lines: Vec<LineSegment>,
    pub weapon: WeaponPane,
    pub hud: HudState,
}

/// Derive the draw plan for the session's current state.
pub fn compose(session: &Session, captured: bool, fps: f32) -> FramePlan {
    let mut instances = Vec::with_capacity(8);
    let mut lines = Vec::with_capacity(160);

    // Ground slab.
    instances.push(MeshInstance::new(
        MeshKind::Plane,
        Mat4::from_scale(vec3(GROUND_SIZE, 1.0, GROUND_SIZE)),
        Rgba::FOREST_GREEN,
    ));

    // Depth-perception grid.
    for i in -GRID_HALF_COUNT..=GRID_HALF_COUNT {
        let i = i as f32;
        let extent = GRID_HALF_COUNT as f32;
        lines.push(LineSegment::new(
            vec3(i, GRID_LIFT, -extent),
            vec3(i, GRID_LIFT, extent),
            GRID_GREEN,
        ));
        lines.push(LineSegment::new(
            vec3(-extent, GRID_LIFT, i),
            vec3(extent, GRID_LIFT, i),
            GRID_GREEN,
        ));
    }

    // Target cubes with their edge wires.
    for target in &session.targets {
        instances.push(MeshInstance::new(
            MeshKind::Cube,
            Mat4::from_translation(target.position),
            target.color,
        ));
        push_cube_edges(&mut lines, target.position, TARGET_HALF_EXTENT, Rgba::EDGE_GRAY);
    }

    // Enemy cylinder. Flash beats the low-health tint.
    let enemy = &session.enemy;
    let enemy_color = if enemy.hit_timer > 0.0 {
        Rgba::WHITE
    } else if enemy.health < 50.0 {
        Rgba::RED
    } else {
        Rgba::MAGENTA
    };
    instances.push(MeshInstance::new(
        MeshKind::Cylinder,
        Mat4::from_translation(enemy.position)
            * Mat4::from_scale(vec3(1.0, enemy.height, 1.0)),
        enemy_color,
    ));
    push_cylinder_wires(
        &mut lines,
        enemy.position,
        enemy.radius,
        enemy.height,
        ENEMY_WIRE,
    );

    // The player's own translucent marker, last of the meshes so blending
    // sees the scene behind it.
    instances.push(MeshInstance::new(
        MeshKind::Cube,
        Mat4::from_translation(session.player.position)
            * Mat4::from_scale(vec3(0.5, EYE_HEIGHT, 0.5)),
        PLAYER_TINT,
    ));

    // Tracers, newest alpha from remaining lifetime.
    for tracer in session.tracers.iter_active() {
        let alpha = (tracer.fade() * 255.0) as u8;
        lines.push(LineSegment::new(
            tracer.start,
            tracer.end,
            TRACER_YELLOW.with_alpha(alpha),
        ));
    }

    FramePlan {
        clear_color: Rgba::SKY_BLUE,
        camera: session.camera,
        instances,
        lines,
        weapon: WeaponPane {
            camera: session.weapon_camera,
            instance: MeshInstance::new(
                MeshKind::Weapon,
                Mat4::from_scale(Vec3::splat(WEAPON_SCALE)),
                Rgba::WHITE,
            ),
        },
        hud: HudState {
            captured,
            enemy_health: enemy.health,
            fps,
        },
    }
}

/// Twelve edges of an axis-aligned cube.
fn push_cube_edges(lines: &mut Vec<LineSegment>, center: Vec3, half: f32, color: Rgba) {
    let min = center - Vec3::splat(half);
    let max = center + Vec3::splat(half);
    let corners = [
        vec3(min.x, min.y, min.z),
        vec3(max.x, min.y, min.z),
        vec3(max.x, min.y, max.z),
        vec3(min.x, min.y, max.z),
        vec3(min.x, max.y, min.z),
        vec3(max.x, max.y, min.z),
        vec3(max.x, max.y, max.z),
        vec3(min.x, max.y, max.z),
    ];
    const EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    for (a, b) in EDGES {
        lines.push(LineSegment::new(corners[a], corners[b], color));
    }
}

/// Base ring, top ring, and vertical seams of a standing cylinder.
fn push_cylinder_wires(
    lines: &mut Vec<LineSegment>,
    base: Vec3,
    radius: f32,
    height: f32,
    color: Rgba,
) {
    for i in 0..RING_SEGMENTS {
        let a1 = (i as f32 / RING_SEGMENTS as f32) * std::f32::consts::TAU;
        let a2 = ((i + 1) as f32 / RING_SEGMENTS as f32) * std::f32::consts::TAU;
        let p1 = vec3(a1.cos() * radius, 0.0, a1.sin() * radius);
        let p2 = vec3(a2.cos() * radius, 0.0, a2.sin() * radius);
        let lift = vec3(0.0, height, 0.0);

        lines.push(LineSegment::new(base + p1, base + p2, color));
        lines.push(LineSegment::new(base + p1 + lift, base + p2 + lift, color));
        lines.push(LineSegment::new(base + p1, base + p1 + lift, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_line_count() -> usize {
        (GRID_HALF_COUNT as usize * 2 + 1) * 2
    }

    #[test]
    fn fresh_plan_counts() {
        let session = Session::new();
        let plan = compose(&session, false, 60.0);

        // Plane, five targets, enemy, player box.
        assert_eq!(plan.instances.len(), 8);
        // Grid + 5 cubes * 12 edges + cylinder wires, no tracers yet.
        let wires = 5 * 12 + RING_SEGMENTS as usize * 3;
        assert_eq!(plan.lines.len(), grid_line_count() + wires);
        assert_eq!(plan.clear_color, Rgba::SKY_BLUE);
    }

    #[test]
    fn target_colors_flow_through() {
        let mut session = Session::new();
        session.targets[1].flash();
        let plan = compose(&session, false, 60.0);

        let cubes: Vec<&MeshInstance> = plan
            .instances
            .iter()
            .filter(|i| i.kind == MeshKind::Cube)
            .collect();
        // Five targets plus the player box.
        assert_eq!(cubes.len(), 6);
        assert_eq!(cubes[0].color, Rgba::RED);
        assert_eq!(cubes[1].color, Rgba::WHITE); // mid-flash
        assert_eq!(cubes[2].color, Rgba::YELLOW);
    }

    #[test]
    fn enemy_color_states() {
        let mut session = Session::new();

        let healthy = compose(&session, false, 60.0);
        assert_eq!(cylinder_color(&healthy), Rgba::MAGENTA);

        session.enemy.take_damage(25.0);
        let flashing = compose(&session, false, 60.0);
        assert_eq!(cylinder_color(&flashing), Rgba::WHITE);

        // Run the flash out, then drop below half health.
        session.enemy.take_damage(30.0);
        session.enemy.hit_timer = 0.0;
        let hurting = compose(&session, false, 60.0);
        assert_eq!(cylinder_color(&hurting), Rgba::RED);
    }

    fn cylinder_color(plan: &FramePlan) -> Rgba {
        plan.instances
            .iter()
            .find(|i| i.kind == MeshKind::Cylinder)
            .map(|i| i.color)
            .unwrap()
    }

    #[test]
    fn player_box_is_translucent_and_last() {
        let session = Session::new();
        let plan = compose(&session, false, 60.0);
        let last = plan.instances.last().unwrap();
        assert_eq!(last.kind, MeshKind::Cube);
        assert_eq!(last.color.a, 100);
    }

    #[test]
    fn tracer_lines_fade_with_lifetime() {
        let mut session = Session::new();
        session.aim_at(vec3(0.0, 30.0, 0.0));
        session.fire();
        session.update(0.25);

        let plan = compose(&session, true, 120.0);
        let tracer = plan.lines.last().unwrap();
        assert_eq!(tracer.color.r, 255);
        assert_eq!(tracer.color.g, 255);
        assert_eq!(tracer.color.b, 0);
        // Half of the 0.5 s lifetime gone.
        assert_eq!(tracer.color.a, 127);
    }

    #[test]
    fn hud_reflects_session_and_inputs() {
        let mut session = Session::new();
        session.enemy.take_damage(25.0);
        let plan = compose(&session, true, 144.0);

        assert!(plan.hud.captured);
        assert_eq!(plan.hud.enemy_health, 75.0);
        assert_eq!(plan.hud.fps, 144.0);
    }

    #[test]
    fn weapon_pane_uses_static_camera() {
        let session = Session::new();
        let plan = compose(&session, false, 60.0);

        assert_eq!(plan.weapon.camera.position, vec3(0.0, 0.0, 5.0));
        assert_eq!(plan.weapon.camera.target, Vec3::ZERO);
        assert_eq!(plan.weapon.instance.kind, MeshKind::Weapon);
        assert_eq!(plan.weapon.instance.color, Rgba::WHITE);
    }

    #[test]
    fn composing_does_not_touch_the_session() {
        let session = Session::new();
        let before = session.clone();
        let _ = compose(&session, true, 60.0);
        assert_eq!(session.player, before.player);
        assert_eq!(session.enemy, before.enemy);
        assert_eq!(session.targets, before.targets);
    }
}
