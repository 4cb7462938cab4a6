use std::fmt::Write;

use crate::plan::{FramePlan, MeshKind};

/// Backend-agnostic frame consumer.
///
/// A renderer takes a composed plan and produces its own output type; it
/// never sees the session. The GPU backend drives its passes through an
/// inherent method instead, since a surface frame needs device state this
/// signature does not carry.
pub trait Renderer {
    type Output;

    fn render(&mut self, plan: &FramePlan) -> Self::Output;
}

/// Text rendition of a frame plan.
///
/// Stands in for the GPU on headless runs: the CLI prints it, and tests
/// read it to check composition without a device.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&mut self, plan: &FramePlan) -> String {
        let mut out = String::new();
        let eye = plan.camera.position;
        let target = plan.camera.target;

        let _ = writeln!(out, "=== Frame ===");
        let _ = writeln!(
            out,
            "camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0}",
            eye.x, eye.y, eye.z, target.x, target.y, target.z, plan.camera.fov_y_degrees
        );

        let count = |kind: MeshKind| plan.instances.iter().filter(|i| i.kind == kind).count();
        let _ = writeln!(
            out,
            "meshes: {} plane, {} cube, {} cylinder ({} lines)",
            count(MeshKind::Plane),
            count(MeshKind::Cube),
            count(MeshKind::Cylinder),
            plan.lines.len()
        );

        for instance in plan.instances.iter().filter(|i| i.kind == MeshKind::Cube) {
            let p = instance.transform.w_axis;
            let c = instance.color;
            let _ = writeln!(
                out,
                "  cube at ({:.1}, {:.1}, {:.1}) color #{:02x}{:02x}{:02x}{:02x}",
                p.x, p.y, p.z, c.r, c.g, c.b, c.a
            );
        }

        let _ = writeln!(
            out,
            "hud: captured={} enemy_health={:.0} fps={:.0}",
            plan.hud.captured, plan.hud.enemy_health, plan.hud.fps
        );
        out
    }
}
