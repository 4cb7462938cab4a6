//! Canonical unit meshes for the demo scene.
//!
//! Everything is unit-sized and centered so instances carry all sizing in
//! their transforms. The cylinder is the one exception: its base sits on
//! y = 0 because it stands on the ground like the entity it represents.

use crate::mesh::{MeshBuilder, MeshData};

/// Segment count for cylinder walls. Eight gives the enemy its faceted
/// silhouette.
pub const CYLINDER_SEGMENTS: u32 = 8;

/// Unit cube centered at the origin.
pub fn unit_cube() -> MeshData {
    let mut builder = MeshBuilder::new();
    builder.add_box(1.0, 1.0, 1.0);
    builder.finish()
}

/// Unit quad in the XZ plane at y = 0, facing +Y.
pub fn unit_plane() -> MeshData {
    let mut builder = MeshBuilder::new();
    builder.add_quad(
        glam::Vec3::new(-0.5, 0.0, -0.5),
        glam::Vec3::new(-0.5, 0.0, 0.5),
        glam::Vec3::new(0.5, 0.0, 0.5),
        glam::Vec3::new(0.5, 0.0, -0.5),
    );
    builder.finish()
}

/// Faceted cylinder of diameter 1 and height 1, base on y = 0.
pub fn unit_cylinder() -> MeshData {
    let mut builder = MeshBuilder::new();
    builder.add_cylinder(0.5, 1.0, CYLINDER_SEGMENTS);
    builder.finish()
}

/// Stand-in weapon when no model can be loaded: a long box roughly the
/// proportions of a rifle.
pub fn weapon_fallback() -> MeshData {
    let mut builder = MeshBuilder::new();
    builder.add_box(1.0, 1.0, 3.0);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_is_a_box() {
        assert_eq!(unit_cube().vertex_count(), 36);
    }

    #[test]
    fn plane_faces_up() {
        let mesh = unit_plane();
        assert_eq!(mesh.vertex_count(), 6);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
            assert_eq!(v.position[1], 0.0);
        }
    }

    #[test]
    fn cylinder_is_faceted() {
        let mesh = unit_cylinder();
        assert_eq!(mesh.vertex_count(), CYLINDER_SEGMENTS * 4 * 3);
    }

    #[test]
    fn fallback_weapon_is_long_in_z() {
        let mesh = weapon_fallback();
        let max_z = mesh
            .vertices
            .iter()
            .map(|v| v.position[2])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_z, 1.5);
    }
}
