//! Triangle-list mesh building.
//!
//! All meshes are non-indexed triangle lists with position + normal data,
//! laid out for direct GPU upload.

use glam::Vec3;

/// Vertex with position and normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Built mesh data ready for GPU upload.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
}

impl MeshData {
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Fluent builder for procedural geometry.
pub struct MeshBuilder {
    vertices: Vec<MeshVertex>,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Add a triangle; the face normal comes from the winding order.
    pub fn add_triangle(&mut self, p1: Vec3, p2: Vec3, p3: Vec3) -> &mut Self {
        let u = p2 - p1;
        let v = p3 - p1;
        let normal = u.cross(v).normalize_or_zero();
        self.add_triangle_with_normals(p1, normal, p2, normal, p3, normal)
    }

    /// Add a triangle with explicit per-vertex normals.
    pub fn add_triangle_with_normals(
        &mut self,
        p1: Vec3,
        n1: Vec3,
        p2: Vec3,
        n2: Vec3,
        p3: Vec3,
        n3: Vec3,
    ) -> &mut Self {
        self.vertices.push(MeshVertex {
            position: p1.into(),
            normal: n1.into(),
        });
        self.vertices.push(MeshVertex {
            position: p2.into(),
            normal: n2.into(),
        });
        self.vertices.push(MeshVertex {
            position: p3.into(),
            normal: n3.into(),
        });
        self
    }

    /// Add a quad as two triangles. Vertices wind counter-clockwise when
    /// seen from the side the normal points at.
    pub fn add_quad(&mut self, p1: Vec3, p2: Vec3, p3: Vec3, p4: Vec3) -> &mut Self {
        self.add_triangle(p1, p2, p3);
        self.add_triangle(p1, p3, p4);
        self
    }

    /// Add a box centered at the origin.
    pub fn add_box(&mut self, width: f32, height: f32, depth: f32) -> &mut Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let hd = depth / 2.0;

        // Front (Z+)
        self.add_quad(
            Vec3::new(-hw, -hh, hd),
            Vec3::new(hw, -hh, hd),
            Vec3::new(hw, hh, hd),
            Vec3::new(-hw, hh, hd),
        );
        // Back (Z-)
        self.add_quad(
            Vec3::new(hw, -hh, -hd),
            Vec3::new(-hw, -hh, -hd),
            Vec3::new(-hw, hh, -hd),
            Vec3::new(hw, hh, -hd),
        );
        // Top (Y+)
        self.add_quad(
            Vec3::new(-hw, hh, hd),
            Vec3::new(hw, hh, hd),
            Vec3::new(hw, hh, -hd),
            Vec3::new(-hw, hh, -hd),
        );
        // Bottom (Y-)
        self.add_quad(
            Vec3::new(-hw, -hh, -hd),
            Vec3::new(hw, -hh, -hd),
            Vec3::new(hw, -hh, hd),
            Vec3::new(-hw, -hh, hd),
        );
        // Right (X+)
        self.add_quad(
            Vec3::new(hw, -hh, hd),
            Vec3::new(hw, -hh, -hd),
            Vec3::new(hw, hh, -hd),
            Vec3::new(hw, hh, hd),
        );
        // Left (X-)
        self.add_quad(
            Vec3::new(-hw, -hh, -hd),
            Vec3::new(-hw, -hh, hd),
            Vec3::new(-hw, hh, hd),
            Vec3::new(-hw, hh, -hd),
        );

        self
    }

    /// Add a capped cylinder along the Y axis with its base on y = 0.
    pub fn add_cylinder(&mut self, radius: f32, height: f32, segments: u32) -> &mut Self {
        let segments = segments.max(3);

        for i in 0..segments {
            let a1 = (i as f32 / segments as f32) * std::f32::consts::TAU;
            let a2 = ((i + 1) as f32 / segments as f32) * std::f32::consts::TAU;
            let x1 = a1.cos() * radius;
            let z1 = a1.sin() * radius;
            let x2 = a2.cos() * radius;
            let z2 = a2.sin() * radius;

            let b1 = Vec3::new(x1, 0.0, z1);
            let b2 = Vec3::new(x2, 0.0, z2);
            let t1 = Vec3::new(x1, height, z1);
            let t2 = Vec3::new(x2, height, z2);

            // Side wall, facing outward.
            self.add_quad(b1, t1, t2, b2);
            // Top cap (Y+).
            self.add_triangle(Vec3::new(0.0, height, 0.0), t2, t1);
            // Bottom cap (Y-).
            self.add_triangle(Vec3::ZERO, b1, b2);
        }

        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Build and consume the builder.
    pub fn finish(self) -> MeshData {
        MeshData {
            vertices: self.vertices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_gets_winding_normal() {
        let mut builder = MeshBuilder::new();
        builder.add_triangle(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let mesh = builder.finish();
        assert_eq!(mesh.vertex_count(), 3);
        // Counter-clockwise in the XY plane faces +Z.
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn box_has_six_faces() {
        let mut builder = MeshBuilder::new();
        builder.add_box(1.0, 1.0, 1.0);
        let mesh = builder.finish();
        // 6 faces * 2 triangles * 3 vertices
        assert_eq!(mesh.vertex_count(), 36);
    }

    #[test]
    fn box_stays_inside_half_extents() {
        let mut builder = MeshBuilder::new();
        builder.add_box(1.0, 2.0, 3.0);
        for v in &builder.finish().vertices {
            assert!(v.position[0].abs() <= 0.5);
            assert!(v.position[1].abs() <= 1.0);
            assert!(v.position[2].abs() <= 1.5);
        }
    }

    #[test]
    fn cylinder_vertex_count() {
        let mut builder = MeshBuilder::new();
        builder.add_cylinder(0.5, 1.0, 8);
        // 8 segments * (2 side + 2 cap triangles) * 3 vertices
        assert_eq!(builder.vertex_count(), 8 * 4 * 3);
    }

    #[test]
    fn cylinder_spans_base_to_height() {
        let mut builder = MeshBuilder::new();
        builder.add_cylinder(0.5, 2.0, 8);
        let mesh = builder.finish();
        let ys: Vec<f32> = mesh.vertices.iter().map(|v| v.position[1]).collect();
        assert!(ys.iter().all(|&y| (0.0..=2.0).contains(&y)));
        assert!(ys.contains(&0.0));
        assert!(ys.contains(&2.0));
    }

    #[test]
    fn side_walls_face_outward() {
        let mut builder = MeshBuilder::new();
        builder.add_cylinder(1.0, 1.0, 8);
        let mesh = builder.finish();
        // First side triangle starts at angle 0, so its normal points
        // roughly along +X.
        assert!(mesh.vertices[0].normal[0] > 0.7);
    }
}
