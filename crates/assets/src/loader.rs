//! glTF import flattened to a single triangle list.
//!
//! The demo draws a whole model with one transform, so the scene graph is
//! baked at load time: every primitive's vertices are pre-multiplied by
//! their node's world matrix and appended to one mesh.

use std::path::Path;

use glam::{Mat3, Mat4, Vec3};

use crate::AssetError;
use crate::mesh::{MeshData, MeshVertex};
use crate::primitives;

/// Load a .glb/.gltf file as one flattened mesh.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<MeshData, AssetError> {
    let path = path.as_ref();
    let (document, buffers, _images) = gltf::import(path)?;

    let mut vertices = Vec::new();
    for scene in document.scenes() {
        for node in scene.nodes() {
            collect_node(&node, &buffers, Mat4::IDENTITY, &mut vertices)?;
        }
    }

    if vertices.is_empty() {
        return Err(AssetError::EmptyModel(path.display().to_string()));
    }

    tracing::debug!(
        path = %path.display(),
        vertices = vertices.len(),
        "imported glTF mesh"
    );
    Ok(MeshData { vertices })
}

/// Load the weapon model, falling back to a plain box when the file is
/// missing or unreadable. The demo must come up either way.
pub fn load_weapon_or_fallback(path: impl AsRef<Path>) -> MeshData {
    let path = path.as_ref();
    match load_mesh(path) {
        Ok(mesh) => mesh,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "weapon model unavailable, using fallback box"
            );
            primitives::weapon_fallback()
        }
    }
}

fn collect_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent: Mat4,
    out: &mut Vec<MeshVertex>,
) -> Result<(), AssetError> {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;

    if let Some(mesh) = node.mesh() {
        let name = mesh.name().unwrap_or("unnamed").to_string();
        for primitive in mesh.primitives() {
            append_primitive(&primitive, buffers, world, &name, out)?;
        }
    }

    for child in node.children() {
        collect_node(&child, buffers, world, out)?;
    }
    Ok(())
}

fn append_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    world: Mat4,
    mesh_name: &str,
    out: &mut Vec<MeshVertex>,
) -> Result<(), AssetError> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<Vec3> = reader
        .read_positions()
        .ok_or_else(|| AssetError::MissingPositions(mesh_name.to_string()))?
        .map(Vec3::from)
        .collect();

    let normals: Vec<Vec3> = reader
        .read_normals()
        .map(|iter| iter.map(Vec3::from).collect())
        .unwrap_or_else(|| vec![Vec3::Y; positions.len()]);

    let indices: Vec<u32> = reader
        .read_indices()
        .map(|iter| iter.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    // Normals need the inverse-transpose so non-uniform node scales don't
    // shear the lighting.
    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();

    for chunk in indices.chunks_exact(3) {
        for &index in chunk {
            let index = index as usize;
            let position = world.transform_point3(positions[index]);
            let normal = (normal_matrix * normals.get(index).copied().unwrap_or(Vec3::Y))
                .normalize_or_zero();
            out.push(MeshVertex {
                position: position.into(),
                normal: normal.into(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_an_error() {
        let err = load_mesh("does/not/exist.glb").unwrap_err();
        assert!(matches!(err, AssetError::Gltf(_) | AssetError::Io(_)));
    }

    #[test]
    fn garbage_file_is_an_error() {
        let mut tmp = tempfile::NamedTempFile::with_suffix(".glb").unwrap();
        tmp.write_all(b"this is not a model").unwrap();
        assert!(load_mesh(tmp.path()).is_err());
    }

    #[test]
    fn fallback_kicks_in_for_missing_weapon() {
        let mesh = load_weapon_or_fallback("no/such/ak47.glb");
        // The fallback box: 6 faces * 2 triangles * 3 vertices.
        assert_eq!(mesh.vertex_count(), 36);
    }
}
