//! Mesh assets: procedural primitives and glTF import.
//!
//! Everything here is CPU-side geometry. Meshes are flat triangle lists
//! with position and normal per vertex; the renderer uploads them as-is
//! and never touches file paths.

pub mod loader;
pub mod mesh;
pub mod primitives;

pub use loader::{load_mesh, load_weapon_or_fallback};
pub use mesh::{MeshBuilder, MeshData, MeshVertex};

/// Errors from mesh import.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("glTF import error: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("mesh {0:?} has no vertex positions")]
    MissingPositions(String),
    #[error("model {0:?} contains no geometry")]
    EmptyModel(String),
}

pub fn crate_info() -> &'static str {
    "ironsight-assets v0.1.0"
}
