//! Built-in geometry provider
//!
//! Tessellates the demo shapes once and uploads them through the backend.
//! Cylinders have no tessellation; lookups for them return `None` and the
//! composer skips those draws.

use std::collections::HashMap;

use crate::core::config::MeshConfig;
use crate::render::{GeometryProvider, Mesh, MeshBuffer, RenderBackend};
use crate::scene::GeometryKind;

/// Uploaded geometry keyed by kind
#[derive(Debug, Clone, Default)]
pub struct MeshLibrary {
    buffers: HashMap<GeometryKind, MeshBuffer>,
}

impl MeshLibrary {
    /// Tessellate and upload cube, sphere and plane
    ///
    /// An upload failure leaves that kind absent and is logged; the library
    /// is still usable for the remaining kinds.
    pub fn build<B: RenderBackend + ?Sized>(backend: &mut B, config: &MeshConfig) -> Self {
        let meshes = [
            (GeometryKind::Cube, Mesh::cube()),
            (GeometryKind::Sphere, Mesh::sphere(config.sphere_lat_bands, config.sphere_long_bands)),
            (GeometryKind::Plane, Mesh::plane()),
        ];

        let mut library = Self::default();
        for (kind, mesh) in &meshes {
            match backend.create_mesh_resource(mesh) {
                Ok(buffer) => {
                    log::debug!("Uploaded {:?} mesh: {} indices", kind, buffer.index_count);
                    library.insert(*kind, buffer);
                }
                Err(e) => log::warn!("Failed to upload {:?} mesh, draws will be skipped: {}", kind, e),
            }
        }
        library
    }

    /// Register a buffer for `kind`, replacing any previous one
    pub fn insert(&mut self, kind: GeometryKind, buffer: MeshBuffer) {
        self.buffers.insert(kind, buffer);
    }

    /// Whether `kind` has geometry
    pub fn contains(&self, kind: GeometryKind) -> bool {
        self.buffers.contains_key(&kind)
    }

    /// Number of kinds with geometry
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether no geometry is available at all
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

impl GeometryProvider for MeshLibrary {
    fn get_buffer(&self, kind: GeometryKind) -> Option<MeshBuffer> {
        self.buffers.get(&kind).copied()
    }
}
