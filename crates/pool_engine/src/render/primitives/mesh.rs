//! Mesh representation and primitive tessellation
//!
//! Meshes are interleaved position + normal vertices with `u32` triangle
//! indices, the layout both shading passes read (24-byte stride).

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::constants::PI;

/// Upper bound on sphere vertices, the range of 16-bit indices
pub const MAX_SPHERE_VERTICES: u32 = 65_535;

/// Vertex count of a `lat_bands x long_bands` sphere, `None` above [`MAX_SPHERE_VERTICES`]
pub fn sphere_vertex_count(lat_bands: u32, long_bands: u32) -> Option<u32> {
    lat_bands
        .checked_add(1)
        .zip(long_bands.checked_add(1))
        .and_then(|(lat, long)| lat.checked_mul(long))
        .filter(|&count| count <= MAX_SPHERE_VERTICES)
}

/// Interleaved vertex: position then normal
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in object space
    pub position: [f32; 3],

    /// Unit normal
    pub normal: [f32; 3],
}

impl Vertex {
    /// Create a new vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Index data for triangles
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Unit cube centred on the origin (extent -0.5..0.5 on every axis)
    ///
    /// Four vertices per face so each face carries its own flat normal:
    /// 24 vertices, 36 indices.
    pub fn cube() -> Self {
        // (normal, tangent u, tangent v) with u x v == normal
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),   // front
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), // back
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),  // top
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),  // bottom
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),  // right
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),  // left
        ];
        const CORNERS: [(f32, f32); 4] = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (face, (normal, u, v)) in FACES.iter().enumerate() {
            let base = u32::try_from(face * 4).unwrap_or(u32::MAX);
            for (a, b) in CORNERS {
                let position = [
                    normal[0] * 0.5 + u[0] * a + v[0] * b,
                    normal[1] * 0.5 + u[1] * a + v[1] * b,
                    normal[2] * 0.5 + u[2] * a + v[2] * b,
                ];
                vertices.push(Vertex::new(position, *normal));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(vertices, indices)
    }

    /// Latitude/longitude sphere of radius 0.5
    ///
    /// `(lat_bands + 1) * (long_bands + 1)` vertices; the seam column is
    /// duplicated so every band closes without index wrap-around. Band
    /// counts whose vertex count exceeds [`MAX_SPHERE_VERTICES`] yield an
    /// empty (invalid) mesh.
    #[allow(clippy::cast_precision_loss)]
    pub fn sphere(lat_bands: u32, long_bands: u32) -> Self {
        let Some(vertex_count) = sphere_vertex_count(lat_bands, long_bands) else {
            log::warn!(
                "Sphere with {}x{} bands exceeds {} vertices, not tessellated",
                lat_bands, long_bands, MAX_SPHERE_VERTICES
            );
            return Self::default();
        };

        let mut vertices = Vec::with_capacity(vertex_count as usize);
        let mut indices = Vec::with_capacity(lat_bands as usize * long_bands as usize * 6);

        for lat in 0..=lat_bands {
            let theta = lat as f32 * PI / lat_bands as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            for lon in 0..=long_bands {
                let phi = lon as f32 * 2.0 * PI / long_bands as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();

                let normal = [cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
                let position = [normal[0] * 0.5, normal[1] * 0.5, normal[2] * 0.5];
                vertices.push(Vertex::new(position, normal));
            }
        }

        for lat in 0..lat_bands {
            for lon in 0..long_bands {
                let first = lat * (long_bands + 1) + lon;
                let second = first + long_bands + 1;
                indices.extend_from_slice(&[first, second, first + 1, second, second + 1, first + 1]);
            }
        }

        Self::new(vertices, indices)
    }

    /// 2x2 plane in XZ at y = 0, facing +Y
    pub fn plane() -> Self {
        let up = [0.0, 1.0, 0.0];
        let vertices = vec![
            Vertex::new([-1.0, 0.0, -1.0], up),
            Vertex::new([1.0, 0.0, -1.0], up),
            Vertex::new([1.0, 0.0, 1.0], up),
            Vertex::new([-1.0, 0.0, 1.0], up),
        ];
        Self::new(vertices, vec![0, 1, 2, 0, 2, 3])
    }

    /// Number of indices, the count passed to an indexed draw
    pub fn index_count(&self) -> u32 {
        u32::try_from(self.indices.len()).unwrap_or(u32::MAX)
    }

    /// Raw vertex bytes as uploaded to a vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Check the mesh is drawable: non-empty, whole triangles, indices in range
    pub fn is_valid(&self) -> bool {
        !self.indices.is_empty()
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < self.vertices.len())
    }
}
