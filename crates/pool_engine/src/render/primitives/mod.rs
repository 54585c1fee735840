//! Core primitive types for rendering
//!
//! Vertex and mesh data plus tessellation of the shapes the scene uses.

pub mod mesh;

pub use mesh::{Mesh, Vertex, MAX_SPHERE_VERTICES, sphere_vertex_count};
