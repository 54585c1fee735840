//! Headless backend that records every call
//!
//! Behaves like a minimal GL context: one bound program at a time, uniform
//! values stored per program, draws only possible with a program bound.
//! Each successful draw is recorded together with a snapshot of the bound
//! program's uniforms so callers can inspect exactly what a draw saw.

use std::collections::{HashMap, HashSet};

use crate::foundation::math::{Mat4, Vec3};
use crate::render::{
    BackendResult, Mesh, MeshBuffer, MeshHandle, RenderBackend, RenderError, ShaderPass,
};

/// A uniform value as uploaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// 4x4 matrix
    Matrix(Mat4),
    /// 3-component vector
    Vec3(Vec3),
    /// Scalar
    Float(f32),
}

impl UniformValue {
    /// Matrix payload, if this is a matrix
    pub const fn as_matrix(&self) -> Option<&Mat4> {
        match self {
            Self::Matrix(m) => Some(m),
            _ => None,
        }
    }

    /// Vector payload, if this is a vector
    pub const fn as_vec3(&self) -> Option<&Vec3> {
        match self {
            Self::Vec3(v) => Some(v),
            _ => None,
        }
    }

    /// Scalar payload, if this is a float
    pub const fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// One backend call, in issue order
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    /// Program link attempt and its outcome
    LinkProgram {
        /// Pass linked
        pass: ShaderPass,
        /// Whether linking succeeded
        success: bool,
    },
    /// Mesh upload
    CreateMesh {
        /// Assigned buffer
        buffer: MeshBuffer,
        /// Uploaded vertex data size
        vertex_bytes: usize,
    },
    /// Frame clear
    Clear([f32; 4]),
    /// Program bind
    UseProgram(ShaderPass),
    /// Uniform upload
    SetUniform {
        /// Uniform name
        name: String,
        /// Uploaded value
        value: UniformValue,
    },
    /// Indexed draw
    DrawIndexed(MeshBuffer),
}

/// A draw together with the state it was issued under
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    /// Program bound at draw time
    pub pass: ShaderPass,
    /// Geometry drawn
    pub buffer: MeshBuffer,
    /// Uniforms of the bound program at draw time
    pub uniforms: HashMap<String, UniformValue>,
}

impl RecordedDraw {
    /// Value of a uniform at draw time
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// Matrix uniform at draw time
    pub fn matrix(&self, name: &str) -> Option<&Mat4> {
        self.uniform(name).and_then(UniformValue::as_matrix)
    }

    /// Vector uniform at draw time
    pub fn vec3(&self, name: &str) -> Option<&Vec3> {
        self.uniform(name).and_then(UniformValue::as_vec3)
    }

    /// Scalar uniform at draw time
    pub fn float(&self, name: &str) -> Option<f32> {
        self.uniform(name).and_then(UniformValue::as_float)
    }
}

/// Recording implementation of [`RenderBackend`]
#[derive(Debug, Default)]
pub struct RecordingBackend {
    extent: (u32, u32),
    commands: Vec<BackendCommand>,
    draws: Vec<RecordedDraw>,
    failing_links: HashSet<ShaderPass>,
    linked: HashSet<ShaderPass>,
    bound: Option<ShaderPass>,
    uniforms: HashMap<ShaderPass, HashMap<String, UniformValue>>,
    meshes: HashMap<MeshHandle, u32>,
    next_handle: u64,
}

impl RecordingBackend {
    /// Create a backend reporting `extent` as its viewport
    pub fn new(extent: (u32, u32)) -> Self {
        Self {
            extent,
            ..Self::default()
        }
    }

    /// Make linking of `pass` fail
    #[must_use]
    pub fn fail_program_link(mut self, pass: ShaderPass) -> Self {
        self.failing_links.insert(pass);
        self
    }

    /// Change the reported viewport, as a window resize would
    pub fn set_extent(&mut self, extent: (u32, u32)) {
        self.extent = extent;
    }

    /// Every call recorded so far
    pub fn commands(&self) -> &[BackendCommand] {
        &self.commands
    }

    /// Every successful draw recorded so far
    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Successful draws issued under `pass`
    pub fn draws_for(&self, pass: ShaderPass) -> impl Iterator<Item = &RecordedDraw> + '_ {
        self.draws.iter().filter(move |d| d.pass == pass)
    }

    /// Current value of a uniform on a program
    pub fn uniform(&self, pass: ShaderPass, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(&pass).and_then(|u| u.get(name))
    }

    /// Whether `pass` linked successfully
    pub fn is_linked(&self, pass: ShaderPass) -> bool {
        self.linked.contains(&pass)
    }

    /// Program currently bound
    pub const fn bound_program(&self) -> Option<ShaderPass> {
        self.bound
    }

    /// Forget recorded commands and draws; GPU-side state is kept
    pub fn clear_recording(&mut self) {
        self.commands.clear();
        self.draws.clear();
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> BackendResult<()> {
        let pass = self.bound.ok_or_else(|| {
            RenderError::RenderingFailed(format!("uniform {name} set with no program bound"))
        })?;
        self.uniforms.entry(pass).or_default().insert(name.to_string(), value);
        self.commands.push(BackendCommand::SetUniform { name: name.to_string(), value });
        Ok(())
    }
}

impl RenderBackend for RecordingBackend {
    fn get_viewport_extent(&self) -> (u32, u32) {
        self.extent
    }

    fn link_program(&mut self, pass: ShaderPass) -> BackendResult<()> {
        let success = !self.failing_links.contains(&pass);
        self.commands.push(BackendCommand::LinkProgram { pass, success });
        if success {
            self.linked.insert(pass);
            Ok(())
        } else {
            Err(RenderError::ShaderLinkFailed {
                pass,
                log: "recording backend configured to reject this program".to_string(),
            })
        }
    }

    fn create_mesh_resource(&mut self, mesh: &Mesh) -> BackendResult<MeshBuffer> {
        if !mesh.is_valid() {
            return Err(RenderError::ResourceCreationFailed(format!(
                "mesh with {} vertices and {} indices is not drawable",
                mesh.vertices.len(),
                mesh.indices.len()
            )));
        }

        self.next_handle += 1;
        let buffer = MeshBuffer {
            handle: MeshHandle(self.next_handle),
            index_count: mesh.index_count(),
        };
        self.meshes.insert(buffer.handle, buffer.index_count);
        self.commands.push(BackendCommand::CreateMesh {
            buffer,
            vertex_bytes: mesh.vertex_bytes().len(),
        });
        Ok(buffer)
    }

    fn clear(&mut self, color: [f32; 4]) -> BackendResult<()> {
        self.commands.push(BackendCommand::Clear(color));
        Ok(())
    }

    fn use_program(&mut self, pass: ShaderPass) -> BackendResult<()> {
        if !self.linked.contains(&pass) {
            return Err(RenderError::RenderingFailed(format!(
                "{pass} program is not linked"
            )));
        }
        self.bound = Some(pass);
        self.commands.push(BackendCommand::UseProgram(pass));
        Ok(())
    }

    fn set_uniform_matrix(&mut self, name: &str, value: &Mat4) -> BackendResult<()> {
        self.set_uniform(name, UniformValue::Matrix(*value))
    }

    fn set_uniform_vec3(&mut self, name: &str, value: &Vec3) -> BackendResult<()> {
        self.set_uniform(name, UniformValue::Vec3(*value))
    }

    fn set_uniform_float(&mut self, name: &str, value: f32) -> BackendResult<()> {
        self.set_uniform(name, UniformValue::Float(value))
    }

    fn draw_indexed(&mut self, buffer: &MeshBuffer) -> BackendResult<()> {
        let pass = self
            .bound
            .ok_or_else(|| RenderError::RenderingFailed("draw with no program bound".to_string()))?;

        match self.meshes.get(&buffer.handle) {
            Some(&count) if count >= buffer.index_count => {}
            Some(_) => {
                return Err(RenderError::RenderingFailed(format!(
                    "draw of {} indices exceeds buffer {:?}",
                    buffer.index_count, buffer.handle
                )))
            }
            None => {
                return Err(RenderError::BackendError(format!("unknown mesh handle {:?}", buffer.handle)))
            }
        }

        self.commands.push(BackendCommand::DrawIndexed(*buffer));
        self.draws.push(RecordedDraw {
            pass,
            buffer: *buffer,
            uniforms: self.uniforms.get(&pass).cloned().unwrap_or_default(),
        });
        Ok(())
    }
}
