//! Material system for the two shading passes
//!
//! Materials are plain parameter blocks. `apply` uploads them as uniforms
//! to whichever program the backend has bound.

use crate::foundation::math::Color3;
use crate::render::{uniforms, BackendResult, RenderBackend};
use crate::scene::SceneObject;

/// Phong material of the lit pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LitMaterial {
    /// Ambient reflectance
    pub ambient: Color3,
    /// Diffuse reflectance
    pub diffuse: Color3,
    /// Specular reflectance
    pub specular: Color3,
    /// Specular exponent
    pub shininess: f32,
}

impl LitMaterial {
    /// Single-colour material: ambient, diffuse and specular all use `color`
    pub fn from_color(color: Color3, shininess: f32) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            specular: color,
            shininess,
        }
    }

    /// Material of a lit scene object
    pub fn for_object(object: &SceneObject, shininess: f32) -> Self {
        Self::from_color(object.color, shininess)
    }

    /// Upload the material uniforms
    ///
    /// # Errors
    /// Returns the first backend error; later uniforms are not sent.
    pub fn apply<B: RenderBackend + ?Sized>(&self, backend: &mut B) -> BackendResult<()> {
        backend.set_uniform_vec3(uniforms::AMBIENT_COLOR, &self.ambient)?;
        backend.set_uniform_vec3(uniforms::DIFFUSE_COLOR, &self.diffuse)?;
        backend.set_uniform_vec3(uniforms::SPECULAR_COLOR, &self.specular)?;
        backend.set_uniform_float(uniforms::SHININESS, self.shininess)
    }
}

/// Flat glow material of the emissive pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissiveMaterial {
    /// Emitted colour
    pub color: Color3,
    /// Glow factor, 0.0 = off
    pub intensity: f32,
}

impl EmissiveMaterial {
    /// Material of an emissive scene object; lit objects get intensity 0
    pub fn for_object(object: &SceneObject) -> Self {
        Self {
            color: object.color,
            intensity: object.emissive_intensity().unwrap_or(0.0),
        }
    }

    /// Upload the material uniforms
    ///
    /// # Errors
    /// Returns the first backend error.
    pub fn apply<B: RenderBackend + ?Sized>(&self, backend: &mut B) -> BackendResult<()> {
        backend.set_uniform_vec3(uniforms::EMISSIVE_COLOR, &self.color)?;
        backend.set_uniform_float(uniforms::INTENSITY, self.intensity)
    }
}
