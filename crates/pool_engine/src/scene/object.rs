//! Scene object records

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Color3, Transform4, Vec3};
use crate::foundation::transform;

slotmap::new_key_type! {
    /// Stable handle to an object stored in a [`PoolScene`](super::PoolScene)
    pub struct ObjectKey;
}

/// Geometry used to draw an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// Unit cube centred on the origin
    Cube,
    /// Sphere of radius 0.5
    Sphere,
    /// Cylinder along Z
    Cylinder,
    /// 2x2 plane in XZ
    Plane,
}

/// Which shading pass an object belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Drawn by the lit (Phong) pass
    Lit,
    /// Drawn by the emissive pass with a flat colour scaled by `intensity`
    Emissive {
        /// Glow factor, 0.0 = off
        intensity: f32,
    },
}

/// A single drawable object of the scene
///
/// The creation pose is snapshotted and never changes; scene switches use
/// it to put animated objects back where they started.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Geometry to draw
    pub kind: GeometryKind,
    /// World-space position
    pub position: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Euler angles in radians, absent for objects that never rotate
    pub rotation: Option<Vec3>,
    /// Material colour
    pub color: Color3,
    /// Shading pass and its parameters
    pub shading: Shading,
    original_position: Vec3,
    original_scale: Vec3,
}

impl SceneObject {
    /// Create an object drawn by the lit pass
    pub fn lit(kind: GeometryKind, position: Vec3, scale: Vec3, color: Color3) -> Self {
        Self {
            kind,
            position,
            scale,
            rotation: None,
            color,
            shading: Shading::Lit,
            original_position: position,
            original_scale: scale,
        }
    }

    /// Create an emissive object, initially switched off
    pub fn emissive(kind: GeometryKind, position: Vec3, scale: Vec3, color: Color3) -> Self {
        Self {
            shading: Shading::Emissive { intensity: 0.0 },
            ..Self::lit(kind, position, scale, color)
        }
    }

    /// Attach Euler rotation angles
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Position captured at creation
    pub fn original_position(&self) -> Vec3 {
        self.original_position
    }

    /// Scale captured at creation
    pub fn original_scale(&self) -> Vec3 {
        self.original_scale
    }

    /// Move back to the creation position and scale
    pub fn restore_original_pose(&mut self) {
        self.position = self.original_position;
        self.scale = self.original_scale;
    }

    /// Whether the object is drawn by the emissive pass
    pub fn is_emissive(&self) -> bool {
        matches!(self.shading, Shading::Emissive { .. })
    }

    /// Emissive intensity, `None` for lit objects
    pub fn emissive_intensity(&self) -> Option<f32> {
        match self.shading {
            Shading::Emissive { intensity } => Some(intensity),
            Shading::Lit => None,
        }
    }

    /// Set the emissive intensity; ignored for lit objects
    pub fn set_emissive_intensity(&mut self, value: f32) {
        if let Shading::Emissive { intensity } = &mut self.shading {
            *intensity = value;
        }
    }

    /// Model matrix for the lit pass
    ///
    /// `Translate(position) × Rx(r.x) × Ry(r.y) × Ry(r.z) × Scale(scale)`.
    /// The third rotation term reuses the Y axis for the Z angle and no Z
    /// rotation is ever applied. Shaders and scene data are tuned against
    /// this composition, so it is kept as-is.
    pub fn model_matrix(&self) -> Transform4 {
        let mut model = transform::translate(&transform::identity(), &self.position);
        if let Some(rotation) = self.rotation {
            model = transform::rotate_x(&model, rotation.x);
            model = transform::rotate_y(&model, rotation.y);
            model = transform::rotate_y(&model, rotation.z);
        }
        transform::multiply(&model, &transform::scale_matrix(&self.scale))
    }

    /// Model matrix for the emissive pass: `Translate(position) × Scale(scale)`
    pub fn emissive_model_matrix(&self) -> Transform4 {
        let model = transform::translate(&transform::identity(), &self.position);
        transform::multiply(&model, &transform::scale_matrix(&self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_original_pose_is_snapshotted() {
        let mut ball = SceneObject::lit(
            GeometryKind::Sphere,
            Vec3::new(1.5, 0.0, 0.3),
            Vec3::repeat(0.15),
            Vec3::repeat(0.1),
        );
        ball.position.x += 2.0;
        ball.scale = Vec3::zeros();

        assert_eq!(ball.original_position(), Vec3::new(1.5, 0.0, 0.3));
        ball.restore_original_pose();
        assert_eq!(ball.position, Vec3::new(1.5, 0.0, 0.3));
        assert_eq!(ball.scale, Vec3::repeat(0.15));
    }

    #[test]
    fn test_emissive_intensity_only_on_emissive_objects() {
        let mut light = SceneObject::emissive(GeometryKind::Cube, Vec3::zeros(), Vec3::repeat(0.1), Vec3::z());
        assert_eq!(light.emissive_intensity(), Some(0.0));
        light.set_emissive_intensity(0.7);
        assert_eq!(light.emissive_intensity(), Some(0.7));

        let mut table = SceneObject::lit(GeometryKind::Cube, Vec3::zeros(), Vec3::repeat(1.0), Vec3::y());
        table.set_emissive_intensity(0.7);
        assert_eq!(table.emissive_intensity(), None);
        assert!(!table.is_emissive());
    }

    #[test]
    fn test_model_matrix_translates_after_scaling() {
        let table = SceneObject::lit(
            GeometryKind::Cube,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 2.0, 0.1),
            Vec3::y(),
        );
        let corner = table.model_matrix().transform_point(&Point3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(corner, Point3::new(3.0, 3.0, 3.05), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_z_component_is_applied_about_y() {
        let angle = 0.7;
        let about_z = SceneObject::lit(GeometryKind::Cylinder, Vec3::zeros(), Vec3::repeat(1.0), Vec3::x())
            .with_rotation(Vec3::new(0.0, 0.0, angle));
        let about_y = SceneObject::lit(GeometryKind::Cylinder, Vec3::zeros(), Vec3::repeat(1.0), Vec3::x())
            .with_rotation(Vec3::new(0.0, angle, 0.0));

        assert_relative_eq!(about_z.model_matrix(), about_y.model_matrix(), epsilon = 1e-6);

        // Y and Z angles add up on the Y axis
        let split = SceneObject::lit(GeometryKind::Cylinder, Vec3::zeros(), Vec3::repeat(1.0), Vec3::x())
            .with_rotation(Vec3::new(0.0, 0.3, 0.4));
        let expected = transform::rotate_y(&transform::identity(), 0.7);
        assert_relative_eq!(split.model_matrix(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_emissive_model_matrix_ignores_rotation() {
        let light = SceneObject::emissive(GeometryKind::Cube, Vec3::new(1.0, 0.0, 0.0), Vec3::repeat(0.1), Vec3::z())
            .with_rotation(Vec3::new(1.0, 1.0, 1.0));
        let expected = transform::multiply(
            &transform::translate(&transform::identity(), &Vec3::new(1.0, 0.0, 0.0)),
            &transform::scale_matrix(&Vec3::repeat(0.1)),
        );
        assert_eq!(light.emissive_model_matrix(), expected);
    }
}
