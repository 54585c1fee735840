//! 4x4 homogeneous transform library
//!
//! Pure functions over [`Transform4`]. Composition follows the post-multiply
//! convention of the shading pipeline: `translate(m, v)` returns `m × T(v)`,
//! so building a model matrix as
//!
//! ```text
//! m = identity
//! m = translate(m, position)
//! m = rotate_x(m, rx)
//! m = multiply(m, scale_matrix(scale))
//! ```
//!
//! yields `T × Rx × S`, which applied to a point scales first, then rotates,
//! then translates. Matrix products are not commutative; callers must keep
//! operand order exactly (`view × model` for model-view).

use crate::foundation::math::{Mat4, MathError, MathResult, Transform4, Vec3};
use crate::foundation::math::constants::PI;

/// Identity transform
pub fn identity() -> Transform4 {
    Mat4::identity()
}

/// Compose a translation by `v` onto `m` (`m × T(v)`)
pub fn translate(m: &Transform4, v: &Vec3) -> Transform4 {
    m * Mat4::new_translation(v)
}

/// Compose a rotation about the X axis onto `m` (`m × Rx(radians)`)
pub fn rotate_x(m: &Transform4, radians: f32) -> Transform4 {
    let (s, c) = radians.sin_cos();
    let rotation = Mat4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, c, -s, 0.0,
        0.0, s, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    m * rotation
}

/// Compose a rotation about the Y axis onto `m` (`m × Ry(radians)`)
pub fn rotate_y(m: &Transform4, radians: f32) -> Transform4 {
    let (s, c) = radians.sin_cos();
    let rotation = Mat4::new(
        c, 0.0, s, 0.0,
        0.0, 1.0, 0.0, 0.0,
        -s, 0.0, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    m * rotation
}

/// Diagonal scale transform with no translation or rotation
pub fn scale_matrix(v: &Vec3) -> Transform4 {
    Mat4::new_nonuniform_scaling(v)
}

/// Standard 4x4 product `a × b`
pub fn multiply(a: &Transform4, b: &Transform4) -> Transform4 {
    a * b
}

/// Symmetric OpenGL-style perspective projection
///
/// Maps view-space depth `[-near, -far]` to clip-space `[-1, 1]`. The result
/// has `-1` at flat index 11 and `(far + near) / (near - far)` at index 10.
///
/// # Errors
/// Returns [`MathError`] when `aspect <= 0`, `fov_y` is outside `(0, pi)` or
/// the clip planes do not satisfy `0 < near < far`.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> MathResult<Transform4> {
    if aspect.is_nan() || aspect <= 0.0 {
        return Err(MathError::InvalidAspect(aspect));
    }
    if fov_y.is_nan() || fov_y <= 0.0 || fov_y >= PI {
        return Err(MathError::InvalidFieldOfView(fov_y));
    }
    if near.is_nan() || far.is_nan() || near <= 0.0 || near >= far {
        return Err(MathError::InvalidClipRange { near, far });
    }

    let f = 1.0 / (fov_y * 0.5).tan();
    let nf = 1.0 / (near - far);

    let mut out = Mat4::zeros();
    out[(0, 0)] = f / aspect;
    out[(1, 1)] = f;
    out[(2, 2)] = (far + near) * nf;
    out[(3, 2)] = -1.0;
    out[(2, 3)] = 2.0 * far * near * nf;
    Ok(out)
}

/// Right-handed look-at view transform
///
/// Basis: `forward = normalize(eye - target)`, `right = normalize(up × forward)`,
/// `up' = normalize(forward × right)`. Degenerate input (`eye == target`, or
/// `up` parallel to the view direction) never divides by zero: the affected
/// basis vectors come out as zero vectors and the matrix stays finite.
pub fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Transform4 {
    let forward = normalize_or_zero(&(eye - target));
    let right = normalize_or_zero(&up.cross(&forward));
    let true_up = normalize_or_zero(&forward.cross(&right));

    if forward == Vec3::zeros() || right == Vec3::zeros() {
        log::trace!(
            "Degenerate camera basis (eye={:?}, target={:?}, up={:?}), using zero axes",
            eye, target, up
        );
    }

    Mat4::new(
        right.x, right.y, right.z, -right.dot(eye),
        true_up.x, true_up.y, true_up.z, -true_up.dot(eye),
        forward.x, forward.y, forward.z, -forward.dot(eye),
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Normalize `v`, or return the zero vector when its length is (near) zero
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    let len = v.norm();
    if len.is_finite() && len > f32::EPSILON {
        v / len
    } else {
        Vec3::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::QUARTER_PI;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    const EPSILON: f32 = 1e-6;

    fn sample_matrices() -> Vec<Mat4> {
        let trs = multiply(
            &rotate_y(&rotate_x(&translate(&identity(), &Vec3::new(1.0, -2.0, 3.0)), 0.4), -1.1),
            &scale_matrix(&Vec3::new(2.0, 0.5, 3.0)),
        );
        vec![
            identity(),
            trs,
            perspective(QUARTER_PI, 1.5, 0.1, 100.0).unwrap(),
            look_at(&Vec3::new(2.0, 3.0, 2.0), &Vec3::zeros(), &Vec3::z()),
        ]
    }

    #[test]
    fn test_identity_is_neutral_on_both_sides() {
        for m in sample_matrices() {
            assert_eq!(multiply(&identity(), &m), m);
            assert_eq!(multiply(&m, &identity()), m);
        }
    }

    #[test]
    fn test_multiply_is_not_commutative() {
        let t = translate(&identity(), &Vec3::new(1.0, 0.0, 0.0));
        let r = rotate_y(&identity(), PI * 0.5);
        assert!((multiply(&t, &r) - multiply(&r, &t)).norm() > 0.5);
    }

    #[test]
    fn test_translate_writes_last_column() {
        let m = translate(&identity(), &Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(&m.as_slice()[12..16], &[1.0, 2.0, 3.0, 1.0]);
        assert_eq!(m.row(3).iter().copied().collect::<Vec<_>>(), vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_rotations_turn_axes() {
        let rx = rotate_x(&identity(), PI * 0.5);
        assert_relative_eq!(rx.transform_vector(&Vec3::y()), Vec3::z(), epsilon = EPSILON);

        let ry = rotate_y(&identity(), PI * 0.5);
        assert_relative_eq!(ry.transform_vector(&Vec3::z()), Vec3::x(), epsilon = EPSILON);
    }

    #[test]
    fn test_scale_matrix_is_diagonal() {
        let s = scale_matrix(&Vec3::new(4.0, 2.0, 0.1));
        assert_eq!(s[(0, 0)], 4.0);
        assert_eq!(s[(1, 1)], 2.0);
        assert_eq!(s[(2, 2)], 0.1);
        assert_eq!(s[(3, 3)], 1.0);
        assert_eq!(s.fixed_view::<3, 1>(0, 3).norm(), 0.0);
    }

    #[test]
    fn test_translate_rotate_scale_order() {
        // Scale first, then rotate, then translate
        let m = multiply(
            &rotate_y(&translate(&identity(), &Vec3::new(10.0, 0.0, 0.0)), PI * 0.5),
            &scale_matrix(&Vec3::new(2.0, 1.0, 1.0)),
        );
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(10.0, 0.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_perspective_layout() {
        let (near, far) = (0.1_f32, 100.0_f32);
        let p = perspective(QUARTER_PI, 1.0, near, far).unwrap();
        let out = p.as_slice();

        let f = 1.0 / (QUARTER_PI * 0.5).tan();
        assert_relative_eq!(out[0], f, epsilon = EPSILON);
        assert_relative_eq!(out[5], f, epsilon = EPSILON);
        assert_eq!(out[11], -1.0);
        assert_relative_eq!(out[10], (far + near) / (near - far), epsilon = EPSILON);
        assert_relative_eq!(out[14], (2.0 * far * near) / (near - far), epsilon = EPSILON);
        assert_eq!(out[15], 0.0);
    }

    #[test]
    fn test_perspective_rejects_bad_parameters() {
        assert_eq!(perspective(QUARTER_PI, 0.0, 0.1, 100.0), Err(MathError::InvalidAspect(0.0)));
        assert!(matches!(perspective(QUARTER_PI, -1.0, 0.1, 100.0), Err(MathError::InvalidAspect(_))));
        assert!(matches!(perspective(QUARTER_PI, f32::NAN, 0.1, 100.0), Err(MathError::InvalidAspect(_))));
        assert!(matches!(perspective(0.0, 1.0, 0.1, 100.0), Err(MathError::InvalidFieldOfView(_))));
        assert!(matches!(perspective(PI, 1.0, 0.1, 100.0), Err(MathError::InvalidFieldOfView(_))));
        assert!(matches!(perspective(QUARTER_PI, 1.0, 10.0, 1.0), Err(MathError::InvalidClipRange { .. })));
        assert!(matches!(perspective(QUARTER_PI, 1.0, 0.0, 1.0), Err(MathError::InvalidClipRange { .. })));
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 8.0, 0.0);
        let view = look_at(&eye, &Vec3::zeros(), &Vec3::z());

        let eye_view = view.transform_point(&Point3::from(eye));
        assert_relative_eq!(eye_view, Point3::origin(), epsilon = EPSILON);

        // Target lies straight down the -Z view axis
        let target_view = view.transform_point(&Point3::origin());
        assert_relative_eq!(target_view, Point3::new(0.0, 0.0, -8.0), epsilon = 1e-5);
    }

    #[test]
    fn test_look_at_eye_equals_target_is_finite_zero_basis() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let view = look_at(&eye, &eye, &Vec3::z());

        assert!(view.iter().all(|v| v.is_finite()));
        for row in 0..3 {
            for col in 0..4 {
                assert_eq!(view[(row, col)], 0.0, "row {row} col {col}");
            }
        }
        assert_eq!(view[(3, 3)], 1.0);
    }

    #[test]
    fn test_look_at_up_parallel_to_forward() {
        let view = look_at(&Vec3::new(0.0, 8.0, 0.0), &Vec3::zeros(), &Vec3::y());

        assert!(view.iter().all(|v| v.is_finite()));
        // Right and true-up collapse, forward survives
        assert_eq!(view.fixed_view::<2, 3>(0, 0).norm(), 0.0);
        assert_relative_eq!(view[(2, 1)], 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_normalize_or_zero() {
        assert_eq!(normalize_or_zero(&Vec3::zeros()), Vec3::zeros());
        assert_relative_eq!(normalize_or_zero(&Vec3::new(3.0, 0.0, 4.0)), Vec3::new(0.6, 0.0, 0.8), epsilon = EPSILON);
    }
}
