//! Model-matrix composition.
//!
//! State stays in `f64`; matrices are built in `f32` because that is what
//! the render side consumes.

use glam::{DVec3, Mat4, Vec3};

/// Composes the model matrix for an orbital body: translate to the
/// accumulated world position, apply the mirrored scale, spin about Y (and
/// about X and Z as well when `full_spin` is set), then the fixed
/// orientation correction about X, Y, Z in that order.
pub fn orbital_transform(
    world_position: DVec3,
    scale: f64,
    spin: f64,
    full_spin: bool,
    orientation: DVec3,
) -> Mat4 {
    let spin = spin as f32;
    let mut transform = Mat4::from_translation(world_position.as_vec3())
        * mirrored_scale(scale)
        * Mat4::from_rotation_y(spin);
    if full_spin {
        transform *= Mat4::from_rotation_x(spin) * Mat4::from_rotation_z(spin);
    }
    transform
        * Mat4::from_rotation_x(orientation.x as f32)
        * Mat4::from_rotation_y(orientation.y as f32)
        * Mat4::from_rotation_z(orientation.z as f32)
}

/// Composes the model matrix for a backdrop body: translation and scale
/// only.
pub fn backdrop_transform(position: DVec3, scale: f64) -> Mat4 {
    Mat4::from_translation(position.as_vec3()) * mirrored_scale(scale)
}

/// Uniform scale with Y negated. The imported meshes are upside down
/// relative to the scene's Y-up convention, so every body mirrors its model
/// on Y.
fn mirrored_scale(scale: f64) -> Mat4 {
    let s = scale as f32;
    Mat4::from_scale(Vec3::new(s, -s, s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_mat_eq(actual: Mat4, expected: Mat4) {
        for (a, e) in actual
            .to_cols_array()
            .iter()
            .zip(expected.to_cols_array().iter())
        {
            assert!(
                (a - e).abs() < 1e-5,
                "matrices differ: {actual:?} vs {expected:?}"
            );
        }
    }

    #[test]
    fn test_backdrop_transform_translates_and_mirrors() {
        let m = backdrop_transform(DVec3::new(10.0, -4.0, 2.0), 3.0);
        let p = m.transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!((p.x - 13.0).abs() < 1e-5, "x should be 10 + 3, got {}", p.x);
        assert!((p.y - -7.0).abs() < 1e-5, "y should be -4 - 3, got {}", p.y);
        assert!((p.z - 5.0).abs() < 1e-5, "z should be 2 + 3, got {}", p.z);
    }

    #[test]
    fn test_orbital_transform_at_rest_matches_backdrop() {
        let position = DVec3::new(1.0, 2.0, 3.0);
        let orbital = orbital_transform(position, 0.5, 0.0, false, DVec3::ZERO);
        let backdrop = backdrop_transform(position, 0.5);
        assert_mat_eq(orbital, backdrop);
    }

    #[test]
    fn test_spin_rotates_about_y() {
        let m = orbital_transform(DVec3::ZERO, 1.0, FRAC_PI_2, false, DVec3::ZERO);
        let p = m.transform_point3(Vec3::X);
        assert!(p.x.abs() < 1e-5, "quarter turn should zero x, got {}", p.x);
        assert!(
            (p.z - -1.0).abs() < 1e-5,
            "quarter turn should send +X to -Z, got {}",
            p.z
        );
    }

    #[test]
    fn test_full_spin_adds_x_and_z_rotations() {
        let flat = orbital_transform(DVec3::ZERO, 1.0, 0.3, false, DVec3::ZERO);
        let full = orbital_transform(DVec3::ZERO, 1.0, 0.3, true, DVec3::ZERO);
        let expected = flat * Mat4::from_rotation_x(0.3) * Mat4::from_rotation_z(0.3);
        assert_mat_eq(full, expected);
    }

    #[test]
    fn test_orientation_applied_innermost() {
        let m = orbital_transform(
            DVec3::ZERO,
            1.0,
            0.0,
            false,
            DVec3::new(FRAC_PI_2, 0.0, 0.0),
        );
        // Rx(pi/2) sends +Y to +Z before the mirror touches it.
        let p = m.transform_point3(Vec3::Y);
        assert!(p.y.abs() < 1e-5, "y should vanish, got {}", p.y);
        assert!((p.z - 1.0).abs() < 1e-5, "+Y should land on +Z, got {}", p.z);
    }

    #[test]
    fn test_mirrored_scale_negates_y_only() {
        let m = orbital_transform(DVec3::ZERO, 2.0, 0.0, false, DVec3::ZERO);
        let p = m.transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!((p.x - 2.0).abs() < 1e-5);
        assert!((p.y - -2.0).abs() < 1e-5, "y should be mirrored, got {}", p.y);
        assert!((p.z - 2.0).abs() < 1e-5);
    }
}
