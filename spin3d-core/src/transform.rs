/// 3D transformation matrices and rotation state
use nalgebra::{Matrix4, Point3, Vector3};
use std::f64::consts::TAU;

/// Rotation state around three axes (in radians)
///
/// Angles are unbounded and kept in `f64` so that any finite speed yields
/// finite angles. They are wrapped to one turn only when the rotation matrix
/// is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Advance all three axes by `delta * speed` for one frame tick.
    pub fn advance(&mut self, delta: f32, speed: f64) {
        let step = delta as f64 * speed;
        self.rotate(step, step, step);
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let wrap = |angle: f64| (angle % TAU) as f32;
        let rx = Matrix4::new_rotation(Vector3::new(wrap(rotation.x), 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, wrap(rotation.y), 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, wrap(rotation.z)));

        // Euler XYZ: Z is applied to the vertex first, X last
        rx * ry * rz
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Model matrix for a mesh placed at `position` with `rotation` applied
    /// about its own origin.
    pub fn model_matrix(position: &Point3<f32>, rotation: &RotationState) -> Matrix4<f32> {
        Self::translation_matrix(position.x, position.y, position.z)
            * Self::rotation_matrix(rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_advance_is_equal_on_all_axes() {
        let mut state = RotationState::zero();
        state.advance(0.5, 2.0);
        assert_eq!(state, RotationState::new(1.0, 1.0, 1.0));

        state.advance(0.25, 0.0);
        assert_eq!(state, RotationState::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_euler_xyz_order() {
        // A quarter turn about Z then X maps +X to +Z under XYZ order.
        let rotation = RotationState::new(std::f64::consts::FRAC_PI_2, 0.0, std::f64::consts::FRAC_PI_2);
        let m = Transform::rotation_matrix(&rotation);
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_model_matrix_translates_after_rotating() {
        let position = Point3::new(5.0, 1.0, 0.0);
        let rotation = RotationState::new(0.0, 0.0, std::f64::consts::PI);
        let m = Transform::model_matrix(&position, &rotation);
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(4.0, 1.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_huge_angles_stay_finite() {
        let mut state = RotationState::zero();
        state.advance(0.016, 1e39);
        assert!(state.x.is_finite());

        let m = Transform::model_matrix(&Point3::new(5.0, 1.0, 0.0), &state);
        assert!(m.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_full_turns_wrap() {
        let turned = RotationState::new(TAU * 1000.0 + 0.5, 0.0, 0.0);
        let plain = RotationState::new(0.5, 0.0, 0.0);
        let diff = Transform::rotation_matrix(&turned) - Transform::rotation_matrix(&plain);
        assert!(diff.norm() < 1e-4);
    }
}
