/// The shape renderer: one mesh, one material and a rotation that lives as
/// long as the shape is mounted
use nalgebra::Matrix4;
use std::fmt;

use crate::config::ShapeSpec;
use crate::controls::ShapeState;
use crate::geometry::{GeometryArgs, Mesh};
use crate::material::Material;
use crate::transform::{RotationState, Transform};

/// Which geometry a shape renderer draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Octahedron,
    Torus,
    Cube,
}

impl ShapeKind {
    /// Panel and scene order.
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Octahedron, ShapeKind::Torus, ShapeKind::Cube];

    pub fn index(self) -> usize {
        match self {
            ShapeKind::Octahedron => 0,
            ShapeKind::Torus => 1,
            ShapeKind::Cube => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Octahedron => "octahedron",
            ShapeKind::Torus => "torus",
            ShapeKind::Cube => "cube",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            ShapeKind::Octahedron => "Toggle octahedron",
            ShapeKind::Torus => "Toggle torus",
            ShapeKind::Cube => "Toggle cube",
        }
    }

    pub fn build_mesh(self, args: GeometryArgs) -> Mesh {
        match self {
            ShapeKind::Octahedron => Mesh::octahedron_from(args),
            ShapeKind::Torus => Mesh::torus_from(args),
            ShapeKind::Cube => Mesh::cuboid_from(args),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a front end needs to draw one mounted shape this frame
#[derive(Debug, Clone)]
pub struct ShapeInstance<'a> {
    pub kind: ShapeKind,
    pub mesh: &'a Mesh,
    pub material: &'a Material,
    pub model: Matrix4<f32>,
}

/// Renders one shape when visible.
///
/// The rotation only exists while the shape is mounted. Hiding the shape
/// drops it, so showing it again starts from zero.
#[derive(Debug, Clone)]
pub struct ShapeRenderer {
    spec: ShapeSpec,
    mesh: Mesh,
    transform: Option<RotationState>,
}

impl ShapeRenderer {
    pub fn new(spec: ShapeSpec) -> Self {
        let mesh = spec.kind.build_mesh(spec.args);
        Self {
            spec,
            mesh,
            transform: None,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.spec.kind
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn is_mounted(&self) -> bool {
        self.transform.is_some()
    }

    pub fn rotation(&self) -> Option<&RotationState> {
        self.transform.as_ref()
    }

    /// Mount or unmount to match `visible`.
    pub fn reconcile(&mut self, visible: bool) {
        match (visible, self.transform.is_some()) {
            (true, false) => {
                log::debug!("mounting {}", self.spec.kind);
                self.transform = Some(RotationState::zero());
            }
            (false, true) => {
                log::debug!("unmounting {}", self.spec.kind);
                self.transform = None;
            }
            _ => {}
        }
    }

    /// One frame tick. A shape mounted by this call renders at zero rotation
    /// and starts advancing on the next tick.
    pub fn frame(&mut self, state: &ShapeState, delta: f32) {
        if !(state.visible && self.is_mounted()) {
            self.reconcile(state.visible);
            return;
        }
        if let Some(rotation) = self.transform.as_mut() {
            rotation.advance(delta, state.speed);
        }
    }

    pub fn instance(&self) -> Option<ShapeInstance<'_>> {
        let rotation = *self.transform.as_ref()?;
        Some(ShapeInstance {
            kind: self.spec.kind,
            mesh: &self.mesh,
            material: &self.spec.material,
            model: Transform::model_matrix(&self.spec.position, &rotation),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;

    fn torus() -> ShapeRenderer {
        ShapeRenderer::new(SceneConfig::default().shape(ShapeKind::Torus).clone())
    }

    fn shown(speed: f64) -> ShapeState {
        ShapeState { visible: true, speed }
    }

    #[test]
    fn test_starts_unmounted() {
        let shape = torus();
        assert!(!shape.is_mounted());
        assert!(shape.instance().is_none());
    }

    #[test]
    fn test_first_frame_mounts_at_zero() {
        let mut shape = torus();
        shape.frame(&shown(1.0), 0.5);
        assert_eq!(shape.rotation(), Some(&RotationState::zero()));

        shape.frame(&shown(1.0), 0.5);
        assert_eq!(shape.rotation(), Some(&RotationState::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_zero_speed_is_static() {
        let mut shape = torus();
        shape.reconcile(true);
        for _ in 0..10 {
            shape.frame(&shown(0.0), 0.016);
        }
        assert_eq!(shape.rotation(), Some(&RotationState::zero()));
    }

    #[test]
    fn test_hiding_discards_rotation() {
        let mut shape = torus();
        shape.reconcile(true);
        shape.frame(&shown(2.0), 1.0);
        assert!(shape.rotation().unwrap().x > 0.0);

        shape.frame(&ShapeState { visible: false, speed: 2.0 }, 1.0);
        assert!(shape.instance().is_none());

        shape.reconcile(true);
        assert_eq!(shape.rotation(), Some(&RotationState::zero()));
    }

    #[test]
    fn test_instance_carries_position_and_material() {
        let mut shape = torus();
        shape.reconcile(true);
        let instance = shape.instance().unwrap();
        assert_eq!(instance.kind, ShapeKind::Torus);
        assert_eq!(instance.material.metalness, 0.5);
        assert_eq!(instance.model.column(3)[0], 1.0);
        assert_eq!(instance.model.column(3)[1], 1.0);
        assert_eq!(instance.mesh.triangle_count(), 16 * 48 * 2);
    }

    #[test]
    fn test_kind_order() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(ShapeKind::Cube.to_string(), "cube");
    }
}
