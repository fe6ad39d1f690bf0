/// Scene host: the lighting rig plus one shape renderer per shape kind
use crate::config::SceneConfig;
use crate::controls::ControlPanel;
use crate::material::LightRig;
use crate::shape::{ShapeInstance, ShapeKind, ShapeRenderer};

/// Forwards control panel state to the shape renderers. Holds no UI state
/// of its own.
#[derive(Debug, Clone)]
pub struct SceneHost {
    lighting: LightRig,
    shapes: [ShapeRenderer; 3],
}

impl SceneHost {
    /// Build the scene and mount whatever `panel` shows.
    pub fn new(config: &SceneConfig, panel: &ControlPanel) -> Self {
        let mut host = Self {
            lighting: config.lighting,
            shapes: config.shapes.clone().map(ShapeRenderer::new),
        };
        host.apply(panel);
        log::info!(
            "scene ready: {} shapes, {} triangles",
            host.shapes.len(),
            host.shapes.iter().map(|s| s.mesh().triangle_count()).sum::<usize>()
        );
        host
    }

    pub fn lighting(&self) -> &LightRig {
        &self.lighting
    }

    pub fn shape(&self, kind: ShapeKind) -> &ShapeRenderer {
        &self.shapes[kind.index()]
    }

    pub fn shapes(&self) -> &[ShapeRenderer] {
        &self.shapes
    }

    /// Mount or unmount shapes to match the panel right away.
    pub fn apply(&mut self, panel: &ControlPanel) {
        for shape in &mut self.shapes {
            shape.reconcile(panel.state(shape.kind()).visible);
        }
    }

    /// Run one frame tick of `delta` seconds.
    pub fn frame(&mut self, panel: &ControlPanel, delta: f32) {
        for shape in &mut self.shapes {
            shape.frame(panel.state(shape.kind()), delta);
        }
    }

    /// Draw list: every mounted shape, in panel order.
    pub fn instances(&self) -> impl Iterator<Item = ShapeInstance<'_>> {
        self.shapes.iter().filter_map(ShapeRenderer::instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::RotationState;

    const FRAME: f32 = 1.0 / 60.0;

    fn setup() -> (ControlPanel, SceneHost) {
        let panel = ControlPanel::new();
        let scene = SceneHost::new(&SceneConfig::default(), &panel);
        (panel, scene)
    }

    fn kinds(scene: &SceneHost) -> Vec<ShapeKind> {
        scene.instances().map(|i| i.kind).collect()
    }

    #[test]
    fn test_all_shapes_start_mounted() {
        let (_, scene) = setup();
        assert_eq!(kinds(&scene), ShapeKind::ALL.to_vec());
        for shape in scene.shapes() {
            assert_eq!(shape.rotation(), Some(&RotationState::zero()));
        }
        assert_eq!(scene.lighting().directional.intensity, 1.5);
    }

    #[test]
    fn test_rotation_equals_speed_times_time() {
        let (mut panel, mut scene) = setup();
        for (kind, speed) in ShapeKind::ALL.into_iter().zip(["0", "0.7", "3"]) {
            panel.edit_field(kind, speed);
        }

        let frames = 600;
        for _ in 0..frames {
            scene.frame(&panel, FRAME);
        }
        let t = frames as f64 * FRAME as f64;

        for kind in ShapeKind::ALL {
            let expected = panel.state(kind).speed * t;
            let r = scene.shape(kind).rotation().unwrap();
            for angle in [r.x, r.y, r.z] {
                let tolerance = 1e-3 * expected.max(1.0);
                assert!((angle - expected).abs() < tolerance, "{kind}: {angle} vs {expected}");
            }
        }
    }

    #[test]
    fn test_toggle_twice_resets_rotation() {
        for kind in ShapeKind::ALL {
            let (mut panel, mut scene) = setup();
            panel.edit_field(kind, "2");
            for _ in 0..30 {
                scene.frame(&panel, FRAME);
            }
            assert!(scene.shape(kind).rotation().unwrap().x > 0.0);

            panel.toggle(kind);
            scene.apply(&panel);
            assert!(!kinds(&scene).contains(&kind));

            panel.toggle(kind);
            scene.apply(&panel);
            assert!(kinds(&scene).contains(&kind));
            assert_eq!(scene.shape(kind).rotation(), Some(&RotationState::zero()));
        }
    }

    #[test]
    fn test_hidden_shape_resets_even_without_apply() {
        let (mut panel, mut scene) = setup();
        scene.frame(&panel, 1.0);
        panel.toggle(ShapeKind::Cube);
        scene.frame(&panel, 1.0);
        panel.toggle(ShapeKind::Cube);
        scene.frame(&panel, 1.0);
        assert_eq!(scene.shape(ShapeKind::Cube).rotation(), Some(&RotationState::zero()));
        assert!(scene.shape(ShapeKind::Torus).rotation().unwrap().x > 0.0);
    }

    #[test]
    fn test_negative_torus_speed_then_hide() {
        let (mut panel, mut scene) = setup();

        panel.edit_field(ShapeKind::Torus, "-5");
        assert_eq!(panel.error().text(), "Speed value cannot be negative.");
        assert_eq!(panel.state(ShapeKind::Torus).speed, 0.01);

        scene.frame(&panel, FRAME);
        let octahedron_before = *scene.shape(ShapeKind::Octahedron).rotation().unwrap();

        panel.toggle(ShapeKind::Torus);
        scene.apply(&panel);

        assert_eq!(kinds(&scene), vec![ShapeKind::Octahedron, ShapeKind::Cube]);
        assert_eq!(
            scene.shape(ShapeKind::Octahedron).rotation(),
            Some(&octahedron_before)
        );
        assert!(panel.state(ShapeKind::Octahedron).visible);
        assert!(panel.state(ShapeKind::Cube).visible);
    }

    #[test]
    fn test_huge_speed_keeps_shape_drawable() {
        let (mut panel, mut scene) = setup();
        panel.edit_field(ShapeKind::Cube, "1e39");
        assert!(panel.error().is_empty());

        for _ in 0..120 {
            scene.frame(&panel, FRAME);
        }
        let r = scene.shape(ShapeKind::Cube).rotation().unwrap();
        assert!(r.x.is_finite() && r.y.is_finite() && r.z.is_finite());

        let cube = scene.instances().find(|i| i.kind == ShapeKind::Cube).unwrap();
        assert!(cube.model.iter().all(|v| v.is_finite()));
    }
}
