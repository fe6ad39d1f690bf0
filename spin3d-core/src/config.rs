/// Scene configuration: shape layout, lighting and camera defaults
use nalgebra::Point3;

use crate::geometry::GeometryArgs;
use crate::material::{Color, LightRig, Material};
use crate::projection::Camera;
use crate::shape::ShapeKind;

/// Placement and look of one shape
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub position: Point3<f32>,
    pub args: GeometryArgs,
    pub material: Material,
}

/// Everything the scene host is built from
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// One entry per [`ShapeKind`], in [`ShapeKind::ALL`] order.
    pub shapes: [ShapeSpec; 3],
    pub lighting: LightRig,
    pub camera: Camera,
}

impl SceneConfig {
    pub fn shape(&self, kind: ShapeKind) -> &ShapeSpec {
        &self.shapes[kind.index()]
    }

    /// Use `color` as the base color of every shape.
    pub fn with_color(mut self, color: Color) -> Self {
        for spec in &mut self.shapes {
            spec.material.color = color;
        }
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let material = Material::standard(Color::WHITE);
        Self {
            shapes: [
                ShapeSpec {
                    kind: ShapeKind::Octahedron,
                    position: Point3::new(-4.0, 1.0, 0.0),
                    args: GeometryArgs::Scalar(2.0),
                    material,
                },
                ShapeSpec {
                    kind: ShapeKind::Torus,
                    position: Point3::new(1.0, 1.0, 0.0),
                    args: GeometryArgs::Triple([1.0, 0.4, 16.0]),
                    material,
                },
                ShapeSpec {
                    kind: ShapeKind::Cube,
                    position: Point3::new(5.0, 1.0, 0.0),
                    args: GeometryArgs::Triple([1.0, 1.0, 1.0]),
                    material,
                },
            ],
            lighting: LightRig::default(),
            camera: Camera::default(),
        }
    }
}
