/// Geometry primitives and mesh generators
use nalgebra::{Point3, Vector3};
use std::f32::consts::TAU;

/// Tubular segment count used for every torus.
pub const TORUS_TUBULAR_SEGMENTS: u32 = 48;
/// Tube radius of a torus built from a scalar size.
pub const TORUS_DEFAULT_TUBE: f32 = 0.4;
/// Radial segment count of a torus built from a scalar size.
pub const TORUS_DEFAULT_RADIAL_SEGMENTS: u32 = 12;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }

    fn at(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }

    /// Build a triangle whose vertices all carry the face normal.
    fn flat(p0: Point3<f32>, p1: Point3<f32>, p2: Point3<f32>) -> Self {
        let normal = (p1 - p0).cross(&(p2 - p0)).normalize();
        Self::new(
            Vertex::at(p0, normal),
            Vertex::at(p1, normal),
            Vertex::at(p2, normal),
        )
    }
}

/// Size parameters for a shape: either a single scalar or a 3-tuple.
///
/// How the values are read depends on the shape kind; see
/// [`Mesh::octahedron_from`], [`Mesh::torus_from`] and [`Mesh::cuboid_from`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryArgs {
    Scalar(f32),
    Triple([f32; 3]),
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Interleaved `[px, py, pz, nx, ny, nz]` per vertex, three vertices per
    /// triangle. This is the layout the WebGL front end uploads.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.triangles.len() * 18);
        for triangle in &self.triangles {
            for v in &triangle.vertices {
                out.extend_from_slice(&[
                    v.position.x,
                    v.position.y,
                    v.position.z,
                    v.normal.x,
                    v.normal.y,
                    v.normal.z,
                ]);
            }
        }
        out
    }

    /// Regular octahedron with its six vertices at `radius` on each axis.
    pub fn octahedron(radius: f32) -> Self {
        let r = radius;
        let v = [
            Point3::new(r, 0.0, 0.0),
            Point3::new(-r, 0.0, 0.0),
            Point3::new(0.0, r, 0.0),
            Point3::new(0.0, -r, 0.0),
            Point3::new(0.0, 0.0, r),
            Point3::new(0.0, 0.0, -r),
        ];
        const FACES: [[usize; 3]; 8] = [
            [0, 2, 4],
            [0, 4, 3],
            [0, 3, 5],
            [0, 5, 2],
            [1, 2, 5],
            [1, 5, 3],
            [1, 3, 4],
            [1, 4, 2],
        ];

        let mut mesh = Self::with_capacity(FACES.len());
        for [a, b, c] in FACES {
            mesh.add_triangle(Triangle::flat(v[a], v[b], v[c]));
        }
        mesh
    }

    /// Torus lying in the XY plane around the Z axis with smooth normals.
    ///
    /// `radial_segments` subdivides the tube cross-section and
    /// `tubular_segments` the ring; both are clamped to at least 3.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial = radial_segments.max(3);
        let tubular = tubular_segments.max(3);

        let mut grid = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * TAU;
                let position = Point3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                );
                let center = Point3::new(radius * u.cos(), radius * u.sin(), 0.0);
                let normal = (position - center).normalize();
                grid.push(Vertex::at(position, normal));
            }
        }

        let row = (tubular + 1) as usize;
        let mut mesh = Self::with_capacity((radial * tubular * 2) as usize);
        for j in 1..=radial as usize {
            for i in 1..=tubular as usize {
                let a = grid[row * j + i - 1];
                let b = grid[row * (j - 1) + i - 1];
                let c = grid[row * (j - 1) + i];
                let d = grid[row * j + i];
                mesh.add_triangle(Triangle::new(a, b, d));
                mesh.add_triangle(Triangle::new(b, c, d));
            }
        }
        mesh
    }

    /// Axis-aligned box centred on the origin.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
        let p = |sx: f32, sy: f32, sz: f32| Point3::new(sx * x, sy * y, sz * z);
        let mut mesh = Self::with_capacity(12);

        // Each quad is listed counter-clockwise as seen from outside.
        let quads = [
            [p(-1., -1., 1.), p(1., -1., 1.), p(1., 1., 1.), p(-1., 1., 1.)],
            [p(-1., -1., -1.), p(-1., 1., -1.), p(1., 1., -1.), p(1., -1., -1.)],
            [p(-1., 1., -1.), p(-1., 1., 1.), p(1., 1., 1.), p(1., 1., -1.)],
            [p(-1., -1., -1.), p(1., -1., -1.), p(1., -1., 1.), p(-1., -1., 1.)],
            [p(1., -1., -1.), p(1., 1., -1.), p(1., 1., 1.), p(1., -1., 1.)],
            [p(-1., -1., -1.), p(-1., -1., 1.), p(-1., 1., 1.), p(-1., 1., -1.)],
        ];
        for [a, b, c, d] in quads {
            mesh.add_triangle(Triangle::flat(a, b, c));
            mesh.add_triangle(Triangle::flat(a, c, d));
        }
        mesh
    }

    /// Octahedron from size args; a 3-tuple uses its first component.
    pub fn octahedron_from(args: GeometryArgs) -> Self {
        match args {
            GeometryArgs::Scalar(radius) => Self::octahedron(radius),
            GeometryArgs::Triple([radius, _, _]) => Self::octahedron(radius),
        }
    }

    /// Torus from size args: `[radius, tube, radial_segments]`, or a bare radius.
    pub fn torus_from(args: GeometryArgs) -> Self {
        match args {
            GeometryArgs::Scalar(radius) => Self::torus(
                radius,
                TORUS_DEFAULT_TUBE,
                TORUS_DEFAULT_RADIAL_SEGMENTS,
                TORUS_TUBULAR_SEGMENTS,
            ),
            GeometryArgs::Triple([radius, tube, radial]) => Self::torus(
                radius,
                tube,
                radial.max(0.0).floor() as u32,
                TORUS_TUBULAR_SEGMENTS,
            ),
        }
    }

    /// Box from size args: `[width, height, depth]`, or one edge length.
    pub fn cuboid_from(args: GeometryArgs) -> Self {
        match args {
            GeometryArgs::Scalar(edge) => Self::cuboid(edge, edge, edge),
            GeometryArgs::Triple([w, h, d]) => Self::cuboid(w, h, d),
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
