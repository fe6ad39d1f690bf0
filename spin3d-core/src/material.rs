/// Colors, the standard material and the lighting rig
use nalgebra::{Point3, Vector3};

use crate::error::ColorError;

/// Linear RGB color with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS hex color, `#rgb` or `#rrggbb`.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(input.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(input.to_string()));
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map(|v| v as f32 / 255.0);
        let parsed = match digits.len() {
            3 => {
                let expand = |i: usize| channel(digits[i..=i].repeat(2).as_str());
                (expand(0), expand(1), expand(2))
            }
            6 => (channel(&digits[0..2]), channel(&digits[2..4]), channel(&digits[4..6])),
            n => return Err(ColorError::BadLength(n)),
        };

        match parsed {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::new(r, g, b)),
            _ => Err(ColorError::InvalidDigit(input.to_string())),
        }
    }

    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    pub fn luminance(self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn scale(self, k: f32) -> Color {
        Color::new(self.r * k, self.g * k, self.b * k)
    }

    pub fn add(self, other: Color) -> Color {
        Color::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

/// Directional light shining from `position` toward the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Point3<f32>,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Unit vector pointing from the scene toward the light.
    pub fn direction(&self) -> Vector3<f32> {
        self.position
            .coords
            .try_normalize(1e-6)
            .unwrap_or_else(Vector3::z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub intensity: f32,
}

/// One directional plus one ambient light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub directional: DirectionalLight,
    pub ambient: AmbientLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            directional: DirectionalLight {
                position: Point3::new(0.0, 0.0, 1.0),
                intensity: 1.5,
            },
            ambient: AmbientLight { intensity: 0.5 },
        }
    }
}

/// Metal/roughness surface description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
}

impl Material {
    pub const METALNESS: f32 = 0.5;
    pub const ROUGHNESS: f32 = 0.1;

    /// The material every shape in the scene uses.
    pub fn standard(color: Color) -> Self {
        Self {
            color,
            metalness: Self::METALNESS,
            roughness: Self::ROUGHNESS,
        }
    }

    /// Blinn-Phong exponent derived from roughness.
    pub fn shininess(&self) -> f32 {
        let r = self.roughness.max(0.01);
        (2.0 / (r * r) - 2.0).max(1.0)
    }

    /// Shade a surface point.
    ///
    /// `normal` is the world-space surface normal and `view_dir` points from
    /// the surface toward the eye. The WebGL fragment shader evaluates the
    /// same expression.
    pub fn shade(&self, normal: &Vector3<f32>, view_dir: &Vector3<f32>, rig: &LightRig) -> Color {
        let n = normal.try_normalize(1e-6).unwrap_or_else(Vector3::z);
        let v = view_dir.try_normalize(1e-6).unwrap_or_else(Vector3::z);
        let l = rig.directional.direction();

        let ambient = rig.ambient.intensity * (1.0 - 0.5 * self.metalness);
        let n_dot_l = n.dot(&l).max(0.0);
        let diffuse = rig.directional.intensity * (1.0 - self.metalness) * n_dot_l;

        let specular = if n_dot_l > 0.0 {
            let h = (l + v).try_normalize(1e-6).unwrap_or(n);
            let strength = 0.04 + 0.96 * self.metalness;
            rig.directional.intensity * strength * n.dot(&h).max(0.0).powf(self.shininess())
        } else {
            0.0
        };
        let tint = Color::WHITE.lerp(self.color, self.metalness);

        self.color.scale(ambient + diffuse).add(tint.scale(specular))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_long_hex() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::from_hex("#000000").unwrap(), Color::BLACK);
        let c = Color::from_hex("#ff8000").unwrap();
        assert_eq!(c.to_rgb8(), (255, 128, 0));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Color::from_hex("fff"),
            Err(ColorError::MissingHash("fff".to_string()))
        );
        assert_eq!(Color::from_hex("#ffff"), Err(ColorError::BadLength(4)));
        assert_eq!(
            Color::from_hex("#ggg"),
            Err(ColorError::InvalidDigit("#ggg".to_string()))
        );
    }

    #[test]
    fn test_standard_material() {
        let m = Material::standard(Color::WHITE);
        assert_eq!(m.metalness, 0.5);
        assert_eq!(m.roughness, 0.1);
        assert!((m.shininess() - 198.0).abs() < 1e-3);
    }

    #[test]
    fn test_facing_light_is_brighter_than_facing_away() {
        let rig = LightRig::default();
        let m = Material::standard(Color::WHITE);
        let view = Vector3::z();
        let lit = m.shade(&Vector3::z(), &view, &rig);
        let unlit = m.shade(&-Vector3::z(), &view, &rig);
        assert!(lit.luminance() > unlit.luminance());
        // Facing away only receives ambient light.
        assert!((unlit.r - 0.5 * 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_light_direction_points_at_light() {
        let rig = LightRig::default();
        assert_eq!(rig.directional.direction(), Vector3::z());
        assert_eq!(rig.ambient.intensity, 0.5);
        assert_eq!(rig.directional.intensity, 1.5);
    }
}
