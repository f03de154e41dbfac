use std::hash::{Hash, Hasher};

use super::{Color, Normal3, Ray, Vec3, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TexCoord2 {
    pub u: f64,
    pub v: f64,
}

impl TexCoord2 {
    pub fn new(u: f64, v: f64) -> TexCoord2 {
        TexCoord2 { u, v }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Texture {
    SingleColor(Color),
    /// Two colors alternating on a 2x2 grid of the unit texture square.
    Checkerboard { even: Color, odd: Color },
}

impl Texture {
    pub fn color_at(&self, coord: TexCoord2) -> Color {
        match self {
            Texture::SingleColor(color) => *color,
            Texture::Checkerboard { even, odd } => {
                let cell = (coord.u * 2.0).floor() + (coord.v * 2.0).floor();
                if cell.rem_euclid(2.0) == 0.0 {
                    *even
                } else {
                    *odd
                }
            }
        }
    }
}

impl Hash for Texture {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Texture::SingleColor(color) => color.hash(state),
            Texture::Checkerboard { even, odd } => {
                even.hash(state);
                odd.hash(state);
            }
        }
    }
}

/// Texture coordinates of the point `ray.at(t)` on a plane with normal `n`.
///
/// The coordinates are measured along a tangent frame built around the
/// normal, divided by `scalar` and wrapped into `[0, 1)`, so a bigger scalar
/// stretches the texture over a bigger area. `scalar` must be at least 1.
pub fn plane_tex_coord(ray: &Ray, t: f64, n: Normal3, scalar: i32) -> TexCoord2 {
    let (tangent, bitangent) = tangent_frame(n);
    let p = ray.at(t);
    let scalar = scalar as f64;
    TexCoord2::new(
        (p.dot(tangent) / scalar).rem_euclid(1.0),
        (p.dot(bitangent) / scalar).rem_euclid(1.0),
    )
}

/// Two unit vectors spanning the plane orthogonal to `n`.
pub fn tangent_frame(n: Normal3) -> (Vector3, Vector3) {
    let n = n.normalize();
    // any axis not parallel to the normal gives a valid tangent
    let helper = if n.x.abs() < 0.9 {
        Vec3::x_axis()
    } else {
        Vec3::y_axis()
    };
    let tangent = helper.cross(n).normalize();
    (tangent, n.cross(tangent))
}
