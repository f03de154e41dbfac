use std::hash::{Hash, Hasher};

use super::math::vec3::hash_f64;
use super::{Color, Texture, Vec3};

/// How a surface answers to light. The shading itself lives in the tracer,
/// the geometry only carries the material into the `Hit`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Unlit, the texture color is returned as is.
    SingleColor { texture: Texture },
    Lambert { texture: Texture },
    Phong {
        texture: Texture,
        specular: Color,
        exponent: f64,
    },
    /// Phong plus a mirror term weighted by `reflection`.
    Reflective {
        texture: Texture,
        specular: Color,
        exponent: f64,
        reflection: Color,
    },
}

impl Material {
    pub fn lambert(color: Color) -> Material {
        Material::Lambert {
            texture: Texture::SingleColor(color),
        }
    }

    pub fn texture(&self) -> &Texture {
        match self {
            Material::SingleColor { texture }
            | Material::Lambert { texture }
            | Material::Phong { texture, .. }
            | Material::Reflective { texture, .. } => texture,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::lambert(Vec3::one())
    }
}

impl Hash for Material {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        self.texture().hash(state);
        match self {
            Material::SingleColor { .. } | Material::Lambert { .. } => {}
            Material::Phong {
                specular, exponent, ..
            } => {
                specular.hash(state);
                hash_f64(*exponent, state);
            }
            Material::Reflective {
                specular,
                exponent,
                reflection,
                ..
            } => {
                specular.hash(state);
                hash_f64(*exponent, state);
                reflection.hash(state);
            }
        }
    }
}
