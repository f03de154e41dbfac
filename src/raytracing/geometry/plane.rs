use std::hash::{Hash, Hasher};

use super::plane_parameter;
use crate::raytracing::error::{GeometryError, Result};
use crate::raytracing::texture::plane_tex_coord;
use crate::raytracing::{Hit, Material, Normal3, Point3, Ray, EPSILON};

/// An infinite plane through `point`, facing `normal`.
///
/// The normal is kept as given and normalized on every hit, `texture_scalar`
/// controls how often the material texture repeats on the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: Point3,
    normal: Normal3,
    texture_scalar: i32,
    material: Material,
}

impl Plane {
    pub fn new(
        point: Point3,
        normal: Normal3,
        material: Material,
        texture_scalar: i32,
    ) -> Result<Plane> {
        if normal.is_zero() {
            return Err(GeometryError::ZeroNormal);
        }
        if texture_scalar < 1 {
            return Err(GeometryError::InvalidTextureScale(texture_scalar.into()));
        }
        Ok(Plane {
            point,
            normal,
            texture_scalar,
            material,
        })
    }

    pub fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let t = plane_parameter(self.point, self.normal, ray)?;
        if t <= EPSILON {
            return None;
        }
        let normal = self.normal / self.normal.len();
        Some(Hit::new(
            t,
            *ray,
            normal,
            plane_tex_coord(ray, t, self.normal, self.texture_scalar),
            &self.material,
        ))
    }
}

impl Hash for Plane {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.point.hash(state);
        self.normal.hash(state);
        self.texture_scalar.hash(state);
        self.material.hash(state);
    }
}
