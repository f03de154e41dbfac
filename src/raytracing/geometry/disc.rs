use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

use super::{check_radius, plane_parameter};
use crate::raytracing::error::{GeometryError, Result};
use crate::raytracing::math::vec3::hash_f64;
use crate::raytracing::texture::tangent_frame;
use crate::raytracing::{Hit, Material, Normal3, Point3, Ray, TexCoord2, Vector3, EPSILON};

/// A flat circle of `radius` around `center`, facing `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Disc {
    center: Point3,
    normal: Normal3,
    radius: f64,
    material: Material,
}

impl Disc {
    /// The normal is stored normalized.
    pub fn new(center: Point3, normal: Normal3, radius: f64, material: Material) -> Result<Disc> {
        if normal.is_zero() {
            return Err(GeometryError::ZeroNormal);
        }
        Ok(Disc {
            center,
            normal: normal.normalize(),
            radius: check_radius(radius)?,
            material,
        })
    }

    pub fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let t = plane_parameter(self.center, self.normal, ray)?;
        if t <= EPSILON {
            return None;
        }
        let offset = ray.at(t) - self.center;
        if offset.squared_len() > self.radius * self.radius {
            return None;
        }
        Some(Hit::new(
            t,
            *ray,
            self.normal,
            self.tex_coord(offset),
            &self.material,
        ))
    }

    /// Polar coordinates: `u` is the angle around the center, `v` the
    /// distance from it relative to the radius.
    fn tex_coord(&self, offset: Vector3) -> TexCoord2 {
        let (tangent, bitangent) = tangent_frame(self.normal);
        let angle = offset.dot(bitangent).atan2(offset.dot(tangent));
        TexCoord2::new(
            (angle / (2.0 * PI)).rem_euclid(1.0),
            offset.len() / self.radius,
        )
    }
}

impl Hash for Disc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.center.hash(state);
        self.normal.hash(state);
        hash_f64(self.radius, state);
        self.material.hash(state);
    }
}
