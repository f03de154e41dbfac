use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

use super::check_radius;
use crate::raytracing::error::Result;
use crate::raytracing::math::solvers::solve_quadratic;
use crate::raytracing::math::vec3::hash_f64;
use crate::raytracing::{Hit, Material, Normal3, Point3, Ray, TexCoord2, EPSILON};

#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Material,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64, material: Material) -> Result<Sphere> {
        Ok(Sphere {
            center,
            radius: check_radius(radius)?,
            material,
        })
    }

    pub fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let length = ray.direction.len();
        if length == 0.0 {
            return None;
        }
        // solved along the unit direction, so the quadratic stays well scaled
        // however short the ray direction is
        let direction = ray.direction / length;
        let oc = ray.origin - self.center;
        let b = 2.0 * direction.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        // roots come sorted, the first one in front of the origin is the nearest
        let t = solve_quadratic(1.0, b, c)
            .into_iter()
            .map(|distance| distance / length)
            .find(|&t| t > EPSILON)?;
        let normal = ((ray.at(t) - self.center) / self.radius).normalize();
        Some(Hit::new(t, *ray, normal, tex_coord(normal), &self.material))
    }
}

/// Longitude and latitude of the normal, both in `[0, 1]`.
fn tex_coord(normal: Normal3) -> TexCoord2 {
    let u = 0.5 + normal.x.atan2(normal.z) / (2.0 * PI);
    let v = 0.5 - normal.y.clamp(-1.0, 1.0).asin() / PI;
    TexCoord2::new(u, v)
}

impl Hash for Sphere {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.center.hash(state);
        hash_f64(self.radius, state);
        self.material.hash(state);
    }
}
