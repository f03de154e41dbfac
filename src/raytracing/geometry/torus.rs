use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

use super::check_radius;
use crate::raytracing::error::Result;
use crate::raytracing::math::solvers::solve_quartic;
use crate::raytracing::math::vec3::hash_f64;
use crate::raytracing::{Hit, Material, Normal3, Point3, Ray, TexCoord2, Vec3, EPSILON};

/// A torus centered at the origin, revolving around the z axis.
///
/// `radius` is the distance from the center of the hole to the center of the
/// tube, `tube_radius` the radius of the tube itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Torus {
    radius: f64,
    tube_radius: f64,
    material: Material,
}

impl Torus {
    pub fn new(radius: f64, tube_radius: f64, material: Material) -> Result<Torus> {
        Ok(Torus {
            radius: check_radius(radius)?,
            tube_radius: check_radius(tube_radius)?,
            material,
        })
    }

    pub fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let t = self.intersections(ray).into_iter().find(|&t| t > EPSILON)?;
        let point = ray.at(t);
        Some(Hit::new(
            t,
            *ray,
            self.normal_at(point),
            self.tex_coord(point),
            &self.material,
        ))
    }

    /// All real parameters where the ray meets the surface, ascending.
    ///
    /// Substitutes the ray into `(x² + y² + z² + R² - r²)² = 4R²(x² + y²)`.
    /// The quartic is solved along the unit direction, its leading
    /// coefficient is then one whatever the length of `ray.direction`.
    fn intersections(&self, ray: &Ray) -> Vec<f64> {
        let length = ray.direction.len();
        if length == 0.0 {
            return Vec::new();
        }
        let (o, d) = (ray.origin, ray.direction / length);
        let r2 = self.radius * self.radius;

        let a = 4.0 * r2 * (d.x * d.x + d.y * d.y);
        let b = 8.0 * r2 * (o.x * d.x + o.y * d.y);
        let c = 4.0 * r2 * (o.x * o.x + o.y * o.y);
        let dmag = d.squared_len();
        let e = 2.0 * o.dot(d);
        let f = o.squared_len() + r2 - self.tube_radius * self.tube_radius;

        solve_quartic(
            dmag * dmag,
            2.0 * dmag * e,
            2.0 * dmag * f + e * e - a,
            2.0 * e * f - b,
            f * f - c,
        )
        .into_iter()
        .map(|distance| distance / length)
        .collect()
    }

    /// Points away from the ring running through the middle of the tube.
    pub fn normal_at(&self, point: Point3) -> Normal3 {
        let planar = Vec3::new(point.x, point.y, 0.0);
        if planar.is_zero() {
            // only reachable when the tube swallows the axis
            return Vec3::new(0.0, 0.0, point.z.signum());
        }
        let ring = planar.normalize() * self.radius;
        (point - ring).normalize()
    }

    fn tex_coord(&self, point: Point3) -> TexCoord2 {
        let phi = (point.z / self.tube_radius).clamp(-1.0, 1.0).asin();
        let inner = self.radius > (point.x * point.x + point.y * point.y).sqrt();
        let v = if inner {
            if phi > 0.0 {
                1.0 - phi / (2.0 * PI)
            } else {
                -phi / (2.0 * PI)
            }
        } else {
            (PI + phi) / (2.0 * PI)
        };
        let u = point.x.atan2(point.y) / (2.0 * PI);
        TexCoord2::new(u, v)
    }
}

impl Hash for Torus {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.radius, state);
        hash_f64(self.tube_radius, state);
        self.material.hash(state);
    }
}
