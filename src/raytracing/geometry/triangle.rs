use std::hash::{Hash, Hasher};

use crate::raytracing::error::{GeometryError, Result};
use crate::raytracing::{Hit, Mat3, Material, Normal3, Point3, Ray, TexCoord2, EPSILON};

/// A triangle with one normal per vertex, interpolated across the face.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    a: Point3,
    b: Point3,
    c: Point3,
    na: Normal3,
    nb: Normal3,
    nc: Normal3,
    material: Material,
}

impl Triangle {
    /// Flat triangle, every vertex gets the face normal `(b - a) x (c - a)`.
    pub fn new(a: Point3, b: Point3, c: Point3, material: Material) -> Result<Triangle> {
        let face = face_normal(a, b, c)?;
        Ok(Triangle {
            a,
            b,
            c,
            na: face,
            nb: face,
            nc: face,
            material,
        })
    }

    pub fn with_normals(
        a: Point3,
        b: Point3,
        c: Point3,
        na: Normal3,
        nb: Normal3,
        nc: Normal3,
        material: Material,
    ) -> Result<Triangle> {
        face_normal(a, b, c)?;
        Ok(Triangle {
            a,
            b,
            c,
            na,
            nb,
            nc,
            material,
        })
    }

    /// The hit carries the barycentric `(beta, gamma)` of the hit point as
    /// texture coordinate.
    pub fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        // a + beta (b - a) + gamma (c - a) = o + t d
        let matrix = Mat3::from_columns(self.a - self.b, self.a - self.c, ray.direction);
        let solution = matrix.solve(self.a - ray.origin)?;
        let (beta, gamma, t) = (solution.x, solution.y, solution.z);

        let inside = (0.0..=1.0).contains(&beta)
            && (0.0..=1.0).contains(&gamma)
            && beta + gamma <= 1.0;
        if t <= EPSILON || !inside {
            return None;
        }

        let alpha = 1.0 - beta - gamma;
        let mut normal = self.na * alpha + self.nb * beta + self.nc * gamma;
        if normal.is_zero() {
            // opposing vertex normals cancel out
            normal = (self.b - self.a).cross(self.c - self.a);
        }
        Some(Hit::new(
            t,
            *ray,
            normal.normalize(),
            TexCoord2::new(beta, gamma),
            &self.material,
        ))
    }
}

fn face_normal(a: Point3, b: Point3, c: Point3) -> Result<Normal3> {
    if a == b || a == c || b == c {
        return Err(GeometryError::DegenerateTriangle);
    }
    let normal = (b - a).cross(c - a);
    if normal.is_zero() {
        // collinear points span no face
        return Err(GeometryError::DegenerateTriangle);
    }
    Ok(normal.normalize())
}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for point in [self.a, self.b, self.c, self.na, self.nb, self.nc] {
            point.hash(state);
        }
        self.material.hash(state);
    }
}
