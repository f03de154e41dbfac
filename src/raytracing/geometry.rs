mod disc;
mod model;
mod plane;
mod sphere;
mod torus;
mod triangle;

pub use disc::Disc;
pub use model::load_model;
pub use plane::Plane;
pub use sphere::Sphere;
pub use torus::Torus;
pub use triangle::Triangle;

use super::error::{GeometryError, Result};
use super::{Hit, Normal3, Point3, Ray};

/// The closed set of primitives a `World` can hold.
#[derive(Debug, Clone, PartialEq, Hash)]
pub enum Geometry {
    Disc(Disc),
    Plane(Plane),
    Sphere(Sphere),
    Torus(Torus),
    Triangle(Triangle),
}

impl Geometry {
    /// Nearest intersection of the ray with this primitive, if any.
    pub fn hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        match self {
            Geometry::Disc(disc) => disc.hit(ray),
            Geometry::Plane(plane) => plane.hit(ray),
            Geometry::Sphere(sphere) => sphere.hit(ray),
            Geometry::Torus(torus) => torus.hit(ray),
            Geometry::Triangle(triangle) => triangle.hit(ray),
        }
    }
}

impl From<Disc> for Geometry {
    fn from(value: Disc) -> Self {
        Geometry::Disc(value)
    }
}

impl From<Plane> for Geometry {
    fn from(value: Plane) -> Self {
        Geometry::Plane(value)
    }
}

impl From<Sphere> for Geometry {
    fn from(value: Sphere) -> Self {
        Geometry::Sphere(value)
    }
}

impl From<Torus> for Geometry {
    fn from(value: Torus) -> Self {
        Geometry::Torus(value)
    }
}

impl From<Triangle> for Geometry {
    fn from(value: Triangle) -> Self {
        Geometry::Triangle(value)
    }
}

/// Parameter at which the ray crosses the plane through `point` with normal
/// `normal`. A ray parallel to the plane never crosses it.
fn plane_parameter(point: Point3, normal: Normal3, ray: &Ray) -> Option<f64> {
    let denominator = ray.direction.dot(normal);
    if denominator == 0.0 {
        return None;
    }
    let t = (point - ray.origin).dot(normal) / denominator;
    t.is_finite().then_some(t)
}

fn check_radius(radius: f64) -> Result<f64> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(GeometryError::InvalidRadius(radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raytracing::{Material, Vec3};
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(geometry: &Geometry) -> u64 {
        let mut hasher = DefaultHasher::new();
        geometry.hash(&mut hasher);
        hasher.finish()
    }

    fn samples() -> Vec<Geometry> {
        let material = Material::default();
        vec![
            Disc::new(Vec3::zero(), Vec3::z_axis(), 1.0, material)
                .unwrap()
                .into(),
            Plane::new(Vec3::zero(), Vec3::y_axis(), material, 1)
                .unwrap()
                .into(),
            Sphere::new(Vec3::zero(), 1.0, material).unwrap().into(),
            Torus::new(2.0, 0.5, material).unwrap().into(),
            Triangle::new(Vec3::zero(), Vec3::x_axis(), Vec3::y_axis(), material)
                .unwrap()
                .into(),
        ]
    }

    #[test]
    fn equal_parameters_give_equal_geometry() {
        for (a, b) in samples().iter().zip(samples().iter()) {
            assert_eq!(a, b);
            assert_eq!(hash_of(a), hash_of(b));
        }
    }

    #[test]
    fn different_variants_are_not_equal() {
        let samples = samples();
        for (i, a) in samples.iter().enumerate() {
            for b in samples.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn material_is_part_of_equality() {
        let red = Material::lambert(Vec3::new(1.0, 0.0, 0.0));
        let a = Sphere::new(Vec3::zero(), 1.0, red).unwrap();
        let b = Sphere::new(Vec3::zero(), 1.0, Material::default()).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, Sphere::new(Vec3::zero(), 1.0, red).unwrap());
    }

    #[test]
    fn parallel_ray_never_crosses_plane() {
        let ray = Ray::new(Vec3::y_axis(), Vec3::x_axis());
        assert!(plane_parameter(Vec3::zero(), Vec3::y_axis(), &ray).is_none());
    }

    #[test]
    fn radius_must_be_positive() {
        assert_eq!(check_radius(0.0), Err(GeometryError::InvalidRadius(0.0)));
        assert!(check_radius(-1.0).is_err());
        assert!(check_radius(f64::NAN).is_err());
        assert!(check_radius(f64::INFINITY).is_err());
        assert_eq!(check_radius(0.5), Ok(0.5));
    }
}
