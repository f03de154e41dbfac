use std::hash::{Hash, Hasher};

use super::error::{GeometryError, Result};
use super::{Color, Point3, Ray, Vector3, World, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Hash)]
pub struct PointLight {
    color: Color,
    position: Point3,
    casts_shadow: bool,
}

/// A light infinitely far away. `direction` is the direction the light
/// travels in, so it points away from the light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    color: Color,
    direction: Vector3,
    casts_shadow: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Hash)]
pub enum Light {
    Point(PointLight),
    Directional(DirectionalLight),
}

/// Shadow rays start `EPSILON` towards the light so they do not hit the
/// surface they leave from.
fn shadow_ray(point: Point3, towards_light: Vector3) -> Ray {
    Ray::new(point + towards_light.normalize() * EPSILON, towards_light)
}

impl PointLight {
    pub fn new(color: Color, position: Point3, casts_shadow: bool) -> PointLight {
        PointLight {
            color,
            position,
            casts_shadow,
        }
    }

    /// Vector from `point` to the light, its length is the distance.
    pub fn direction_from(&self, point: Point3) -> Vector3 {
        self.position - point
    }

    pub fn illuminates(&self, point: Point3, world: &World) -> bool {
        if !self.casts_shadow {
            return true;
        }
        let direction = self.direction_from(point);
        if direction.is_zero() {
            return true;
        }
        let ray = shadow_ray(point, direction);
        // parameter at which the shadow ray reaches the light
        let tl = self.position.distance(ray.origin) / direction.len();
        match world.hit(&ray) {
            Some(hit) => !(EPSILON < hit.t && hit.t < tl),
            None => true,
        }
    }
}

impl DirectionalLight {
    pub fn new(color: Color, direction: Vector3, casts_shadow: bool) -> Result<DirectionalLight> {
        if direction.is_zero() {
            return Err(GeometryError::ZeroDirection);
        }
        Ok(DirectionalLight {
            color,
            direction,
            casts_shadow,
        })
    }

    /// Towards the light, independent of the point.
    pub fn direction_from(&self, _point: Point3) -> Vector3 {
        -self.direction
    }

    pub fn illuminates(&self, point: Point3, world: &World) -> bool {
        if !self.casts_shadow {
            return true;
        }
        world
            .hit(&shadow_ray(point, self.direction_from(point)))
            .is_none()
    }
}

impl Hash for DirectionalLight {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color.hash(state);
        self.direction.hash(state);
        self.casts_shadow.hash(state);
    }
}

impl Light {
    pub fn color(&self) -> Color {
        match self {
            Light::Point(light) => light.color,
            Light::Directional(light) => light.color,
        }
    }

    pub fn casts_shadow(&self) -> bool {
        match self {
            Light::Point(light) => light.casts_shadow,
            Light::Directional(light) => light.casts_shadow,
        }
    }

    /// Direction from `point` towards the light, not normalized.
    pub fn direction_from(&self, point: Point3) -> Vector3 {
        match self {
            Light::Point(light) => light.direction_from(point),
            Light::Directional(light) => light.direction_from(point),
        }
    }

    /// Whether nothing in `world` stands between `point` and the light.
    pub fn illuminates(&self, point: Point3, world: &World) -> bool {
        match self {
            Light::Point(light) => light.illuminates(point, world),
            Light::Directional(light) => light.illuminates(point, world),
        }
    }
}

impl From<PointLight> for Light {
    fn from(value: PointLight) -> Self {
        Light::Point(value)
    }
}

impl From<DirectionalLight> for Light {
    fn from(value: DirectionalLight) -> Self {
        Light::Directional(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raytracing::{Material, Plane, Sphere, Torus, Vec3};
    use approx::assert_abs_diff_eq;

    fn sphere_at(center: Vec3) -> Sphere {
        Sphere::new(center, 1.0, Material::default()).unwrap()
    }

    fn world_with(geometry: impl IntoIterator<Item = Sphere>) -> World {
        let mut world = World::new(Vec3::zero(), Vec3::zero());
        for sphere in geometry {
            world.add_geometry(sphere);
        }
        world
    }

    #[test]
    fn point_light_direction_encodes_distance() {
        let light = PointLight::new(Vec3::one(), Vec3::new(0.0, 10.0, 0.0), true);
        let direction = light.direction_from(Vec3::zero());
        assert_eq!(direction, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn directional_light_points_back_to_source() {
        let light = DirectionalLight::new(Vec3::one(), Vec3::new(1.0, -2.0, 0.0), true).unwrap();
        assert_eq!(light.direction_from(Vec3::one()), Vec3::new(-1.0, 2.0, 0.0));
        assert_eq!(light.direction_from(Vec3::zero()), Vec3::new(-1.0, 2.0, 0.0));
    }

    #[test]
    fn point_light_blocked_by_object_in_between() {
        let light = PointLight::new(Vec3::one(), Vec3::new(0.0, 10.0, 0.0), true);
        let world = world_with([sphere_at(Vec3::new(0.0, 5.0, 0.0))]);
        assert!(!light.illuminates(Vec3::zero(), &world));
    }

    #[test]
    fn point_light_ignores_object_behind_light() {
        let light = PointLight::new(Vec3::one(), Vec3::new(0.0, 10.0, 0.0), true);
        let world = world_with([sphere_at(Vec3::new(0.0, 15.0, 0.0))]);
        assert!(light.illuminates(Vec3::zero(), &world));
    }

    #[test]
    fn point_light_with_empty_world() {
        let light = PointLight::new(Vec3::one(), Vec3::new(0.0, 10.0, 0.0), true);
        assert!(light.illuminates(Vec3::zero(), &world_with([])));
    }

    #[test]
    fn point_light_without_shadows_ignores_occluders() {
        let light = PointLight::new(Vec3::one(), Vec3::new(0.0, 10.0, 0.0), false);
        let world = world_with([sphere_at(Vec3::new(0.0, 5.0, 0.0))]);
        assert!(light.illuminates(Vec3::zero(), &world));
    }

    #[test]
    fn surface_does_not_shadow_itself() {
        // a point on the ground plane lit from above
        let mut world = World::new(Vec3::zero(), Vec3::zero());
        world.add_geometry(Plane::new(Vec3::zero(), Vec3::y_axis(), Material::default(), 1).unwrap());
        let point = Light::from(PointLight::new(Vec3::one(), Vec3::new(1.0, 4.0, 2.0), true));
        let directional: Light =
            DirectionalLight::new(Vec3::one(), Vec3::new(0.3, -1.0, 0.1), true)
                .unwrap()
                .into();
        let on_plane = Vec3::new(3.0, 0.0, -2.0);
        assert!(point.illuminates(on_plane, &world));
        assert!(directional.illuminates(on_plane, &world));
    }

    #[test]
    fn light_right_above_torus_casts_no_shadow() {
        // the shadow ray direction is only 5e-4 long
        let mut world = World::new(Vec3::zero(), Vec3::zero());
        world.add_geometry(Torus::new(2.0, 0.5, Material::default()).unwrap());
        let light = PointLight::new(Vec3::one(), Vec3::new(0.0, 2.0, 0.5005), true);
        assert!(light.illuminates(Vec3::new(0.0, 2.0, 0.5), &world));
        // and the torus still blocks a light on the other side of the tube
        let below = PointLight::new(Vec3::one(), Vec3::new(0.0, 2.0, -0.5005), true);
        assert!(!below.illuminates(Vec3::new(0.0, 2.0, 0.5), &world));
    }

    #[test]
    fn directional_light_blocked_by_any_object() {
        let light = DirectionalLight::new(Vec3::one(), -Vec3::y_axis(), true).unwrap();
        let world = world_with([sphere_at(Vec3::new(0.0, 100.0, 0.0))]);
        assert!(!light.illuminates(Vec3::zero(), &world));
        assert!(light.illuminates(Vec3::new(5.0, 0.0, 0.0), &world));
    }

    #[test]
    fn directional_light_without_shadows_always_illuminates() {
        let light = DirectionalLight::new(Vec3::one(), -Vec3::y_axis(), false).unwrap();
        let world = world_with([
            sphere_at(Vec3::new(0.0, 3.0, 0.0)),
            sphere_at(Vec3::new(0.0, 100.0, 0.0)),
        ]);
        assert!(light.illuminates(Vec3::zero(), &world));
        assert!(light.illuminates(Vec3::new(0.0, 3.0, 0.0), &world));
    }

    #[test]
    fn lights_compare_by_value() {
        let light = Light::from(PointLight::new(Vec3::one(), Vec3::y_axis(), true));
        assert_eq!(light, Light::from(PointLight::new(Vec3::one(), Vec3::y_axis(), true)));
        assert_ne!(light, Light::from(PointLight::new(Vec3::one(), Vec3::y_axis(), false)));
        assert!(light.casts_shadow());
        assert_eq!(light.color(), Vec3::one());
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert_eq!(
            DirectionalLight::new(Vec3::one(), Vec3::zero(), true),
            Err(GeometryError::ZeroDirection)
        );
    }

    #[test]
    fn shadow_ray_starts_off_the_surface() {
        let ray = shadow_ray(Vec3::zero(), Vec3::new(0.0, 7.0, 0.0));
        assert_abs_diff_eq!(ray.origin.y, EPSILON, epsilon = 1e-15);
        assert_eq!(ray.direction, Vec3::new(0.0, 7.0, 0.0));
    }
}
