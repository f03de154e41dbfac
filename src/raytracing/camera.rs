use super::texture::tangent_frame;
use super::{Point3, Ray, Vec3, Vector3};

/// Perspective pinhole camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    forward: Vector3,
    up: Vector3,
    right: Vector3,
    position: Point3,
    // screen height at distance one from the eye
    screen_height: f64,
    aspect_ratio: f64,
}

impl Camera {
    /// Creates a camera that looks at a specific point from a specific position.
    /// The point is referred to be the center of the screen, `fov` is the
    /// vertical field of view in degrees.
    pub fn look_at(position: Point3, target: Point3, up: Vector3, fov: f64) -> Self {
        let mut forward = target - position;
        if forward.is_zero() {
            forward = Vec3::z_axis();
        }
        let forward = forward.normalize();
        let mut right = up.cross(forward);
        if right.is_zero() {
            // up parallel to the view direction, any orthogonal vector will do
            right = tangent_frame(forward).0;
        }
        let right = right.normalize();
        // to get an orthonormal base, we should calculate the up vector with two perpendicular vectors
        let up = forward.cross(right).normalize();
        Self {
            forward,
            up,
            right,
            position,
            screen_height: 2.0 * (fov.to_radians() * 0.5).tan(),
            aspect_ratio: 1.0,
        }
    }

    /// Width over height of the screen, stretches the horizontal coordinate.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Create a ray from the camera position to the relative uv coordinate on his screen.
    /// Both coordinates go from -0.5 to 0.5, `v` grows upward.
    pub fn shoot_to(&self, u: f64, v: f64) -> Ray {
        let direction = self.forward
            + self.up * (v * self.screen_height)
            + self.right * (u * self.screen_height * self.aspect_ratio);
        Ray::new(self.position, direction.normalize())
    }
}

impl Default for Camera {
    /// Positioned at zero looking toward the z axis with a 90 degrees field of view.
    fn default() -> Self {
        Camera::look_at(Vec3::zero(), Vec3::z_axis(), Vec3::y_axis(), 90.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn assert_vec(actual: Vec3, expected: Vec3) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-12);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-12);
        assert_abs_diff_eq!(actual.z, expected.z, epsilon = 1e-12);
    }

    #[test]
    fn center_of_screen_looks_at_target() {
        let camera = Camera::look_at(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(1.0, 2.0, 8.0),
            Vec3::y_axis(),
            60.0,
        );
        let ray = camera.shoot_to(0.0, 0.0);
        assert_eq!(ray.origin, Vec3::new(1.0, 2.0, 3.0));
        assert_vec(ray.direction, Vec3::z_axis());
    }

    #[test]
    fn screen_edges_follow_field_of_view() {
        let camera = Camera::default();
        assert_vec(
            camera.shoot_to(0.5, 0.0).direction,
            Vec3::new(FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2),
        );
        assert_vec(
            camera.shoot_to(0.0, 0.5).direction,
            Vec3::new(0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2),
        );
    }

    #[test]
    fn aspect_ratio_widens_horizontal_span() {
        let camera = Camera::default().with_aspect_ratio(2.0);
        assert_vec(
            camera.shoot_to(0.5, 0.0).direction,
            Vec3::new(2.0, 0.0, 1.0).normalize(),
        );
        assert_vec(
            camera.shoot_to(0.0, 0.5).direction,
            Vec3::new(0.0, 1.0, 1.0).normalize(),
        );
    }

    #[test]
    fn up_parallel_to_view_still_gives_a_basis() {
        let camera = Camera::look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::zero(), Vec3::y_axis(), 45.0);
        let direction = camera.shoot_to(0.3, -0.2).direction;
        assert!(direction.x.is_finite() && direction.y.is_finite() && direction.z.is_finite());
        assert_vec(camera.shoot_to(0.0, 0.0).direction, -Vec3::y_axis());
    }
}
