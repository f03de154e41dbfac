use std::hash::{Hash, Hasher};
use std::ops;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A position in space.
pub type Point3 = Vec3;
/// A displacement between two points.
pub type Vector3 = Vec3;
/// A surface normal. Not renormalized on construction.
pub type Normal3 = Vec3;
/// Linear rgb color, one channel per component.
pub type Color = Vec3;

/// Hashes a float consistently with `==`: `-0.0` and `0.0` compare equal so
/// they must hash the same.
#[inline(always)]
pub(crate) fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    // -0.0 + 0.0 == +0.0
    (value + 0.0).to_bits().hash(state);
}

impl Hash for Vec3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.x, state);
        hash_f64(self.y, state);
        hash_f64(self.z, state);
    }
}

impl From<[f64; 3]> for Vec3 {
    #[inline(always)]
    fn from(value: [f64; 3]) -> Self {
        Vec3::new(value[0], value[1], value[2])
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline(always)]
    fn from(value: [f32; 3]) -> Self {
        Vec3::new(value[0] as f64, value[1] as f64, value[2] as f64)
    }
}

impl ops::Add<Vec3> for Vec3 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl ops::AddAssign<Vec3> for Vec3 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl ops::Sub<Vec3> for Vec3 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl ops::Neg for Vec3 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl ops::Mul<f64> for Vec3 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: f64) -> Self::Output {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl ops::Mul<Vec3> for Vec3 {
    type Output = Self;

    /// Component-wise product, used to modulate colors.
    #[inline(always)]
    fn mul(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl ops::Div<f64> for Vec3 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: f64) -> Self::Output {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Vec3 {
    #[inline(always)]
    pub const fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    #[inline(always)]
    pub const fn zero() -> Vec3 {
        Vec3::new(0.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn one() -> Vec3 {
        Vec3::new(1.0, 1.0, 1.0)
    }

    #[inline(always)]
    pub const fn x_axis() -> Vec3 {
        Vec3::new(1.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn y_axis() -> Vec3 {
        Vec3::new(0.0, 1.0, 0.0)
    }

    #[inline(always)]
    pub const fn z_axis() -> Vec3 {
        Vec3::new(0.0, 0.0, 1.0)
    }

    #[inline(always)]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    #[inline(always)]
    pub fn reflect(self, axis: Vec3) -> Vec3 {
        // reflect the passed vector with respect at this vector used as axis
        self - axis * 2.0 * self.dot(axis)
    }

    #[inline(always)]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline(always)]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline(always)]
    pub fn distance(self, other: Vec3) -> f64 {
        (self - other).len()
    }

    #[inline(always)]
    pub fn squared_len(self) -> f64 {
        self.dot(self)
    }

    #[inline(always)]
    pub fn len(self) -> f64 {
        self.squared_len().sqrt()
    }

    /// Scales the vector to unit length. A zero vector yields NaN components,
    /// callers that can see one must check `is_zero` first.
    #[inline(always)]
    pub fn normalize(self) -> Vec3 {
        self / self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(v: Vec3) -> u64 {
        let mut hasher = DefaultHasher::new();
        v.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(Vec3::x_axis().cross(Vec3::y_axis()), Vec3::z_axis());
        assert_eq!(Vec3::y_axis().cross(Vec3::x_axis()), -Vec3::z_axis());
    }

    #[test]
    fn normalize_gives_unit_length() {
        let v = Vec3::new(3.0, -4.0, 12.0).normalize();
        assert_abs_diff_eq!(v.len(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.x, 3.0 / 13.0, epsilon = 1e-12);
    }

    #[test]
    fn reflect_mirrors_around_axis() {
        let v = Vec3::new(1.0, -1.0, 0.0).reflect(Vec3::y_axis());
        assert_eq!(v, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn signed_zero_hashes_like_zero() {
        let a = Vec3::new(0.0, 1.0, 2.0);
        let b = Vec3::new(-0.0, 1.0, 2.0);
        assert_eq!(a, b);
        assert_eq!(hash_of(a), hash_of(b));
        assert_ne!(hash_of(a), hash_of(Vec3::new(0.0, 1.0, 2.5)));
    }
}
