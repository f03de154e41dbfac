use super::Vec3;

/// Row-major affine transformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    rows: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::identity()
    }
}

impl Mat4 {
    pub fn identity() -> Mat4 {
        Mat4 {
            rows: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn scale(factor: f64) -> Mat4 {
        let mut m = Mat4::identity();
        for i in 0..3 {
            m.rows[i][i] = factor;
        }
        m
    }

    pub fn translate(offset: Vec3) -> Mat4 {
        let mut m = Mat4::identity();
        m.rows[0][3] = offset.x;
        m.rows[1][3] = offset.y;
        m.rows[2][3] = offset.z;
        m
    }

    /// Rotation of `angle` radians around `axis` (right handed).
    pub fn rotate(axis: Vec3, angle: f64) -> Mat4 {
        // https://en.wikipedia.org/wiki/Rotation_matrix#Rotation_matrix_from_axis_and_angle
        let u = axis.normalize();
        let (sin_t, cos_t) = angle.sin_cos();
        let k = 1.0 - cos_t;
        Mat4 {
            rows: [
                [
                    cos_t + u.x * u.x * k,
                    u.x * u.y * k - u.z * sin_t,
                    u.x * u.z * k + u.y * sin_t,
                    0.0,
                ],
                [
                    u.y * u.x * k + u.z * sin_t,
                    cos_t + u.y * u.y * k,
                    u.y * u.z * k - u.x * sin_t,
                    0.0,
                ],
                [
                    u.z * u.x * k - u.y * sin_t,
                    u.z * u.y * k + u.x * sin_t,
                    cos_t + u.z * u.z * k,
                    0.0,
                ],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Composes the two transformations: `self` is applied first, then `other`.
    pub fn then(&self, other: &Mat4) -> Mat4 {
        // other * self
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (0..4).map(|k| other.rows[i][k] * self.rows[k][j]).sum();
            }
        }
        Mat4 { rows }
    }

    pub fn apply_point(&self, p: Vec3) -> Vec3 {
        let r = &self.rows;
        let x = r[0][0] * p.x + r[0][1] * p.y + r[0][2] * p.z + r[0][3];
        let y = r[1][0] * p.x + r[1][1] * p.y + r[1][2] * p.z + r[1][3];
        let z = r[2][0] * p.x + r[2][1] * p.y + r[2][2] * p.z + r[2][3];
        let w = r[3][0] * p.x + r[3][1] * p.y + r[3][2] * p.z + r[3][3];
        Vec3::new(x / w, y / w, z / w)
    }

    /// Applies only the linear part, translation does not move directions.
    pub fn apply_vector(&self, v: Vec3) -> Vec3 {
        let r = &self.rows;
        Vec3::new(
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        )
    }
}
