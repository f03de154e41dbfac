use super::Vec3;

/// 3x3 matrix stored as columns, just enough for Cramer's rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    columns: [Vec3; 3],
}

impl Mat3 {
    pub fn from_columns(c0: Vec3, c1: Vec3, c2: Vec3) -> Mat3 {
        Mat3 {
            columns: [c0, c1, c2],
        }
    }

    pub fn determinant(&self) -> f64 {
        // scalar triple product of the columns
        let [c0, c1, c2] = self.columns;
        c0.dot(c1.cross(c2))
    }

    /// Returns a copy of the matrix with column `index` replaced by `column`.
    pub fn with_column(&self, index: usize, column: Vec3) -> Mat3 {
        let mut columns = self.columns;
        columns[index] = column;
        Mat3 { columns }
    }

    /// Solves `self * x = rhs`, `None` when the matrix is singular.
    pub fn solve(&self, rhs: Vec3) -> Option<Vec3> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Vec3::new(
            self.with_column(0, rhs).determinant() / det,
            self.with_column(1, rhs).determinant() / det,
            self.with_column(2, rhs).determinant() / det,
        ))
    }
}
