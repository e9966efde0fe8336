//! 4×4 matrices.

use std::fmt;

use crate::vec4::Vec4;

/// A row-major 4×4 matrix of `f32`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// First row.
    pub x_row: Vec4,
    /// Second row.
    pub y_row: Vec4,
    /// Third row.
    pub z_row: Vec4,
    /// Fourth row.
    pub w_row: Vec4,
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::from_rows(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    );

    /// Build a matrix from its rows.
    pub const fn from_rows(x_row: Vec4, y_row: Vec4, z_row: Vec4, w_row: Vec4) -> Self {
        Self {
            x_row,
            y_row,
            z_row,
            w_row,
        }
    }

    /// Rows in order.
    pub fn rows(&self) -> [Vec4; 4] {
        [self.x_row, self.y_row, self.z_row, self.w_row]
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        let [x, y, z, w] = self.rows();
        Self::from_rows(
            Vec4::new(x.x, y.x, z.x, w.x),
            Vec4::new(x.y, y.y, z.y, w.y),
            Vec4::new(x.z, y.z, z.z, w.z),
            Vec4::new(x.w, y.w, z.w, w.w),
        )
    }

    /// Matrix-vector product `self * v`.
    pub fn mul_vec(&self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.x_row.dot(v),
            self.y_row.dot(v),
            self.z_row.dot(v),
            self.w_row.dot(v),
        )
    }

    /// Whether every element is within [`EPSILON`](crate::EPSILON).
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.rows()
            .iter()
            .zip(other.rows().iter())
            .all(|(a, b)| a.approx_eq(b))
    }
}

impl fmt::Display for Mat4 {
    /// One row per line, tab-indented, inside brackets.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for row in self.rows() {
            writeln!(f, "\t{row}")?;
        }
        write!(f, "]")
    }
}
