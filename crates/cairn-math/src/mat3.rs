//! 3×3 matrices.

use crate::vec3::Vec3;

/// A row-major 3×3 matrix of `f32`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// First row.
    pub x_row: Vec3,
    /// Second row.
    pub y_row: Vec3,
    /// Third row.
    pub z_row: Vec3,
}

impl Mat3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::from_rows(Vec3::X, Vec3::Y, Vec3::Z);

    /// Build a matrix from its rows.
    pub const fn from_rows(x_row: Vec3, y_row: Vec3, z_row: Vec3) -> Self {
        Self {
            x_row,
            y_row,
            z_row,
        }
    }

    /// Build a matrix from its columns.
    pub fn from_columns(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self::from_rows(c0, c1, c2).transpose()
    }

    /// Column `index` (0, 1 or 2).
    ///
    /// # Panics
    ///
    /// Panics if `index > 2`.
    pub fn column(&self, index: usize) -> Vec3 {
        match index {
            0 => Vec3::new(self.x_row.x, self.y_row.x, self.z_row.x),
            1 => Vec3::new(self.x_row.y, self.y_row.y, self.z_row.y),
            2 => Vec3::new(self.x_row.z, self.y_row.z, self.z_row.z),
            _ => panic!("Mat3 column index {index} out of range"),
        }
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        Self::from_rows(self.column(0), self.column(1), self.column(2))
    }

    /// Matrix-vector product `self * v`.
    pub fn mul_vec(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.x_row.dot(v), self.y_row.dot(v), self.z_row.dot(v))
    }

    /// Gram–Schmidt orthonormalization of the columns.
    ///
    /// The first column keeps its direction; each later column has its
    /// components along all earlier ones removed before being normalized.
    /// Linearly dependent columns produce non-finite output.
    pub fn orthonormalize(&self) -> Self {
        let c0 = self.column(0);
        let c1 = self.column(1);
        let c2 = self.column(2);

        let u0 = c0;
        let u1 = c1 - c1.project(u0);
        let u2 = c2 - c2.project(u0) - c2.project(u1);

        Self::from_columns(u0.normalize(), u1.normalize(), u2.normalize())
    }

    /// Whether every element is within [`EPSILON`](crate::EPSILON).
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.x_row.approx_eq(&other.x_row)
            && self.y_row.approx_eq(&other.y_row)
            && self.z_row.approx_eq(&other.z_row)
    }
}
