//! Small 3D/4D vector and matrix math.
//!
//! Plain `Copy` value types over `f32` with pure, stateless operations:
//! [`Vec3`], [`Vec4`], [`Mat3`] and [`Mat4`]. Matrices are stored row-major
//! as rows of vectors. Equality for geometry is approximate, see
//! [`EPSILON`]; the derived `PartialEq` stays exact.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod mat3;
pub mod mat4;
pub mod vec3;
pub mod vec4;

pub use mat3::Mat3;
pub use mat4::Mat4;
pub use vec3::Vec3;
pub use vec4::Vec4;

/// Absolute per-component tolerance used by the `approx_eq` methods.
pub const EPSILON: f32 = 1e-9;

/// Whether `a` and `b` differ by no more than [`EPSILON`].
///
/// NaN is never approximately equal to anything.
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}
