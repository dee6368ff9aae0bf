//! The handful of operations the pipeline needs beyond what [`vek`]
//! provides directly: the scalar 2D cross product, the view matrix, and a
//! fallible 3×3 inverse built from the classical adjugate.

use thiserror::Error;
use vek::{Mat3, Mat4, Vec2, Vec3};

#[derive(Debug, Error, PartialEq)]
pub enum MathError {
    #[error("matrix is singular and cannot be inverted")]
    SingularMatrix,
}

/// Scalar 2D cross product, `a.x * b.y - a.y * b.x`.
#[inline]
pub fn cross2(a: Vec2<f32>, b: Vec2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// View matrix looking from `eye` towards `at`: `transpose(R) * T(-eye)`
/// where the rotation basis is (right, true up, back) and
/// `back = normalize(eye - at)`.
pub fn look_at(eye: Vec3<f32>, at: Vec3<f32>, up: Vec3<f32>) -> Mat4<f32> {
    let back = (eye - at).normalized();
    let right = up.cross(back).normalized();
    let true_up = back.cross(right).normalized();

    // Basis vectors as rows: already the transpose of the camera rotation.
    let rotation_transposed = Mat4::from_row_arrays([
        [right.x, right.y, right.z, 0.0],
        [true_up.x, true_up.y, true_up.z, 0.0],
        [back.x, back.y, back.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    rotation_transposed * Mat4::translation_3d(-eye)
}

/// Affine transform from a linear basis and a translation column.
pub fn affine(basis: Mat3<f32>, translation: Vec3<f32>) -> Mat4<f32> {
    let b = basis.into_row_arrays();
    Mat4::from_row_arrays([
        [b[0][0], b[0][1], b[0][2], translation.x],
        [b[1][0], b[1][1], b[1][2], translation.y],
        [b[2][0], b[2][1], b[2][2], translation.z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Upper-left 3×3 of an affine matrix.
pub fn truncated(m: Mat4<f32>) -> Mat3<f32> {
    let r = m.into_row_arrays();
    Mat3::from_row_arrays([
        [r[0][0], r[0][1], r[0][2]],
        [r[1][0], r[1][1], r[1][2]],
        [r[2][0], r[2][1], r[2][2]],
    ])
}

pub fn determinant3(m: &Mat3<f32>) -> f32 {
    let e = m.into_row_arrays();
    e[0][0] * (e[1][1] * e[2][2] - e[1][2] * e[2][1])
        - e[0][1] * (e[1][0] * e[2][2] - e[1][2] * e[2][0])
        + e[0][2] * (e[1][0] * e[2][1] - e[1][1] * e[2][0])
}

pub fn cofactor3(m: &Mat3<f32>) -> Mat3<f32> {
    let e = m.into_row_arrays();
    Mat3::from_row_arrays([
        [
            e[1][1] * e[2][2] - e[1][2] * e[2][1],
            -(e[1][0] * e[2][2] - e[1][2] * e[2][0]),
            e[1][0] * e[2][1] - e[1][1] * e[2][0],
        ],
        [
            -(e[0][1] * e[2][2] - e[0][2] * e[2][1]),
            e[0][0] * e[2][2] - e[0][2] * e[2][0],
            -(e[0][0] * e[2][1] - e[0][1] * e[2][0]),
        ],
        [
            e[0][1] * e[1][2] - e[0][2] * e[1][1],
            -(e[0][0] * e[1][2] - e[0][2] * e[1][0]),
            e[0][0] * e[1][1] - e[0][1] * e[1][0],
        ],
    ])
}

pub fn adjugate3(m: &Mat3<f32>) -> Mat3<f32> {
    cofactor3(m).transposed()
}

/// Inverse via the adjugate. Fails on singular input.
pub fn invert3(m: &Mat3<f32>) -> Result<Mat3<f32>, MathError> {
    let det = determinant3(m);
    if det == 0.0 {
        return Err(MathError::SingularMatrix);
    }
    Ok(adjugate3(m) * (1.0 / det))
}
