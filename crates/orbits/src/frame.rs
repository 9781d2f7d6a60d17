//! Rotation between the perifocal (orbital-plane) frame and the reference frame.

use orrery_core::vector::Vector3;

use crate::elements::OrbitalElements;

/// Rotate `v` by `angle` radians about the x axis.
pub fn rotate_x(v: &Vector3, angle: f64) -> Vector3 {
    let (s, c) = angle.sin_cos();
    [v[0], c * v[1] - s * v[2], s * v[1] + c * v[2]]
}

/// Rotate `v` by `angle` radians about the z axis.
pub fn rotate_z(v: &Vector3, angle: f64) -> Vector3 {
    let (s, c) = angle.sin_cos();
    [c * v[0] - s * v[1], s * v[0] + c * v[1], v[2]]
}

/// Precomputed `Rz(Ω)·Rx(i)·Rz(ω)`.
///
/// The perifocal x axis points at periapsis and z along the orbit normal. Applying the matrix
/// turns by ω within the plane, tilts the plane by i about the node line, then turns the node
/// line by Ω about the reference normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerifocalRotation {
    matrix: [[f64; 3]; 3],
}

impl PerifocalRotation {
    pub fn new(inclination: f64, ascending_node: f64, periapsis_arg: f64) -> Self {
        let (sin_o, cos_o) = ascending_node.sin_cos();
        let (sin_i, cos_i) = inclination.sin_cos();
        let (sin_w, cos_w) = periapsis_arg.sin_cos();

        Self {
            matrix: [
                [
                    cos_o * cos_w - sin_o * sin_w * cos_i,
                    -cos_o * sin_w - sin_o * cos_w * cos_i,
                    sin_o * sin_i,
                ],
                [
                    sin_o * cos_w + cos_o * sin_w * cos_i,
                    -sin_o * sin_w + cos_o * cos_w * cos_i,
                    -cos_o * sin_i,
                ],
                [sin_w * sin_i, cos_w * sin_i, cos_i],
            ],
        }
    }

    pub fn from_elements(elements: &OrbitalElements) -> Self {
        Self::new(
            elements.inclination,
            elements.ascending_node,
            elements.periapsis_arg,
        )
    }

    /// Perifocal → reference frame.
    pub fn to_reference(&self, v: &Vector3) -> Vector3 {
        let m = &self.matrix;
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }

    /// Reference → perifocal frame, i.e. `Rz(−ω)·Rx(−i)·Rz(−Ω)`. The matrix is orthonormal so
    /// this is the transpose.
    pub fn to_perifocal(&self, v: &Vector3) -> Vector3 {
        let m = &self.matrix;
        [
            m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2],
            m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2],
            m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2],
        ]
    }

    /// Direction of periapsis in the reference frame.
    pub fn periapsis_direction(&self) -> Vector3 {
        [self.matrix[0][0], self.matrix[1][0], self.matrix[2][0]]
    }

    /// Orbit normal (angular momentum direction) in the reference frame.
    pub fn normal(&self) -> Vector3 {
        [self.matrix[0][2], self.matrix[1][2], self.matrix[2][2]]
    }
}
