//! Column-major 4x4 transforms

use crate::geometry::{Point, Vec2};

/// 4x4 transformation matrix (column-major)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [x, 0.0, 0.0, 0.0],
                [0.0, y, 0.0, 0.0],
                [0.0, 0.0, z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            cols: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn skew(sx: f32, sy: f32) -> Self {
        Self {
            cols: [
                [1.0, sy, 0.0, 0.0],
                [sx, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Build from 16 row-major scalars. The element order matches how 2D
    /// recording formats serialize transforms; storage here is column-major,
    /// so this transposes.
    #[allow(clippy::too_many_arguments)]
    pub fn from_row_major(
        mxx: f32,
        mxy: f32,
        mxz: f32,
        mxt: f32,
        myx: f32,
        myy: f32,
        myz: f32,
        myt: f32,
        mzx: f32,
        mzy: f32,
        mzz: f32,
        mzt: f32,
        mwx: f32,
        mwy: f32,
        mwz: f32,
        mwt: f32,
    ) -> Self {
        Self {
            cols: [
                [mxx, myx, mzx, mwx],
                [mxy, myy, mzy, mwy],
                [mxz, myz, mzz, mwz],
                [mxt, myt, mzt, mwt],
            ],
        }
    }

    /// Build from a row-major 3x3 2D matrix [a, b, tx, c, d, ty, px, py, w],
    /// promoting it to 4x4 with an identity Z axis.
    pub fn from_affine2d(m: &[f32; 9]) -> Self {
        Self {
            cols: [
                [m[0], m[3], 0.0, m[6]],
                [m[1], m[4], 0.0, m[7]],
                [0.0, 0.0, 1.0, 0.0],
                [m[2], m[5], 0.0, m[8]],
            ],
        }
    }

    /// Multiply two matrices
    pub fn mul(&self, other: &Mat4) -> Mat4 {
        let mut result = [[0.0f32; 4]; 4];
        for (i, result_col) in result.iter_mut().enumerate() {
            for (j, value) in result_col.iter_mut().enumerate() {
                for k in 0..4 {
                    *value += self.cols[k][j] * other.cols[i][k];
                }
            }
        }
        Mat4 { cols: result }
    }

    /// Transform a 2D point (z = 0), applying the perspective divide.
    pub fn transform_point(&self, point: Point) -> Point {
        let x = self.cols[0][0] * point.x + self.cols[1][0] * point.y + self.cols[3][0];
        let y = self.cols[0][1] * point.x + self.cols[1][1] * point.y + self.cols[3][1];
        let w = self.cols[0][3] * point.x + self.cols[1][3] * point.y + self.cols[3][3];
        if w != 0.0 && w != 1.0 {
            Point::new(x / w, y / w)
        } else {
            Point::new(x, y)
        }
    }

    /// Axis-aligned bounding rect of a transformed rect.
    pub fn transform_rect(&self, rect: &crate::geometry::Rect) -> crate::geometry::Rect {
        let corners = [
            self.transform_point(Point::new(rect.left(), rect.top())),
            self.transform_point(Point::new(rect.right(), rect.top())),
            self.transform_point(Point::new(rect.right(), rect.bottom())),
            self.transform_point(Point::new(rect.left(), rect.bottom())),
        ];
        crate::geometry::Rect::bounding(&corners).unwrap_or(crate::geometry::Rect::ZERO)
    }

    /// Whether the matrix has a perspective component.
    pub fn has_perspective(&self) -> bool {
        self.cols[0][3] != 0.0
            || self.cols[1][3] != 0.0
            || self.cols[2][3] != 0.0
            || self.cols[3][3] != 1.0
    }

    /// Per-axis scale factors: the lengths of the X and Y basis vectors.
    pub fn basis_scale(&self) -> Vec2 {
        let x = &self.cols[0];
        let y = &self.cols[1];
        Vec2::new(
            (x[0] * x[0] + x[1] * x[1] + x[2] * x[2]).sqrt(),
            (y[0] * y[0] + y[1] * y[1] + y[2] * y[2]).sqrt(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform_point() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(Mat4::IDENTITY.transform_point(p), p);
    }

    #[test]
    fn test_translation_then_scale() {
        let m = Mat4::scale(2.0, 2.0, 1.0).mul(&Mat4::translation(1.0, 2.0, 0.0));
        let p = m.transform_point(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(4.0, 6.0));
    }

    #[test]
    fn test_row_major_transposes() {
        // Row-major translation has tx/ty in the last column of its rows.
        let m = Mat4::from_row_major(
            1.0, 0.0, 0.0, 5.0, //
            0.0, 1.0, 0.0, 7.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        assert_eq!(m, Mat4::translation(5.0, 7.0, 0.0));
    }

    #[test]
    fn test_has_perspective() {
        assert!(!Mat4::IDENTITY.has_perspective());
        assert!(!Mat4::translation(1.0, 2.0, 3.0).has_perspective());

        let mut persp = Mat4::IDENTITY;
        persp.cols[2][3] = 0.002;
        assert!(persp.has_perspective());
    }

    #[test]
    fn test_basis_scale() {
        let m = Mat4::scale(3.0, 4.0, 1.0);
        assert_eq!(m.basis_scale(), Vec2::new(3.0, 4.0));

        // Rotation preserves basis lengths.
        let r = Mat4::rotation_z(std::f32::consts::FRAC_PI_4);
        let s = r.basis_scale();
        assert!((s.x - 1.0).abs() < 1e-6);
        assert!((s.y - 1.0).abs() < 1e-6);
    }
}
