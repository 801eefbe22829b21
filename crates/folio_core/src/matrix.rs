//! 3×3 projective matrix, the result of a camera projection
//!
//! Points map as column vectors, so `a.concat(&b)` applies `b` first.

use crate::geometry::{Point, Rect};

/// 3×3 projective matrix (row-major)
///
/// ```text
/// | scale_x  skew_x   trans_x |
/// | skew_y   scale_y  trans_y |
/// | persp_0  persp_1  persp_2 |
/// ```
///
/// The bottom row is what a camera projection fills in; for purely affine
/// matrices it stays `[0, 0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    pub m: [f32; 9],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    pub const SCALE_X: usize = 0;
    pub const SKEW_X: usize = 1;
    pub const TRANS_X: usize = 2;
    pub const SKEW_Y: usize = 3;
    pub const SCALE_Y: usize = 4;
    pub const TRANS_Y: usize = 5;
    pub const PERSP_0: usize = 6;
    pub const PERSP_1: usize = 7;
    pub const PERSP_2: usize = 8;

    pub const IDENTITY: Mat3 = Mat3 {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    pub const fn from_rows(m: [f32; 9]) -> Self {
        Self { m }
    }

    pub fn translation(dx: f32, dy: f32) -> Self {
        Self {
            m: [1.0, 0.0, dx, 0.0, 1.0, dy, 0.0, 0.0, 1.0],
        }
    }

    pub fn is_identity(&self) -> bool {
        self.m == Self::IDENTITY.m
    }

    pub fn has_perspective(&self) -> bool {
        self.m[Self::PERSP_0] != 0.0 || self.m[Self::PERSP_1] != 0.0 || self.m[Self::PERSP_2] != 1.0
    }

    /// Element-wise comparison within `epsilon`
    pub fn approx_eq(&self, other: &Mat3, epsilon: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    /// Matrix product `self * other`: the result applies `other` first
    pub fn concat(&self, other: &Mat3) -> Mat3 {
        let a = &self.m;
        let b = &other.m;
        let mut out = [0.0f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Mat3 { m: out }
    }

    /// `self = self * T(dx, dy)`: the translation runs before the existing matrix
    pub fn pre_translate(&mut self, dx: f32, dy: f32) {
        *self = self.concat(&Mat3::translation(dx, dy));
    }

    /// `self = T(dx, dy) * self`: the translation runs after the existing matrix
    pub fn post_translate(&mut self, dx: f32, dy: f32) {
        *self = Mat3::translation(dx, dy).concat(self);
    }

    /// Map a point, including the perspective divide
    pub fn map_point(&self, point: Point) -> Point {
        let m = &self.m;
        let x = m[0] * point.x + m[1] * point.y + m[2];
        let y = m[3] * point.x + m[4] * point.y + m[5];
        let w = m[6] * point.x + m[7] * point.y + m[8];
        if w == 0.0 {
            return Point::new(x, y);
        }
        Point::new(x / w, y / w)
    }

    /// Bounding box of the mapped rect corners
    pub fn map_rect(&self, rect: Rect) -> Rect {
        let [first, rest @ ..] = rect.corners().map(|corner| self.map_point(corner));
        let (mut min, mut max) = (first, first);
        for p in rest {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Rect::from_points(min, max)
    }
}
