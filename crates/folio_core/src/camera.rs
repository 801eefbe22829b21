//! Projection camera
//!
//! A small 3D camera that turns rotations of the drawing plane into a 2D
//! projective [`Mat3`]. The drawing plane sits at `z = 0` and the camera looks
//! at it along `+z` from its location.
//!
//! Locations are given in camera units of [`CAMERA_UNIT`] device pixels, so the
//! default location `(0, 0, -8)` puts the eye 576 px in front of the plane.
//! Rotations are in degrees and accumulate like a matrix stack: each call
//! applies before the rotations already on the camera.
//!
//! # Example
//!
//! ```
//! use folio_core::{Camera, Mat3};
//!
//! let mut camera = Camera::new();
//! let mut matrix = Mat3::IDENTITY;
//!
//! camera.save();
//! camera.set_location(0.0, 0.0, -18.0);
//! camera.rotate_x(-45.0);
//! camera.get_matrix(&mut matrix);
//! camera.restore();
//!
//! assert!(matrix.has_perspective());
//! ```

use smallvec::SmallVec;

use crate::geometry::Vec3;
use crate::matrix::Mat3;

/// Device pixels per camera unit
pub const CAMERA_UNIT: f32 = 72.0;

/// Default camera location on the z axis, in camera units
pub const DEFAULT_CAMERA_Z: f32 = -8.0;

/// Row-major 3×3 rotation
type Rotation = [[f32; 3]; 3];

const IDENTITY_ROTATION: Rotation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Camera projecting a rotated plane onto the screen
#[derive(Clone, Debug)]
pub struct Camera {
    /// Eye position in device pixels
    location: Vec3,
    rotation: Rotation,
    saved: SmallVec<[Rotation; 4]>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            location: Vec3::new(0.0, 0.0, DEFAULT_CAMERA_Z * CAMERA_UNIT),
            rotation: IDENTITY_ROTATION,
            saved: SmallVec::new(),
        }
    }

    /// Move the eye, in camera units. `z` must be non-zero.
    pub fn set_location(&mut self, x: f32, y: f32, z: f32) {
        self.location = Vec3::new(x, y, z).scale(CAMERA_UNIT);
    }

    /// Eye position in camera units
    pub fn location(&self) -> Vec3 {
        Vec3::new(
            self.location.x / CAMERA_UNIT,
            self.location.y / CAMERA_UNIT,
            self.location.z / CAMERA_UNIT,
        )
    }

    /// Push the current rotation
    pub fn save(&mut self) {
        self.saved.push(self.rotation);
    }

    /// Pop the last saved rotation. Unbalanced calls reset to no rotation.
    pub fn restore(&mut self) {
        self.rotation = self.saved.pop().unwrap_or(IDENTITY_ROTATION);
    }

    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    pub fn rotate_x(&mut self, degrees: f32) {
        let (s, c) = degrees.to_radians().sin_cos();
        self.pre_rotate([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]);
    }

    pub fn rotate_y(&mut self, degrees: f32) {
        let (s, c) = degrees.to_radians().sin_cos();
        self.pre_rotate([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]);
    }

    pub fn rotate_z(&mut self, degrees: f32) {
        let (s, c) = degrees.to_radians().sin_cos();
        self.pre_rotate([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]);
    }

    fn pre_rotate(&mut self, r: Rotation) {
        let m = self.rotation;
        let mut out = [[0.0f32; 3]; 3];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = m[row][0] * r[0][col] + m[row][1] * r[1][col] + m[row][2] * r[2][col];
            }
        }
        self.rotation = out;
    }

    fn rotate(&self, v: Vec3) -> Vec3 {
        let r = &self.rotation;
        Vec3::new(
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        )
    }

    /// Write the projection of the rotated plane into `matrix`.
    ///
    /// The plane's x axis is `(1, 0, 0)` and its y axis `(0, -1, 0)` in camera
    /// space (camera space is y-up, the screen is y-down). The eye looks along
    /// `+z` with the zenith at `-y`, its observer sitting at `(0, 0, z)`.
    pub fn get_matrix(&self, matrix: &mut Mat3) {
        let u = self.rotate(Vec3::new(1.0, 0.0, 0.0));
        let v = self.rotate(Vec3::new(0.0, -1.0, 0.0));

        let axis = Vec3::new(0.0, 0.0, 1.0);
        let zenith = Vec3::new(0.0, -1.0, 0.0);
        let cross = axis.cross(zenith);

        let observer_z = self.location.z;
        let row0 = cross.scale(-observer_z);
        let row1 = zenith.scale(-observer_z);
        let row2 = axis;

        let diff = Vec3::ZERO - self.location;
        let dot = diff.dot(row2);

        let m = &mut matrix.m;
        m[Mat3::SCALE_X] = u.dot(row0) / dot;
        m[Mat3::SKEW_Y] = u.dot(row1) / dot;
        m[Mat3::PERSP_0] = u.dot(row2) / dot;

        m[Mat3::SKEW_X] = v.dot(row0) / dot;
        m[Mat3::SCALE_Y] = v.dot(row1) / dot;
        m[Mat3::PERSP_1] = v.dot(row2) / dot;

        m[Mat3::TRANS_X] = diff.dot(row0) / dot;
        m[Mat3::TRANS_Y] = diff.dot(row1) / dot;
        m[Mat3::PERSP_2] = 1.0;
    }

    /// Convenience wrapper over [`Camera::get_matrix`]
    pub fn matrix(&self) -> Mat3 {
        let mut matrix = Mat3::IDENTITY;
        self.get_matrix(&mut matrix);
        matrix
    }
}
