//! Folio Core
//!
//! Foundational types shared by the Folio crates:
//!
//! - **Geometry**: points, sizes and rects in device pixels
//! - **Matrices**: 3×3 projective matrices
//! - **Camera**: projects rotations of the drawing plane into a matrix
//! - **Draw Context**: the save/restore, concat and clip contract animations
//!   draw through, plus a recording implementation
//!
//! # Example
//!
//! ```rust
//! use folio_core::{Camera, DrawContext, Mat3, RecordingContext, Rect};
//!
//! let mut ctx = RecordingContext::new();
//! let mut camera = Camera::new();
//! let mut matrix = Mat3::IDENTITY;
//!
//! camera.rotate_x(-30.0);
//! camera.get_matrix(&mut matrix);
//! matrix.pre_translate(-50.0, -80.0);
//! matrix.post_translate(50.0, 80.0);
//!
//! let count = ctx.save();
//! ctx.concat(&matrix);
//! ctx.clip_rect(Rect::new(0.0, 0.0, 100.0, 80.0));
//! ctx.restore_to_count(count);
//! ```

pub mod camera;
pub mod draw;
pub mod geometry;
pub mod matrix;

pub use camera::{Camera, CAMERA_UNIT, DEFAULT_CAMERA_Z};
pub use draw::{Color, DrawCommand, DrawContext, ImageId, RecordingContext};
pub use geometry::{Point, Rect, Size, Vec3};
pub use matrix::Mat3;
