//! Hinged segment projection shared by the fold and shades effects
//!
//! A segment is a horizontal band `[top, bottom]` of the content. It swings
//! around its bottom edge: fully open (flat) at step 1, edge-on at step 0.

use folio_core::{Camera, DrawContext, Mat3, Rect};

use crate::host::HostSurface;

/// Camera and scratch matrix for projecting one segment at a time
#[derive(Clone, Debug)]
pub struct Hinge {
    camera: Camera,
    matrix: Mat3,
    /// Eye distance in camera units
    camera_distance: f32,
    /// Rotation at step 0, in degrees
    max_rotation: f32,
}

impl Hinge {
    pub fn new(camera_distance: f32, max_rotation: f32) -> Self {
        Self {
            camera: Camera::new(),
            matrix: Mat3::IDENTITY,
            camera_distance,
            max_rotation,
        }
    }

    pub fn camera_distance(&self) -> f32 {
        self.camera_distance
    }

    pub fn max_rotation(&self) -> f32 {
        self.max_rotation
    }

    pub(crate) fn set_camera_distance(&mut self, distance: f32) {
        self.camera_distance = distance;
    }

    pub(crate) fn set_max_rotation(&mut self, degrees: f32) {
        self.max_rotation = degrees;
    }

    /// Projection for a segment hinged at `bottom` on content `width` wide
    pub fn segment_matrix(&mut self, width: f32, bottom: f32, step: f32) -> Mat3 {
        self.camera.save();
        self.camera.set_location(0.0, 0.0, -self.camera_distance);
        self.camera.rotate_x(-self.max_rotation * (1.0 - step));
        self.camera.get_matrix(&mut self.matrix);
        self.camera.restore();

        self.matrix.pre_translate(-width / 2.0, -bottom);
        self.matrix.post_translate(width / 2.0, bottom);
        self.matrix
    }

    /// Draw the content band `[top, bottom]` swung to `step`
    pub fn draw_segment(
        &mut self,
        ctx: &mut dyn DrawContext,
        surface: &dyn HostSurface,
        width: f32,
        top: f32,
        bottom: f32,
        step: f32,
    ) {
        let matrix = self.segment_matrix(width, bottom, step);
        let count = ctx.save();
        ctx.concat(&matrix);
        ctx.clip_rect(Rect::from_ltrb(0.0, top, width, bottom));
        surface.commit_draw(ctx);
        ctx.restore_to_count(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Point;

    #[test]
    fn test_open_segment_is_flat() {
        let mut hinge = Hinge::new(18.0, 89.0);
        assert!(hinge.segment_matrix(100.0, 40.0, 1.0).is_identity());
    }

    #[test]
    fn test_hinge_edge_stays_put() {
        let mut hinge = Hinge::new(18.0, 89.0);
        let m = hinge.segment_matrix(100.0, 40.0, 0.3);
        assert!(m.has_perspective());
        for x in [0.0, 50.0, 100.0] {
            let p = m.map_point(Point::new(x, 40.0));
            assert!((p.x - x).abs() < 1e-2, "x {x} -> {}", p.x);
            assert!((p.y - 40.0).abs() < 1e-2);
        }
    }

    #[test]
    fn test_closing_segment_shrinks_towards_hinge() {
        let mut hinge = Hinge::new(18.0, 89.0);
        let open = hinge.segment_matrix(100.0, 40.0, 0.9).map_point(Point::new(50.0, 20.0));
        let closed = hinge.segment_matrix(100.0, 40.0, 0.1).map_point(Point::new(50.0, 20.0));
        assert!(open.y < closed.y);
        assert!(closed.y <= 40.0);
    }
}
