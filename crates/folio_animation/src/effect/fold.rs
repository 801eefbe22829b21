//! Fold effect
//!
//! Splits the content into horizontal segments that unfold one after another,
//! top to bottom, each swinging open around its bottom edge.

use folio_core::{DrawContext, Size};

use super::hinge::Hinge;
use crate::host::HostSurface;

/// Default number of folds
pub const DEFAULT_FOLDS: usize = 4;
/// Default eye distance, in camera units
pub const DEFAULT_FOLD_CAMERA_DISTANCE: f32 = 18.0;
/// Default rotation of a closed fold, in degrees
pub const DEFAULT_FOLD_MAX_ROTATION: f32 = 89.0;

/// Sequential unfolding of `folds` horizontal segments
#[derive(Clone, Debug)]
pub struct Fold {
    folds: usize,
    hinge: Hinge,
}

impl Default for Fold {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDS)
    }
}

impl Fold {
    /// Create a fold with `folds` segments. Zero folds draws nothing.
    pub fn new(folds: usize) -> Self {
        Self {
            folds,
            hinge: Hinge::new(DEFAULT_FOLD_CAMERA_DISTANCE, DEFAULT_FOLD_MAX_ROTATION),
        }
    }

    pub fn with_camera_distance(mut self, distance: f32) -> Self {
        self.hinge.set_camera_distance(distance);
        self
    }

    pub fn with_max_rotation(mut self, degrees: f32) -> Self {
        self.hinge.set_max_rotation(degrees);
        self
    }

    pub fn folds(&self) -> usize {
        self.folds
    }

    pub fn camera_distance(&self) -> f32 {
        self.hinge.camera_distance()
    }

    pub fn max_rotation(&self) -> f32 {
        self.hinge.max_rotation()
    }

    /// Local progress of segment `index` at overall `progress`
    ///
    /// Each segment owns `1 / folds` of the timeline, so segment `i` starts
    /// opening once the previous one is flat.
    pub fn segment_progress(&self, index: usize, progress: f32) -> f32 {
        (progress * self.folds as f32 - index as f32).clamp(0.0, 1.0)
    }

    /// Vertical extent `(top, bottom)` of segment `index`
    pub fn segment_bounds(&self, index: usize, height: f32) -> (f32, f32) {
        let segment = height / self.folds as f32;
        (index as f32 * segment, (index + 1) as f32 * segment)
    }

    pub fn render(
        &mut self,
        ctx: &mut dyn DrawContext,
        progress: f32,
        bounds: Size,
        surface: &dyn HostSurface,
    ) {
        for index in 0..self.folds {
            let step = self.segment_progress(index, progress);
            if step <= 0.0 {
                tracing::trace!("Fold: segment {} skipped", index);
                continue;
            }
            let (top, bottom) = self.segment_bounds(index, bounds.height);
            tracing::trace!("Fold: segment {} at {}", index, step);
            self.hinge
                .draw_segment(ctx, surface, bounds.width, top, bottom, step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestSurface;
    use folio_core::{Rect, RecordingContext};

    #[test]
    fn test_segment_progress_is_sequential() {
        let fold = Fold::default();
        assert_eq!(fold.segment_progress(0, 0.125), 0.5);
        assert_eq!(fold.segment_progress(1, 0.125), 0.0);
        assert_eq!(fold.segment_progress(0, 0.5), 1.0);
        assert_eq!(fold.segment_progress(2, 0.625), 0.5);
        assert_eq!(fold.segment_progress(3, 1.0), 1.0);
    }

    #[test]
    fn test_half_way_draws_two_flat_segments() {
        let surface = TestSurface::new(Size::new(100.0, 80.0));
        let mut ctx = RecordingContext::new();
        let mut fold = Fold::default();

        fold.render(&mut ctx, 0.5, surface.content_bounds(), surface.as_ref());

        let commits = surface.take_commits();
        assert_eq!(commits.len(), 2);
        assert!(commits.iter().all(|c| c.matrix.is_identity()));
        assert_eq!(commits[0].clip, Some(Rect::new(0.0, 0.0, 100.0, 20.0)));
        assert_eq!(commits[1].clip, Some(Rect::new(0.0, 20.0, 100.0, 20.0)));
        assert_eq!(ctx.save_count(), 1);
    }

    #[test]
    fn test_segment_count_tracks_progress() {
        let surface = TestSurface::new(Size::new(100.0, 80.0));
        for folds in [1, 2, 4, 8] {
            let mut fold = Fold::new(folds);
            for k in 0..=folds {
                let mut ctx = RecordingContext::new();
                let progress = k as f32 / folds as f32;
                fold.render(&mut ctx, progress, surface.content_bounds(), surface.as_ref());

                let commits = surface.take_commits();
                assert_eq!(commits.len(), k, "{folds} folds at {k}/{folds}");
                assert!(commits.iter().all(|c| c.matrix.is_identity()));
            }
        }
    }

    #[test]
    fn test_opening_segment_is_projected() {
        let surface = TestSurface::new(Size::new(100.0, 80.0));
        let mut ctx = RecordingContext::new();
        let mut fold = Fold::default();

        fold.render(&mut ctx, 0.375, surface.content_bounds(), surface.as_ref());

        let commits = surface.take_commits();
        assert_eq!(commits.len(), 2);
        assert!(commits[0].matrix.is_identity());
        assert!(commits[1].matrix.has_perspective());
        assert_eq!(ctx.save_count(), 1);
    }

    #[test]
    fn test_zero_progress_draws_nothing() {
        let surface = TestSurface::new(Size::new(100.0, 80.0));
        let mut ctx = RecordingContext::new();
        Fold::default().render(&mut ctx, 0.0, surface.content_bounds(), surface.as_ref());
        assert!(surface.take_commits().is_empty());
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_builder_overrides() {
        let fold = Fold::new(6).with_camera_distance(24.0).with_max_rotation(60.0);
        assert_eq!(fold.folds(), 6);
        assert_eq!(fold.camera_distance(), 24.0);
        assert_eq!(fold.max_rotation(), 60.0);
    }
}
