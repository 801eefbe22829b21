//! Shades effect
//!
//! Horizontal slats that open together like window shades. Every band swings
//! around its bottom edge; a small, quickly decaying head start per band
//! makes the top slats lead the ones below them.

use folio_core::{DrawContext, Size};

use super::hinge::Hinge;
use crate::host::HostSurface;

/// Default number of shades
pub const DEFAULT_SHADES: usize = 8;
/// Default eye distance, in camera units
pub const DEFAULT_SHADES_CAMERA_DISTANCE: f32 = 36.0;
/// Default rotation of a closed shade, in degrees
pub const DEFAULT_SHADES_MAX_ROTATION: f32 = 89.0;
/// Head start of the first band
pub const DEFAULT_INITIAL_CASCADE: f32 = 0.01;
/// Factor applied to the head start after each band
pub const DEFAULT_CASCADE_DECAY: f32 = 0.18;

#[derive(Clone, Debug)]
pub struct Shades {
    shades: usize,
    initial_cascade: f32,
    cascade_decay: f32,
    hinge: Hinge,
}

impl Default for Shades {
    fn default() -> Self {
        Self::new(DEFAULT_SHADES)
    }
}

impl Shades {
    pub fn new(shades: usize) -> Self {
        Self {
            shades,
            initial_cascade: DEFAULT_INITIAL_CASCADE,
            cascade_decay: DEFAULT_CASCADE_DECAY,
            hinge: Hinge::new(DEFAULT_SHADES_CAMERA_DISTANCE, DEFAULT_SHADES_MAX_ROTATION),
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

    pub fn with_cascade(mut self, initial: f32, decay: f32) -> Self {
        self.initial_cascade = initial;
        self.cascade_decay = decay;
        self
    }

    pub fn shades(&self) -> usize {
        self.shades
    }

    pub fn camera_distance(&self) -> f32 {
        self.hinge.camera_distance()
    }

    pub fn max_rotation(&self) -> f32 {
        self.hinge.max_rotation()
    }

    pub fn initial_cascade(&self) -> f32 {
        self.initial_cascade
    }

    pub fn cascade_decay(&self) -> f32 {
        self.cascade_decay
    }

    /// Local progress of every band at overall `progress`, top band first
    pub fn band_progress(&self, progress: f32) -> impl Iterator<Item = f32> {
        let decay = self.cascade_decay;
        std::iter::successors(Some(self.initial_cascade), move |offset| Some(offset * decay))
            .take(self.shades)
            .map(move |offset| (progress + offset).min(1.0))
    }

    pub fn render(
        &mut self,
        ctx: &mut dyn DrawContext,
        progress: f32,
        bounds: Size,
        surface: &dyn HostSurface,
    ) {
        let band = bounds.height / self.shades as f32;
        for (index, step) in self.band_progress(progress).enumerate() {
            if step <= 0.0 {
                tracing::trace!("Shades: band {} skipped", index);
                continue;
            }
            tracing::trace!("Shades: band {} at {}", index, step);
            let top = index as f32 * band;
            let bottom = (index + 1) as f32 * band;
            self.hinge
                .draw_segment(ctx, surface, bounds.width, top, bottom, step);
        }
    }
}
