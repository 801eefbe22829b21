//! Draw Context - Canvas drawing contract
//!
//! The `DrawContext` trait is the surface that animations draw through. It
//! keeps a nestable stack of matrix + clip state, addressable by count so a
//! caller can unwind everything it pushed with a single `restore_to_count`.
//!
//! # Example
//!
//! ```
//! use folio_core::{Color, DrawContext, Mat3, RecordingContext, Rect};
//!
//! let mut ctx = RecordingContext::new();
//!
//! let count = ctx.save();
//! ctx.concat(&Mat3::translation(0.0, 10.0));
//! ctx.clip_rect(Rect::new(0.0, 0.0, 100.0, 20.0));
//! ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 80.0), Color::BLUE);
//! ctx.restore_to_count(count);
//!
//! assert_eq!(ctx.save_count(), 1);
//! ```

use smallvec::SmallVec;

use crate::geometry::Rect;
use crate::matrix::Mat3;

// ─────────────────────────────────────────────────────────────────────────────
// Paint Types
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Handle to an image owned by the platform
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The drawing surface an animation renders through
///
/// Save counts start at 1 for a fresh context. `save()` returns the count
/// *before* saving, which is the value to hand to `restore_to_count` to
/// balance it.
pub trait DrawContext {
    // ─────────────────────────────────────────────────────────────────────────
    // State Stack
    // ─────────────────────────────────────────────────────────────────────────

    /// Push the current matrix and clip
    fn save(&mut self) -> usize;

    /// Pop one saved state. No-op at the base level.
    fn restore(&mut self);

    /// Pop saved states until `save_count() == count`
    fn restore_to_count(&mut self, count: usize);

    /// Number of states on the stack, including the base state
    fn save_count(&self) -> usize;

    // ─────────────────────────────────────────────────────────────────────────
    // Transform and Clip
    // ─────────────────────────────────────────────────────────────────────────

    /// Pre-concatenate `matrix` onto the current matrix
    fn concat(&mut self, matrix: &Mat3);

    fn translate(&mut self, dx: f32, dy: f32) {
        self.concat(&Mat3::translation(dx, dy));
    }

    /// Get the current combined matrix
    fn current_matrix(&self) -> Mat3;

    /// Intersect the clip with `rect`, given in current local coordinates
    fn clip_rect(&mut self, rect: Rect);

    /// Device-space bounds of the active clip, or `None` when unclipped
    fn device_clip_bounds(&self) -> Option<Rect>;

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────────

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_image(&mut self, image: ImageId, dest: Rect);
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    Save,
    Restore,
    Concat(Mat3),
    ClipRect(Rect),

    // Drawing
    FillRect { rect: Rect, color: Color },
    DrawImage { image: ImageId, dest: Rect },
}

/// A clip rect together with the matrix that was current when it was set
#[derive(Clone, Copy, Debug, PartialEq)]
struct ClipEntry {
    rect: Rect,
    matrix: Mat3,
}

impl ClipEntry {
    fn device_bounds(&self) -> Rect {
        self.matrix.map_rect(self.rect)
    }
}

#[derive(Clone, Debug, Default)]
struct CanvasState {
    matrix: Mat3,
    clips: SmallVec<[ClipEntry; 4]>,
}

/// A draw context that records commands and tracks matrix/clip state
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    state: CanvasState,
    saved: Vec<CanvasState>,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Only the commands that produce pixels
    pub fn draw_commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|cmd| {
            matches!(
                cmd,
                DrawCommand::FillRect { .. } | DrawCommand::DrawImage { .. }
            )
        })
    }

    /// Clear all recorded commands and state
    pub fn clear(&mut self) {
        self.commands.clear();
        self.state = CanvasState::default();
        self.saved.clear();
    }
}

impl DrawContext for RecordingContext {
    fn save(&mut self) -> usize {
        let count = self.save_count();
        self.commands.push(DrawCommand::Save);
        self.saved.push(self.state.clone());
        count
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.commands.push(DrawCommand::Restore);
            self.state = state;
        } else {
            tracing::warn!("RecordingContext: restore() with nothing saved");
        }
    }

    fn restore_to_count(&mut self, count: usize) {
        let count = count.max(1);
        while self.save_count() > count {
            self.restore();
        }
    }

    fn save_count(&self) -> usize {
        self.saved.len() + 1
    }

    fn concat(&mut self, matrix: &Mat3) {
        self.commands.push(DrawCommand::Concat(*matrix));
        self.state.matrix = self.state.matrix.concat(matrix);
    }

    fn current_matrix(&self) -> Mat3 {
        self.state.matrix
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClipRect(rect));
        self.state.clips.push(ClipEntry {
            rect,
            matrix: self.state.matrix,
        });
    }

    /// Each clip contributes the bounding box of its mapped corners, so the
    /// result is exact for affine matrices and conservative under perspective.
    fn device_clip_bounds(&self) -> Option<Rect> {
        let mut clips = self.state.clips.iter();
        let first = clips.next()?.device_bounds();
        Some(clips.fold(first, |acc, clip| acc.intersect(&clip.device_bounds())))
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_image(&mut self, image: ImageId, dest: Rect) {
        self.commands.push(DrawCommand::DrawImage { image, dest });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_count_starts_at_one() {
        let mut ctx = RecordingContext::new();
        assert_eq!(ctx.save_count(), 1);
        assert_eq!(ctx.save(), 1);
        assert_eq!(ctx.save(), 2);
        assert_eq!(ctx.save_count(), 3);
        ctx.restore_to_count(1);
        assert_eq!(ctx.save_count(), 1);
    }

    #[test]
    fn test_restore_unwinds_matrix_and_clip() {
        let mut ctx = RecordingContext::new();
        let count = ctx.save();
        ctx.translate(10.0, 20.0);
        ctx.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));

        assert_eq!(ctx.current_matrix(), Mat3::translation(10.0, 20.0));
        assert_eq!(
            ctx.device_clip_bounds(),
            Some(Rect::new(10.0, 20.0, 50.0, 50.0))
        );

        ctx.restore_to_count(count);
        assert!(ctx.current_matrix().is_identity());
        assert_eq!(ctx.device_clip_bounds(), None);
    }

    #[test]
    fn test_nested_clips_intersect() {
        let mut ctx = RecordingContext::new();
        ctx.clip_rect(Rect::new(0.0, 0.0, 60.0, 60.0));
        ctx.clip_rect(Rect::new(30.0, 30.0, 60.0, 60.0));
        assert_eq!(
            ctx.device_clip_bounds(),
            Some(Rect::new(30.0, 30.0, 30.0, 30.0))
        );
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut ctx = RecordingContext::new();
        ctx.restore();
        assert_eq!(ctx.save_count(), 1);
        assert!(ctx.commands().is_empty());
    }
}
