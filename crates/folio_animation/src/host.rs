//! Host surface contract
//!
//! A host surface is a drawable container that can hand its drawing over to a
//! [`CanvasAnimation`]. It owns the normal content composition and the
//! current animation step, and it is the target the animator writes to.
//!
//! Implementations are single-threaded and use interior mutability: every
//! method takes `&self`, because an animation re-enters the host (through
//! [`HostSurface::commit_draw`]) while the host is in the middle of
//! dispatching a draw.

use folio_core::{DrawContext, Size};

use crate::animation::CanvasAnimation;
use crate::error::Result;

/// Name of the property an animator drives on a host
pub const ANIMATION_STEP: &str = "AnimationStep";

/// A surface that can be animated by a [`CanvasAnimation`]
pub trait HostSurface {
    /// Draw the normal, unanimated content.
    ///
    /// Must be re-entrant: strategies call it several times per frame, each
    /// time under a different matrix and clip.
    fn commit_draw(&self, ctx: &mut dyn DrawContext);

    /// Prepare for `animation` starting at `step`: store the step, make
    /// `animation` the controlling animation if it isn't already, and
    /// schedule a redraw. Does not change the animation's running state.
    fn request_invalidation(&self, animation: &CanvasAnimation, step: f32);

    /// Make `animation` the controlling animation and bind it to this host.
    /// Replaces any previous animation without stopping it.
    fn load_animation(&self, animation: &CanvasAnimation);

    /// Drop the controlling animation; subsequent draws are unanimated
    fn clear_animation(&self);

    /// The controlling animation, if any
    fn current_animation(&self) -> Option<CanvasAnimation>;

    /// Bounds of the content, read fresh on every draw
    fn content_bounds(&self) -> Size;

    /// Set the current step and schedule a redraw
    fn set_animation_step(&self, step: f32);

    fn animation_step(&self) -> f32;

    /// The platform redraw entry point: delegate to the controlling animation,
    /// or draw the content directly when there is none.
    fn dispatch_draw(&self, ctx: &mut dyn DrawContext) -> Result<()> {
        match self.current_animation() {
            Some(animation) => animation.draw(ctx, self.animation_step()),
            None => {
                self.commit_draw(ctx);
                Ok(())
            }
        }
    }
}
