//! Frame clock
//!
//! Drives animators and redraws at a fixed interval, standing in for the
//! platform's vsync callback. Each tick:
//!
//! 1. advances every running animator by one interval
//! 2. renders the frame if it was invalidated
//! 3. drains the looper, so deferred end work runs after the frame that
//!    showed the final step

use std::rc::Rc;
use std::time::Duration;

use folio_animation::{Animator, Looper, Result};
use folio_core::DrawContext;
use smallvec::SmallVec;

use crate::frame::AnimatedFrame;

/// Default frame interval (60 Hz)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Fixed-step frame driver for an [`AnimatedFrame`]
pub struct FrameClock {
    frame: Rc<AnimatedFrame>,
    looper: Looper,
    interval: Duration,
    animators: SmallVec<[Animator; 2]>,
    frames: u64,
}

impl FrameClock {
    pub fn new(frame: Rc<AnimatedFrame>, looper: Looper) -> Self {
        Self {
            frame,
            looper,
            interval: DEFAULT_FRAME_INTERVAL,
            animators: SmallVec::new(),
            frames: 0,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start `animator` and drive it on subsequent ticks
    pub fn play(&mut self, mut animator: Animator) {
        animator.start();
        self.adopt(animator);
    }

    /// Drive an animator that may already be running
    pub fn adopt(&mut self, animator: Animator) {
        if animator.is_running() {
            self.animators.push(animator);
        } else {
            tracing::debug!(
                "FrameClock: {} already finished, not scheduled",
                animator.property()
            );
        }
    }

    /// Number of animators still running
    pub fn active(&self) -> usize {
        self.animators.len()
    }

    /// Ticks run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// True when nothing is animating, nothing is queued and the frame is clean
    pub fn is_idle(&self) -> bool {
        self.animators.is_empty() && self.looper.is_idle() && !self.frame.needs_redraw()
    }

    /// Run one frame. Returns whether any animator is still running.
    pub fn tick(&mut self, ctx: &mut dyn DrawContext) -> Result<bool> {
        self.frames += 1;
        let interval = self.interval;
        self.animators.retain(|animator| animator.advance(interval));

        if self.frame.take_needs_redraw() {
            self.frame.render(ctx)?;
        }
        self.looper.run_pending();
        Ok(!self.animators.is_empty())
    }

    /// Tick until every animator finished and the looper drained, up to
    /// `max_frames`. Returns the number of ticks run.
    pub fn run_to_end(&mut self, ctx: &mut dyn DrawContext, max_frames: u64) -> Result<u64> {
        let start = self.frames;
        while self.frames - start < max_frames {
            let running = self.tick(ctx)?;
            if !running && self.looper.is_idle() {
                break;
            }
        }
        Ok(self.frames - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::{CanvasAnimation, Fold, HostSurface, Interpolator, Reveal};
    use folio_core::{Color, RecordingContext, Size};
    use std::cell::RefCell;

    fn setup(
        effect: impl Into<folio_animation::Effect>,
    ) -> (Rc<AnimatedFrame>, CanvasAnimation, FrameClock) {
        let frame = AnimatedFrame::with_content(Size::new(100.0, 80.0), |ctx, size| {
            ctx.fill_rect(size.to_rect(), Color::GREEN);
        });
        let looper = Looper::new();
        let animation = CanvasAnimation::with_looper(effect, looper.clone());
        frame.load_animation(&animation);
        let clock = FrameClock::new(Rc::clone(&frame), looper)
            .with_interval(Duration::from_millis(10));
        (frame, animation, clock)
    }

    #[test]
    fn test_runs_animation_to_completion() {
        let (frame, animation, mut clock) = setup(Fold::default());
        let animator = animation
            .new_animator_instance(0.0, 1.0)
            .unwrap()
            .with_duration(Duration::from_millis(40))
            .with_interpolator(Interpolator::Linear);

        clock.play(animator);
        assert!(animation.is_running());

        let mut ctx = RecordingContext::new();
        let frames = clock.run_to_end(&mut ctx, 100).unwrap();
        assert_eq!(frames, 4);
        assert_eq!(frame.animation_step(), 1.0);
        assert!(!animation.is_running());
        assert!(clock.is_idle());
    }

    #[test]
    fn test_final_frame_is_drawn_while_running() {
        let (frame, animation, mut clock) = setup(Fold::default());
        let mut animator = animation
            .new_animator_instance(0.0, 1.0)
            .unwrap()
            .with_duration(Duration::from_millis(10));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let observed = animation.clone();
        let log = Rc::clone(&seen);
        animator.add_end_listener(move || log.borrow_mut().push(observed.is_running()));
        clock.play(animator);

        let mut ctx = RecordingContext::new();
        assert!(!clock.tick(&mut ctx).unwrap());

        // All four folds were drawn flat in the last frame
        assert_eq!(ctx.draw_commands().count(), 4);
        assert_eq!(*seen.borrow(), vec![true]);
        assert!(!animation.is_running());
        assert!(!frame.needs_redraw());
    }

    #[test]
    fn test_clean_frame_is_not_redrawn() {
        let (frame, _animation, mut clock) = setup(Reveal);
        let mut ctx = RecordingContext::new();
        clock.tick(&mut ctx).unwrap();
        assert_eq!(ctx.draw_commands().count(), 1);

        ctx.clear();
        clock.tick(&mut ctx).unwrap();
        assert!(ctx.commands().is_empty());

        frame.set_animation_step(0.5);
        clock.tick(&mut ctx).unwrap();
        // Not running, so the step change draws the content unmodified
        assert_eq!(ctx.draw_commands().count(), 1);
    }

    #[test]
    fn test_finished_animator_is_not_scheduled() {
        let (_frame, animation, mut clock) = setup(Reveal);
        let mut animator = animation.new_animator_instance(0.0, 1.0).unwrap();
        animator.end();
        clock.adopt(animator);
        assert_eq!(clock.active(), 0);
    }

    #[test]
    fn test_run_to_end_respects_max_frames() {
        let (_frame, animation, mut clock) = setup(Reveal);
        let animator = animation
            .new_animator_instance(0.0, 1.0)
            .unwrap()
            .with_duration(Duration::from_secs(10));
        clock.play(animator);

        let mut ctx = RecordingContext::new();
        assert_eq!(clock.run_to_end(&mut ctx, 5).unwrap(), 5);
        assert_eq!(clock.active(), 1);
        assert!(animation.is_running());
    }
}
