//! Property animator
//!
//! The time-interpolation driver: interpolates a float between two values
//! over a duration, writes each frame's value through a setter, and notifies
//! listeners on start, cancel and end.
//!
//! An animator does not own a clock. Whoever runs the frame loop calls
//! [`Animator::advance`] with the frame delta (see `folio_layout::FrameClock`).
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use folio_animation::{Animator, Interpolator};
//!
//! let value = Rc::new(Cell::new(0.0));
//! let sink = Rc::clone(&value);
//!
//! let mut animator = Animator::of_float("Alpha", 0.0, 1.0, move |v| sink.set(v))
//!     .with_duration(Duration::from_millis(100))
//!     .with_interpolator(Interpolator::Linear);
//!
//! animator.start();
//! animator.advance(Duration::from_millis(50));
//! assert!((value.get() - 0.5).abs() < 1e-6);
//!
//! animator.advance(Duration::from_millis(50));
//! assert_eq!(value.get(), 1.0);
//! assert!(!animator.is_running());
//! ```

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use smallvec::SmallVec;

use crate::interpolator::Interpolator;

/// Default animator duration, matching the platform default
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Lifecycle notifications fired by an [`Animator`]
///
/// Listeners are called in registration order. A cancelled animator fires
/// `on_cancel` followed by `on_end`.
pub trait AnimatorListener {
    fn on_start(&self) {}
    fn on_cancel(&self) {}
    fn on_end(&self) {}
}

/// Listener that runs a closure when the animator ends
pub struct EndListener<F: Fn()>(pub F);

impl<F: Fn()> AnimatorListener for EndListener<F> {
    fn on_end(&self) {
        (self.0)()
    }
}

/// Where an animator is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    /// Created but never started
    Idle,
    /// Started and not yet ended or cancelled
    Running,
    /// Ended or cancelled
    Finished,
}

type Setter = Box<dyn Fn(f32)>;

/// Interpolates a float property from a start to an end value
pub struct Animator {
    property: &'static str,
    from: f32,
    to: f32,
    duration: Duration,
    interpolator: Interpolator,
    elapsed: Duration,
    fraction: f32,
    state: AnimatorState,
    setter: Setter,
    listeners: SmallVec<[Rc<dyn AnimatorListener>; 4]>,
}

impl Animator {
    /// Create an animator writing `property` through `setter`
    pub fn of_float<F>(property: &'static str, from: f32, to: f32, setter: F) -> Self
    where
        F: Fn(f32) + 'static,
    {
        Self {
            property,
            from,
            to,
            duration: DEFAULT_DURATION,
            interpolator: Interpolator::default(),
            elapsed: Duration::ZERO,
            fraction: 0.0,
            state: AnimatorState::Idle,
            setter: Box::new(setter),
            listeners: SmallVec::new(),
        }
    }

    /// Set the duration (builder)
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the interpolator (builder)
    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn set_interpolator(&mut self, interpolator: Interpolator) {
        self.interpolator = interpolator;
    }

    /// Register a listener. Listeners added first are notified first.
    pub fn add_listener(&mut self, listener: Rc<dyn AnimatorListener>) {
        self.listeners.push(listener);
    }

    /// Register a closure to run when the animator ends
    pub fn add_end_listener<F>(&mut self, f: F)
    where
        F: Fn() + 'static,
    {
        self.listeners.push(Rc::new(EndListener(f)));
    }

    pub fn property(&self) -> &'static str {
        self.property
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn interpolator(&self) -> Interpolator {
        self.interpolator
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    pub fn is_started(&self) -> bool {
        self.state != AnimatorState::Idle
    }

    /// Linear elapsed fraction in [0, 1]
    pub fn animated_fraction(&self) -> f32 {
        self.fraction
    }

    /// Value for the current fraction
    pub fn current_value(&self) -> f32 {
        let eased = self.interpolator.interpolate(self.fraction);
        self.from + (self.to - self.from) * eased
    }

    /// Start from the beginning. Ignored while already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        tracing::debug!(
            "Animator[{}]: start {} -> {} over {:?}",
            self.property,
            self.from,
            self.to,
            self.duration
        );
        self.state = AnimatorState::Running;
        self.elapsed = Duration::ZERO;
        self.notify(|l| l.on_start());
        self.apply(0.0);
        if self.duration.is_zero() {
            self.apply(1.0);
            self.finish();
        }
    }

    /// Advance by one frame. Returns whether the animator is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        self.elapsed += dt;
        let fraction = if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        self.apply(fraction);
        if fraction >= 1.0 {
            self.finish();
        }
        self.is_running()
    }

    /// Stop where it is, firing `on_cancel` then `on_end`
    pub fn cancel(&mut self) {
        if !self.is_running() {
            return;
        }
        tracing::debug!("Animator[{}]: cancel at {}", self.property, self.fraction);
        self.state = AnimatorState::Finished;
        self.notify(|l| l.on_cancel());
        self.notify(|l| l.on_end());
    }

    /// Jump to the end value and finish. Starts the animator first if it was
    /// never started.
    pub fn end(&mut self) {
        match self.state {
            AnimatorState::Finished => {}
            AnimatorState::Idle => {
                self.start();
                if self.is_running() {
                    self.apply(1.0);
                    self.finish();
                }
            }
            AnimatorState::Running => {
                self.apply(1.0);
                self.finish();
            }
        }
    }

    fn apply(&mut self, fraction: f32) {
        self.fraction = fraction;
        let value = self.current_value();
        tracing::trace!("Animator[{}]: {} = {}", self.property, fraction, value);
        (self.setter)(value);
    }

    fn finish(&mut self) {
        tracing::debug!("Animator[{}]: end", self.property);
        self.state = AnimatorState::Finished;
        self.notify(|l| l.on_end());
    }

    fn notify(&self, f: impl Fn(&dyn AnimatorListener)) {
        for listener in &self.listeners {
            f(listener.as_ref());
        }
    }
}

impl fmt::Debug for Animator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("property", &self.property)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("interpolator", &self.interpolator)
            .field("state", &self.state)
            .field("fraction", &self.fraction)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<&'static str>>,
    }

    impl AnimatorListener for Recorder {
        fn on_start(&self) {
            self.events.borrow_mut().push("start");
        }
        fn on_cancel(&self) {
            self.events.borrow_mut().push("cancel");
        }
        fn on_end(&self) {
            self.events.borrow_mut().push("end");
        }
    }

    fn linear(from: f32, to: f32) -> (Animator, Rc<Cell<f32>>, Rc<Recorder>) {
        let value = Rc::new(Cell::new(f32::NAN));
        let sink = Rc::clone(&value);
        let recorder = Rc::new(Recorder::default());
        let mut animator = Animator::of_float("Test", from, to, move |v| sink.set(v))
            .with_duration(Duration::from_millis(100))
            .with_interpolator(Interpolator::Linear);
        animator.add_listener(recorder.clone());
        (animator, value, recorder)
    }

    #[test]
    fn test_start_writes_start_value() {
        let (mut animator, value, recorder) = linear(1.0, 0.0);
        assert_eq!(animator.state(), AnimatorState::Idle);
        animator.start();
        assert_eq!(value.get(), 1.0);
        assert!(animator.is_running());
        assert_eq!(*recorder.events.borrow(), vec!["start"]);
    }

    #[test]
    fn test_runs_to_completion() {
        let (mut animator, value, recorder) = linear(0.0, 1.0);
        animator.start();
        assert!(animator.advance(Duration::from_millis(25)));
        assert!((value.get() - 0.25).abs() < 1e-6);
        assert!(animator.advance(Duration::from_millis(50)));
        assert!(!animator.advance(Duration::from_millis(50)));
        assert_eq!(value.get(), 1.0);
        assert_eq!(animator.state(), AnimatorState::Finished);
        assert_eq!(*recorder.events.borrow(), vec!["start", "end"]);

        // Further frames are ignored
        assert!(!animator.advance(Duration::from_millis(10)));
        assert_eq!(recorder.events.borrow().len(), 2);
    }

    #[test]
    fn test_progress_accessors() {
        let (mut animator, _value, _recorder) = linear(0.0, 2.0);
        assert!(!animator.is_started());
        assert_eq!(animator.animated_fraction(), 0.0);

        animator.start();
        animator.advance(Duration::from_millis(30));
        assert!(animator.is_started());
        assert!((animator.animated_fraction() - 0.3).abs() < 1e-6);
        assert!((animator.current_value() - 0.6).abs() < 1e-6);

        animator.end();
        assert!(animator.is_started());
        assert!(!animator.is_running());
        assert_eq!(animator.animated_fraction(), 1.0);
    }

    #[test]
    fn test_cancel_fires_cancel_then_end() {
        let (mut animator, value, recorder) = linear(0.0, 1.0);
        animator.start();
        animator.advance(Duration::from_millis(40));
        animator.cancel();
        assert!((value.get() - 0.4).abs() < 1e-6);
        assert_eq!(*recorder.events.borrow(), vec!["start", "cancel", "end"]);
    }

    #[test]
    fn test_end_before_start() {
        let (mut animator, value, recorder) = linear(0.0, 1.0);
        animator.end();
        assert_eq!(value.get(), 1.0);
        assert_eq!(*recorder.events.borrow(), vec!["start", "end"]);
    }

    #[test]
    fn test_zero_duration_finishes_on_start() {
        let (animator, value, recorder) = linear(0.0, 1.0);
        let mut animator = animator.with_duration(Duration::ZERO);
        animator.start();
        assert_eq!(value.get(), 1.0);
        assert!(!animator.is_running());
        assert_eq!(*recorder.events.borrow(), vec!["start", "end"]);
    }

    #[test]
    fn test_listener_order() {
        let (mut animator, _value, _recorder) = linear(0.0, 1.0);
        let order = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second"] {
            let order = Rc::clone(&order);
            animator.add_end_listener(move || order.borrow_mut().push(name));
        }
        animator.end();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_default_interpolator_eases() {
        let value = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&value);
        let mut animator = Animator::of_float("Test", 0.0, 1.0, move |v| sink.set(v));
        assert_eq!(animator.duration(), DEFAULT_DURATION);
        animator.start();
        animator.advance(Duration::from_millis(30));
        // Accelerate-decelerate is behind linear early on
        assert!(value.get() < 0.1);
    }
}
