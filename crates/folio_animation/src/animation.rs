//! Canvas animation
//!
//! [`CanvasAnimation`] wraps an [`Effect`] with the running-state bookkeeping
//! needed to drive it from an [`Animator`]. It is a shared handle: clones
//! refer to the same animation, which is how the host, the animator's
//! listener and the caller all observe one running flag.
//!
//! # Running state
//!
//! The effect only renders while the animation is running; otherwise a draw
//! passes straight through to [`HostSurface::commit_draw`]. The flag follows
//! the animator bound by [`CanvasAnimation::new_animator_instance`]:
//!
//! - start sets it immediately
//! - cancel clears it immediately
//! - end clears it from a task posted to the animation's [`Looper`], so other
//!   end listeners on the same animator still see a running animation
//!
//! # Example
//!
//! ```ignore
//! let animation = CanvasAnimation::new(Fold::default());
//! frame.load_animation(&animation);
//!
//! let mut animator = animation.new_animator_instance(0.0, 1.0)?;
//! animator.set_duration(Duration::from_millis(1800));
//! animator.start();
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use folio_core::DrawContext;

use crate::animator::{Animator, AnimatorListener};
use crate::effect::Effect;
use crate::error::{AnimationError, Result};
use crate::host::{HostSurface, ANIMATION_STEP};
use crate::looper::Looper;

struct AnimationInner {
    effect: RefCell<Effect>,
    /// Cached so it stays readable while the effect renders
    name: &'static str,
    /// Only draw the effect while an animator is running
    running: Cell<bool>,
    layout: RefCell<Option<Weak<dyn HostSurface>>>,
    looper: Looper,
}

/// Shared handle to an animation that can be loaded into a [`HostSurface`]
#[derive(Clone)]
pub struct CanvasAnimation {
    inner: Rc<AnimationInner>,
}

impl CanvasAnimation {
    /// Create an animation posting deferred work to this thread's main looper
    pub fn new(effect: impl Into<Effect>) -> Self {
        Self::with_looper(effect, Looper::main())
    }

    /// Create an animation posting deferred work to `looper`
    pub fn with_looper(effect: impl Into<Effect>, looper: Looper) -> Self {
        let effect = effect.into();
        Self {
            inner: Rc::new(AnimationInner {
                name: effect.name(),
                effect: RefCell::new(effect),
                running: Cell::new(false),
                layout: RefCell::new(None),
                looper,
            }),
        }
    }

    /// Bind this animation to the layout it should animate.
    ///
    /// Can be called again to reuse the animation with another layout; the
    /// last call wins.
    pub fn set_layout(&self, layout: Weak<dyn HostSurface>) {
        *self.inner.layout.borrow_mut() = Some(layout);
    }

    /// [`set_layout`](Self::set_layout) from a strong handle
    pub fn attach<H>(&self, host: &Rc<H>)
    where
        H: HostSurface + 'static,
    {
        let host: Rc<dyn HostSurface> = host.clone();
        self.set_layout(Rc::downgrade(&host));
    }

    /// The attached layout, if it is still alive
    pub fn layout(&self) -> Option<Rc<dyn HostSurface>> {
        self.inner.layout.borrow().as_ref().and_then(Weak::upgrade)
    }

    fn require_layout(&self) -> Result<Rc<dyn HostSurface>> {
        let layout = self.inner.layout.borrow();
        let weak = layout.as_ref().ok_or(AnimationError::NoLayout)?;
        weak.upgrade().ok_or_else(|| {
            tracing::warn!("CanvasAnimation[{}]: layout dropped", self.effect_name());
            AnimationError::LayoutDropped
        })
    }

    /// Draw one frame at `step`.
    ///
    /// While running the effect renders against the layout's current content
    /// bounds; otherwise the layout's content is drawn unmodified. Drawing the
    /// same animation again from inside its own content fails with
    /// [`AnimationError::DrawInProgress`].
    pub fn draw(&self, ctx: &mut dyn DrawContext, step: f32) -> Result<()> {
        let layout = self.require_layout()?;
        if self.is_running() {
            let bounds = layout.content_bounds();
            let mut effect = self.inner.effect.try_borrow_mut().map_err(|_| {
                tracing::warn!("CanvasAnimation[{}]: nested draw", self.inner.name);
                AnimationError::DrawInProgress
            })?;
            effect.render(ctx, step, bounds, layout.as_ref());
        } else {
            layout.commit_draw(ctx);
        }
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Override the running state.
    ///
    /// Useful when the step is driven by something other than an animator,
    /// e.g. revealing rows as a list scrolls. Mixing this with an active
    /// animator on the same instance is not supported.
    pub fn set_running(&self, running: bool) {
        if self.inner.running.replace(running) != running {
            tracing::debug!(
                "CanvasAnimation[{}]: running = {}",
                self.effect_name(),
                running
            );
        }
    }

    /// Create an animator bound to this animation.
    ///
    /// The layout is asked to load this animation at `start` right away, so
    /// the first frame drawn before the animator ticks already matches the
    /// start value. [`set_layout`](Self::set_layout) must have been called.
    pub fn new_animator_instance(&self, start: f32, end: f32) -> Result<Animator> {
        let layout = self.require_layout()?;
        layout.request_invalidation(self, start);

        let target = Rc::downgrade(&layout);
        let mut animator = Animator::of_float(ANIMATION_STEP, start, end, move |step| {
            if let Some(layout) = target.upgrade() {
                layout.set_animation_step(step);
            }
        });
        animator.add_listener(Rc::new(RunningStateListener {
            animation: self.clone(),
        }));
        Ok(animator)
    }

    /// Tag of the wrapped effect
    pub fn effect_name(&self) -> &'static str {
        self.inner.name
    }

    /// Inspect the wrapped effect. Fails with
    /// [`AnimationError::DrawInProgress`] while the effect is rendering.
    pub fn with_effect<R>(&self, f: impl FnOnce(&Effect) -> R) -> Result<R> {
        let effect = self
            .inner
            .effect
            .try_borrow()
            .map_err(|_| AnimationError::DrawInProgress)?;
        Ok(f(&effect))
    }

    pub fn looper(&self) -> &Looper {
        &self.inner.looper
    }

    /// True when both handles refer to the same animation
    pub fn ptr_eq(&self, other: &CanvasAnimation) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for CanvasAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasAnimation")
            .field("effect", &self.effect_name())
            .field("running", &self.is_running())
            .field("attached", &self.layout().is_some())
            .finish()
    }
}

/// Keeps an animation's running flag in step with its animator
struct RunningStateListener {
    animation: CanvasAnimation,
}

impl AnimatorListener for RunningStateListener {
    fn on_start(&self) {
        self.animation.set_running(true);
    }

    fn on_cancel(&self) {
        self.animation.set_running(false);
    }

    fn on_end(&self) {
        // Deferred so the remaining end listeners still see a running animation
        let animation = self.animation.clone();
        tracing::debug!(
            "CanvasAnimation[{}]: end, reset queued",
            animation.effect_name()
        );
        self.animation
            .looper()
            .post(move || animation.set_running(false));
    }
}
