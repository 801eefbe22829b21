//! Animated frame
//!
//! [`AnimatedFrame`] is a container that draws its content through whichever
//! [`CanvasAnimation`] is loaded into it. Content is a render callback with
//! the same shape as a canvas element: it receives the draw context and the
//! frame's current size.
//!
//! The frame does not own a clock. Invalidation only marks it dirty and calls
//! the optional redraw callback; whoever drives frames calls
//! [`AnimatedFrame::render`] (see [`FrameClock`](crate::FrameClock)).
//!
//! # Example
//!
//! ```
//! use folio_animation::{CanvasAnimation, HostSurface, RevealFromCenter};
//! use folio_core::{Color, DrawContext, RecordingContext, Size};
//! use folio_layout::AnimatedFrame;
//!
//! let frame = AnimatedFrame::with_content(Size::new(100.0, 80.0), |ctx, size| {
//!     ctx.fill_rect(size.to_rect(), Color::BLUE);
//! });
//!
//! let animation = CanvasAnimation::new(RevealFromCenter);
//! frame.load_animation(&animation);
//! animation.set_running(true);
//! frame.set_animation_step(0.5);
//!
//! let mut ctx = RecordingContext::new();
//! frame.render(&mut ctx).unwrap();
//! assert!(!frame.needs_redraw());
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use folio_animation::{AnimationError, CanvasAnimation, HostSurface, Result};
use folio_core::{DrawContext, Size};

/// Content render callback, called once per commit
pub type ContentFn = Rc<dyn Fn(&mut dyn DrawContext, Size)>;

/// Called whenever the frame is invalidated
pub type RedrawFn = Rc<dyn Fn()>;

/// A host surface that animates a render callback
pub struct AnimatedFrame {
    this: Weak<AnimatedFrame>,
    size: Cell<Size>,
    content: RefCell<Option<ContentFn>>,
    /// Current animation step; 1.0 draws the content fully
    step: Cell<f32>,
    animation: RefCell<Option<CanvasAnimation>>,
    needs_redraw: Cell<bool>,
    invalidations: Cell<u64>,
    on_invalidate: RefCell<Option<RedrawFn>>,
}

impl AnimatedFrame {
    /// Create an empty frame
    pub fn new(size: Size) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            size: Cell::new(size),
            content: RefCell::new(None),
            step: Cell::new(1.0),
            animation: RefCell::new(None),
            needs_redraw: Cell::new(true),
            invalidations: Cell::new(0),
            on_invalidate: RefCell::new(None),
        })
    }

    /// Create a frame drawing `content`
    pub fn with_content<F>(size: Size, content: F) -> Rc<Self>
    where
        F: Fn(&mut dyn DrawContext, Size) + 'static,
    {
        let frame = Self::new(size);
        frame.set_content(content);
        frame
    }

    /// Replace the content callback
    pub fn set_content<F>(&self, content: F)
    where
        F: Fn(&mut dyn DrawContext, Size) + 'static,
    {
        *self.content.borrow_mut() = Some(Rc::new(content));
        self.invalidate();
    }

    pub fn size(&self) -> Size {
        self.size.get()
    }

    /// Resize the frame. The next draw picks up the new bounds.
    pub fn set_size(&self, size: Size) {
        if self.size.replace(size) != size {
            self.invalidate();
        }
    }

    /// Register the callback run on every invalidation
    pub fn set_on_invalidate<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        *self.on_invalidate.borrow_mut() = Some(Rc::new(callback));
    }

    /// Whether something changed since the last [`render`](Self::render)
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw.get()
    }

    /// Read and clear the dirty flag
    pub fn take_needs_redraw(&self) -> bool {
        self.needs_redraw.replace(false)
    }

    /// Number of invalidations since the frame was created
    pub fn invalidation_count(&self) -> u64 {
        self.invalidations.get()
    }

    /// Schedule a redraw
    pub fn invalidate(&self) {
        self.needs_redraw.set(true);
        self.invalidations.set(self.invalidations.get() + 1);
        // Cloned out so the callback may touch the frame
        let callback = self.on_invalidate.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Draw the frame, through the loaded animation if there is one
    pub fn render(&self, ctx: &mut dyn DrawContext) -> Result<()> {
        self.needs_redraw.set(false);
        self.dispatch_draw(ctx)
    }

    fn weak_host(&self) -> Weak<dyn HostSurface> {
        self.this.clone()
    }
}

impl HostSurface for AnimatedFrame {
    fn commit_draw(&self, ctx: &mut dyn DrawContext) {
        let content = self.content.borrow().clone();
        if let Some(content) = content {
            content(ctx, self.size.get());
        }
    }

    fn request_invalidation(&self, animation: &CanvasAnimation, step: f32) {
        self.step.set(step);
        let replace = !self
            .animation
            .borrow()
            .as_ref()
            .is_some_and(|current| current.ptr_eq(animation));
        if replace {
            tracing::debug!("AnimatedFrame: now controlled by {}", animation.effect_name());
            *self.animation.borrow_mut() = Some(animation.clone());
        }
        self.invalidate();
    }

    fn load_animation(&self, animation: &CanvasAnimation) {
        tracing::debug!("AnimatedFrame: loaded {}", animation.effect_name());
        *self.animation.borrow_mut() = Some(animation.clone());
        animation.set_layout(self.weak_host());
    }

    fn clear_animation(&self) {
        if self.animation.borrow_mut().take().is_some() {
            tracing::debug!("AnimatedFrame: animation cleared");
            self.invalidate();
        }
    }

    fn current_animation(&self) -> Option<CanvasAnimation> {
        self.animation.borrow().clone()
    }

    fn content_bounds(&self) -> Size {
        self.size.get()
    }

    fn set_animation_step(&self, step: f32) {
        tracing::trace!("AnimatedFrame: step {}", step);
        self.step.set(step);
        self.invalidate();
    }

    fn animation_step(&self) -> f32 {
        self.step.get()
    }
}

impl fmt::Debug for AnimatedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedFrame")
            .field("size", &self.size.get())
            .field("step", &self.step.get())
            .field("animation", &*self.animation.borrow())
            .field("needs_redraw", &self.needs_redraw.get())
            .finish()
    }
}

/// Resolve an arbitrary view to the frame that can host an animation.
///
/// Fails with [`AnimationError::UnsupportedHost`] when `view` is anything
/// other than an [`AnimatedFrame`].
pub fn host_surface(view: Rc<dyn Any>) -> Result<Rc<AnimatedFrame>> {
    view.downcast::<AnimatedFrame>().map_err(|_| {
        AnimationError::UnsupportedHost("canvas animations require an AnimatedFrame host".into())
    })
}
