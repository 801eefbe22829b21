//! Recording host surface for unit tests

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use folio_core::{Color, DrawContext, Mat3, Rect, Size};

use crate::animation::CanvasAnimation;
use crate::host::HostSurface;

/// State observed by one `commit_draw` call
#[derive(Clone, Debug, PartialEq)]
pub struct Commit {
    pub matrix: Mat3,
    pub clip: Option<Rect>,
}

pub struct TestSurface {
    this: Weak<TestSurface>,
    size: Cell<Size>,
    step: Cell<f32>,
    animation: RefCell<Option<CanvasAnimation>>,
    commits: RefCell<Vec<Commit>>,
    invalidations: Cell<usize>,
    on_commit: RefCell<Option<Rc<dyn Fn(&mut dyn DrawContext)>>>,
}

impl TestSurface {
    pub fn new(size: Size) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            size: Cell::new(size),
            step: Cell::new(1.0),
            animation: RefCell::new(None),
            commits: RefCell::new(Vec::new()),
            invalidations: Cell::new(0),
            on_commit: RefCell::new(None),
        })
    }

    /// Run `hook` inside every `commit_draw`, after the commit is recorded
    pub fn set_on_commit(&self, hook: impl Fn(&mut dyn DrawContext) + 'static) {
        *self.on_commit.borrow_mut() = Some(Rc::new(hook));
    }

    pub fn take_commits(&self) -> Vec<Commit> {
        std::mem::take(&mut *self.commits.borrow_mut())
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.get()
    }

    fn invalidate(&self) {
        self.invalidations.set(self.invalidations.get() + 1);
    }
}

impl HostSurface for TestSurface {
    fn commit_draw(&self, ctx: &mut dyn DrawContext) {
        self.commits.borrow_mut().push(Commit {
            matrix: ctx.current_matrix(),
            clip: ctx.device_clip_bounds(),
        });
        ctx.fill_rect(self.size.get().to_rect(), Color::BLUE);
        let hook = self.on_commit.borrow().clone();
        if let Some(hook) = hook {
            hook(ctx);
        }
    }

    fn request_invalidation(&self, animation: &CanvasAnimation, step: f32) {
        self.step.set(step);
        let current = self.animation.borrow().clone();
        if !current.is_some_and(|current| current.ptr_eq(animation)) {
            *self.animation.borrow_mut() = Some(animation.clone());
        }
        self.invalidate();
    }

    fn load_animation(&self, animation: &CanvasAnimation) {
        let this: Weak<dyn HostSurface> = self.this.clone();
        animation.set_layout(this);
        *self.animation.borrow_mut() = Some(animation.clone());
    }

    fn clear_animation(&self) {
        self.animation.borrow_mut().take();
    }

    fn current_animation(&self) -> Option<CanvasAnimation> {
        self.animation.borrow().clone()
    }

    fn content_bounds(&self) -> Size {
        self.size.get()
    }

    fn set_animation_step(&self, step: f32) {
        self.step.set(step);
        self.invalidate();
    }

    fn animation_step(&self) -> f32 {
        self.step.get()
    }
}
