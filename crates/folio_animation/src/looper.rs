//! UI thread task queue
//!
//! A `Looper` is the single-threaded queue deferred work is posted to. Each
//! thread has its own main looper, reachable through [`Looper::main`];
//! handles are cheap clones of the same queue.
//!
//! The platform event loop (or a test) drains it with [`Looper::run_pending`]
//! once the current batch of callbacks has finished, which is what lets a
//! posted task observe the state *after* every same-tick listener ran.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use folio_animation::Looper;
//!
//! let looper = Looper::new();
//! let hits = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&hits);
//! looper.post(move || counter.set(counter.get() + 1));
//! assert_eq!(hits.get(), 0);
//!
//! assert_eq!(looper.run_pending(), 1);
//! assert_eq!(hits.get(), 1);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

type Task = Box<dyn FnOnce()>;

thread_local! {
    static MAIN_LOOPER: Looper = Looper::new();
}

/// Handle to a single-threaded FIFO of deferred tasks
#[derive(Clone, Default)]
pub struct Looper {
    queue: Rc<RefCell<VecDeque<Task>>>,
}

impl Looper {
    /// Create a standalone queue
    pub fn new() -> Self {
        Self::default()
    }

    /// The calling thread's main queue
    pub fn main() -> Self {
        MAIN_LOOPER.with(Looper::clone)
    }

    /// Queue `task` to run on the next drain
    pub fn post<F>(&self, task: F)
    where
        F: FnOnce() + 'static,
    {
        self.queue.borrow_mut().push_back(Box::new(task));
    }

    /// Number of tasks waiting
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Run the oldest task, if any
    pub fn run_one(&self) -> bool {
        // The borrow ends before the task runs so it can post more work
        let task = self.queue.borrow_mut().pop_front();
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run tasks until the queue is empty, including tasks posted while
    /// draining. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while self.run_one() {
            ran += 1;
        }
        if ran > 0 {
            tracing::trace!("Looper: ran {} task(s)", ran);
        }
        ran
    }

    /// True when both handles refer to the same queue
    pub fn same_queue(&self, other: &Looper) -> bool {
        Rc::ptr_eq(&self.queue, &other.queue)
    }
}

impl fmt::Debug for Looper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Looper")
            .field("pending", &self.pending())
            .finish()
    }
}
