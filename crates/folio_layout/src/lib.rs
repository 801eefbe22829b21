//! Folio Layout
//!
//! The reference host for Folio animations:
//!
//! - **AnimatedFrame**: a container that draws a render callback through the
//!   loaded [`CanvasAnimation`](folio_animation::CanvasAnimation)
//! - **FrameClock**: fixed-step driver that advances animators, redraws dirty
//!   frames and drains the looper
//! - **host_surface**: resolves an arbitrary view to an animatable frame

pub mod clock;
pub mod frame;

pub use clock::{FrameClock, DEFAULT_FRAME_INTERVAL};
pub use frame::{host_surface, AnimatedFrame, ContentFn, RedrawFn};
