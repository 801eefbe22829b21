//! Folio Animation
//!
//! Canvas animations that redirect a host's drawing through a per-frame
//! geometric transform.
//!
//! # Features
//!
//! - **Effects**: fold, shades and four reveal variants, each a pure function
//!   of progress and content bounds
//! - **CanvasAnimation**: running-state bookkeeping and driver glue around an
//!   effect, pass-through when idle
//! - **HostSurface**: the contract a drawable container implements to be
//!   animated
//! - **Animator**: interpolates the progress over time and fires lifecycle
//!   listeners
//! - **Looper**: single-threaded task queue for deferred work
//! - **Configuration**: TOML descriptions of effects and a name registry
//!
//! # Example
//!
//! ```ignore
//! use folio_animation::{CanvasAnimation, Fold, HostSurface};
//!
//! let animation = CanvasAnimation::new(Fold::new(6));
//! host.load_animation(&animation);
//!
//! let mut animator = animation.new_animator_instance(0.0, 1.0)?;
//! animator.start();
//! ```

pub mod animation;
pub mod animator;
pub mod config;
pub mod effect;
pub mod error;
pub mod host;
pub mod interpolator;
pub mod looper;
pub mod registry;

#[cfg(test)]
mod test_support;

pub use animation::CanvasAnimation;
pub use animator::{Animator, AnimatorListener, AnimatorState, EndListener, DEFAULT_DURATION};
pub use config::{AnimationConfig, EffectConfig, FoldConfig, ShadesConfig};
pub use effect::{
    Effect, Fold, Hinge, Reveal, RevealFromBottom, RevealFromCenter, RevealFromTop, Shades,
};
pub use error::{AnimationError, Result};
pub use host::{HostSurface, ANIMATION_STEP};
pub use interpolator::Interpolator;
pub use looper::Looper;
pub use registry::{EffectFactory, EffectRegistry};
