//! Animation error types

use thiserror::Error;

/// Errors raised by the animation pipeline
///
/// All of these are programmer errors: nothing here is retried, they are
/// meant to surface at the call site that misused the API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// No layout has been attached to the animation
    #[error("No layout attached: call set_layout() before drawing or creating an animator")]
    NoLayout,

    /// The attached layout no longer exists
    #[error("The attached layout has been dropped")]
    LayoutDropped,

    /// The value offered as a host does not implement the host surface contract
    #[error("Unsupported host: {0}")]
    UnsupportedHost(String),

    /// The animation was drawn again from inside its own draw
    #[error("The animation is already drawing")]
    DrawInProgress,

    /// No effect is registered under this name
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    /// An effect or animation configuration failed to parse or validate
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
