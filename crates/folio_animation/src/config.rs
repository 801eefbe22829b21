//! Effect configuration
//!
//! Effects and animator settings can be described in TOML (or any other
//! serde format). Every tuning field is optional and falls back to the
//! built-in constants.
//!
//! ```toml
//! duration_ms = 1800
//! interpolator = "linear"
//!
//! [effect]
//! type = "fold"
//! folds = 6
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::animator::{Animator, DEFAULT_DURATION};
use crate::effect::{
    Effect, Fold, Reveal, RevealFromBottom, RevealFromCenter, RevealFromTop, Shades,
    DEFAULT_CASCADE_DECAY, DEFAULT_FOLDS, DEFAULT_FOLD_CAMERA_DISTANCE, DEFAULT_FOLD_MAX_ROTATION,
    DEFAULT_INITIAL_CASCADE, DEFAULT_SHADES, DEFAULT_SHADES_CAMERA_DISTANCE,
    DEFAULT_SHADES_MAX_ROTATION,
};
use crate::error::{AnimationError, Result};
use crate::interpolator::Interpolator;

// =============================================================================
// Effects
// =============================================================================

/// Serializable description of an [`Effect`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectConfig {
    Fold(FoldConfig),
    Reveal,
    RevealFromCenter,
    RevealFromTop,
    RevealFromBottom,
    Shades(ShadesConfig),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoldConfig {
    #[serde(default = "default_folds")]
    pub folds: usize,
    /// Eye distance in camera units
    #[serde(default = "default_fold_camera_distance")]
    pub camera_distance: f32,
    /// Rotation of a closed fold, in degrees
    #[serde(default = "default_fold_max_rotation")]
    pub max_rotation: f32,
}

fn default_folds() -> usize {
    DEFAULT_FOLDS
}

fn default_fold_camera_distance() -> f32 {
    DEFAULT_FOLD_CAMERA_DISTANCE
}

fn default_fold_max_rotation() -> f32 {
    DEFAULT_FOLD_MAX_ROTATION
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            folds: default_folds(),
            camera_distance: default_fold_camera_distance(),
            max_rotation: default_fold_max_rotation(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadesConfig {
    #[serde(default = "default_shades")]
    pub shades: usize,
    /// Eye distance in camera units
    #[serde(default = "default_shades_camera_distance")]
    pub camera_distance: f32,
    /// Rotation of a closed shade, in degrees
    #[serde(default = "default_shades_max_rotation")]
    pub max_rotation: f32,
    /// Head start of the top band
    #[serde(default = "default_initial_cascade")]
    pub initial_cascade: f32,
    /// Factor applied to the head start after each band
    #[serde(default = "default_cascade_decay")]
    pub cascade_decay: f32,
}

fn default_shades() -> usize {
    DEFAULT_SHADES
}

fn default_shades_camera_distance() -> f32 {
    DEFAULT_SHADES_CAMERA_DISTANCE
}

fn default_shades_max_rotation() -> f32 {
    DEFAULT_SHADES_MAX_ROTATION
}

fn default_initial_cascade() -> f32 {
    DEFAULT_INITIAL_CASCADE
}

fn default_cascade_decay() -> f32 {
    DEFAULT_CASCADE_DECAY
}

impl Default for ShadesConfig {
    fn default() -> Self {
        Self {
            shades: default_shades(),
            camera_distance: default_shades_camera_distance(),
            max_rotation: default_shades_max_rotation(),
            initial_cascade: default_initial_cascade(),
            cascade_decay: default_cascade_decay(),
        }
    }
}

fn check_count(what: &str, count: usize) -> Result<()> {
    if count == 0 {
        return Err(AnimationError::InvalidConfig(format!(
            "{what} must be at least 1"
        )));
    }
    Ok(())
}

fn check_distance(distance: f32) -> Result<()> {
    if !distance.is_finite() || distance <= 0.0 {
        return Err(AnimationError::InvalidConfig(format!(
            "camera_distance must be positive, got {distance}"
        )));
    }
    Ok(())
}

fn check_finite(what: &str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(AnimationError::InvalidConfig(format!(
            "{what} must be finite, got {value}"
        )));
    }
    Ok(())
}

impl EffectConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| AnimationError::InvalidConfig(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| AnimationError::InvalidConfig(e.to_string()))
    }

    /// Check the tuning values without building
    pub fn validate(&self) -> Result<()> {
        match self {
            EffectConfig::Fold(fold) => {
                check_count("folds", fold.folds)?;
                check_distance(fold.camera_distance)?;
                check_finite("max_rotation", fold.max_rotation)
            }
            EffectConfig::Shades(shades) => {
                check_count("shades", shades.shades)?;
                check_distance(shades.camera_distance)?;
                check_finite("max_rotation", shades.max_rotation)?;
                check_finite("initial_cascade", shades.initial_cascade)?;
                check_finite("cascade_decay", shades.cascade_decay)
            }
            EffectConfig::Reveal
            | EffectConfig::RevealFromCenter
            | EffectConfig::RevealFromTop
            | EffectConfig::RevealFromBottom => Ok(()),
        }
    }

    /// Validate and build the effect
    pub fn build(&self) -> Result<Effect> {
        self.validate()?;
        let effect: Effect = match self {
            EffectConfig::Fold(fold) => Fold::new(fold.folds)
                .with_camera_distance(fold.camera_distance)
                .with_max_rotation(fold.max_rotation)
                .into(),
            EffectConfig::Reveal => Reveal.into(),
            EffectConfig::RevealFromCenter => RevealFromCenter.into(),
            EffectConfig::RevealFromTop => RevealFromTop.into(),
            EffectConfig::RevealFromBottom => RevealFromBottom.into(),
            EffectConfig::Shades(shades) => Shades::new(shades.shades)
                .with_camera_distance(shades.camera_distance)
                .with_max_rotation(shades.max_rotation)
                .with_cascade(shades.initial_cascade, shades.cascade_decay)
                .into(),
        };
        Ok(effect)
    }
}

impl From<&Effect> for EffectConfig {
    fn from(effect: &Effect) -> Self {
        match effect {
            Effect::Fold(fold) => EffectConfig::Fold(FoldConfig {
                folds: fold.folds(),
                camera_distance: fold.camera_distance(),
                max_rotation: fold.max_rotation(),
            }),
            Effect::Reveal(_) => EffectConfig::Reveal,
            Effect::RevealFromCenter(_) => EffectConfig::RevealFromCenter,
            Effect::RevealFromTop(_) => EffectConfig::RevealFromTop,
            Effect::RevealFromBottom(_) => EffectConfig::RevealFromBottom,
            Effect::Shades(shades) => EffectConfig::Shades(ShadesConfig {
                shades: shades.shades(),
                camera_distance: shades.camera_distance(),
                max_rotation: shades.max_rotation(),
                initial_cascade: shades.initial_cascade(),
                cascade_decay: shades.cascade_decay(),
            }),
        }
    }
}

// =============================================================================
// Animations
// =============================================================================

/// An effect together with the animator settings that drive it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub effect: EffectConfig,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default)]
    pub interpolator: Interpolator,
    #[serde(default)]
    pub start: f32,
    #[serde(default = "default_end")]
    pub end: f32,
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION.as_millis() as u64
}

fn default_end() -> f32 {
    1.0
}

impl AnimationConfig {
    pub fn new(effect: EffectConfig) -> Self {
        Self {
            effect,
            duration_ms: default_duration_ms(),
            interpolator: Interpolator::default(),
            start: 0.0,
            end: default_end(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| AnimationError::InvalidConfig(e.to_string()))?;
        config.effect.validate()?;
        check_finite("start", config.start)?;
        check_finite("end", config.end)?;
        Ok(config)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Apply the timing settings to `animator`
    pub fn configure(&self, animator: Animator) -> Animator {
        animator
            .with_duration(self.duration())
            .with_interpolator(self.interpolator)
    }
}
