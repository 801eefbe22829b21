//! Effect registry
//!
//! Looks effects up by name so hosts can pick one from configuration or cycle
//! through a list of them. Built-ins are registered under their snake_case
//! tag and under their long class-style name (`"FoldAnimation"`).

use rustc_hash::FxHashMap;

use crate::animation::CanvasAnimation;
use crate::effect::{
    Effect, Fold, Reveal, RevealFromBottom, RevealFromCenter, RevealFromTop, Shades,
};
use crate::error::{AnimationError, Result};

/// Builds a fresh effect with its default parameters
pub type EffectFactory = fn() -> Effect;

/// Name to effect factory map
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    factories: FxHashMap<String, EffectFactory>,
    /// Primary names in registration order
    names: Vec<String>,
}

impl EffectRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in effect
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_with_alias("fold", "FoldAnimation", || Fold::default().into());
        registry.register_with_alias("reveal", "RevealAnimation", || Reveal.into());
        registry.register_with_alias("reveal_from_bottom", "RevealFromBottomAnimation", || {
            RevealFromBottom.into()
        });
        registry.register_with_alias("reveal_from_center", "RevealFromCenterAnimation", || {
            RevealFromCenter.into()
        });
        registry.register_with_alias("reveal_from_top", "RevealFromTopAnimation", || {
            RevealFromTop.into()
        });
        registry.register_with_alias("shades", "ShadesAnimation", || Shades::default().into());
        registry
    }

    /// Register `factory` under `name`, replacing any previous entry
    pub fn register(&mut self, name: impl Into<String>, factory: EffectFactory) {
        let name = name.into();
        if self.factories.insert(name.clone(), factory).is_none() {
            self.names.push(name);
        }
    }

    /// Make `alias` resolve to the factory registered as `name`.
    /// Aliases are not listed by [`names`](Self::names).
    pub fn alias(&mut self, alias: impl Into<String>, name: &str) -> Result<()> {
        let factory = *self
            .factories
            .get(name)
            .ok_or_else(|| AnimationError::UnknownEffect(name.to_string()))?;
        self.factories.insert(alias.into(), factory);
        Ok(())
    }

    fn register_with_alias(&mut self, name: &str, alias: &str, factory: EffectFactory) {
        self.register(name, factory);
        self.factories.insert(alias.to_string(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Build the effect registered as `name`
    pub fn create(&self, name: &str) -> Result<Effect> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| AnimationError::UnknownEffect(name.to_string()))?;
        Ok(factory())
    }

    /// Build an animation around the effect registered as `name`
    pub fn create_animation(&self, name: &str) -> Result<CanvasAnimation> {
        let effect = self.create(name)?;
        tracing::debug!("EffectRegistry: created {}", effect.name());
        Ok(CanvasAnimation::new(effect))
    }

    /// Primary names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name at position `counter`, wrapping around
    pub fn cycle(&self, counter: usize) -> Option<&str> {
        if self.names.is_empty() {
            return None;
        }
        Some(self.names[counter % self.names.len()].as_str())
    }
}
