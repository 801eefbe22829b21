//! Transform strategies
//!
//! An effect turns `(progress, content bounds)` into one or more clipped,
//! transformed calls to [`HostSurface::commit_draw`]. Effects never draw
//! pixels of their own, and every commit is wrapped in a save/restore pair so
//! no matrix or clip leaks from one segment into the next.
//!
//! | effect | commits | transform |
//! |---|---|---|
//! | [`Fold`] | one per opened segment | camera projection |
//! | [`Shades`] | one per band | camera projection |
//! | [`Reveal`] and friends | one | clip only |

mod fold;
mod hinge;
mod reveal;
mod shades;

pub use fold::{Fold, DEFAULT_FOLDS, DEFAULT_FOLD_CAMERA_DISTANCE, DEFAULT_FOLD_MAX_ROTATION};
pub use hinge::Hinge;
pub use reveal::{Reveal, RevealFromBottom, RevealFromCenter, RevealFromTop};
pub use shades::{
    Shades, DEFAULT_CASCADE_DECAY, DEFAULT_INITIAL_CASCADE, DEFAULT_SHADES,
    DEFAULT_SHADES_CAMERA_DISTANCE, DEFAULT_SHADES_MAX_ROTATION,
};

use folio_core::{DrawContext, Size};

use crate::host::HostSurface;

/// The closed set of effects a [`CanvasAnimation`](crate::CanvasAnimation)
/// can run
#[derive(Clone, Debug)]
pub enum Effect {
    Fold(Fold),
    Reveal(Reveal),
    RevealFromCenter(RevealFromCenter),
    RevealFromTop(RevealFromTop),
    RevealFromBottom(RevealFromBottom),
    Shades(Shades),
}

impl Default for Effect {
    fn default() -> Self {
        Effect::Reveal(Reveal)
    }
}

impl Effect {
    /// Draw one frame of the effect through `surface`
    pub fn render(
        &mut self,
        ctx: &mut dyn DrawContext,
        progress: f32,
        bounds: Size,
        surface: &dyn HostSurface,
    ) {
        match self {
            Effect::Fold(e) => e.render(ctx, progress, bounds, surface),
            Effect::Reveal(e) => e.render(ctx, progress, bounds, surface),
            Effect::RevealFromCenter(e) => e.render(ctx, progress, bounds, surface),
            Effect::RevealFromTop(e) => e.render(ctx, progress, bounds, surface),
            Effect::RevealFromBottom(e) => e.render(ctx, progress, bounds, surface),
            Effect::Shades(e) => e.render(ctx, progress, bounds, surface),
        }
    }

    /// Stable snake_case tag, shared with the configuration format
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Fold(_) => "fold",
            Effect::Reveal(_) => "reveal",
            Effect::RevealFromCenter(_) => "reveal_from_center",
            Effect::RevealFromTop(_) => "reveal_from_top",
            Effect::RevealFromBottom(_) => "reveal_from_bottom",
            Effect::Shades(_) => "shades",
        }
    }
}

macro_rules! impl_from_effect {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Effect {
                fn from(effect: $variant) -> Self {
                    Effect::$variant(effect)
                }
            }
        )*
    };
}

impl_from_effect!(
    Fold,
    Reveal,
    RevealFromCenter,
    RevealFromTop,
    RevealFromBottom,
    Shades,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestSurface;
    use folio_core::{DrawCommand, RecordingContext};

    fn all() -> Vec<Effect> {
        vec![
            Fold::default().into(),
            Reveal.into(),
            RevealFromCenter.into(),
            RevealFromTop.into(),
            RevealFromBottom.into(),
            Shades::default().into(),
        ]
    }

    #[test]
    fn test_every_effect_balances_save_stack() {
        let surface = TestSurface::new(Size::new(120.0, 90.0));
        for mut effect in all() {
            for i in 0..=10 {
                let mut ctx = RecordingContext::new();
                let outer = ctx.save();
                effect.render(&mut ctx, i as f32 / 10.0, surface.content_bounds(), surface.as_ref());
                assert_eq!(ctx.save_count(), outer + 1, "{}", effect.name());
                ctx.restore_to_count(outer);
            }
            surface.take_commits();
        }
    }

    #[test]
    fn test_each_segment_is_self_contained() {
        let surface = TestSurface::new(Size::new(100.0, 80.0));
        let mut ctx = RecordingContext::new();
        Effect::from(Fold::default()).render(&mut ctx, 0.6, surface.content_bounds(), surface.as_ref());

        let commands = ctx.commands();
        assert_eq!(commands.len(), 3 * 5);
        for segment in commands.chunks(5) {
            assert!(matches!(
                segment,
                [
                    DrawCommand::Save,
                    DrawCommand::Concat(_),
                    DrawCommand::ClipRect(_),
                    DrawCommand::FillRect { .. },
                    DrawCommand::Restore,
                ]
            ));
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = all().iter().map(Effect::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_default_is_reveal() {
        assert!(matches!(Effect::default(), Effect::Reveal(_)));
    }
}
