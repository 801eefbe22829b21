//! Reveal effects
//!
//! Clip-only effects: each computes a single horizontal band from the
//! progress and draws the content once through it. No matrix is involved.

use folio_core::{DrawContext, Rect, Size};

use crate::host::HostSurface;

fn reveal_band(
    ctx: &mut dyn DrawContext,
    surface: &dyn HostSurface,
    band: Rect,
    name: &'static str,
) {
    tracing::trace!("{}: clip {:?}", name, band);
    let count = ctx.save();
    ctx.clip_rect(band);
    surface.commit_draw(ctx);
    ctx.restore_to_count(count);
}

macro_rules! reveal_effect {
    ($(#[$meta:meta])* $name:ident, |$progress:ident, $bounds:ident| $top:expr, $bottom:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        pub struct $name;

        impl $name {
            /// Band drawn at `progress`
            pub fn clip_for(&self, $progress: f32, $bounds: Size) -> Rect {
                Rect::from_ltrb(0.0, $top, $bounds.width, $bottom)
            }

            pub fn render(
                &mut self,
                ctx: &mut dyn DrawContext,
                progress: f32,
                bounds: Size,
                surface: &dyn HostSurface,
            ) {
                reveal_band(ctx, surface, self.clip_for(progress, bounds), stringify!($name));
            }
        }
    };
}

reveal_effect!(
    /// Grows a band from the top edge that recentres as it opens, reaching
    /// the full height at progress 1
    Reveal,
    |p, b| {
        let extent = b.height * p / 2.0;
        extent - extent * p
    },
    {
        let extent = b.height * p / 2.0;
        extent + extent * p
    }
);

reveal_effect!(
    /// Opens symmetrically from the vertical midpoint
    RevealFromCenter,
    |p, b| b.height / 2.0 - (b.height / 2.0) * p,
    b.height / 2.0 + (b.height / 2.0) * p
);

reveal_effect!(
    /// Uncovers the content from the top edge downwards
    RevealFromTop,
    |p, b| 0.0,
    b.height * p
);

reveal_effect!(
    /// Uncovers the content from the bottom edge upwards
    RevealFromBottom,
    |p, b| b.height - b.height * p,
    b.height
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestSurface;
    use folio_core::RecordingContext;

    const BOUNDS: Size = Size::new(100.0, 80.0);

    fn clips(p: f32) -> [Rect; 4] {
        [
            Reveal.clip_for(p, BOUNDS),
            RevealFromCenter.clip_for(p, BOUNDS),
            RevealFromTop.clip_for(p, BOUNDS),
            RevealFromBottom.clip_for(p, BOUNDS),
        ]
    }

    #[test]
    fn test_empty_at_zero_full_at_one() {
        for clip in clips(0.0) {
            assert!(clip.is_empty(), "{clip:?}");
        }
        for clip in clips(1.0) {
            assert_eq!(clip, BOUNDS.to_rect());
        }
    }

    #[test]
    fn test_area_grows_with_progress() {
        let mut last = [0.0f32; 4];
        for i in 1..=40 {
            let areas = clips(i as f32 / 40.0).map(|clip| clip.area());
            for (kind, (area, prev)) in areas.iter().zip(last.iter()).enumerate() {
                assert!(area >= prev, "reveal {kind} shrank at {i}");
            }
            last = areas;
        }
    }

    #[test]
    fn test_reveal_band_values() {
        // anchor = 40, band = 20 -/+ 10
        assert_eq!(Reveal.clip_for(0.5, BOUNDS), Rect::new(0.0, 10.0, 100.0, 20.0));
        assert_eq!(
            RevealFromCenter.clip_for(0.5, BOUNDS),
            Rect::new(0.0, 20.0, 100.0, 40.0)
        );
        assert_eq!(RevealFromTop.clip_for(0.25, BOUNDS), Rect::new(0.0, 0.0, 100.0, 20.0));
        assert_eq!(
            RevealFromBottom.clip_for(0.25, BOUNDS),
            Rect::new(0.0, 60.0, 100.0, 20.0)
        );
    }

    #[test]
    fn test_single_balanced_commit() {
        let surface = TestSurface::new(BOUNDS);
        let mut ctx = RecordingContext::new();

        RevealFromCenter.render(&mut ctx, 0.5, BOUNDS, surface.as_ref());

        let commits = surface.take_commits();
        assert_eq!(commits.len(), 1);
        assert!(commits[0].matrix.is_identity());
        assert_eq!(commits[0].clip, Some(Rect::new(0.0, 20.0, 100.0, 40.0)));
        assert_eq!(ctx.save_count(), 1);
    }
}
