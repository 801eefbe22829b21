//! Effect Gallery
//!
//! Animates every registered effect in and back out over a recorded frame,
//! printing how many segments each frame composited.
//!
//! Run with: RUST_LOG=debug cargo run -p folio_layout --example effect_gallery

use std::rc::Rc;

use folio_animation::{
    AnimationConfig, CanvasAnimation, EffectConfig, EffectRegistry, HostSurface, Looper, Result,
};
use folio_core::{Color, DrawCommand, ImageId, RecordingContext, Rect, Size};
use folio_layout::{host_surface, AnimatedFrame, FrameClock};

const SCREEN: Size = Size::new(1080.0, 1920.0);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let registry = EffectRegistry::with_defaults();
    let looper = Looper::new();

    for (counter, name) in registry.names().enumerate() {
        let view: Rc<dyn std::any::Any> = AnimatedFrame::with_content(SCREEN, move |ctx, size| {
            ctx.fill_rect(size.to_rect(), Color::from_hex(0x20_20_28));
            ctx.draw_image(ImageId(counter as u64), size.to_rect());
        });
        let frame = host_surface(view)?;

        let settings = AnimationConfig {
            duration_ms: 1800,
            ..AnimationConfig::new(EffectConfig::from(&registry.create(name)?))
        };
        let animation = CanvasAnimation::with_looper(settings.effect.build()?, looper.clone());
        frame.load_animation(&animation);

        let mut clock = FrameClock::new(Rc::clone(&frame), looper.clone());
        let mut ctx = RecordingContext::new();

        for (start, end) in [(0.0, 1.0), (1.0, 0.0)] {
            let animator = settings.configure(animation.new_animator_instance(start, end)?);
            clock.play(animator);
            let frames = clock.run_to_end(&mut ctx, 1_000)?;
            let images = ctx
                .draw_commands()
                .filter(|cmd| matches!(cmd, DrawCommand::DrawImage { .. }))
                .count();
            println!(
                "{name:>20}: {start} -> {end} in {frames} frames, {images} image commits",
            );
            ctx.clear();
        }
    }

    // Drive a reveal by hand, e.g. from a scroll position
    let frame = AnimatedFrame::with_content(SCREEN, |ctx, size| {
        ctx.fill_rect(size.to_rect(), Color::WHITE);
    });
    let animation = registry.create_animation("reveal_from_top")?;
    frame.load_animation(&animation);
    animation.set_running(true);

    let mut ctx = RecordingContext::new();
    for scroll in [0.0, 0.25, 0.5, 1.0] {
        frame.set_animation_step(scroll);
        frame.render(&mut ctx)?;
        println!("scroll {scroll}: clip {:?}", first_clip(&ctx));
        ctx.clear();
    }
    Ok(())
}

fn first_clip(ctx: &RecordingContext) -> Option<Rect> {
    ctx.commands().iter().find_map(|cmd| match cmd {
        DrawCommand::ClipRect(rect) => Some(*rect),
        _ => None,
    })
}
