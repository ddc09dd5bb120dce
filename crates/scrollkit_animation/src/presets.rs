//! Preset timelines and loops for common page-entrance patterns
//!
//! Pre-built sequences matching the usual portfolio decorations: hero
//! fade-ups, staggered card tumbles, marquees, and a cursor blink.

use crate::easing::Easing;
use crate::error::AnimationError;
use crate::repeat::RepeatingAnimation;
use crate::step::{AnimationStep, Property};
use crate::timeline::Timeline;

/// Pre-built sequences for common patterns
pub struct SequencePreset;

impl SequencePreset {
    // ========================================================================
    // Single-element entrances
    // ========================================================================

    /// Rise from below while fading in, settling from a slight tilt
    /// (the hero-name entrance: y 60 -> 0, opacity 0 -> 1, rotation -2 -> 0)
    pub fn fade_up(target: &str, distance: f32) -> Result<Timeline, AnimationError> {
        Timeline::builder()
            .step(
                AnimationStep::new(target, Property::Y, distance, 0.0)
                    .ease(Easing::PowerOut(3)),
            )
            .step(
                AnimationStep::new(target, Property::Opacity, 0.0, 1.0)
                    .ease(Easing::PowerOut(2)),
            )
            .step(
                AnimationStep::new(target, Property::Rotation, -2.0, 0.0)
                    .ease(Easing::PowerOut(3)),
            )
            .build()
    }

    /// Plain fade from transparent to opaque
    pub fn fade_in(target: &str) -> Result<Timeline, AnimationError> {
        Timeline::builder()
            .step(
                AnimationStep::new(target, Property::Opacity, 0.0, 1.0)
                    .ease(Easing::PowerOut(1)),
            )
            .build()
    }

    // ========================================================================
    // Staggered group entrances
    // ========================================================================

    /// Cards rise, fade in, and settle from a small pseudo-random tilt,
    /// each starting `gap` after the previous one
    pub fn tumble_in(targets: &[&str], gap: f32) -> Result<Timeline, AnimationError> {
        let duration = group_duration(targets.len(), gap);
        let mut builder = Timeline::builder();
        for (i, target) in targets.iter().enumerate() {
            let start = i as f32 * gap;
            builder = builder
                .step(
                    AnimationStep::new(*target, Property::Y, 50.0, 0.0)
                        .span(start, duration)
                        .ease(Easing::PowerOut(2)),
                )
                .step(
                    AnimationStep::new(*target, Property::Opacity, 0.0, 1.0)
                        .span(start, duration)
                        .ease(Easing::PowerOut(2)),
                )
                .step(
                    AnimationStep::new(*target, Property::Rotation, settle_jitter(i), 0.0)
                        .span(start, duration)
                        .ease(Easing::PowerOut(2)),
                );
        }
        builder.build()
    }

    /// Elements slide in from the left while fading, staggered
    pub fn slide_in_left(
        targets: &[&str],
        distance: f32,
        gap: f32,
    ) -> Result<Timeline, AnimationError> {
        let duration = group_duration(targets.len(), gap);
        let mut builder = Timeline::builder();
        for (i, target) in targets.iter().enumerate() {
            let start = i as f32 * gap;
            builder = builder
                .step(
                    AnimationStep::new(*target, Property::X, -distance, 0.0)
                        .span(start, duration)
                        .ease(Easing::PowerOut(2)),
                )
                .step(
                    AnimationStep::new(*target, Property::Opacity, 0.0, 1.0)
                        .span(start, duration)
                        .ease(Easing::PowerOut(2)),
                );
        }
        builder.build()
    }

    /// Small upward drift with fade, staggered (footer rows)
    pub fn rise(targets: &[&str], distance: f32, gap: f32) -> Result<Timeline, AnimationError> {
        let duration = group_duration(targets.len(), gap);
        let mut builder = Timeline::builder();
        for (i, target) in targets.iter().enumerate() {
            let start = i as f32 * gap;
            builder = builder
                .step(
                    AnimationStep::new(*target, Property::Y, distance, 0.0)
                        .span(start, duration)
                        .ease(Easing::PowerOut(1)),
                )
                .step(
                    AnimationStep::new(*target, Property::Opacity, 0.0, 1.0)
                        .span(start, duration)
                        .ease(Easing::PowerOut(1)),
                );
        }
        builder.build()
    }

    // ========================================================================
    // Wall-clock loops
    // ========================================================================

    /// Continuously scroll a duplicated track left by half its width
    pub fn marquee(target: &str, period_ms: f64) -> RepeatingAnimation {
        RepeatingAnimation::new(target, Property::XPercent, 0.0, -50.0, period_ms)
    }

    /// Terminal-cursor blink: hard on/off every period
    pub fn blink(target: &str) -> RepeatingAnimation {
        RepeatingAnimation::new(target, Property::Opacity, 1.0, 0.0, 530.0)
            .yoyo()
            .ease(Easing::Steps(1))
    }
}

/// Per-element duration that fills the span left over by the stagger
fn group_duration(count: usize, gap: f32) -> f32 {
    1.0 - gap * count.saturating_sub(1) as f32
}

/// Deterministic small tilt in [-3, 3) degrees, varying per index
fn settle_jitter(i: usize) -> f32 {
    let h = (i as u32).wrapping_add(1).wrapping_mul(2_654_435_761) >> 16;
    (h % 600) as f32 / 100.0 - 3.0
}
