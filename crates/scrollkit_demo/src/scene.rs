//! The portfolio page's animation graph, expressed as sequencer data
//!
//! Document layout is hardcoded (this demo has no layout engine): section
//! top offsets stand in for measured element positions. Trigger starts
//! follow the page's "top 75%"-style rules: an element activates when its
//! top crosses the given fraction of the viewport.

use anyhow::Result;
use scrollkit_animation::{
    AnimationStep, Easing, Property, Sequencer, SequencePreset, Timeline, ToggleAction, Trigger,
};

// Section top offsets in document pixels
const QUOTE_TOP: f32 = 1200.0;
const GRID_TOP: f32 = 1600.0;
const THOUGHTS_TOP: f32 = 2100.0;
const FOOTER_TOP: f32 = 3000.0;

const CARDS: &[&str] = &["card-0", "card-1", "card-2", "card-3"];
const THOUGHTS: &[&str] = &["thought-0", "thought-1", "thought-2", "thought-3", "thought-4"];
const FOOTER_ITEMS: &[&str] = &["footer-item-0", "footer-item-1", "footer-item-2"];

pub struct Scene {
    pub sequencer: Sequencer,
    /// Channels worth logging during playback
    pub watched: Vec<(String, Property)>,
}

/// Scroll offset at which an element top crosses `fraction` of the viewport
fn crosses(top: f32, fraction: f32, viewport_height: f32) -> f32 {
    (top - fraction * viewport_height).max(0.0)
}

pub fn build(viewport_height: f32) -> Result<Scene> {
    let mut sequencer = Sequencer::new();

    sequencer.declare_targets([
        "hero-section",
        "hero-name",
        "hero-subtitle",
        "hero-aside",
        "marquee-track",
        "projects-grid",
        "thoughts-section",
        "pull-quote",
        "footer-section",
        "blink",
    ]);
    sequencer.declare_targets(CARDS.iter().copied());
    sequencer.declare_targets(THOUGHTS.iter().copied());
    sequencer.declare_targets(FOOTER_ITEMS.iter().copied());

    // Hero entrance plays on mount, not on scroll: name rises first, the
    // subtitle follows, the aside fades in last.
    let hero = Timeline::builder()
        .step(
            AnimationStep::new("hero-name", Property::Y, 60.0, 0.0)
                .span(0.0, 0.45)
                .ease(Easing::PowerOut(3)),
        )
        .step(
            AnimationStep::new("hero-name", Property::Opacity, 0.0, 1.0)
                .span(0.0, 0.45)
                .ease(Easing::PowerOut(3)),
        )
        .step(
            AnimationStep::new("hero-name", Property::Rotation, -2.0, 0.0)
                .span(0.0, 0.45)
                .ease(Easing::PowerOut(3)),
        )
        .step(
            AnimationStep::new("hero-subtitle", Property::Y, 20.0, 0.0)
                .span(0.2, 0.35)
                .ease(Easing::PowerOut(2)),
        )
        .step(
            AnimationStep::new("hero-subtitle", Property::Opacity, 0.0, 1.0)
                .span(0.2, 0.35)
                .ease(Easing::PowerOut(2)),
        )
        .step(
            AnimationStep::new("hero-aside", Property::Opacity, 0.0, 1.0)
                .span(0.45, 0.55)
                .ease(Easing::PowerOut(1)),
        )
        .build()?;
    sequencer.play_on_mount(hero)?;

    // Pinned intro: the hero holds in place and recedes slightly while the
    // first viewport-height of scroll plays out.
    let intro = Timeline::builder()
        .step(
            AnimationStep::new("hero-name", Property::Scale, 1.0, 0.92)
                .ease(Easing::PowerInOut(1)),
        )
        .build()?;
    sequencer.register_trigger(
        Trigger::scrub("hero-section", 0.0, 500.0)?.pinned(),
        intro,
    );

    // Project cards tumble in when the grid top crosses 75% of the
    // viewport, and reverse when scrolled back out.
    sequencer.register_trigger(
        Trigger::toggle(
            "projects-grid",
            crosses(GRID_TOP, 0.75, viewport_height),
            ToggleAction::PlayReverse,
        )?,
        SequencePreset::tumble_in(CARDS, 0.15)?,
    );

    // Thoughts slide in one by one at 80%.
    sequencer.register_trigger(
        Trigger::toggle(
            "thoughts-section",
            crosses(THOUGHTS_TOP, 0.8, viewport_height),
            ToggleAction::PlayReverse,
        )?,
        SequencePreset::slide_in_left(THOUGHTS, 20.0, 0.12)?,
    );

    // The pull quote scrubs with the scroll between 80% and 40%,
    // smoothed so it trails the scrollbar.
    sequencer.register_trigger(
        Trigger::scrub(
            "pull-quote",
            crosses(QUOTE_TOP, 0.8, viewport_height),
            crosses(QUOTE_TOP, 0.4, viewport_height),
        )?
        .smoothing(1.0),
        SequencePreset::slide_in_left(&["pull-quote"], 80.0, 0.0)?,
    );

    // Footer rows drift up at 90%.
    sequencer.register_trigger(
        Trigger::toggle(
            "footer-section",
            crosses(FOOTER_TOP, 0.9, viewport_height),
            ToggleAction::PlayReverse,
        )?,
        SequencePreset::rise(FOOTER_ITEMS, 10.0, 0.06)?,
    );

    // Wall-clock loops: the skill marquee and the cursor blink.
    sequencer.register_repeating(SequencePreset::marquee("marquee-track", 25_000.0));
    sequencer.register_repeating(SequencePreset::blink("blink"));

    let watched = vec![
        ("hero-name".to_string(), Property::Y),
        ("hero-name".to_string(), Property::Scale),
        ("card-0".to_string(), Property::Opacity),
        ("thought-0".to_string(), Property::X),
        ("pull-quote".to_string(), Property::X),
        ("marquee-track".to_string(), Property::XPercent),
        ("blink".to_string(), Property::Opacity),
    ];

    Ok(Scene { sequencer, watched })
}
