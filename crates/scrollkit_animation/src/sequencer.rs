//! The sequencer: registry and per-tick driver
//!
//! Owns every registered trigger and repeating animation, reads the
//! scroll state each tick, advances trigger activation states, and folds
//! all sampled values into one [`Frame`].

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::AnimationError;
use crate::repeat::RepeatingAnimation;
use crate::step::AnimationStep;
use crate::timeline::{Frame, Timeline};
use crate::trigger::{ToggleAction, Trigger, TriggerKind, TriggerState};

new_key_type! {
    /// Handle for a registered trigger + timeline pair
    pub struct TriggerId;
    /// Handle for a registered repeating animation
    pub struct RepeatingId;
}

/// Snapshot of the document's scroll position, read once per tick
///
/// Only the host's native scrolling writes this; the sequencer never
/// mutates it. The latest snapshot always wins; there is no backlog of
/// stale samples.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Current scroll offset in pixels from the document top
    pub offset: f32,
    /// Viewport height in pixels
    pub viewport_height: f32,
}

impl ScrollState {
    pub fn new(offset: f32, viewport_height: f32) -> Self {
        Self {
            offset,
            viewport_height,
        }
    }
}

/// Built-in target for registrations with no reference element of their
/// own (mount-time playback).
pub const DOCUMENT_TARGET: &str = "document";

struct TriggerEntry {
    trigger: Trigger,
    timeline: Timeline,
    state: TriggerState,
    progress: f32,
    activations: u32,
    /// False when the reference element was missing at registration
    enabled: bool,
}

struct RepeatEntry {
    animation: RepeatingAnimation,
    enabled: bool,
}

/// Scroll-driven animation sequencer
///
/// Single-threaded and frame-driven: every state change happens inside
/// [`tick`](Self::tick), which returns after updating all registrations.
pub struct Sequencer {
    targets: FxHashSet<String>,
    triggers: SlotMap<TriggerId, TriggerEntry>,
    trigger_order: Vec<TriggerId>,
    repeats: SlotMap<RepeatingId, RepeatEntry>,
    repeat_order: Vec<RepeatingId>,
    missing: Vec<AnimationError>,
    last_tick_ms: Option<f64>,
}

impl Sequencer {
    pub fn new() -> Self {
        let mut targets = FxHashSet::default();
        targets.insert(DOCUMENT_TARGET.to_string());
        Self {
            targets,
            triggers: SlotMap::with_key(),
            trigger_order: Vec::new(),
            repeats: SlotMap::with_key(),
            repeat_order: Vec::new(),
            missing: Vec::new(),
            last_tick_ms: None,
        }
    }

    /// Declare an element identifier that steps and triggers may animate
    pub fn declare_target(&mut self, name: impl Into<String>) {
        self.targets.insert(name.into());
    }

    /// Declare several element identifiers
    pub fn declare_targets<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.declare_target(name);
        }
    }

    /// Register a trigger driving a timeline
    ///
    /// Steps referencing undeclared targets are logged, recorded as
    /// [`AnimationError::MissingTarget`], and dropped; the remaining
    /// steps still play. A trigger whose reference element is missing is
    /// registered disabled and contributes nothing.
    pub fn register_trigger(&mut self, trigger: Trigger, timeline: Timeline) -> TriggerId {
        let enabled = if self.targets.contains(trigger.reference()) {
            true
        } else {
            self.record_missing(trigger.reference());
            false
        };

        let mut kept: SmallVec<[AnimationStep; 8]> = SmallVec::new();
        let mut dropped: SmallVec<[String; 2]> = SmallVec::new();
        for step in timeline.steps() {
            if self.targets.contains(&step.target) {
                kept.push(step.clone());
            } else if !dropped.contains(&step.target) {
                dropped.push(step.target.clone());
            }
        }
        for target in dropped {
            self.record_missing(&target);
        }

        let id = self.triggers.insert(TriggerEntry {
            trigger,
            timeline: Timeline::from_validated(kept.into_vec()),
            state: TriggerState::Before,
            progress: 0.0,
            activations: 0,
            enabled,
        });
        self.trigger_order.push(id);
        id
    }

    /// Register a timeline that plays once on mount, not on scroll
    ///
    /// Modeled as a one-shot toggle on the document root with threshold
    /// zero: the first tick activates it and jumps it to its end state.
    pub fn play_on_mount(&mut self, timeline: Timeline) -> Result<TriggerId, AnimationError> {
        let trigger = Trigger::toggle(DOCUMENT_TARGET, 0.0, ToggleAction::PlayOnce)?;
        Ok(self.register_trigger(trigger, timeline))
    }

    /// Register a wall-clock repeating animation
    pub fn register_repeating(&mut self, animation: RepeatingAnimation) -> RepeatingId {
        let enabled = if self.targets.contains(&animation.target) {
            true
        } else {
            self.record_missing(&animation.target);
            false
        };
        let id = self.repeats.insert(RepeatEntry { animation, enabled });
        self.repeat_order.push(id);
        id
    }

    /// Remove a trigger; its in-flight interpolation is abandoned without
    /// a terminal callback. Unknown handles are ignored.
    pub fn deregister_trigger(&mut self, id: TriggerId) {
        if self.triggers.remove(id).is_some() {
            self.trigger_order.retain(|&t| t != id);
        }
    }

    /// Remove a repeating animation. Unknown handles are ignored.
    pub fn deregister_repeating(&mut self, id: RepeatingId) {
        if self.repeats.remove(id).is_some() {
            self.repeat_order.retain(|&r| r != id);
        }
    }

    /// Synchronously drop every registration and declared target. Must
    /// run before the host removes the visual elements, so nothing
    /// references destroyed targets. The missing-target log survives.
    pub fn teardown(&mut self) {
        self.triggers.clear();
        self.trigger_order.clear();
        self.repeats.clear();
        self.repeat_order.clear();
        self.targets.clear();
        self.targets.insert(DOCUMENT_TARGET.to_string());
        self.last_tick_ms = None;
    }

    /// Manually rewind a trigger to `Before` (the only way out of a
    /// one-shot's terminal `After`).
    pub fn reset_trigger(&mut self, id: TriggerId) {
        if let Some(entry) = self.triggers.get_mut(id) {
            entry.state = TriggerState::Before;
            entry.progress = 0.0;
        }
    }

    /// Replace a trigger's scroll interval after a layout change (resize).
    /// The interval may collapse to zero length; the next tick past it
    /// still delivers the terminal `sample(1.0)`. Unknown handles are
    /// ignored (the view already unmounted).
    pub fn resize_trigger(
        &mut self,
        id: TriggerId,
        start: f32,
        end: f32,
    ) -> Result<(), AnimationError> {
        match self.triggers.get_mut(id) {
            Some(entry) => entry.trigger.resize(start, end),
            None => Ok(()),
        }
    }

    pub fn trigger_state(&self, id: TriggerId) -> Option<TriggerState> {
        self.triggers.get(id).map(|e| e.state)
    }

    pub fn progress(&self, id: TriggerId) -> Option<f32> {
        self.triggers.get(id).map(|e| e.progress)
    }

    /// How many times a trigger has entered `Active`
    pub fn activation_count(&self, id: TriggerId) -> Option<u32> {
        self.triggers.get(id).map(|e| e.activations)
    }

    /// Missing-target errors recorded at registration time
    pub fn missing_targets(&self) -> &[AnimationError] {
        &self.missing
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn repeating_count(&self) -> usize {
        self.repeats.len()
    }

    /// Advance every registration one frame and fold the sampled values
    /// into a single frame.
    ///
    /// Triggers are evaluated in registration order; on a shared channel
    /// the later-registered trigger's write wins. There is no guarantee
    /// about relative timing across triggers when one mutates layout that
    /// another's reference element depends on; re-measure and call
    /// [`resize_trigger`](Self::resize_trigger) if that applies.
    ///
    /// `now_ms` is the frame clock; it drives scrub smoothing and all
    /// repeating animations. Scrub triggers with smoothing lag toward
    /// their target progress while `Active` and snap at the interval
    /// boundaries, so a crossed interval always receives its terminal
    /// sample and nothing is left mid-interpolation.
    pub fn tick(&mut self, scroll: ScrollState, now_ms: f64) -> Frame {
        let dt_ms = self
            .last_tick_ms
            .map(|last| (now_ms - last).max(0.0))
            .unwrap_or(0.0);
        self.last_tick_ms = Some(now_ms);

        let mut frame = Frame::new();

        for &id in &self.trigger_order {
            let Some(entry) = self.triggers.get_mut(id) else {
                continue;
            };
            if !entry.enabled {
                continue;
            }

            let prev = entry.state;
            let next = entry.trigger.next_state(prev, scroll.offset);
            if next != prev {
                tracing::debug!(
                    reference = entry.trigger.reference(),
                    ?prev,
                    ?next,
                    offset = scroll.offset,
                    "trigger transition"
                );
                if prev == TriggerState::Before && next == TriggerState::Active {
                    entry.activations += 1;
                }
            }
            entry.state = next;

            let target = entry.trigger.target_progress(next, scroll.offset);
            entry.progress = match entry.trigger.kind() {
                TriggerKind::Scrub {
                    smoothing: Some(lag),
                    ..
                } if next == TriggerState::Active && *lag > 0.0 => {
                    // Exponential catch-up toward the target progress
                    let alpha = 1.0 - (-(dt_ms as f32 / 1000.0) / lag).exp();
                    entry.progress + (target - entry.progress) * alpha
                }
                _ => target,
            };

            entry.timeline.sample_into(entry.progress, &mut frame);

            if let TriggerKind::Scrub { pin: true, .. } = entry.trigger.kind() {
                if next == TriggerState::Active {
                    frame.pin(entry.trigger.reference().to_string(), entry.trigger.start());
                }
            }
        }

        for &id in &self.repeat_order {
            let Some(entry) = self.repeats.get(id) else {
                continue;
            };
            if !entry.enabled {
                continue;
            }
            let anim = &entry.animation;
            frame.set(anim.target.clone(), anim.property, anim.value_at(now_ms));
        }

        frame
    }

    fn record_missing(&mut self, target: &str) {
        tracing::warn!(target_id = target, "animation target missing at registration; skipping");
        self.missing.push(AnimationError::MissingTarget {
            target: target.to_string(),
        });
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{AnimationStep, Property};
    use crate::timeline::Timeline;

    const VIEWPORT: f32 = 900.0;

    fn at(offset: f32) -> ScrollState {
        ScrollState::new(offset, VIEWPORT)
    }

    fn fade(target: &str) -> AnimationStep {
        AnimationStep::new(target, Property::Opacity, 0.0, 1.0)
    }

    fn single_step_timeline(target: &str) -> Timeline {
        Timeline::builder().step(fade(target)).build().unwrap()
    }

    #[test]
    fn test_scrub_progress_scenario() {
        // start=100, end=300 sampled at 100, 200, 300 -> [0.0, 0.5, 1.0]
        let mut seq = Sequencer::new();
        seq.declare_target("quote");
        let id = seq.register_trigger(
            Trigger::scrub("quote", 100.0, 300.0).unwrap(),
            single_step_timeline("quote"),
        );

        let mut progress = Vec::new();
        for offset in [100.0, 200.0, 300.0] {
            seq.tick(at(offset), 0.0);
            progress.push(seq.progress(id).unwrap());
        }
        assert_eq!(progress, vec![0.0, 0.5, 1.0]);
        assert_eq!(seq.trigger_state(id), Some(TriggerState::After));
    }

    #[test]
    fn test_toggle_play_reverse_round_trip() {
        // Activated at offset 50 (start=40), then scrolled back above 40:
        // BEFORE -> ACTIVE -> BEFORE, played forward then reversed.
        let mut seq = Sequencer::new();
        seq.declare_target("cards");
        let timeline = Timeline::builder()
            .step(AnimationStep::new("cards", Property::Y, 50.0, 0.0))
            .build()
            .unwrap();
        let id = seq.register_trigger(
            Trigger::toggle("cards", 40.0, ToggleAction::PlayReverse).unwrap(),
            timeline,
        );

        assert_eq!(seq.trigger_state(id), Some(TriggerState::Before));

        let forward = seq.tick(at(50.0), 0.0);
        assert_eq!(seq.trigger_state(id), Some(TriggerState::Active));
        assert_eq!(forward.get("cards", Property::Y), Some(0.0));

        let reversed = seq.tick(at(30.0), 16.0);
        assert_eq!(seq.trigger_state(id), Some(TriggerState::Before));
        assert_eq!(reversed.get("cards", Property::Y), Some(50.0));
    }

    #[test]
    fn test_toggle_activation_is_idempotent() {
        let mut seq = Sequencer::new();
        seq.declare_target("cards");
        let id = seq.register_trigger(
            Trigger::toggle("cards", 500.0, ToggleAction::PlayOnce).unwrap(),
            single_step_timeline("cards"),
        );

        for i in 0..5 {
            seq.tick(at(510.0), i as f64 * 16.0);
        }
        assert_eq!(seq.activation_count(id), Some(1));
        assert_eq!(seq.trigger_state(id), Some(TriggerState::After));

        // A one-shot stays terminal when scrolled back
        seq.tick(at(0.0), 100.0);
        assert_eq!(seq.trigger_state(id), Some(TriggerState::After));

        seq.reset_trigger(id);
        assert_eq!(seq.trigger_state(id), Some(TriggerState::Before));
    }

    #[test]
    fn test_missing_target_skipped_valid_steps_play() {
        let mut seq = Sequencer::new();
        seq.declare_targets(["a", "b"]);
        let timeline = Timeline::builder()
            .step(fade("a"))
            .step(fade("ghost"))
            .step(fade("b"))
            .build()
            .unwrap();
        let id = seq.register_trigger(Trigger::scrub("a", 0.0, 100.0).unwrap(), timeline);

        assert_eq!(seq.missing_targets().len(), 1);
        assert!(matches!(
            &seq.missing_targets()[0],
            AnimationError::MissingTarget { target } if target == "ghost"
        ));

        let frame = seq.tick(at(50.0), 0.0);
        assert_eq!(frame.get("a", Property::Opacity), Some(0.5));
        assert_eq!(frame.get("b", Property::Opacity), Some(0.5));
        assert_eq!(frame.get("ghost", Property::Opacity), None);
        assert_eq!(seq.trigger_state(id), Some(TriggerState::Active));
    }

    #[test]
    fn test_missing_reference_disables_trigger() {
        let mut seq = Sequencer::new();
        seq.declare_target("a");
        seq.register_trigger(
            Trigger::scrub("ghost-section", 0.0, 100.0).unwrap(),
            single_step_timeline("a"),
        );
        let frame = seq.tick(at(50.0), 0.0);
        assert!(frame.is_empty());
        assert_eq!(seq.missing_targets().len(), 1);
    }

    #[test]
    fn test_scrub_round_trip_restores_from_values() {
        let mut seq = Sequencer::new();
        seq.declare_target("quote");
        let timeline = Timeline::builder()
            .step(AnimationStep::new("quote", Property::X, -80.0, 0.0))
            .step(fade("quote"))
            .build()
            .unwrap();
        seq.register_trigger(Trigger::scrub("quote", 100.0, 300.0).unwrap(), timeline);

        seq.tick(at(300.0), 0.0);
        let back = seq.tick(at(0.0), 16.0);
        assert_eq!(back.get("quote", Property::X), Some(-80.0));
        assert_eq!(back.get("quote", Property::Opacity), Some(0.0));
    }

    #[test]
    fn test_pin_reported_only_while_active() {
        let mut seq = Sequencer::new();
        seq.declare_target("intro");
        seq.register_trigger(
            Trigger::scrub("intro", 100.0, 300.0).unwrap().pinned(),
            single_step_timeline("intro"),
        );

        assert!(seq.tick(at(50.0), 0.0).pins().is_empty());

        let active = seq.tick(at(200.0), 16.0);
        assert_eq!(active.pins().len(), 1);
        assert_eq!(active.pins()[0].target, "intro");
        assert_eq!(active.pins()[0].held_at, 100.0);

        // Released exactly at the interval end
        assert!(seq.tick(at(300.0), 32.0).pins().is_empty());
    }

    #[test]
    fn test_collapsed_interval_still_delivers_terminal_sample() {
        let mut seq = Sequencer::new();
        seq.declare_target("intro");
        let id = seq.register_trigger(
            Trigger::scrub("intro", 100.0, 300.0).unwrap(),
            single_step_timeline("intro"),
        );
        // Resize shrinks the interval to zero before it was ever entered
        seq.resize_trigger(id, 100.0, 100.0).unwrap();

        let frame = seq.tick(at(150.0), 0.0);
        assert_eq!(frame.get("intro", Property::Opacity), Some(1.0));
        assert_eq!(seq.trigger_state(id), Some(TriggerState::After));
    }

    #[test]
    fn test_smoothing_lags_then_converges() {
        let mut seq = Sequencer::new();
        seq.declare_target("quote");
        let id = seq.register_trigger(
            Trigger::scrub("quote", 0.0, 400.0).unwrap().smoothing(0.5),
            single_step_timeline("quote"),
        );

        seq.tick(at(200.0), 0.0);
        seq.tick(at(200.0), 16.0);
        let lagged = seq.progress(id).unwrap();
        assert!(lagged > 0.0 && lagged < 0.5, "lagged = {lagged}");

        let mut now = 16.0;
        for _ in 0..600 {
            now += 16.0;
            seq.tick(at(200.0), now);
        }
        let settled = seq.progress(id).unwrap();
        assert!((settled - 0.5).abs() < 0.01, "settled = {settled}");
    }

    #[test]
    fn test_smoothing_snaps_at_interval_boundaries() {
        let mut seq = Sequencer::new();
        seq.declare_target("quote");
        let id = seq.register_trigger(
            Trigger::scrub("quote", 100.0, 300.0).unwrap().smoothing(1.0),
            single_step_timeline("quote"),
        );

        seq.tick(at(200.0), 0.0);
        seq.tick(at(200.0), 16.0);
        // Crossing the end snaps to the terminal sample despite the lag
        let end = seq.tick(at(300.0), 32.0);
        assert_eq!(seq.progress(id), Some(1.0));
        assert_eq!(end.get("quote", Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_mount_playback_fires_on_first_tick() {
        let mut seq = Sequencer::new();
        seq.declare_target("hero-name");
        let timeline = Timeline::builder()
            .step(AnimationStep::new("hero-name", Property::Y, 60.0, 0.0))
            .step(AnimationStep::new("hero-name", Property::Rotation, -2.0, 0.0))
            .build()
            .unwrap();
        let id = seq.play_on_mount(timeline).unwrap();

        let frame = seq.tick(at(0.0), 0.0);
        assert_eq!(frame.get("hero-name", Property::Y), Some(0.0));
        assert_eq!(frame.get("hero-name", Property::Rotation), Some(0.0));
        assert_eq!(seq.activation_count(id), Some(1));
    }

    #[test]
    fn test_later_registration_wins_shared_channel() {
        let mut seq = Sequencer::new();
        seq.declare_target("hero");
        let first = Timeline::builder()
            .step(AnimationStep::new("hero", Property::Opacity, 0.0, 0.3))
            .build()
            .unwrap();
        let second = Timeline::builder()
            .step(AnimationStep::new("hero", Property::Opacity, 0.0, 0.9))
            .build()
            .unwrap();
        seq.register_trigger(Trigger::scrub("hero", 0.0, 100.0).unwrap(), first);
        seq.register_trigger(Trigger::scrub("hero", 0.0, 100.0).unwrap(), second);

        let frame = seq.tick(at(100.0), 0.0);
        assert_eq!(frame.get("hero", Property::Opacity), Some(0.9));
    }

    #[test]
    fn test_deregister_and_teardown() {
        let mut seq = Sequencer::new();
        seq.declare_targets(["hero", "marquee"]);
        let trigger_id = seq.register_trigger(
            Trigger::scrub("hero", 0.0, 100.0).unwrap(),
            single_step_timeline("hero"),
        );
        let repeat_id = seq.register_repeating(RepeatingAnimation::new(
            "marquee",
            Property::XPercent,
            0.0,
            -50.0,
            25_000.0,
        ));

        seq.deregister_trigger(trigger_id);
        assert_eq!(seq.trigger_count(), 0);
        assert!(seq.trigger_state(trigger_id).is_none());
        // Deregistering again is a no-op
        seq.deregister_trigger(trigger_id);

        seq.deregister_repeating(repeat_id);
        assert_eq!(seq.repeating_count(), 0);

        seq.register_trigger(
            Trigger::scrub("hero", 0.0, 100.0).unwrap(),
            single_step_timeline("hero"),
        );
        seq.teardown();
        assert_eq!(seq.trigger_count(), 0);
        assert!(seq.tick(at(50.0), 0.0).is_empty());
    }

    #[test]
    fn test_repeating_animation_follows_frame_clock() {
        let mut seq = Sequencer::new();
        seq.declare_target("marquee");
        seq.register_repeating(RepeatingAnimation::new(
            "marquee",
            Property::XPercent,
            0.0,
            -50.0,
            1000.0,
        ));

        let frame = seq.tick(at(0.0), 500.0);
        let v = frame.get("marquee", Property::XPercent).unwrap();
        assert!((v - -25.0).abs() < 1e-4);
    }
}
