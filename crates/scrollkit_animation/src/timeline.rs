//! Timelines: validated, immutable step sequences with pure sampling
//!
//! A timeline is built once, validated at build time, and never mutated
//! afterwards. Sampling is a pure function of progress: the caller owns
//! applying the resulting [`Frame`] to visual state.

use rustc_hash::FxHashMap;

use crate::error::AnimationError;
use crate::step::{AnimationStep, Property};

/// A pinned element record: while a pinning trigger is active, the
/// reference element is held fixed at the viewport position it had when
/// the trigger's interval began.
#[derive(Clone, Debug, PartialEq)]
pub struct Pin {
    /// Element held in place
    pub target: String,
    /// Document scroll offset at which the hold began
    pub held_at: f32,
}

/// Resolved channel values for one sample
///
/// Maps `(target, property)` to a value. Writes are last-write-wins:
/// within a timeline, later steps overwrite earlier ones on the same
/// channel; across triggers, later-registered triggers overwrite earlier
/// ones (the sequencer folds frames in registration order).
#[derive(Clone, Debug, Default)]
pub struct Frame {
    values: FxHashMap<(String, Property), f32>,
    pins: Vec<Pin>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a channel value (last write wins)
    pub fn set(&mut self, target: impl Into<String>, property: Property, value: f32) {
        self.values.insert((target.into(), property), value);
    }

    /// Read a channel value
    pub fn get(&self, target: &str, property: Property) -> Option<f32> {
        self.values.get(&(target.to_string(), property)).copied()
    }

    /// Record a pinned element for this sample
    pub fn pin(&mut self, target: impl Into<String>, held_at: f32) {
        self.pins.push(Pin {
            target: target.into(),
            held_at,
        });
    }

    /// Elements held fixed during this sample
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Fold another frame into this one; the other frame's writes win
    pub fn merge(&mut self, other: Frame) {
        self.values.extend(other.values);
        self.pins.extend(other.pins);
    }

    /// Iterate all resolved channels
    pub fn channels(&self) -> impl Iterator<Item = (&str, Property, f32)> {
        self.values
            .iter()
            .map(|((target, property), value)| (target.as_str(), *property, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builder for [`Timeline`]
///
/// Collects steps, optionally re-spaces them as a stagger, and validates
/// everything in [`build`](Self::build). Malformed steps are rejected,
/// never silently clamped.
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    steps: Vec<AnimationStep>,
    allow_overflow: bool,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn step(mut self, step: AnimationStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Append several steps in order
    pub fn steps(mut self, steps: impl IntoIterator<Item = AnimationStep>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Re-space all steps added so far: step `i` starts at `base + i * gap`,
    /// keeping each step's own duration. This is the card-tumble layout:
    /// identical entrances that begin a fixed interval apart.
    pub fn stagger(mut self, base: f32, gap: f32) -> Self {
        for (i, step) in self.steps.iter_mut().enumerate() {
            step.start_offset = base + i as f32 * gap;
        }
        self
    }

    /// Permit steps whose interval runs past the timeline span. Such
    /// steps are still mid-interpolation at `sample(1.0)` (explicit hold
    /// steps); without this, they fail validation.
    pub fn allow_overflow(mut self) -> Self {
        self.allow_overflow = true;
        self
    }

    /// Validate and freeze the timeline
    pub fn build(self) -> Result<Timeline, AnimationError> {
        for (index, step) in self.steps.iter().enumerate() {
            let invalid = |reason: &str| AnimationError::InvalidStep {
                index,
                target: step.target.clone(),
                property: step.property,
                reason: reason.to_string(),
            };

            if !(step.start_offset.is_finite()
                && step.duration.is_finite()
                && step.from.is_finite()
                && step.to.is_finite())
            {
                return Err(invalid("non-finite value"));
            }
            if !(0.0..=1.0).contains(&step.start_offset) {
                return Err(invalid("start offset outside [0, 1]"));
            }
            if step.duration <= 0.0 {
                return Err(invalid("duration must be positive"));
            }
            if step.duration > 1.0 {
                return Err(invalid("duration exceeds the timeline span"));
            }
            if !self.allow_overflow && step.end_offset() > 1.0 + 1e-6 {
                return Err(AnimationError::StepOutOfSpan {
                    index,
                    target: step.target.clone(),
                    property: step.property,
                    start_offset: step.start_offset,
                    duration: step.duration,
                });
            }
        }

        Ok(Timeline { steps: self.steps })
    }
}

/// An ordered, validated sequence of animation steps
///
/// Immutable once built; owned by exactly one trigger registration (or
/// played once on mount). Destroying the owning registration drops it.
#[derive(Clone, Debug)]
pub struct Timeline {
    steps: Vec<AnimationStep>,
}

impl Timeline {
    /// Start a builder
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::new()
    }

    /// Rebuild from steps that already passed validation (used when the
    /// sequencer drops steps whose targets are missing).
    pub(crate) fn from_validated(steps: Vec<AnimationStep>) -> Self {
        Self { steps }
    }

    /// The steps, in order
    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sample every step at a timeline progress
    ///
    /// Pure and deterministic. Progress is clamped to [0, 1]. Steps not
    /// yet reached contribute `from`, fully elapsed steps contribute
    /// `to`, in-interval steps contribute their eased interpolation.
    /// `sample(0.0)` therefore yields every step's `from` and
    /// `sample(1.0)` every step's `to` (for non-overflow timelines).
    pub fn sample(&self, progress: f32) -> Frame {
        let mut frame = Frame::new();
        self.sample_into(progress, &mut frame);
        frame
    }

    /// Sample into an existing frame (the sequencer's fold path)
    pub fn sample_into(&self, progress: f32, frame: &mut Frame) {
        let progress = progress.clamp(0.0, 1.0);
        for step in &self.steps {
            frame.set(step.target.clone(), step.property, step.value_at(progress));
        }
    }
}
