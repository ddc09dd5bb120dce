//! Animation steps: the atomic unit of a timeline
//!
//! A step animates one channel (target element + property) from one value
//! to another over a normalized sub-span of its owning timeline.

use crate::easing::Easing;

/// An animatable channel on a target element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// Opacity (0.0 to 1.0)
    Opacity,
    /// Horizontal translation in pixels
    X,
    /// Vertical translation in pixels
    Y,
    /// Horizontal translation as a percentage of the element's own width
    XPercent,
    /// Rotation in degrees (Z-axis)
    Rotation,
    /// Uniform scale factor
    Scale,
}

/// One interpolated value change inside a timeline
///
/// `start_offset` and `duration` are normalized to the owning timeline's
/// span: a step with `start_offset = 0.25, duration = 0.5` runs over the
/// middle half of the timeline. Before its interval the step contributes
/// `from`; after it, `to`.
#[derive(Clone, Debug)]
pub struct AnimationStep {
    /// Identifier of the element this step animates
    pub target: String,
    /// Which channel of the target changes
    pub property: Property,
    /// Value at and before the step's interval start
    pub from: f32,
    /// Value at and after the step's interval end
    pub to: f32,
    /// Interval start within the timeline span (0.0 to 1.0)
    pub start_offset: f32,
    /// Interval length within the timeline span (0.0 exclusive to 1.0)
    pub duration: f32,
    /// Easing applied to the step's local progress
    pub easing: Easing,
}

impl AnimationStep {
    /// Create a step spanning the whole timeline with linear easing
    pub fn new(target: impl Into<String>, property: Property, from: f32, to: f32) -> Self {
        Self {
            target: target.into(),
            property,
            from,
            to,
            start_offset: 0.0,
            duration: 1.0,
            easing: Easing::Linear,
        }
    }

    /// Builder: restrict the step to a sub-span of the timeline
    pub fn span(mut self, start_offset: f32, duration: f32) -> Self {
        self.start_offset = start_offset;
        self.duration = duration;
        self
    }

    /// Builder: set the easing function
    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Interval end within the timeline span
    pub fn end_offset(&self) -> f32 {
        self.start_offset + self.duration
    }

    /// Resolve the step's value at a timeline progress
    ///
    /// Pure: progress below the interval yields `from`, above it `to`,
    /// inside it the eased interpolation.
    pub fn value_at(&self, progress: f32) -> f32 {
        let local = if self.duration <= f32::EPSILON {
            if progress >= self.start_offset {
                1.0
            } else {
                0.0
            }
        } else {
            ((progress - self.start_offset) / self.duration).clamp(0.0, 1.0)
        };
        self.from + (self.to - self.from) * self.easing.apply(local)
    }
}
