use thiserror::Error;

use crate::step::Property;

#[derive(Debug, Error)]
pub enum AnimationError {
    /// A step carries a non-finite or out-of-range offset/duration.
    #[error("timeline step {index} ({target}/{property:?}): {reason}")]
    InvalidStep {
        index: usize,
        target: String,
        property: Property,
        reason: String,
    },

    /// A step's interval runs past the timeline span and overflow is
    /// not allowed on this timeline.
    #[error(
        "timeline step {index} ({target}/{property:?}) exceeds the timeline span: \
         start {start_offset} + duration {duration} > 1"
    )]
    StepOutOfSpan {
        index: usize,
        target: String,
        property: Property,
        start_offset: f32,
        duration: f32,
    },

    /// A trigger's scroll interval is malformed.
    #[error("trigger on {reference:?}: {reason}")]
    InvalidTrigger { reference: String, reason: String },

    /// A step or trigger names an element that was never declared.
    #[error("unknown animation target {target:?}")]
    MissingTarget { target: String },
}
