//! Scrollkit Animation Engine
//!
//! Scroll-synchronized animation sequencing, decoupled from any UI layer.
//!
//! # Features
//!
//! - **Timelines**: validated, immutable step sequences with pure sampling
//! - **Triggers**: scroll-interval activation (scrub, toggle, pin)
//! - **Sequencer**: per-frame tick loop folding every registration into one frame
//! - **Repeating**: wall-clock loops (marquee, blink) independent of scroll
//!
//! The sequencer computes channel values; applying them to visual state is
//! the host's job. All state changes happen inside `Sequencer::tick` on a
//! single thread.

pub mod easing;
pub mod error;
pub mod presets;
pub mod repeat;
pub mod sequencer;
pub mod step;
pub mod timeline;
pub mod trigger;

pub use easing::Easing;
pub use error::AnimationError;
pub use presets::SequencePreset;
pub use repeat::{RepeatMode, RepeatingAnimation};
pub use sequencer::{RepeatingId, ScrollState, Sequencer, TriggerId, DOCUMENT_TARGET};
pub use step::{AnimationStep, Property};
pub use timeline::{Frame, Pin, Timeline, TimelineBuilder};
pub use trigger::{ToggleAction, Trigger, TriggerKind, TriggerState};
