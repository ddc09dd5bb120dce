//! Scroll triggers: binding timelines to scroll-position intervals
//!
//! A trigger watches the document scroll offset and drives its timeline's
//! progress. Scrub triggers tie progress continuously to the offset within
//! their interval; toggle triggers fire once per threshold crossing.

use crate::error::AnimationError;

/// Activation state of a trigger relative to the current scroll offset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerState {
    /// Scroll has not yet reached the trigger's start
    #[default]
    Before,
    /// Scroll is inside the trigger's interval (or a fired reversible
    /// toggle is waiting for the exit crossing)
    Active,
    /// Scroll has passed the trigger's end, or a one-shot has fired
    After,
}

/// What a toggle trigger does on threshold crossings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToggleAction {
    /// Play forward once on entry; terminal until a manual reset
    #[default]
    PlayOnce,
    /// Play forward on entry, play back to the start on exit
    PlayReverse,
}

#[derive(Clone, Debug)]
pub enum TriggerKind {
    /// Progress follows the scroll offset through [start, end]
    Scrub {
        end: f32,
        /// Catch-up lag in seconds; `None` snaps to the target progress
        smoothing: Option<f32>,
        /// Hold the reference element fixed while active
        pin: bool,
    },
    /// Binary playback on crossing `start`
    Toggle { action: ToggleAction },
}

/// Binds a timeline to a scroll interval on a reference element
#[derive(Clone, Debug)]
pub struct Trigger {
    reference: String,
    start: f32,
    kind: TriggerKind,
}

impl Trigger {
    /// A scrub trigger over [start, end). Requires `start < end`; a later
    /// resize may collapse the interval to zero.
    pub fn scrub(
        reference: impl Into<String>,
        start: f32,
        end: f32,
    ) -> Result<Self, AnimationError> {
        let reference = reference.into();
        if !(start.is_finite() && end.is_finite()) {
            return Err(AnimationError::InvalidTrigger {
                reference,
                reason: "non-finite scroll interval".to_string(),
            });
        }
        if start >= end {
            return Err(AnimationError::InvalidTrigger {
                reference,
                reason: format!("scrub interval requires start < end (got {start}..{end})"),
            });
        }
        Ok(Self {
            reference,
            start,
            kind: TriggerKind::Scrub {
                end,
                smoothing: None,
                pin: false,
            },
        })
    }

    /// A toggle trigger crossing a single threshold
    pub fn toggle(
        reference: impl Into<String>,
        start: f32,
        action: ToggleAction,
    ) -> Result<Self, AnimationError> {
        let reference = reference.into();
        if !start.is_finite() {
            return Err(AnimationError::InvalidTrigger {
                reference,
                reason: "non-finite scroll threshold".to_string(),
            });
        }
        Ok(Self {
            reference,
            start,
            kind: TriggerKind::Toggle { action },
        })
    }

    /// Builder: scrub catch-up lag in seconds (no-op on toggles)
    pub fn smoothing(mut self, seconds: f32) -> Self {
        if let TriggerKind::Scrub { smoothing, .. } = &mut self.kind {
            *smoothing = Some(seconds.max(0.0));
        }
        self
    }

    /// Builder: pin the reference element while active (no-op on toggles)
    pub fn pinned(mut self) -> Self {
        if let TriggerKind::Scrub { pin, .. } = &mut self.kind {
            *pin = true;
        }
        self
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    /// Scrub interval end; `None` for toggles
    pub fn end(&self) -> Option<f32> {
        match self.kind {
            TriggerKind::Scrub { end, .. } => Some(end),
            TriggerKind::Toggle { .. } => None,
        }
    }

    pub fn kind(&self) -> &TriggerKind {
        &self.kind
    }

    pub fn is_scrub(&self) -> bool {
        matches!(self.kind, TriggerKind::Scrub { .. })
    }

    /// Replace the scroll interval after a layout change. The interval may
    /// collapse (`start == end`); crossing a collapsed interval still
    /// delivers the terminal sample.
    pub(crate) fn resize(&mut self, start: f32, end: f32) -> Result<(), AnimationError> {
        if !(start.is_finite() && end.is_finite()) || end < start {
            return Err(AnimationError::InvalidTrigger {
                reference: self.reference.clone(),
                reason: format!("malformed resized interval {start}..{end}"),
            });
        }
        self.start = start;
        if let TriggerKind::Scrub { end: e, .. } = &mut self.kind {
            *e = end;
        }
        Ok(())
    }

    /// Next activation state given the current state and scroll offset
    ///
    /// Pure. Scrub states derive entirely from the offset (scrubbing back
    /// re-enters `Active` and `Before`). Toggle transitions depend on the
    /// action: `PlayOnce` jumps to terminal `After` on entry; `PlayReverse`
    /// stays `Active` past the threshold and returns to `Before` on exit.
    pub fn next_state(&self, current: TriggerState, offset: f32) -> TriggerState {
        match self.kind {
            TriggerKind::Scrub { end, .. } => {
                if offset < self.start {
                    TriggerState::Before
                } else if offset < end {
                    TriggerState::Active
                } else {
                    TriggerState::After
                }
            }
            TriggerKind::Toggle { action } => match (current, action) {
                (TriggerState::Before, _) if offset >= self.start => TriggerState::Active,
                (TriggerState::Active, ToggleAction::PlayOnce) => TriggerState::After,
                (TriggerState::Active, ToggleAction::PlayReverse) if offset < self.start => {
                    TriggerState::Before
                }
                // PlayOnce's After is terminal until a manual reset
                (state, _) => state,
            },
        }
    }

    /// Raw (unsmoothed) timeline progress for a state and offset
    pub fn target_progress(&self, state: TriggerState, offset: f32) -> f32 {
        match self.kind {
            TriggerKind::Scrub { end, .. } => {
                if end <= self.start {
                    // Collapsed interval: crossing it completes instantly
                    if offset >= self.start {
                        1.0
                    } else {
                        0.0
                    }
                } else {
                    ((offset - self.start) / (end - self.start)).clamp(0.0, 1.0)
                }
            }
            TriggerKind::Toggle { .. } => match state {
                TriggerState::Before => 0.0,
                TriggerState::Active | TriggerState::After => 1.0,
            },
        }
    }
}
