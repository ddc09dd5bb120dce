//! Repeating animations driven by wall-clock time
//!
//! Independent of scroll: marquees, blinks, and continuous rotations run
//! from mount until teardown, phased off the frame clock.

use crate::easing::Easing;
use crate::step::Property;

/// How a repeating animation traverses its value range each period
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepeatMode {
    /// Restart from `from` every period
    #[default]
    Loop,
    /// Alternate direction every period (triangle-wave phase)
    Yoyo,
}

/// A looped, scroll-independent animation on one channel
#[derive(Clone, Debug)]
pub struct RepeatingAnimation {
    pub target: String,
    pub property: Property,
    pub from: f32,
    pub to: f32,
    pub period_ms: f64,
    pub mode: RepeatMode,
    pub easing: Easing,
}

impl RepeatingAnimation {
    pub fn new(
        target: impl Into<String>,
        property: Property,
        from: f32,
        to: f32,
        period_ms: f64,
    ) -> Self {
        Self {
            target: target.into(),
            property,
            from,
            to,
            period_ms: period_ms.max(1.0),
            mode: RepeatMode::Loop,
            easing: Easing::Linear,
        }
    }

    /// Builder: alternate direction each period
    pub fn yoyo(mut self) -> Self {
        self.mode = RepeatMode::Yoyo;
        self
    }

    /// Builder: set the easing applied to the phase
    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Normalized phase at a wall-clock time: sawtooth for `Loop`,
    /// triangle wave for `Yoyo`.
    pub fn phase_at(&self, now_ms: f64) -> f32 {
        let t = now_ms.max(0.0);
        match self.mode {
            RepeatMode::Loop => ((t % self.period_ms) / self.period_ms) as f32,
            RepeatMode::Yoyo => {
                let ph = (t % (2.0 * self.period_ms)) / self.period_ms;
                if ph <= 1.0 { ph as f32 } else { (2.0 - ph) as f32 }
            }
        }
    }

    /// Eased value at a wall-clock time
    pub fn value_at(&self, now_ms: f64) -> f32 {
        let eased = self.easing.apply(self.phase_at(now_ms));
        self.from + (self.to - self.from) * eased
    }
}
