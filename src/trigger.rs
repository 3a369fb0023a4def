//! Trigger sources and the policies that decide when a sequence fires.
//!
//! A [`TriggerSource`] is polled once per cycle. Its sample is handed to a
//! [`TriggerPolicy`], a small state machine that returns a [`Verdict`]. The
//! three policies cover the exhibits' sensors:
//!
//! - [`EdgePolicy`]: digital touch input, fires while the level is high.
//! - [`IncrementalPolicy`]: temperature, fires once a latched target is reached.
//! - [`DropPolicy`]: light level, fires on a sharp drop between two samples.

use crate::config::{LIGHT_DROP_THRESHOLD, TEMPERATURE_HYSTERESIS, TEMPERATURE_TARGET_INCREASE};

/// Errors reported by a sensor read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// The driver reported a failed conversion or checksum.
    ReadFailed,
    /// The sensor did not answer in time.
    Timeout,
    /// The value is outside what the sensor can physically report.
    OutOfRange,
}

impl core::fmt::Display for SensorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SensorError::ReadFailed => write!(f, "sensor read failed"),
            SensorError::Timeout => write!(f, "sensor timed out"),
            SensorError::OutOfRange => write!(f, "sensor value out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SensorError {}

/// A raw sensor sample.
pub trait Sample: Copy {
    /// Integer value the sequence may display for this sample, if any.
    fn reading(&self) -> Option<i32>;
}

impl Sample for bool {
    fn reading(&self) -> Option<i32> {
        None
    }
}

impl Sample for f32 {
    fn reading(&self) -> Option<i32> {
        self.is_finite().then(|| libm::floorf(*self) as i32)
    }
}

impl Sample for u16 {
    fn reading(&self) -> Option<i32> {
        Some(i32::from(*self))
    }
}

/// Sensor polled by the exhibit loop.
pub trait TriggerSource {
    type Sample: Sample;

    /// Reads one sample.
    fn read(&mut self) -> Result<Self::Sample, SensorError>;
}

/// Outcome of evaluating one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// Run the phase sequence.
    Fire,
    /// Nothing to do this cycle.
    Idle,
    /// Value returned to normal: reset the devices without a sequence.
    Relax,
}

/// State machine deciding from successive samples whether to fire.
pub trait TriggerPolicy {
    type Sample: Sample;

    /// Evaluates one sample and updates internal state.
    fn evaluate(&mut self, sample: Self::Sample) -> Verdict;

    /// Called after a fired sequence has completed.
    ///
    /// `resample` is a fresh read taken once the sequence is over, or `None`
    /// if that read failed.
    fn rearm(&mut self, resample: Option<Self::Sample>);
}

/// Fires whenever the digital input reads high.
///
/// There is no cool-down: holding the sensor re-triggers on the first poll
/// after a sequence completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgePolicy {
    last_level: bool,
}

impl EdgePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_level(&self) -> bool {
        self.last_level
    }
}

impl TriggerPolicy for EdgePolicy {
    type Sample = bool;

    fn evaluate(&mut self, level: bool) -> Verdict {
        self.last_level = level;
        if level { Verdict::Fire } else { Verdict::Idle }
    }

    fn rearm(&mut self, _resample: Option<bool>) {
        self.last_level = false;
    }
}

/// Fires when a rising value reaches a target latched on the first rise.
///
/// A rise of at least `hysteresis` over the previous sample arms a target
/// `floor(current) + increase`. Once `floor(current)` reaches it the policy
/// fires; [`rearm`](TriggerPolicy::rearm) then reseeds from a fresh sample
/// and disarms. Any sample below `previous + hysteresis` relaxes the panel
/// and drops the latch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IncrementalPolicy {
    previous: Option<f32>,
    target: Option<f32>,
    hysteresis: f32,
    increase: f32,
}

impl Default for IncrementalPolicy {
    fn default() -> Self {
        Self::new(TEMPERATURE_HYSTERESIS, TEMPERATURE_TARGET_INCREASE)
    }
}

impl IncrementalPolicy {
    pub fn new(hysteresis: f32, increase: f32) -> Self {
        Self {
            previous: None,
            target: None,
            hysteresis,
            increase,
        }
    }

    /// Last accepted sample, `None` until seeded.
    pub fn previous(&self) -> Option<f32> {
        self.previous
    }

    /// Armed target, `None` while no alert cycle is armed.
    pub fn target(&self) -> Option<f32> {
        self.target
    }
}

impl TriggerPolicy for IncrementalPolicy {
    type Sample = f32;

    fn evaluate(&mut self, current: f32) -> Verdict {
        if !current.is_finite() {
            return Verdict::Idle;
        }

        let Some(previous) = self.previous else {
            self.previous = Some(current);
            return Verdict::Idle;
        };

        let whole = libm::floorf(current);
        if let Some(target) = self.target {
            if whole >= target {
                return Verdict::Fire;
            }
        }

        let verdict = if current >= previous + self.hysteresis {
            if self.target.is_none() {
                self.target = Some(whole + self.increase);
            }
            Verdict::Idle
        } else {
            self.target = None;
            Verdict::Relax
        };

        self.previous = Some(current);
        verdict
    }

    fn rearm(&mut self, resample: Option<f32>) {
        self.previous = resample.filter(|value| value.is_finite());
        self.target = None;
    }
}

/// Fires when the sample drops by at least `threshold` since the last poll.
///
/// There is no latch: a signal that keeps falling fires again on every poll
/// where the drop condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DropPolicy {
    previous: u16,
    threshold: i32,
}

impl Default for DropPolicy {
    fn default() -> Self {
        Self::new(LIGHT_DROP_THRESHOLD)
    }
}

impl DropPolicy {
    pub fn new(threshold: i32) -> Self {
        Self {
            previous: 0,
            threshold,
        }
    }

    /// Starts from a known previous sample instead of zero.
    pub fn with_previous(mut self, previous: u16) -> Self {
        self.previous = previous;
        self
    }

    pub fn previous(&self) -> u16 {
        self.previous
    }
}

impl TriggerPolicy for DropPolicy {
    type Sample = u16;

    fn evaluate(&mut self, current: u16) -> Verdict {
        let fire = i32::from(current) <= i32::from(self.previous) - self.threshold;
        self.previous = current;
        if fire { Verdict::Fire } else { Verdict::Idle }
    }

    fn rearm(&mut self, _resample: Option<u16>) {}
}
