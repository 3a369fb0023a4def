//! Phase types and sequence construction.

use crate::colors::Rgb;
use crate::device::{DigitSelect, StripSelect};
use heapless::Vec;
use rand::{Rng, RngCore};

/// Inclusive range of pseudo-random display values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValueRange {
    pub min: i32,
    pub max: i32,
}

impl ValueRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Draws a value. A degenerate range (`min >= max`) always yields `min`.
    pub fn sample<R: RngCore>(&self, rng: &mut R) -> i32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

/// Where the value shown during a run comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueSource {
    /// Pseudo-random value drawn once per run.
    Random(ValueRange),
    /// The sensor sample that triggered the run, or `fallback` if the
    /// sample has no numeric reading.
    Reading { fallback: i32 },
    /// A constant.
    Fixed(i32),
}

/// Which color a ramp walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampTarget {
    Backlight,
    Lamp,
}

/// Text shown on the panel during a hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelText {
    pub lines: [&'static str; 2],
    pub backlight: Rgb,
    pub blink: bool,
}

impl PanelText {
    pub const fn new(lines: [&'static str; 2], backlight: Rgb) -> Self {
        Self {
            lines,
            backlight,
            blink: false,
        }
    }

    pub const fn blinking(mut self) -> Self {
        self.blink = true;
        self
    }
}

/// Color walk with optional lock-step chase and counting digits.
///
/// Steps through `i` in `0..=end` by `stride`. At each step the target color
/// is `from` interpolated toward `to` by `i / end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ramp {
    pub target: RampTarget,
    pub from: Rgb,
    pub to: Rgb,
    pub end: u16,
    pub stride: u16,
    pub interval_ms: u32,
    /// Advance a chaser on both strips each step.
    pub chase: bool,
    /// Show `V + i` on both digit displays each step.
    pub count: bool,
}

impl Ramp {
    /// Number of steps the ramp takes.
    pub fn step_count(&self) -> usize {
        if self.stride == 0 {
            return 0;
        }
        usize::from(self.end / self.stride) + 1
    }
}

/// One timed step of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Flicker pseudo-random numbers, then settle on the run value.
    SlotMachine {
        digit: DigitSelect,
        spins: u16,
        interval_ms: u32,
        range: ValueRange,
    },
    /// Render the run value at brightness `0..=levels`.
    FadeIn {
        digit: DigitSelect,
        levels: u8,
        interval_ms: u32,
    },
    /// Full chase across one strip.
    Chase { strip: StripSelect },
    Ramp(Ramp),
    /// Show text and wait.
    Hold { text: PanelText, duration_ms: u32 },
    /// Set the status lamp and wait.
    Lamp { color: Rgb, duration_ms: u32 },
}

impl Phase {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::SlotMachine { .. } => "slot-machine",
            Phase::FadeIn { .. } => "fade-in",
            Phase::Chase { .. } => "chase",
            Phase::Ramp(_) => "ramp",
            Phase::Hold { .. } => "hold",
            Phase::Lamp { .. } => "lamp",
        }
    }
}

/// Sequence validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseError {
    /// No phases provided.
    EmptySequence,

    /// Ramp with a zero stride would never advance.
    ZeroRampStride,

    /// Sequence capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for PhaseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PhaseError::EmptySequence => write!(f, "sequence must have at least one phase"),
            PhaseError::ZeroRampStride => write!(f, "ramp stride must be non-zero"),
            PhaseError::CapacityExceeded => write!(f, "sequence capacity exceeded"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PhaseError {}

/// An ordered, validated list of phases.
///
/// # Type Parameters
/// * `N` - Maximum number of phases this sequence can hold
#[derive(Debug, Clone)]
pub struct ExhibitSequence<const N: usize> {
    phases: Vec<Phase, N>,
    value: ValueSource,
}

impl<const N: usize> ExhibitSequence<N> {
    /// Creates a new sequence builder.
    pub fn builder(value: ValueSource) -> SequenceBuilder<N> {
        SequenceBuilder::new(value)
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    pub fn value_source(&self) -> ValueSource {
        self.value
    }

    /// Resolves the run value from the source and the triggering reading.
    pub fn resolve_value<R: RngCore>(&self, reading: Option<i32>, rng: &mut R) -> i32 {
        match self.value {
            ValueSource::Random(range) => range.sample(rng),
            ValueSource::Reading { fallback } => reading.unwrap_or(fallback),
            ValueSource::Fixed(value) => value,
        }
    }
}

/// Builder for constructing validated sequences.
#[derive(Debug)]
pub struct SequenceBuilder<const N: usize> {
    phases: Vec<Phase, N>,
    value: ValueSource,
}

impl<const N: usize> SequenceBuilder<N> {
    pub fn new(value: ValueSource) -> Self {
        Self {
            phases: Vec::new(),
            value,
        }
    }

    /// Appends a phase.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The sequence already holds `N` phases
    pub fn phase(mut self, phase: Phase) -> Result<Self, PhaseError> {
        self.phases
            .push(phase)
            .map_err(|_| PhaseError::CapacityExceeded)?;
        Ok(self)
    }

    /// Builds and validates the sequence.
    ///
    /// # Errors
    /// * `EmptySequence` - No phases were added
    /// * `ZeroRampStride` - A ramp has a zero stride
    pub fn build(self) -> Result<ExhibitSequence<N>, PhaseError> {
        if self.phases.is_empty() {
            return Err(PhaseError::EmptySequence);
        }

        if self
            .phases
            .iter()
            .any(|phase| matches!(phase, Phase::Ramp(ramp) if ramp.stride == 0))
        {
            return Err(PhaseError::ZeroRampStride);
        }

        Ok(ExhibitSequence {
            phases: self.phases,
            value: self.value,
        })
    }
}
