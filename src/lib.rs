#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Board`**: Bundles the concrete strip, digit, lamp, panel, delay and RNG types
//! - **`DeviceSet`**: The six output devices of a panel, addressed by role
//! - **`ExhibitContext`**: Owns devices, delay and RNG; provides the baseline reset
//! - **`TriggerSource`** / **`TriggerPolicy`**: Sensor read and the state machine deciding when to fire
//! - **`Phase`** / **`ExhibitSequence`**: Ordered, timed steps of a triggered sequence
//! - **`PhaseSequencer`**: Runs a sequence to completion, then restores the baseline
//! - **`Exhibit`**: The poll loop tying everything together
//!
//! Everything blocks on the caller's thread through `embedded_hal::delay::DelayNs`.

#[macro_use]
mod fmt;

pub mod colors;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod exhibit;
pub mod exhibits;
pub mod phase;
pub mod sequencer;
pub mod strip;
pub mod trigger;

pub use colors::Rgb;
pub use config::{ExhibitProfile, IdleScene, StripConfig};
pub use context::ExhibitContext;
pub use device::{
    Board, ChaserStrip, DeviceError, DeviceRole, DeviceSet, DigitDisplay, DigitSelect, StatusLamp,
    StripSelect, TextPanel,
};
pub use error::ExhibitError;
pub use exhibit::{Exhibit, PollOutcome};
pub use phase::{
    ExhibitSequence, PanelText, Phase, PhaseError, Ramp, RampTarget, SequenceBuilder, ValueRange,
    ValueSource,
};
pub use sequencer::{PhaseSequencer, RunReport, SequencerState};
pub use strip::{Chaser, StripAnimator};
pub use trigger::{
    DropPolicy, EdgePolicy, IncrementalPolicy, Sample, SensorError, TriggerPolicy, TriggerSource,
    Verdict,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_sequences_build() {
        assert_eq!(exhibits::watering::sequence().unwrap().phase_count(), exhibits::watering::PHASES);
        assert_eq!(exhibits::heat::sequence().unwrap().phase_count(), exhibits::heat::PHASES);
        assert_eq!(exhibits::traffic::sequence().unwrap().phase_count(), exhibits::traffic::PHASES);
    }
}
