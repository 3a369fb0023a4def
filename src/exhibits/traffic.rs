//! Light-triggered traffic panel.
//!
//! A car passing over the light sensor darkens it. The drop policy has no
//! latch, so a reading that keeps falling across polls fires again after
//! each sequence; in practice the sequence outlasts any car.

use crate::colors::{GREEN, RED, YELLOW};
use crate::config::{
    DIGIT_BRIGHTNESS, ExhibitProfile, FADE_IN_INTERVAL_MS, LAMP_HOLD_MS, RAMP_END,
    RAMP_INTERVAL_MS, RAMP_STRIDE, SUCCESS_HOLD_MS, TRAFFIC_CAPACITY, WARNING_HOLD_MS,
};
use crate::context::ExhibitContext;
use crate::device::{Board, DeviceSet, DigitSelect, StripSelect};
use crate::exhibit::Exhibit;
use crate::phase::{ExhibitSequence, PanelText, Phase, PhaseError, Ramp, RampTarget, ValueSource};
use crate::trigger::{DropPolicy, TriggerSource};

pub const PHASES: usize = 7;

pub type TrafficExhibit<B, S> = Exhibit<B, S, DropPolicy, PHASES>;

pub fn sequence() -> Result<ExhibitSequence<PHASES>, PhaseError> {
    ExhibitSequence::builder(ValueSource::Fixed(TRAFFIC_CAPACITY))
        .phase(Phase::Hold {
            text: PanelText::new(["Car detected!", "Road filling up"], YELLOW).blinking(),
            duration_ms: WARNING_HOLD_MS,
        })?
        .phase(Phase::Chase {
            strip: StripSelect::Primary,
        })?
        .phase(Phase::FadeIn {
            digit: DigitSelect::Primary,
            levels: DIGIT_BRIGHTNESS,
            interval_ms: FADE_IN_INTERVAL_MS,
        })?
        .phase(Phase::Chase {
            strip: StripSelect::Secondary,
        })?
        .phase(Phase::Ramp(Ramp {
            target: RampTarget::Lamp,
            from: GREEN,
            to: RED,
            end: RAMP_END,
            stride: RAMP_STRIDE,
            interval_ms: RAMP_INTERVAL_MS,
            chase: true,
            count: true,
        }))?
        .phase(Phase::Hold {
            text: PanelText::new(["Traffic jam!", "Take the bus"], RED).blinking(),
            duration_ms: SUCCESS_HOLD_MS,
        })?
        .phase(Phase::Lamp {
            color: GREEN,
            duration_ms: LAMP_HOLD_MS,
        })?
        .build()
}

/// Builds the traffic panel with its stock profile.
pub fn exhibit<B, S>(
    devices: DeviceSet<B>,
    delay: B::Delay,
    rng: B::Rng,
    light: S,
) -> Result<TrafficExhibit<B, S>, PhaseError>
where
    B: Board,
    S: TriggerSource<Sample = u16>,
{
    let ctx = ExhibitContext::new(devices, delay, rng, ExhibitProfile::traffic());
    Ok(Exhibit::new(ctx, light, DropPolicy::default(), sequence()?))
}
