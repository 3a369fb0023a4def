//! Temperature-triggered heat panel.
//!
//! Fires once the temperature has risen a whole degree past the reading that
//! armed it, and shows that reading on the digits.

use crate::colors::{ORANGE, RED};
use crate::config::{
    DIGIT_BRIGHTNESS, ExhibitProfile, FADE_IN_INTERVAL_MS, LAMP_HOLD_MS, RAMP_END,
    RAMP_INTERVAL_MS, RAMP_STRIDE, RANDOM_VALUE_MAX, RANDOM_VALUE_MIN, SLOT_MACHINE_INTERVAL_MS,
    SLOT_MACHINE_SPINS, SUCCESS_HOLD_MS, WARNING_HOLD_MS,
};
use crate::context::ExhibitContext;
use crate::device::{Board, DeviceSet, DigitSelect, StripSelect};
use crate::exhibit::Exhibit;
use crate::phase::{
    ExhibitSequence, PanelText, Phase, PhaseError, Ramp, RampTarget, ValueRange, ValueSource,
};
use crate::trigger::{IncrementalPolicy, TriggerSource};

pub const PHASES: usize = 8;

pub type HeatExhibit<B, S> = Exhibit<B, S, IncrementalPolicy, PHASES>;

pub fn sequence() -> Result<ExhibitSequence<PHASES>, PhaseError> {
    ExhibitSequence::builder(ValueSource::Reading { fallback: 0 })
        .phase(Phase::Hold {
            text: PanelText::new(["Temperature", "is rising!"], ORANGE).blinking(),
            duration_ms: WARNING_HOLD_MS,
        })?
        .phase(Phase::SlotMachine {
            digit: DigitSelect::Primary,
            spins: SLOT_MACHINE_SPINS,
            interval_ms: SLOT_MACHINE_INTERVAL_MS,
            range: ValueRange::new(RANDOM_VALUE_MIN, RANDOM_VALUE_MAX),
        })?
        .phase(Phase::Chase {
            strip: StripSelect::Primary,
        })?
        .phase(Phase::FadeIn {
            digit: DigitSelect::Secondary,
            levels: DIGIT_BRIGHTNESS,
            interval_ms: FADE_IN_INTERVAL_MS,
        })?
        .phase(Phase::Chase {
            strip: StripSelect::Secondary,
        })?
        .phase(Phase::Ramp(Ramp {
            target: RampTarget::Backlight,
            from: ORANGE,
            to: RED,
            end: RAMP_END,
            stride: RAMP_STRIDE,
            interval_ms: RAMP_INTERVAL_MS,
            chase: true,
            count: false,
        }))?
        .phase(Phase::Hold {
            text: PanelText::new(["Warm air rises", "and spreads out"], RED),
            duration_ms: SUCCESS_HOLD_MS,
        })?
        .phase(Phase::Lamp {
            color: RED,
            duration_ms: LAMP_HOLD_MS,
        })?
        .build()
}

/// Builds the heat panel with its stock profile.
pub fn exhibit<B, S>(
    devices: DeviceSet<B>,
    delay: B::Delay,
    rng: B::Rng,
    thermometer: S,
) -> Result<HeatExhibit<B, S>, PhaseError>
where
    B: Board,
    S: TriggerSource<Sample = f32>,
{
    let ctx = ExhibitContext::new(devices, delay, rng, ExhibitProfile::heat());
    Ok(Exhibit::new(ctx, thermometer, IncrementalPolicy::default(), sequence()?))
}
