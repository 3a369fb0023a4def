//! Touch-triggered plant watering panel.

use crate::colors::{BLUE, GREEN, RED, Rgb};
use crate::config::{
    DIGIT_BRIGHTNESS, ExhibitProfile, FADE_IN_INTERVAL_MS, INSTRUCTION_HOLD_MS, LAMP_HOLD_MS,
    RAMP_END, RAMP_INTERVAL_MS, RAMP_STRIDE, RANDOM_VALUE_MAX, RANDOM_VALUE_MIN,
    SLOT_MACHINE_INTERVAL_MS, SLOT_MACHINE_SPINS, SUCCESS_HOLD_MS, WARNING_HOLD_MS,
};
use crate::context::ExhibitContext;
use crate::device::{Board, DeviceSet, DigitSelect, StripSelect};
use crate::exhibit::Exhibit;
use crate::phase::{
    ExhibitSequence, PanelText, Phase, PhaseError, Ramp, RampTarget, ValueRange, ValueSource,
};
use crate::trigger::{EdgePolicy, TriggerSource};

/// Number of phases in the watering sequence.
pub const PHASES: usize = 9;

/// Backlight the water ramp starts from.
pub const RAMP_START: Rgb = Rgb::new(0, 0, 40);

pub type WateringExhibit<B, S> = Exhibit<B, S, EdgePolicy, PHASES>;

/// Slot machine, two chases, warning, then a rising water ramp.
pub fn sequence() -> Result<ExhibitSequence<PHASES>, PhaseError> {
    let range = ValueRange::new(RANDOM_VALUE_MIN, RANDOM_VALUE_MAX);

    ExhibitSequence::builder(ValueSource::Random(range))
        .phase(Phase::SlotMachine {
            digit: DigitSelect::Primary,
            spins: SLOT_MACHINE_SPINS,
            interval_ms: SLOT_MACHINE_INTERVAL_MS,
            range,
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
        .phase(Phase::Hold {
            text: PanelText::new(["Soil is dry!", "Water needed"], RED).blinking(),
            duration_ms: WARNING_HOLD_MS,
        })?
        .phase(Phase::Hold {
            text: PanelText::new(["Watering...", "watch it grow"], RAMP_START),
            duration_ms: INSTRUCTION_HOLD_MS,
        })?
        .phase(Phase::Ramp(Ramp {
            target: RampTarget::Backlight,
            from: RAMP_START,
            to: BLUE,
            end: RAMP_END,
            stride: RAMP_STRIDE,
            interval_ms: RAMP_INTERVAL_MS,
            chase: true,
            count: true,
        }))?
        .phase(Phase::Hold {
            text: PanelText::new(["Well done!", "Plant is happy"], GREEN),
            duration_ms: SUCCESS_HOLD_MS,
        })?
        .phase(Phase::Lamp {
            color: GREEN,
            duration_ms: LAMP_HOLD_MS,
        })?
        .build()
}

/// Builds the watering panel with its stock profile.
pub fn exhibit<B, S>(
    devices: DeviceSet<B>,
    delay: B::Delay,
    rng: B::Rng,
    touch: S,
) -> Result<WateringExhibit<B, S>, PhaseError>
where
    B: Board,
    S: TriggerSource<Sample = bool>,
{
    let ctx = ExhibitContext::new(devices, delay, rng, ExhibitProfile::watering());
    Ok(Exhibit::new(ctx, touch, EdgePolicy::new(), sequence()?))
}
