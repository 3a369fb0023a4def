//! Phase sequencer with state tracking.
//!
//! Provides [`PhaseSequencer`], which executes an [`ExhibitSequence`] top to
//! bottom against an [`ExhibitContext`]. Every phase commits its device
//! writes before blocking, so the next phase never starts on a half-written
//! frame. The run always ends with a baseline reset.

use crate::colors;
use crate::context::ExhibitContext;
use crate::device::{Board, ChaserStrip, DeviceRole, DigitDisplay, DigitSelect, StatusLamp, StripSelect, TextPanel};
use crate::error::{DeviceResultExt, ExhibitError};
use crate::phase::{ExhibitSequence, Phase, Ramp, RampTarget, ValueRange};
use crate::strip::Chaser;

/// The current state of a phase sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerState {
    /// Never run.
    Idle,
    /// Executing phases.
    Running,
    /// Last run finished and the baseline was restored.
    Complete,
    /// Last run stopped on a device error.
    Faulted,
}

/// Summary of one sequencer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunReport {
    /// Value `V` shown during the run.
    pub value: i32,
    /// Phases that ran to completion.
    pub phases_run: usize,
    /// True if the run was cut short by the cancel predicate.
    pub cancelled: bool,
}

/// Runs a fixed, ordered list of phases.
///
/// # Type Parameters
/// * `N` - Maximum number of phases in the sequence
#[derive(Debug, Clone)]
pub struct PhaseSequencer<const N: usize> {
    sequence: ExhibitSequence<N>,
    state: SequencerState,
    runs: u32,
}

fn render_digits<B: Board>(
    ctx: &mut ExhibitContext<B>,
    digit: DigitSelect,
    value: i32,
    brightness: u8,
) -> Result<(), ExhibitError> {
    let devices = ctx.devices_mut();
    if matches!(digit, DigitSelect::Primary | DigitSelect::Both) {
        devices
            .primary_digit
            .show_number(value, brightness)
            .on(DeviceRole::PrimaryDigit)?;
    }
    if matches!(digit, DigitSelect::Secondary | DigitSelect::Both) {
        devices
            .secondary_digit
            .show_number(value, brightness)
            .on(DeviceRole::SecondaryDigit)?;
    }
    Ok(())
}

impl<const N: usize> PhaseSequencer<N> {
    pub fn new(sequence: ExhibitSequence<N>) -> Self {
        Self {
            sequence,
            state: SequencerState::Idle,
            runs: 0,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn sequence(&self) -> &ExhibitSequence<N> {
        &self.sequence
    }

    /// Number of completed runs, cancelled runs included.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Runs every phase, then restores the baseline.
    ///
    /// `reading` is the numeric value of the triggering sample, used when the
    /// sequence shows the sensor reading. Blocks until done; there is no way
    /// to abort.
    pub fn run<B: Board>(
        &mut self,
        ctx: &mut ExhibitContext<B>,
        reading: Option<i32>,
    ) -> Result<RunReport, ExhibitError> {
        self.run_until(ctx, reading, || false)
    }

    /// Like [`run`](Self::run), but checks `cancel` before every phase.
    ///
    /// When `cancel` returns true the remaining phases are skipped and the
    /// baseline is restored right away.
    pub fn run_until<B, F>(
        &mut self,
        ctx: &mut ExhibitContext<B>,
        reading: Option<i32>,
        mut cancel: F,
    ) -> Result<RunReport, ExhibitError>
    where
        B: Board,
        F: FnMut() -> bool,
    {
        self.state = SequencerState::Running;

        let value = self.sequence.resolve_value(reading, ctx.rng_mut());
        let mut report = RunReport {
            value,
            phases_run: 0,
            cancelled: false,
        };

        let result = self.execute(ctx, value, &mut report, &mut cancel);
        let result = result.and_then(|()| ctx.reset_all());

        match result {
            Ok(()) => {
                self.state = SequencerState::Complete;
                self.runs = self.runs.wrapping_add(1);
                if report.cancelled {
                    info!("sequence cancelled after {} phases", report.phases_run);
                } else {
                    info!("sequence complete, value {}", report.value);
                }
                Ok(report)
            }
            Err(e) => {
                self.state = SequencerState::Faulted;
                warn!("sequence aborted: {}", e);
                Err(e)
            }
        }
    }

    fn execute<B, F>(
        &self,
        ctx: &mut ExhibitContext<B>,
        value: i32,
        report: &mut RunReport,
        cancel: &mut F,
    ) -> Result<(), ExhibitError>
    where
        B: Board,
        F: FnMut() -> bool,
    {
        for phase in self.sequence.phases() {
            if cancel() {
                report.cancelled = true;
                return Ok(());
            }

            debug!("phase {}: {}", report.phases_run, phase.label());
            Self::run_phase(ctx, phase, value)?;
            report.phases_run += 1;
        }
        Ok(())
    }

    fn run_phase<B: Board>(
        ctx: &mut ExhibitContext<B>,
        phase: &Phase,
        value: i32,
    ) -> Result<(), ExhibitError> {
        match *phase {
            Phase::SlotMachine {
                digit,
                spins,
                interval_ms,
                range,
            } => Self::slot_machine(ctx, digit, spins, interval_ms, range, value),
            Phase::FadeIn {
                digit,
                levels,
                interval_ms,
            } => {
                for level in 0..=levels {
                    render_digits(ctx, digit, value, level)?;
                    ctx.hold(interval_ms);
                }
                Ok(())
            }
            Phase::Chase { strip } => ctx.animate(strip),
            Phase::Ramp(ramp) => Self::ramp(ctx, &ramp, value),
            Phase::Hold { text, duration_ms } => {
                ctx.show_text(text.lines, text.backlight, text.blink)?;
                ctx.hold(duration_ms);
                Ok(())
            }
            Phase::Lamp { color, duration_ms } => {
                ctx.devices_mut()
                    .status_lamp
                    .set_color(color)
                    .on(DeviceRole::StatusLamp)?;
                ctx.hold(duration_ms);
                Ok(())
            }
        }
    }

    fn slot_machine<B: Board>(
        ctx: &mut ExhibitContext<B>,
        digit: DigitSelect,
        spins: u16,
        interval_ms: u32,
        range: ValueRange,
        value: i32,
    ) -> Result<(), ExhibitError> {
        let brightness = ctx.profile().digit_brightness;
        for _ in 0..spins {
            let spin = range.sample(ctx.rng_mut());
            render_digits(ctx, digit, spin, brightness)?;
            ctx.hold(interval_ms);
        }
        render_digits(ctx, digit, value, brightness)
    }

    fn ramp<B: Board>(ctx: &mut ExhibitContext<B>, ramp: &Ramp, value: i32) -> Result<(), ExhibitError> {
        let brightness = ctx.profile().digit_brightness;
        let chaser_color = ctx.profile().chaser_color;
        let mut primary = Chaser::new(ctx.strip_config(StripSelect::Primary).length());
        let mut secondary = Chaser::new(ctx.strip_config(StripSelect::Secondary).length());
        let end = f32::from(ramp.end.max(1));

        for i in (0..=ramp.end).step_by(usize::from(ramp.stride.max(1))) {
            let color = colors::lerp(ramp.from, ramp.to, f32::from(i) / end);
            let devices = ctx.devices_mut();
            match ramp.target {
                RampTarget::Backlight => devices
                    .text_panel
                    .set_backlight(color)
                    .on(DeviceRole::TextPanel)?,
                RampTarget::Lamp => devices
                    .status_lamp
                    .set_color(color)
                    .on(DeviceRole::StatusLamp)?,
            }

            if ramp.chase {
                primary
                    .advance(&mut devices.primary_strip, chaser_color)
                    .on(DeviceRole::PrimaryStrip)?;
                secondary
                    .advance(&mut devices.secondary_strip, chaser_color)
                    .on(DeviceRole::SecondaryStrip)?;
            }

            if ramp.count {
                render_digits(ctx, DigitSelect::Both, value.saturating_add(i32::from(i)), brightness)?;
            }

            ctx.hold(ramp.interval_ms);
        }

        if ramp.chase {
            for which in [StripSelect::Primary, StripSelect::Secondary] {
                let strip = ctx.devices_mut().strip_mut(which);
                strip.clear();
                strip.show().on(which.role())?;
            }
        }
        Ok(())
    }
}
