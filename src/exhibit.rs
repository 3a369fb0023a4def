//! The shared poll loop.
//!
//! An [`Exhibit`] ties a trigger source and policy to a phase sequencer.
//! Everything runs on the caller's thread: while a sequence plays, the
//! sensor is not read.

use core::convert::Infallible;

use crate::context::ExhibitContext;
use crate::device::Board;
use crate::error::ExhibitError;
use crate::phase::ExhibitSequence;
use crate::sequencer::{PhaseSequencer, RunReport};
use crate::trigger::{Sample, SensorError, TriggerPolicy, TriggerSource, Verdict};

/// What happened during one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// The sensor read failed; trigger state is unchanged.
    Skipped(SensorError),
    /// Nothing triggered.
    Idle,
    /// The value returned to normal and the baseline was restored.
    Relaxed,
    /// The sequence ran to completion.
    Fired(RunReport),
}

/// One exhibit panel: context, sensor, trigger policy and sequence.
///
/// # Type Parameters
/// * `B` - Board bundling the device, delay and random types
/// * `S` - Trigger source
/// * `P` - Trigger policy consuming the source's samples
/// * `N` - Maximum number of phases in the sequence
pub struct Exhibit<B, S, P, const N: usize>
where
    B: Board,
    S: TriggerSource,
    P: TriggerPolicy<Sample = S::Sample>,
{
    ctx: ExhibitContext<B>,
    source: S,
    policy: P,
    sequencer: PhaseSequencer<N>,
}

impl<B, S, P, const N: usize> Exhibit<B, S, P, N>
where
    B: Board,
    S: TriggerSource,
    P: TriggerPolicy<Sample = S::Sample>,
{
    pub fn new(ctx: ExhibitContext<B>, source: S, policy: P, sequence: ExhibitSequence<N>) -> Self {
        Self {
            ctx,
            source,
            policy,
            sequencer: PhaseSequencer::new(sequence),
        }
    }

    pub fn context(&self) -> &ExhibitContext<B> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut ExhibitContext<B> {
        &mut self.ctx
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn sequencer(&self) -> &PhaseSequencer<N> {
        &self.sequencer
    }

    /// Initializes the devices and shows the idle scene.
    pub fn start(&mut self) -> Result<(), ExhibitError> {
        info!("starting exhibit {}", self.ctx.profile().name);
        self.ctx.init()?;
        self.ctx.reset_all()
    }

    /// Reads the sensor once and acts on the verdict.
    ///
    /// A fired sequence blocks until it completes and the baseline is back.
    /// Device errors are returned; sensor errors only skip the cycle.
    pub fn poll(&mut self) -> Result<PollOutcome, ExhibitError> {
        let sample = match self.source.read() {
            Ok(sample) => sample,
            Err(e) => {
                warn!("sensor read failed: {}", e);
                return Ok(PollOutcome::Skipped(e));
            }
        };

        match self.policy.evaluate(sample) {
            Verdict::Idle => Ok(PollOutcome::Idle),
            Verdict::Relax => {
                debug!("value back to normal, restoring baseline");
                self.ctx.reset_all()?;
                Ok(PollOutcome::Relaxed)
            }
            Verdict::Fire => {
                info!("trigger fired");
                let report = self.sequencer.run(&mut self.ctx, sample.reading())?;
                let resample = self.source.read().ok();
                self.policy.rearm(resample);
                Ok(PollOutcome::Fired(report))
            }
        }
    }

    /// Polls forever at the profile's poll interval.
    ///
    /// Only returns on a device error.
    pub fn run(&mut self) -> Result<Infallible, ExhibitError> {
        loop {
            self.poll()?;
            let interval = self.ctx.profile().poll_interval_ms;
            self.ctx.hold(interval);
        }
    }

    /// Splits the exhibit into context, source and policy.
    pub fn into_parts(self) -> (ExhibitContext<B>, S, P) {
        (self.ctx, self.source, self.policy)
    }
}
