//! Chaser animations on a single strip.
//!
//! [`StripAnimator`] runs a complete, blocking chase from the first pixel to
//! one past the configured length. [`Chaser`] advances one frame per call so
//! several strips can be stepped in lock-step from a surrounding loop.

use crate::colors::{OFF, Rgb};
use crate::device::{ChaserStrip, DeviceError};
use embedded_hal::delay::DelayNs;

/// Writes a pixel only when it exists on both the configured and physical strip.
#[inline]
fn set_guarded<S: ChaserStrip>(strip: &mut S, length: usize, index: usize, color: Rgb) {
    if index < length && index < strip.len() {
        strip.set_pixel(index, color);
    }
}

/// Blocking single-pixel chase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripAnimator {
    active: Rgb,
    interval_ms: u32,
}

impl StripAnimator {
    pub fn new(active: Rgb, interval_ms: u32) -> Self {
        Self {
            active,
            interval_ms,
        }
    }

    /// Runs the chase over `length` pixels.
    ///
    /// For every `i` in `0..=length` the pixel `i` is lit and `i - 1` turned
    /// off, the frame is committed and held for the frame interval. The last
    /// frame only clears the final pixel. Afterwards the whole strip is
    /// cleared and committed, so no pixel is left lit.
    pub fn animate<S, D>(&self, strip: &mut S, length: usize, delay: &mut D) -> Result<(), DeviceError>
    where
        S: ChaserStrip,
        D: DelayNs,
    {
        for i in 0..=length {
            set_guarded(strip, length, i, self.active);
            if let Some(previous) = i.checked_sub(1) {
                set_guarded(strip, length, previous, OFF);
            }
            strip.show()?;
            delay.delay_ms(self.interval_ms);
        }

        strip.clear();
        strip.show()
    }

    /// Total blocking time of one [`animate`](Self::animate) call.
    pub fn duration_ms(&self, length: usize) -> u32 {
        self.interval_ms.saturating_mul(length as u32 + 1)
    }
}

/// Stepwise chase that wraps around the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chaser {
    length: usize,
    position: usize,
    started: bool,
}

impl Chaser {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            position: 0,
            started: false,
        }
    }

    /// Index of the pixel lit by the most recent [`advance`](Self::advance).
    pub fn lit(&self) -> Option<usize> {
        self.started.then_some(self.position)
    }

    /// Lights the next pixel, turns off its predecessor and commits.
    pub fn advance<S: ChaserStrip>(&mut self, strip: &mut S, color: Rgb) -> Result<(), DeviceError> {
        if self.length == 0 {
            return Ok(());
        }

        if self.started {
            set_guarded(strip, self.length, self.position, OFF);
            self.position = (self.position + 1) % self.length;
        }
        self.started = true;

        set_guarded(strip, self.length, self.position, color);
        strip.show()
    }
}
