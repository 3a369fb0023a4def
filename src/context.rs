//! Owned exhibit state and the baseline/reset controller.

use crate::colors::Rgb;
use crate::config::{ExhibitProfile, IdleScene, PANEL_COLUMNS, StripConfig};
use crate::device::{
    Board, ChaserStrip, DeviceRole, DeviceSet, DigitDisplay, StatusLamp, StripSelect, TextPanel,
};
use crate::error::{DeviceResultExt, ExhibitError};
use crate::strip::StripAnimator;
use embedded_hal::delay::DelayNs;

/// Devices, delay, random source and profile of one exhibit.
///
/// Passed by `&mut` into the sequencer and the poll loop; nothing else
/// touches the hardware.
pub struct ExhibitContext<B: Board> {
    devices: DeviceSet<B>,
    delay: B::Delay,
    rng: B::Rng,
    profile: ExhibitProfile,
}

/// Cuts a line to the panel width on a character boundary.
fn fit_line(line: &str) -> &str {
    match line.char_indices().nth(PANEL_COLUMNS) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

impl<B: Board> ExhibitContext<B> {
    pub fn new(devices: DeviceSet<B>, delay: B::Delay, rng: B::Rng, profile: ExhibitProfile) -> Self {
        Self {
            devices,
            delay,
            rng,
            profile,
        }
    }

    pub fn profile(&self) -> &ExhibitProfile {
        &self.profile
    }

    pub fn devices(&self) -> &DeviceSet<B> {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut DeviceSet<B> {
        &mut self.devices
    }

    pub fn delay_mut(&mut self) -> &mut B::Delay {
        &mut self.delay
    }

    pub fn rng_mut(&mut self) -> &mut B::Rng {
        &mut self.rng
    }

    /// Splits the context back into its parts.
    pub fn into_parts(self) -> (DeviceSet<B>, B::Delay, B::Rng) {
        (self.devices, self.delay, self.rng)
    }

    pub fn strip_config(&self, which: StripSelect) -> StripConfig {
        match which {
            StripSelect::Primary => self.profile.primary_strip,
            StripSelect::Secondary => self.profile.secondary_strip,
        }
    }

    /// Blocks for `ms` milliseconds.
    pub fn hold(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Initializes both strips. Must run once before any other device use.
    pub fn init(&mut self) -> Result<(), ExhibitError> {
        for which in [StripSelect::Primary, StripSelect::Secondary] {
            let brightness = self.strip_config(which).brightness();
            self.devices
                .strip_mut(which)
                .begin(brightness)
                .on(which.role())?;
        }
        Ok(())
    }

    /// Runs the blocking chase animation on one strip.
    pub fn animate(&mut self, which: StripSelect) -> Result<(), ExhibitError> {
        let length = self.strip_config(which).length();
        let animator = StripAnimator::new(self.profile.chaser_color, self.profile.frame_interval_ms);
        animator
            .animate(self.devices.strip_mut(which), length, &mut self.delay)
            .on(which.role())
    }

    /// Clears the panel and shows two lines under the given backlight.
    pub fn show_text(&mut self, lines: [&str; 2], backlight: Rgb, blink: bool) -> Result<(), ExhibitError> {
        let panel = &mut self.devices.text_panel;
        let role = DeviceRole::TextPanel;

        panel.clear().on(role)?;
        panel.set_blink(blink).on(role)?;
        panel.set_backlight(backlight).on(role)?;
        for (row, line) in (0u8..).zip(lines) {
            panel.set_cursor(0, row).on(role)?;
            panel.print(fit_line(line)).on(role)?;
        }
        Ok(())
    }

    /// Restores every device to the exhibit's idle appearance.
    ///
    /// Idempotent: calling it again leaves the devices unchanged. Trigger
    /// latches live in the policy and are cleared there.
    pub fn reset_all(&mut self) -> Result<(), ExhibitError> {
        let IdleScene {
            lamp,
            backlight,
            message,
        } = self.profile.idle;

        self.devices
            .status_lamp
            .set_color(lamp)
            .on(DeviceRole::StatusLamp)?;

        self.show_text(message, backlight, false)?;

        for which in [StripSelect::Primary, StripSelect::Secondary] {
            let brightness = self.strip_config(which).brightness();
            let strip = self.devices.strip_mut(which);
            strip.begin(brightness).on(which.role())?;
            strip.clear();
            strip.show().on(which.role())?;
        }

        self.devices
            .primary_digit
            .clear()
            .on(DeviceRole::PrimaryDigit)?;
        self.devices
            .secondary_digit
            .clear()
            .on(DeviceRole::SecondaryDigit)?;

        Ok(())
    }
}
