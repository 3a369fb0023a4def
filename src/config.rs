//! Compiled-in configuration.
//!
//! Every threshold, duration and step count an exhibit uses is a named
//! constant here. [`ExhibitProfile`] gathers the per-exhibit values; its
//! fields are public so firmware can override any of them before startup.

use crate::colors::{self, Rgb};

/// Hold time of each chaser animation frame.
pub const STRIP_FRAME_INTERVAL_MS: u32 = 400;
/// Strip-wide brightness applied on `begin`.
pub const STRIP_BRIGHTNESS: u8 = 50;

pub const WATERING_PRIMARY_STRIP_LENGTH: usize = 8;
pub const WATERING_SECONDARY_STRIP_LENGTH: usize = 10;
pub const HEAT_PRIMARY_STRIP_LENGTH: usize = 8;
pub const HEAT_SECONDARY_STRIP_LENGTH: usize = 10;
pub const TRAFFIC_STRIP_LENGTH: usize = 11;

pub const WATERING_POLL_INTERVAL_MS: u32 = 1_000;
pub const HEAT_POLL_INTERVAL_MS: u32 = 1_500;
pub const TRAFFIC_POLL_INTERVAL_MS: u32 = 1_000;

/// Inclusive range of pseudo-random values shown on the digit displays.
pub const RANDOM_VALUE_MIN: i32 = 20;
pub const RANDOM_VALUE_MAX: i32 = 40;

/// Minimum rise (degrees) before a temperature change counts as an increase.
pub const TEMPERATURE_HYSTERESIS: f32 = 0.2;
/// Whole degrees above the armed reading at which the heat alert fires.
pub const TEMPERATURE_TARGET_INCREASE: f32 = 1.0;

/// Raw light-level drop (0-1023 scale) that counts as a passing car.
pub const LIGHT_DROP_THRESHOLD: i32 = 50;
/// Fixed number shown by the traffic exhibit.
pub const TRAFFIC_CAPACITY: i32 = 24;

/// Highest brightness level used on the digit displays.
pub const DIGIT_BRIGHTNESS: u8 = 4;

pub const SLOT_MACHINE_SPINS: u16 = 10;
pub const SLOT_MACHINE_INTERVAL_MS: u32 = 100;
pub const FADE_IN_INTERVAL_MS: u32 = 200;

pub const RAMP_END: u16 = 58;
pub const RAMP_STRIDE: u16 = 2;
pub const RAMP_INTERVAL_MS: u32 = 150;

pub const WARNING_HOLD_MS: u32 = 5_000;
pub const INSTRUCTION_HOLD_MS: u32 = 0;
pub const SUCCESS_HOLD_MS: u32 = 2_000;
pub const LAMP_HOLD_MS: u32 = 5_000;

/// Character cells per text panel row.
pub const PANEL_COLUMNS: usize = 16;
pub const PANEL_ROWS: u8 = 2;

/// Length and brightness of a chaser strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StripConfig {
    length: usize,
    brightness: u8,
}

impl StripConfig {
    /// Creates a strip configuration. Returns `None` for a zero length.
    pub const fn new(length: usize, brightness: u8) -> Option<Self> {
        if length == 0 {
            return None;
        }
        Some(Self { length, brightness })
    }

    pub const fn length(&self) -> usize {
        self.length
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }
}

/// Canonical at-rest appearance of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleScene {
    pub lamp: Rgb,
    pub backlight: Rgb,
    pub message: [&'static str; 2],
}

/// Everything that distinguishes one exhibit's hardware setup from another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExhibitProfile {
    pub name: &'static str,
    pub primary_strip: StripConfig,
    pub secondary_strip: StripConfig,
    pub poll_interval_ms: u32,
    pub frame_interval_ms: u32,
    /// Color of the lit pixel in chaser animations.
    pub chaser_color: Rgb,
    pub digit_brightness: u8,
    pub idle: IdleScene,
}

const fn strip(length: usize) -> StripConfig {
    match StripConfig::new(length, STRIP_BRIGHTNESS) {
        Some(config) => config,
        None => panic!("strip length must be non-zero"),
    }
}

impl ExhibitProfile {
    /// Touch-triggered plant watering panel.
    pub fn watering() -> Self {
        Self {
            name: "watering",
            primary_strip: strip(WATERING_PRIMARY_STRIP_LENGTH),
            secondary_strip: strip(WATERING_SECONDARY_STRIP_LENGTH),
            poll_interval_ms: WATERING_POLL_INTERVAL_MS,
            frame_interval_ms: STRIP_FRAME_INTERVAL_MS,
            chaser_color: colors::BLUE,
            digit_brightness: DIGIT_BRIGHTNESS,
            idle: IdleScene {
                lamp: colors::dim(colors::BLUE, 1, 10),
                backlight: Rgb::new(0, 90, 255),
                message: ["Touch the plant", "to water it"],
            },
        }
    }

    /// Temperature-triggered heat panel.
    pub fn heat() -> Self {
        Self {
            name: "heat",
            primary_strip: strip(HEAT_PRIMARY_STRIP_LENGTH),
            secondary_strip: strip(HEAT_SECONDARY_STRIP_LENGTH),
            poll_interval_ms: HEAT_POLL_INTERVAL_MS,
            frame_interval_ms: STRIP_FRAME_INTERVAL_MS,
            chaser_color: colors::RED,
            digit_brightness: DIGIT_BRIGHTNESS,
            idle: IdleScene {
                lamp: colors::dim(colors::ORANGE, 1, 10),
                backlight: Rgb::new(255, 140, 40),
                message: ["Breathe on the", "heat sensor"],
            },
        }
    }

    /// Light-triggered traffic panel.
    pub fn traffic() -> Self {
        Self {
            name: "traffic",
            primary_strip: strip(TRAFFIC_STRIP_LENGTH),
            secondary_strip: strip(TRAFFIC_STRIP_LENGTH),
            poll_interval_ms: TRAFFIC_POLL_INTERVAL_MS,
            frame_interval_ms: STRIP_FRAME_INTERVAL_MS,
            chaser_color: colors::YELLOW,
            digit_brightness: DIGIT_BRIGHTNESS,
            idle: IdleScene {
                lamp: colors::dim(colors::GREEN, 1, 10),
                backlight: Rgb::new(60, 255, 60),
                message: ["Drive a car over", "the light sensor"],
            },
        }
    }
}
