//! Shared test infrastructure for exhibit-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use exhibit_sequencer::colors::OFF;
use exhibit_sequencer::{
    Board, ChaserStrip, DeviceError, DeviceSet, DigitDisplay, Rgb, SensorError, StatusLamp,
    TextPanel, TriggerSource,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

pub const SEED: u64 = 0x5EED;

// ============================================================================
// Event log
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Which {
    Primary,
    Secondary,
}

/// Every committed device operation and every delay, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StripBegin(Which, u8),
    StripShow(Which),
    DigitShow(Which, i32, u8),
    DigitClear(Which),
    Lamp(Rgb),
    PanelClear,
    Backlight(Rgb),
    Cursor(u8, u8),
    Print(String),
    Blink(bool),
    Delay(u32),
}

#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn total_delay_ms(&self) -> u64 {
        self.0
            .borrow()
            .iter()
            .map(|e| match e {
                Event::Delay(ms) => u64::from(*ms),
                _ => 0,
            })
            .sum()
    }
}

// ============================================================================
// Mock devices
// ============================================================================

pub struct MockStrip {
    which: Which,
    log: Log,
    pub pixels: Vec<Rgb>,
    pub brightness: Option<u8>,
    pub out_of_range_writes: usize,
    pub fail_show: bool,
}

impl MockStrip {
    pub fn new(which: Which, len: usize, log: &Log) -> Self {
        Self {
            which,
            log: log.clone(),
            pixels: vec![OFF; len],
            brightness: None,
            out_of_range_writes: 0,
            fail_show: false,
        }
    }

    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|p| **p != OFF).count()
    }
}

impl ChaserStrip for MockStrip {
    fn begin(&mut self, brightness: u8) -> Result<(), DeviceError> {
        self.brightness = Some(brightness);
        self.log.push(Event::StripBegin(self.which, brightness));
        Ok(())
    }

    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        match self.pixels.get_mut(index) {
            Some(pixel) => *pixel = color,
            None => self.out_of_range_writes += 1,
        }
    }

    fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = OFF);
    }

    fn show(&mut self) -> Result<(), DeviceError> {
        if self.fail_show {
            return Err(DeviceError::Bus);
        }
        self.log.push(Event::StripShow(self.which));
        Ok(())
    }
}

pub struct MockDigit {
    which: Which,
    log: Log,
    pub shown: Option<(i32, u8)>,
    pub fail: bool,
}

impl MockDigit {
    pub fn new(which: Which, log: &Log) -> Self {
        Self {
            which,
            log: log.clone(),
            shown: None,
            fail: false,
        }
    }
}

impl DigitDisplay for MockDigit {
    fn show_number(&mut self, value: i32, brightness: u8) -> Result<(), DeviceError> {
        if self.fail {
            return Err(DeviceError::Bus);
        }
        self.shown = Some((value, brightness));
        self.log.push(Event::DigitShow(self.which, value, brightness));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DeviceError> {
        self.shown = None;
        self.log.push(Event::DigitClear(self.which));
        Ok(())
    }
}

pub struct MockLamp {
    log: Log,
    pub color: Rgb,
}

impl MockLamp {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            color: OFF,
        }
    }
}

impl StatusLamp for MockLamp {
    fn set_color(&mut self, color: Rgb) -> Result<(), DeviceError> {
        self.color = color;
        self.log.push(Event::Lamp(color));
        Ok(())
    }
}

pub struct MockPanel {
    log: Log,
    pub rows: [String; 2],
    pub cursor: (u8, u8),
    pub backlight: Rgb,
    pub blink: bool,
}

impl MockPanel {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            rows: [String::new(), String::new()],
            cursor: (0, 0),
            backlight: OFF,
            blink: false,
        }
    }
}

impl TextPanel for MockPanel {
    fn clear(&mut self) -> Result<(), DeviceError> {
        self.rows = [String::new(), String::new()];
        self.cursor = (0, 0);
        self.log.push(Event::PanelClear);
        Ok(())
    }

    fn set_backlight(&mut self, color: Rgb) -> Result<(), DeviceError> {
        self.backlight = color;
        self.log.push(Event::Backlight(color));
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DeviceError> {
        self.cursor = (col, row);
        self.log.push(Event::Cursor(col, row));
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<(), DeviceError> {
        let (col, row) = self.cursor;
        let line = &mut self.rows[usize::from(row)];
        let mut chars: Vec<char> = line.chars().collect();
        chars.resize(usize::from(col), ' ');
        chars.extend(text.chars());
        *line = chars.into_iter().collect();
        self.log.push(Event::Print(text.to_string()));
        Ok(())
    }

    fn set_blink(&mut self, enabled: bool) -> Result<(), DeviceError> {
        self.blink = enabled;
        self.log.push(Event::Blink(enabled));
        Ok(())
    }
}

/// Delay that only records how long it was asked to block.
pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::Delay(ns / 1_000_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.push(Event::Delay(us / 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::Delay(ms));
    }
}

pub struct MockBoard;

impl Board for MockBoard {
    type Strip = MockStrip;
    type Digit = MockDigit;
    type Lamp = MockLamp;
    type Panel = MockPanel;
    type Delay = MockDelay;
    type Rng = SmallRng;
}

/// Device set with physical strip lengths matching the given profile lengths.
pub fn devices(log: &Log, primary_len: usize, secondary_len: usize) -> DeviceSet<MockBoard> {
    DeviceSet::new(
        MockStrip::new(Which::Primary, primary_len, log),
        MockStrip::new(Which::Secondary, secondary_len, log),
        MockDigit::new(Which::Primary, log),
        MockDigit::new(Which::Secondary, log),
        MockLamp::new(log),
        MockPanel::new(log),
    )
}

pub fn rng() -> SmallRng {
    SmallRng::seed_from_u64(SEED)
}

// ============================================================================
// Snapshot
// ============================================================================

/// Observable state of every device.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub primary_pixels: Vec<Rgb>,
    pub secondary_pixels: Vec<Rgb>,
    pub primary_brightness: Option<u8>,
    pub secondary_brightness: Option<u8>,
    pub primary_digit: Option<(i32, u8)>,
    pub secondary_digit: Option<(i32, u8)>,
    pub lamp: Rgb,
    pub rows: [String; 2],
    pub backlight: Rgb,
    pub blink: bool,
}

pub fn snapshot(devices: &DeviceSet<MockBoard>) -> Snapshot {
    Snapshot {
        primary_pixels: devices.primary_strip.pixels.clone(),
        secondary_pixels: devices.secondary_strip.pixels.clone(),
        primary_brightness: devices.primary_strip.brightness,
        secondary_brightness: devices.secondary_strip.brightness,
        primary_digit: devices.primary_digit.shown,
        secondary_digit: devices.secondary_digit.shown,
        lamp: devices.status_lamp.color,
        rows: devices.text_panel.rows.clone(),
        backlight: devices.text_panel.backlight,
        blink: devices.text_panel.blink,
    }
}

// ============================================================================
// Scripted sensor
// ============================================================================

/// Sensor returning pre-recorded samples; times out once the script runs dry.
pub struct ScriptedSource<T> {
    samples: VecDeque<Result<T, SensorError>>,
    pub reads: usize,
}

impl<T> ScriptedSource<T> {
    pub fn new(samples: impl IntoIterator<Item = Result<T, SensorError>>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            reads: 0,
        }
    }

    pub fn values(values: impl IntoIterator<Item = T>) -> Self {
        Self::new(values.into_iter().map(Ok))
    }

    pub fn push(&mut self, sample: Result<T, SensorError>) {
        self.samples.push_back(sample);
    }
}

impl<T: exhibit_sequencer::Sample> TriggerSource for ScriptedSource<T> {
    type Sample = T;

    fn read(&mut self) -> Result<T, SensorError> {
        self.reads += 1;
        self.samples.pop_front().unwrap_or(Err(SensorError::Timeout))
    }
}

// ============================================================================
// Expected device traffic
// ============================================================================

/// Events a text-panel update produces.
pub fn panel_events(lines: [&str; 2], backlight: Rgb, blink: bool) -> Vec<Event> {
    vec![
        Event::PanelClear,
        Event::Blink(blink),
        Event::Backlight(backlight),
        Event::Cursor(0, 0),
        Event::Print(lines[0].to_string()),
        Event::Cursor(0, 1),
        Event::Print(lines[1].to_string()),
    ]
}

/// Events a baseline reset produces.
pub fn baseline_events(profile: &exhibit_sequencer::ExhibitProfile) -> Vec<Event> {
    let mut events = vec![Event::Lamp(profile.idle.lamp)];
    events.extend(panel_events(profile.idle.message, profile.idle.backlight, false));
    events.push(Event::StripBegin(Which::Primary, profile.primary_strip.brightness()));
    events.push(Event::StripShow(Which::Primary));
    events.push(Event::StripBegin(Which::Secondary, profile.secondary_strip.brightness()));
    events.push(Event::StripShow(Which::Secondary));
    events.push(Event::DigitClear(Which::Primary));
    events.push(Event::DigitClear(Which::Secondary));
    events
}

/// Events one blocking chase produces.
pub fn chase_events(which: Which, length: usize, interval_ms: u32) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..=length {
        events.push(Event::StripShow(which));
        events.push(Event::Delay(interval_ms));
    }
    events.push(Event::StripShow(which));
    events
}
