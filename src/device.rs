//! Output device traits and the device set owned by an exhibit.
//!
//! The exhibit never talks to driver libraries directly. Implement these
//! traits for your hardware (WS2812 strips, TM1637 digit displays, an RGB
//! LCD module, a PWM lamp...) and bundle the concrete types in a [`Board`].

use crate::colors::Rgb;
use embedded_hal::delay::DelayNs;
use rand::RngCore;

/// Errors reported by output devices when a write or commit fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// Bus transfer failed (SPI, I2C, one-wire timing...).
    Bus,
    /// Device did not acknowledge in time.
    Timeout,
    /// Device was used before `begin`.
    NotInitialized,
}

impl core::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DeviceError::Bus => write!(f, "bus transfer failed"),
            DeviceError::Timeout => write!(f, "device timed out"),
            DeviceError::NotInitialized => write!(f, "device used before initialization"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DeviceError {}

/// Role of a device within the [`DeviceSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceRole {
    PrimaryStrip,
    SecondaryStrip,
    PrimaryDigit,
    SecondaryDigit,
    StatusLamp,
    TextPanel,
}

/// Addressable LED strip with a pixel buffer and an explicit commit.
pub trait ChaserStrip {
    /// Initializes the strip and sets its strip-wide brightness.
    ///
    /// Called once at startup and again on every baseline reset, so
    /// implementations must tolerate repeated calls.
    fn begin(&mut self, brightness: u8) -> Result<(), DeviceError>;

    /// Number of physical pixels.
    fn len(&self) -> usize;

    /// Returns true if the strip has no pixels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes a pixel into the buffer. Indices past the end are ignored.
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Turns every pixel in the buffer off.
    fn clear(&mut self);

    /// Pushes the buffer to the LEDs.
    fn show(&mut self) -> Result<(), DeviceError>;
}

/// Numeric display (e.g. four-digit seven-segment module).
pub trait DigitDisplay {
    /// Renders a number at the given brightness level.
    fn show_number(&mut self, value: i32, brightness: u8) -> Result<(), DeviceError>;

    /// Blanks the display.
    fn clear(&mut self) -> Result<(), DeviceError>;
}

/// Single tri-color status lamp.
pub trait StatusLamp {
    fn set_color(&mut self, color: Rgb) -> Result<(), DeviceError>;
}

/// Two-row, cursor-addressed character display with an RGB backlight.
pub trait TextPanel {
    fn clear(&mut self) -> Result<(), DeviceError>;

    fn set_backlight(&mut self, color: Rgb) -> Result<(), DeviceError>;

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DeviceError>;

    /// Prints text at the cursor position.
    fn print(&mut self, text: &str) -> Result<(), DeviceError>;

    /// Enables or disables the blinking text attribute.
    fn set_blink(&mut self, enabled: bool) -> Result<(), DeviceError>;
}

/// Bundles the concrete hardware types of one exhibit.
///
/// Both strips share one type, as do both digit displays.
pub trait Board {
    type Strip: ChaserStrip;
    type Digit: DigitDisplay;
    type Lamp: StatusLamp;
    type Panel: TextPanel;
    /// Blocking delay used for every hold and animation frame.
    type Delay: DelayNs;
    /// Pseudo-random source, seeded once at startup.
    type Rng: RngCore;
}

/// The fixed collection of output devices, addressed by role.
pub struct DeviceSet<B: Board> {
    pub primary_strip: B::Strip,
    pub secondary_strip: B::Strip,
    pub primary_digit: B::Digit,
    pub secondary_digit: B::Digit,
    pub status_lamp: B::Lamp,
    pub text_panel: B::Panel,
}

impl<B: Board> DeviceSet<B> {
    /// Creates a device set from already constructed drivers.
    pub fn new(
        primary_strip: B::Strip,
        secondary_strip: B::Strip,
        primary_digit: B::Digit,
        secondary_digit: B::Digit,
        status_lamp: B::Lamp,
        text_panel: B::Panel,
    ) -> Self {
        Self {
            primary_strip,
            secondary_strip,
            primary_digit,
            secondary_digit,
            status_lamp,
            text_panel,
        }
    }

    /// Returns the strip for the given selector.
    pub fn strip_mut(&mut self, which: StripSelect) -> &mut B::Strip {
        match which {
            StripSelect::Primary => &mut self.primary_strip,
            StripSelect::Secondary => &mut self.secondary_strip,
        }
    }
}

/// Selects one of the two chaser strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripSelect {
    Primary,
    Secondary,
}

impl StripSelect {
    pub fn role(self) -> DeviceRole {
        match self {
            StripSelect::Primary => DeviceRole::PrimaryStrip,
            StripSelect::Secondary => DeviceRole::SecondaryStrip,
        }
    }
}

/// Selects which digit display(s) a phase renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitSelect {
    Primary,
    Secondary,
    Both,
}
